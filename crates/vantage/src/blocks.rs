//! Named content blocks shared across renders.
//!
//! Blocks are a key→content store scoped to one view instance, not to one
//! render: content set while a partial renders is still visible to the
//! enclosing view after the partial returns, and stays until explicitly
//! removed.

use std::collections::HashMap;

use crate::error::{Result, ViewError};

/// Store of named content blocks.
#[derive(Debug, Clone, Default)]
pub struct Blocks {
    entries: HashMap<String, String>,
}

impl Blocks {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the block with the given id.
    pub fn set(&mut self, id: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(id.into(), content.into());
    }

    /// Returns the content of a block.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::BlockNotFound`] if no block has that id.
    pub fn get(&self, id: &str) -> Result<&str> {
        self.entries
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| ViewError::block_not_found(id))
    }

    /// Returns true if a block with the given id exists. Never fails.
    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Removes a block, returning its content.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::BlockNotFound`] if no block has that id.
    pub fn remove(&mut self, id: &str) -> Result<String> {
        self.entries
            .remove(id)
            .ok_or_else(|| ViewError::block_not_found(id))
    }

    /// Returns the number of stored blocks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no blocks are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
