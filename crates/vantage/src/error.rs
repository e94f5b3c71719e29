//! Error types for view resolution and rendering.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while resolving or rendering a view.
///
/// Resolution and block errors are raised immediately; execution errors
/// are raised only after the render frame has been popped, so a failed
/// render never corrupts relative-path resolution for sibling renders.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A view reference could not be resolved to a template path.
    #[error("cannot resolve view reference \"{reference}\"")]
    InvalidReference {
        /// The reference as given by the caller.
        reference: String,
    },

    /// A block id was read or removed without having been set.
    #[error("block \"{id}\" not found")]
    BlockNotFound {
        /// The requested block id.
        id: String,
    },

    /// The template executor failed.
    #[error("failed to execute template {}: {source}", .path.display())]
    Execution {
        /// The template file that was being executed.
        path: PathBuf,
        /// The underlying executor failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Render nesting exceeded the configured depth limit.
    #[error("render depth limit of {limit} exceeded at {}", .path.display())]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
        /// The template whose render tripped the limit.
        path: PathBuf,
    },
}

impl ViewError {
    /// Creates an [`InvalidReference`](Self::InvalidReference) error.
    pub fn invalid_reference(reference: impl Into<String>) -> Self {
        Self::InvalidReference {
            reference: reference.into(),
        }
    }

    /// Creates a [`BlockNotFound`](Self::BlockNotFound) error.
    pub fn block_not_found(id: impl Into<String>) -> Self {
        Self::BlockNotFound { id: id.into() }
    }

    /// Creates an [`Execution`](Self::Execution) error wrapping `source`.
    pub fn execution<E>(path: impl AsRef<Path>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self::Execution {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
