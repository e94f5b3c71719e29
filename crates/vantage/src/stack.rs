//! Render frame bookkeeping.
//!
//! Nested renders are tracked as an explicit stack of frames rather than
//! as implicit host call-stack state. The stack answers the two questions
//! relative reference resolution needs — "where is the view currently
//! executing?" and "where did the outermost render start?" — and bounds
//! nesting depth so a self-referential template cannot recurse without
//! limit.
//!
//! A frame carries two paths. `requested` is the path as resolved from
//! the view reference, before theme or locale mapping; relative
//! references inside the render are resolved against its directory, so a
//! partial rendered from a themed file still finds siblings of the
//! original view. `resolved` is the themed/localized path actually handed
//! to the executor.

use std::path::{Path, PathBuf};

use tracing::warn;
use vantage_events::Parameters;

use crate::error::{Result, ViewError};

/// Default bound on render nesting depth.
pub const DEFAULT_DEPTH_LIMIT: usize = 128;

/// One in-progress render: the file being executed and its parameters.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    requested: PathBuf,
    resolved: PathBuf,
    parameters: Parameters,
}

impl RenderFrame {
    /// Creates a frame for a render of `resolved`, originally requested
    /// as `requested`.
    pub fn new(requested: impl Into<PathBuf>, resolved: impl Into<PathBuf>, parameters: Parameters) -> Self {
        Self {
            requested: requested.into(),
            resolved: resolved.into(),
            parameters,
        }
    }

    /// The path as resolved before theme and locale mapping.
    pub fn requested(&self) -> &Path {
        &self.requested
    }

    /// The themed/localized path handed to the executor.
    pub fn resolved(&self) -> &Path {
        &self.resolved
    }

    /// The parameter set this render runs with.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}

/// Ordered stack of in-progress renders, last-is-current.
///
/// The stack's length always equals the render nesting depth; it is empty
/// between top-level renders. Pushing past the depth limit fails without
/// modifying the stack.
#[derive(Debug)]
pub struct RenderStack {
    frames: Vec<RenderFrame>,
    limit: usize,
}

impl Default for RenderStack {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH_LIMIT)
    }
}

impl RenderStack {
    /// Creates an empty stack with the given depth limit.
    pub fn new(limit: usize) -> Self {
        Self {
            frames: Vec::new(),
            limit,
        }
    }

    /// Pushes a frame for a render that is about to execute.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::DepthExceeded`] when the stack is already at
    /// its depth limit; the frame is not pushed.
    pub fn push(&mut self, frame: RenderFrame) -> Result<()> {
        if self.frames.len() >= self.limit {
            warn!(
                limit = self.limit,
                file = %frame.resolved().display(),
                "render depth limit exceeded"
            );
            return Err(ViewError::DepthExceeded {
                limit: self.limit,
                path: frame.resolved,
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pops the current frame, if any.
    pub fn pop(&mut self) -> Option<RenderFrame> {
        self.frames.pop()
    }

    /// The currently executing frame, if any.
    pub fn current(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }

    /// Directory of the currently executing frame's requested path.
    pub fn current_dir(&self) -> Option<&Path> {
        self.frames.last().and_then(|frame| frame.requested.parent())
    }

    /// Directory of the bottom (entry) frame's requested path.
    ///
    /// Single-slash references resolve against this, so deeply nested
    /// partials can address paths relative to the original entry view.
    pub fn root_dir(&self) -> Option<&Path> {
        self.frames.first().and_then(|frame| frame.requested.parent())
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true between top-level renders.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The configured depth limit.
    pub fn limit(&self) -> usize {
        self.limit
    }
}
