//! Event payloads published around template execution.
//!
//! Unlike flag-style event objects, these payloads are plain structs whose
//! final state *is* the notification result: the engine reads the mutated
//! parameters and output back out of the event after publishing.

use std::path::{Path, PathBuf};

use crate::Parameters;

/// Event published immediately before a view template is executed.
///
/// Subscribers receive mutable access to the parameter set, so values can
/// be injected or rewritten before the executor sees them. A subscriber
/// can also stop the render: [`stop`](Self::stop) suppresses execution and
/// yields empty output, while [`stop_with`](Self::stop_with) supplies
/// substitute output. Once stopped, the event is not delivered to any
/// remaining subscribers.
#[derive(Debug, Clone)]
pub struct BeforeRender {
    file: PathBuf,
    parameters: Parameters,
    stopped: bool,
    substitute: Option<String>,
}

impl BeforeRender {
    /// Creates an event for the given resolved template file.
    pub fn new(file: impl Into<PathBuf>, parameters: Parameters) -> Self {
        Self {
            file: file.into(),
            parameters,
            stopped: false,
            substitute: None,
        }
    }

    /// The resolved template file about to be executed.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The parameter set the executor will receive.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Mutable access to the parameter set.
    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    /// Stops the render. The engine skips execution and yields `""`.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Stops the render and supplies substitute output in place of the
    /// template's.
    pub fn stop_with(&mut self, output: impl Into<String>) {
        self.stopped = true;
        self.substitute = Some(output.into());
    }

    /// Whether a subscriber has stopped the render.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Consumes the event, returning the (possibly rewritten) parameters
    /// and, if the render was stopped, the output to use instead.
    pub fn into_outcome(self) -> (Parameters, Option<String>) {
        let substitute = if self.stopped {
            Some(self.substitute.unwrap_or_default())
        } else {
            None
        };
        (self.parameters, substitute)
    }
}

/// Event published after a render completes, carrying the captured output.
///
/// Subscribers may override the output via [`set_result`](Self::set_result);
/// the engine returns whatever the event holds once all subscribers ran.
#[derive(Debug, Clone)]
pub struct AfterRender {
    file: PathBuf,
    parameters: Parameters,
    result: String,
}

impl AfterRender {
    /// Creates an event for a completed render of `file`.
    pub fn new(file: impl Into<PathBuf>, parameters: Parameters, result: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            parameters,
            result: result.into(),
        }
    }

    /// The template file that was rendered.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The parameter set the executor ran with.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The captured render output.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Replaces the render output.
    pub fn set_result(&mut self, result: impl Into<String>) {
        self.result = result.into();
    }

    /// Consumes the event, returning the final output.
    pub fn into_result(self) -> String {
        self.result
    }
}
