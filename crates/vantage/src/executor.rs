//! Template execution abstraction.
//!
//! This module defines the [`TemplateExecutor`] trait which lets the view
//! engine work with different template backends. The default implementation
//! is [`MiniJinjaExecutor`], which reads the template file and renders it
//! with Jinja2-compatible syntax.
//!
//! Executors receive the [`View`] that invoked them, so a concrete executor
//! can issue nested renders ([`View::render`]) and read or set content
//! blocks while a template runs.

use std::path::Path;

use minijinja::{Environment, Value};
use vantage_events::Parameters;

use crate::error::{Result, ViewError};
use crate::view::View;

/// Executes a template file with a parameter set, capturing its output.
///
/// The engine treats execution as opaque: any implementation satisfies the
/// contract identically, whether it interprets the file, interpolates
/// strings, or looks the output up in a table. Failures are reported as
/// [`ViewError::Execution`] wrapping the underlying cause; the engine
/// guarantees its own frame bookkeeping is unwound before such a failure
/// reaches the caller.
pub trait TemplateExecutor {
    /// Executes the template at `path` with the given parameters.
    ///
    /// `view` is the engine issuing the render; implementations use it for
    /// nested renders and block access.
    fn execute(&self, view: &View, path: &Path, parameters: &Parameters) -> Result<String>;
}

/// MiniJinja-based template executor.
///
/// Reads the template file on every execution and renders it with the
/// parameter set as template variables.
///
/// # Example
///
/// ```rust
/// use vantage::{MiniJinjaExecutor, View};
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("hello.jinja"), "Hello, {{ name }}!").unwrap();
///
/// let view = View::new(dir.path()).with_executor(MiniJinjaExecutor::new());
/// let output = view
///     .render("//hello", [("name".to_string(), json!("World"))].into_iter().collect())
///     .unwrap();
/// assert_eq!(output, "Hello, World!");
/// ```
pub struct MiniJinjaExecutor {
    env: Environment<'static>,
}

impl MiniJinjaExecutor {
    /// Creates a new executor with a default MiniJinja environment.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// This allows registering custom filters and functions before the
    /// executor is handed to a [`View`].
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateExecutor for MiniJinjaExecutor {
    fn execute(&self, _view: &View, path: &Path, parameters: &Parameters) -> Result<String> {
        let source =
            std::fs::read_to_string(path).map_err(|err| ViewError::execution(path, err))?;
        let value = Value::from_serialize(parameters);
        self.env
            .render_str(&source, value)
            .map_err(|err| ViewError::execution(path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view_in(dir: &Path) -> View {
        View::new(dir)
    }

    #[test]
    fn test_minijinja_executor_renders_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greeting.jinja");
        std::fs::write(&path, "Hello, {{ name }}!").unwrap();

        let executor = MiniJinjaExecutor::new();
        let parameters = Parameters::from_iter([("name".to_string(), json!("World"))]);
        let output = executor
            .execute(&view_in(dir.path()), &path, &parameters)
            .unwrap();

        assert_eq!(output, "Hello, World!");
    }

    #[test]
    fn test_minijinja_executor_with_loop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.jinja");
        std::fs::write(&path, "{% for item in items %}{{ item }},{% endfor %}").unwrap();

        let executor = MiniJinjaExecutor::new();
        let parameters = Parameters::from_iter([("items".to_string(), json!(["a", "b", "c"]))]);
        let output = executor
            .execute(&view_in(dir.path()), &path, &parameters)
            .unwrap();

        assert_eq!(output, "a,b,c,");
    }

    #[test]
    fn test_missing_file_is_execution_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.jinja");

        let executor = MiniJinjaExecutor::new();
        let err = executor
            .execute(&view_in(dir.path()), &path, &Parameters::new())
            .unwrap_err();

        assert!(matches!(err, ViewError::Execution { .. }));
    }

    #[test]
    fn test_template_syntax_error_is_execution_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jinja");
        std::fs::write(&path, "{{ unclosed").unwrap();

        let executor = MiniJinjaExecutor::new();
        let err = executor
            .execute(&view_in(dir.path()), &path, &Parameters::new())
            .unwrap_err();

        assert!(matches!(err, ViewError::Execution { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_custom_filter_via_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shout.jinja");
        std::fs::write(&path, "{{ word | shout }}").unwrap();

        let mut executor = MiniJinjaExecutor::new();
        executor
            .environment_mut()
            .add_filter("shout", |value: String| format!("{}!", value.to_uppercase()));

        let parameters = Parameters::from_iter([("word".to_string(), json!("hey"))]);
        let output = executor
            .execute(&view_in(dir.path()), &path, &parameters)
            .unwrap();

        assert_eq!(output, "HEY!");
    }
}
