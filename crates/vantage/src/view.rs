//! The view engine.
//!
//! [`View`] ties the components together: it owns the base path, the theme
//! map, the locale pair, the lifecycle hooks, the executor, and the shared
//! render-state (stack and blocks) that nested renders operate on.
//!
//! # Rendering pipeline
//!
//! ```text
//! reference
//!   → path resolution (base path / entry dir / current dir / alias)
//!   → theme mapping
//!   → locale fallback
//!   → before-render hooks (parameter rewriting, short-circuit)
//!   → frame push → template executor → frame pop
//!   → after-render hooks (output override)
//!   → output
//! ```
//!
//! The frame pop is unconditional: a failing executor unwinds the stack
//! before its error propagates, so a failed render never corrupts relative
//! path resolution for the renders that follow it.
//!
//! # Concurrency
//!
//! A `View` is single-threaded by construction: the render stack and block
//! store use interior mutability so templates holding `&View` can issue
//! nested renders, which makes the type `!Sync`. Concurrent rendering
//! requires one `View` per thread; instances share nothing.

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;
use vantage_events::{AfterRender, BeforeRender, Parameters, RenderHooks};

use crate::blocks::Blocks;
use crate::error::Result;
use crate::executor::{MiniJinjaExecutor, TemplateExecutor};
use crate::locale::{localize, DiskProbe, FileProbe};
use crate::placeholder;
use crate::resolve::{AliasResolver, PathResolver};
use crate::stack::{RenderFrame, RenderStack};
use crate::theme::ThemeMap;

/// Default extension appended to extensionless view references.
pub const DEFAULT_EXTENSION: &str = "jinja";

/// Default source locale for templates on disk.
pub const DEFAULT_SOURCE_LOCALE: &str = "en";

/// A view rendering context.
///
/// Construction is builder style: [`new`](Self::new) takes the base path
/// and the `with_*` methods configure everything else.
///
/// # Example
///
/// ```rust
/// use vantage::{RenderHooks, ThemeMap, View};
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("page.jinja"), "{{ greeting }}, {{ name }}!").unwrap();
///
/// let view = View::new(dir.path())
///     .with_default_parameters([("greeting".to_string(), json!("Hello"))].into_iter().collect());
///
/// let output = view
///     .render("//page", [("name".to_string(), json!("World"))].into_iter().collect())
///     .unwrap();
/// assert_eq!(output, "Hello, World!");
/// ```
pub struct View {
    base_path: PathBuf,
    default_extension: String,
    default_parameters: Parameters,
    theme: ThemeMap,
    locale: Option<String>,
    source_locale: String,
    placeholder_salt: String,
    placeholder_signature: String,
    hooks: RenderHooks,
    executor: Box<dyn TemplateExecutor>,
    aliases: Option<Box<dyn AliasResolver>>,
    probe: Box<dyn FileProbe>,
    stack: RefCell<RenderStack>,
    blocks: RefCell<Blocks>,
}

impl View {
    /// Creates a view context rooted at `base_path`.
    ///
    /// Defaults: extension [`DEFAULT_EXTENSION`], source locale
    /// [`DEFAULT_SOURCE_LOCALE`], no target locale, empty theme, no hooks,
    /// a [`MiniJinjaExecutor`], and a real-filesystem locale probe.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            default_extension: DEFAULT_EXTENSION.to_string(),
            default_parameters: Parameters::new(),
            theme: ThemeMap::new(),
            locale: None,
            source_locale: DEFAULT_SOURCE_LOCALE.to_string(),
            placeholder_salt: String::new(),
            placeholder_signature: placeholder::signature(""),
            hooks: RenderHooks::new(),
            executor: Box::new(MiniJinjaExecutor::new()),
            aliases: None,
            probe: Box::new(DiskProbe),
            stack: RefCell::new(RenderStack::default()),
            blocks: RefCell::new(Blocks::new()),
        }
    }

    /// Sets the extension appended to extensionless references.
    pub fn with_default_extension(mut self, extension: impl Into<String>) -> Self {
        self.default_extension = extension.into();
        self
    }

    /// Sets the parameters merged into every render.
    pub fn with_default_parameters(mut self, parameters: Parameters) -> Self {
        self.default_parameters = parameters;
        self
    }

    /// Sets the theme map applied to resolved paths.
    pub fn with_theme(mut self, theme: ThemeMap) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the target locale for localized template lookup.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the locale the on-disk templates are written in.
    pub fn with_source_locale(mut self, locale: impl Into<String>) -> Self {
        self.source_locale = locale.into();
        self
    }

    /// Sets the salt that placeholder signatures derive from.
    pub fn with_placeholder_salt(mut self, salt: impl Into<String>) -> Self {
        self.set_placeholder_salt(salt);
        self
    }

    /// Sets the render lifecycle hooks.
    pub fn with_hooks(mut self, hooks: RenderHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replaces the template executor.
    pub fn with_executor(mut self, executor: impl TemplateExecutor + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    /// Wires an alias resolver for `@alias` references.
    pub fn with_aliases(mut self, aliases: impl AliasResolver + 'static) -> Self {
        self.aliases = Some(Box::new(aliases));
        self
    }

    /// Replaces the file-existence probe used by locale fallback.
    pub fn with_probe(mut self, probe: impl FileProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Sets the render nesting depth limit.
    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.stack = RefCell::new(RenderStack::new(limit));
        self
    }

    /// The base path view references resolve against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// The extension appended to extensionless references.
    pub fn default_extension(&self) -> &str {
        &self.default_extension
    }

    /// Changes the default extension.
    pub fn set_default_extension(&mut self, extension: impl Into<String>) {
        self.default_extension = extension.into();
    }

    /// The parameters merged into every render.
    pub fn default_parameters(&self) -> &Parameters {
        &self.default_parameters
    }

    /// Replaces the default parameters.
    pub fn set_default_parameters(&mut self, parameters: Parameters) {
        self.default_parameters = parameters;
    }

    /// The target locale, if localized lookup is enabled.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Sets or clears the target locale.
    pub fn set_locale(&mut self, locale: Option<String>) {
        self.locale = locale;
    }

    /// The locale the on-disk templates are written in.
    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    /// Changes the source locale.
    pub fn set_source_locale(&mut self, locale: impl Into<String>) {
        self.source_locale = locale.into();
    }

    /// Changes the placeholder salt, recomputing the signature.
    pub fn set_placeholder_salt(&mut self, salt: impl Into<String>) {
        self.placeholder_salt = salt.into();
        self.placeholder_signature = placeholder::signature(&self.placeholder_salt);
    }

    /// The signature token derived from the current placeholder salt.
    pub fn placeholder_signature(&self) -> &str {
        &self.placeholder_signature
    }

    /// Current render nesting depth; zero between top-level renders.
    pub fn depth(&self) -> usize {
        self.stack.borrow().depth()
    }

    /// Stores a named content block, overwriting any previous content.
    pub fn set_block(&self, id: impl Into<String>, content: impl Into<String>) {
        self.blocks.borrow_mut().set(id, content);
    }

    /// Returns the content of a named block.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::BlockNotFound`](crate::ViewError::BlockNotFound)
    /// if no block has that id.
    pub fn block(&self, id: &str) -> Result<String> {
        self.blocks.borrow().get(id).map(str::to_string)
    }

    /// Returns true if a block with the given id exists. Never fails.
    pub fn has_block(&self, id: &str) -> bool {
        self.blocks.borrow().has(id)
    }

    /// Removes a named block, returning its content.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::BlockNotFound`](crate::ViewError::BlockNotFound)
    /// if no block has that id.
    pub fn remove_block(&self, id: &str) -> Result<String> {
        self.blocks.borrow_mut().remove(id)
    }

    /// Renders the view named by `reference`.
    ///
    /// The reference is resolved against the current render state (see
    /// [`PathResolver`]), themed, localized, and executed with the default
    /// parameters merged under `parameters` — explicit values win on key
    /// collision.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidReference`](crate::ViewError::InvalidReference)
    /// when the reference cannot be resolved,
    /// [`ViewError::DepthExceeded`](crate::ViewError::DepthExceeded) when
    /// nesting passes the configured limit, and
    /// [`ViewError::Execution`](crate::ViewError::Execution) when the
    /// executor fails. Execution errors propagate only after the render
    /// frame has been popped.
    pub fn render(&self, reference: &str, parameters: Parameters) -> Result<String> {
        let (current_dir, root_dir) = {
            let stack = self.stack.borrow();
            let current = stack
                .current_dir()
                .map_or_else(|| self.base_path.clone(), Path::to_path_buf);
            let root = stack
                .root_dir()
                .map_or_else(|| current.clone(), Path::to_path_buf);
            (current, root)
        };

        let resolver = PathResolver::new(
            &self.base_path,
            &self.default_extension,
            self.aliases.as_deref(),
        );
        let requested = resolver.resolve(reference, Some(&current_dir), Some(&root_dir))?;
        let themed = self.theme.apply(&requested);

        self.render_at(requested, themed, self.merge_parameters(parameters))
    }

    /// Renders the template file at `path` directly.
    ///
    /// Path resolution and theming are skipped; locale fallback, hooks, and
    /// frame bookkeeping behave exactly as in [`render`](Self::render).
    pub fn render_file(&self, path: impl Into<PathBuf>, parameters: Parameters) -> Result<String> {
        let path = path.into();
        self.render_at(path.clone(), path, self.merge_parameters(parameters))
    }

    fn merge_parameters(&self, parameters: Parameters) -> Parameters {
        let mut merged = self.default_parameters.clone();
        for (name, value) in parameters {
            merged.insert(name, value);
        }
        merged
    }

    fn render_at(&self, requested: PathBuf, themed: PathBuf, parameters: Parameters) -> Result<String> {
        let resolved = match &self.locale {
            Some(locale) => localize(&themed, locale, &self.source_locale, self.probe.as_ref()),
            None => themed,
        };
        debug!(file = %resolved.display(), depth = self.depth(), "rendering view");

        let mut before = BeforeRender::new(resolved.clone(), parameters);
        self.hooks.run_before(&mut before);
        let (parameters, substitute) = before.into_outcome();

        let output = match substitute {
            Some(output) => output,
            None => {
                let frame = RenderFrame::new(requested, resolved.clone(), parameters.clone());
                self.stack.borrow_mut().push(frame)?;
                let result = self.executor.execute(self, &resolved, &parameters);
                self.stack.borrow_mut().pop();
                result?
            }
        };

        let mut after = AfterRender::new(resolved, parameters, output);
        self.hooks.run_after(&mut after);
        Ok(after.into_result())
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("base_path", &self.base_path)
            .field("default_extension", &self.default_extension)
            .field("locale", &self.locale)
            .field("source_locale", &self.source_locale)
            .field("theme_rules", &self.theme.len())
            .field("depth", &self.stack.borrow().depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use serde_json::json;
    use std::rc::Rc;

    /// Executor that records the parameters of every execution.
    struct RecordingExecutor {
        calls: Rc<RefCell<Vec<(PathBuf, Parameters)>>>,
        output: String,
    }

    impl RecordingExecutor {
        fn new(output: &str) -> (Self, Rc<RefCell<Vec<(PathBuf, Parameters)>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    calls: calls.clone(),
                    output: output.to_string(),
                },
                calls,
            )
        }
    }

    impl TemplateExecutor for RecordingExecutor {
        fn execute(&self, _view: &View, path: &Path, parameters: &Parameters) -> Result<String> {
            self.calls
                .borrow_mut()
                .push((path.to_path_buf(), parameters.clone()));
            Ok(self.output.clone())
        }
    }

    #[test]
    fn test_defaults() {
        let view = View::new("/srv/views");

        assert_eq!(view.base_path(), Path::new("/srv/views"));
        assert_eq!(view.default_extension(), "jinja");
        assert_eq!(view.locale(), None);
        assert_eq!(view.source_locale(), "en");
        assert_eq!(view.depth(), 0);
        assert!(view.default_parameters().is_empty());
    }

    #[test]
    fn test_setters_mutate_context() {
        let mut view = View::new("/srv/views");

        view.set_default_extension("html");
        view.set_locale(Some("de-DE".into()));
        view.set_source_locale("en-US");
        view.set_default_parameters(Parameters::from_iter([("k".to_string(), json!(1))]));

        assert_eq!(view.default_extension(), "html");
        assert_eq!(view.locale(), Some("de-DE"));
        assert_eq!(view.source_locale(), "en-US");
        assert_eq!(view.default_parameters()["k"], json!(1));
    }

    #[test]
    fn test_render_resolves_against_base_and_merges_parameters() {
        let (executor, calls) = RecordingExecutor::new("out");
        let view = View::new("/srv/views")
            .with_executor(executor)
            .with_default_parameters(Parameters::from_iter([
                ("parameter".to_string(), json!("default")),
                ("kept".to_string(), json!(true)),
            ]));

        let output = view
            .render(
                "//page",
                Parameters::from_iter([("parameter".to_string(), json!("local"))]),
            )
            .unwrap();

        assert_eq!(output, "out");
        let calls = calls.borrow();
        let (path, parameters) = &calls[0];
        assert_eq!(path, Path::new("/srv/views/page.jinja"));
        // The explicit parameter wins; untouched defaults come along.
        assert_eq!(parameters["parameter"], json!("local"));
        assert_eq!(parameters["kept"], json!(true));
    }

    #[test]
    fn test_render_file_skips_resolution_and_theme() {
        let (executor, calls) = RecordingExecutor::new("out");
        let view = View::new("/srv/views")
            .with_theme(ThemeMap::new().map("/elsewhere", "/themed"))
            .with_executor(executor);

        view.render_file("/elsewhere/direct.html", Parameters::new())
            .unwrap();

        assert_eq!(
            calls.borrow()[0].0,
            Path::new("/elsewhere/direct.html"),
        );
    }

    #[test]
    fn test_theme_applies_to_rendered_reference() {
        let (executor, calls) = RecordingExecutor::new("out");
        let view = View::new("/srv/views")
            .with_theme(ThemeMap::new().map("/srv/views", "/srv/themes/dark"))
            .with_executor(executor);

        view.render("//home", Parameters::new()).unwrap();

        assert_eq!(
            calls.borrow()[0].0,
            Path::new("/srv/themes/dark/home.jinja"),
        );
    }

    #[test]
    fn test_stack_is_empty_between_renders() {
        let (executor, _) = RecordingExecutor::new("out");
        let view = View::new("/srv/views").with_executor(executor);

        view.render("//a", Parameters::new()).unwrap();
        assert_eq!(view.depth(), 0);
        view.render("//b", Parameters::new()).unwrap();
        assert_eq!(view.depth(), 0);
    }

    #[test]
    fn test_block_quartet() {
        let view = View::new("/srv/views");

        assert!(!view.has_block("sidebar"));
        view.set_block("sidebar", "<nav/>");
        assert!(view.has_block("sidebar"));
        assert_eq!(view.block("sidebar").unwrap(), "<nav/>");

        assert_eq!(view.remove_block("sidebar").unwrap(), "<nav/>");
        assert!(matches!(
            view.block("sidebar"),
            Err(ViewError::BlockNotFound { .. })
        ));
    }

    #[test]
    fn test_placeholder_signature_tracks_salt() {
        let mut view = View::new("/srv/views");
        let unsalted = view.placeholder_signature().to_string();

        view.set_placeholder_salt("s3cret");
        let salted = view.placeholder_signature().to_string();

        assert_ne!(unsalted, salted);
        assert_eq!(salted.len(), crate::placeholder::SIGNATURE_WIDTH);

        // Same salt, same signature.
        view.set_placeholder_salt("s3cret");
        assert_eq!(view.placeholder_signature(), salted);
    }

    #[test]
    fn test_debug_summarizes_state() {
        let view = View::new("/srv/views").with_locale("fr");
        let debug = format!("{:?}", view);

        assert!(debug.contains("/srv/views"));
        assert!(debug.contains("fr"));
    }
}
