//! View reference resolution.
//!
//! A view reference is a logical name that takes one of four forms:
//!
//! | Form | Resolved against |
//! |------|------------------|
//! | `//name` | the view's base path |
//! | `/name` | the entry view's directory (bottom render frame) |
//! | `@alias/name` | the alias resolver collaborator |
//! | `name` | the current view's directory (top render frame) |
//!
//! After resolution, the default extension is appended when the file name
//! has none, so `//site/index` and `//site/index.jinja` address the same
//! file.
//!
//! The resolver itself is stateless: the caller supplies the current and
//! entry directories from its render stack. The engine substitutes its
//! base path for a missing current directory (and the current directory
//! for a missing entry directory), so inside a render pipeline the
//! `None` failure modes below surface only for alias and empty
//! references.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, ViewError};

/// Expands symbolic path prefixes to concrete directories.
///
/// References beginning with `@` are handed to this collaborator before
/// any other resolution rule applies.
pub trait AliasResolver {
    /// Returns the reference with its alias prefix expanded, or `None`
    /// when no registered alias matches.
    fn expand(&self, reference: &str) -> Option<String>;
}

/// Alias resolver backed by a static prefix map.
///
/// Aliases are registered as `@name` → directory. A reference matches an
/// alias only at a path boundary (`@app` matches `@app/views` but not
/// `@apple`), and the longest matching alias wins.
///
/// # Example
///
/// ```rust
/// use vantage::{AliasResolver, StaticAliases};
///
/// let aliases = StaticAliases::new()
///     .alias("@app", "/srv/app")
///     .alias("@app/views", "/srv/shared/views");
///
/// assert_eq!(
///     aliases.expand("@app/views/home").as_deref(),
///     Some("/srv/shared/views/home"),
/// );
/// assert_eq!(aliases.expand("@unknown/home"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticAliases {
    map: HashMap<String, String>,
}

impl StaticAliases {
    /// Creates an empty alias map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an alias, builder style. `name` includes the leading `@`.
    pub fn alias(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.map.insert(name.into(), target.into());
        self
    }
}

impl AliasResolver for StaticAliases {
    fn expand(&self, reference: &str) -> Option<String> {
        let mut best: Option<(&str, &str)> = None;
        for (name, target) in &self.map {
            if let Some(rest) = reference.strip_prefix(name.as_str()) {
                if !rest.is_empty() && !rest.starts_with('/') {
                    continue;
                }
                if best.map_or(true, |(seen, _)| name.len() > seen.len()) {
                    best = Some((name, target));
                }
            }
        }
        best.map(|(name, target)| format!("{}{}", target, &reference[name.len()..]))
    }
}

/// Resolves logical view references to absolute template paths.
pub struct PathResolver<'a> {
    base_path: &'a Path,
    default_extension: &'a str,
    aliases: Option<&'a dyn AliasResolver>,
}

impl<'a> PathResolver<'a> {
    /// Creates a resolver over a base path and default extension.
    pub fn new(
        base_path: &'a Path,
        default_extension: &'a str,
        aliases: Option<&'a dyn AliasResolver>,
    ) -> Self {
        Self {
            base_path,
            default_extension,
            aliases,
        }
    }

    /// Resolves `reference` to an absolute template path.
    ///
    /// `current_dir` is the directory of the currently executing view,
    /// `root_dir` the directory of the entry view; pass `None` for
    /// whichever has no meaningful value in the calling context.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidReference`] when the reference is
    /// empty, when a relative reference has no `current_dir` to resolve
    /// against, when a single-slash reference has no `root_dir`, or when
    /// an `@alias` reference cannot be expanded.
    pub fn resolve(
        &self,
        reference: &str,
        current_dir: Option<&Path>,
        root_dir: Option<&Path>,
    ) -> Result<PathBuf> {
        if reference.is_empty() {
            return Err(ViewError::invalid_reference(reference));
        }

        let path = if let Some(rest) = reference.strip_prefix("//") {
            self.base_path.join(rest)
        } else if let Some(rest) = reference.strip_prefix('/') {
            match root_dir {
                Some(dir) => dir.join(rest),
                None => return Err(ViewError::invalid_reference(reference)),
            }
        } else if reference.starts_with('@') {
            let expanded = self
                .aliases
                .and_then(|aliases| aliases.expand(reference))
                .ok_or_else(|| ViewError::invalid_reference(reference))?;
            PathBuf::from(expanded)
        } else {
            match current_dir {
                Some(dir) => dir.join(reference),
                None => return Err(ViewError::invalid_reference(reference)),
            }
        };

        Ok(self.with_default_extension(path))
    }

    fn with_default_extension(&self, path: PathBuf) -> PathBuf {
        if self.default_extension.is_empty() || path.extension().is_some() {
            path
        } else {
            path.with_extension(self.default_extension)
        }
    }
}
