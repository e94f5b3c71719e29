//! Theme path mapping.
//!
//! A theme is a set of path-prefix substitution rules that redirect
//! resolved template paths into an alternate template set. Rules use
//! exact prefix substitution, not pattern matching, and prefixes are
//! compared component-wise: `/views/th` never matches `/views/theme1/x`.
//!
//! Applying a theme never fails. When no rule matches, the path passes
//! through unchanged; when several rules match, the longest source prefix
//! wins, with ties going to the earliest-registered rule.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use vantage::ThemeMap;
//!
//! let theme = ThemeMap::new()
//!     .map("/views", "/views/dark")
//!     .map("/views/mail", "/views/mail-plain");
//!
//! assert_eq!(
//!     theme.apply(Path::new("/views/home.jinja")),
//!     Path::new("/views/dark/home.jinja"),
//! );
//! // The more specific prefix wins.
//! assert_eq!(
//!     theme.apply(Path::new("/views/mail/welcome.jinja")),
//!     Path::new("/views/mail-plain/welcome.jinja"),
//! );
//! // No match: unchanged.
//! assert_eq!(
//!     theme.apply(Path::new("/layouts/main.jinja")),
//!     Path::new("/layouts/main.jinja"),
//! );
//! ```

use std::path::{Path, PathBuf};

/// A single path-prefix substitution rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRule {
    source: PathBuf,
    target: PathBuf,
}

impl ThemeRule {
    /// Creates a rule rewriting the `source` prefix to `target`.
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// The prefix this rule matches.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The prefix substituted on a match.
    pub fn target(&self) -> &Path {
        &self.target
    }
}

/// An ordered collection of [`ThemeRule`]s.
#[derive(Debug, Clone, Default)]
pub struct ThemeMap {
    rules: Vec<ThemeRule>,
}

impl ThemeMap {
    /// Creates an empty theme with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a substitution rule, builder style.
    pub fn map(mut self, source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        self.rules.push(ThemeRule::new(source, target));
        self
    }

    /// Returns true if the theme has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Rewrites `path` through the best-matching rule.
    ///
    /// Deterministic and pure: no I/O, no failure. The rule with the
    /// longest matching source prefix is applied; without a match the
    /// path is returned unchanged.
    pub fn apply(&self, path: &Path) -> PathBuf {
        let mut best: Option<(&Path, &Path)> = None;
        let mut best_len = 0;

        for rule in &self.rules {
            if let Ok(rest) = path.strip_prefix(&rule.source) {
                let len = rule.source.components().count();
                if best.is_none() || len > best_len {
                    best = Some((&rule.target, rest));
                    best_len = len;
                }
            }
        }

        match best {
            Some((target, rest)) => target.join(rest),
            None => path.to_path_buf(),
        }
    }
}
