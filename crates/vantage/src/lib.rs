//! # Vantage - View Resolution & Rendering
//!
//! `vantage` resolves logical view names to template files and orchestrates
//! their rendering: theme-aware path mapping, per-locale directory fallback,
//! nested partial rendering with explicit frame tracking, named content
//! blocks that survive across renders, cache-busting placeholder
//! signatures, and before/after lifecycle notifications.
//!
//! The template language itself is a collaborator: any backend implementing
//! [`TemplateExecutor`] plugs in, and [`MiniJinjaExecutor`] is the bundled
//! default. The crate decides *which* file runs, *with what parameters*,
//! and *in what surrounding state* — never what the template syntax means.
//!
//! ## Core Concepts
//!
//! - [`View`]: owns the base path, configuration, and per-instance render
//!   state; issues renders
//! - View references: `//name` (base path), `/name` (entry view's
//!   directory), `@alias/name` (alias resolver), `name` (current view's
//!   directory)
//! - [`ThemeMap`]: path-prefix substitution enabling alternate template sets
//! - Locale fallback: `views/faq.jinja` → `views/de-DE/faq.jinja` →
//!   `views/de/faq.jinja`, degrading to the original
//! - Blocks: named content set during one render, readable from any later
//!   one until removed
//! - [`RenderHooks`]: before-render subscribers can rewrite parameters or
//!   short-circuit with substitute output; after-render subscribers can
//!   override the output
//!
//! ## Quick Start
//!
//! ```rust
//! use vantage::View;
//! use serde_json::json;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("hello.jinja"), "Hello, {{ name }}!").unwrap();
//!
//! let view = View::new(dir.path());
//! let output = view
//!     .render("//hello", [("name".to_string(), json!("World"))].into_iter().collect())
//!     .unwrap();
//! assert_eq!(output, "Hello, World!");
//! ```
//!
//! ## Nested Partials
//!
//! Templates render partials through the same `View`, and the engine tracks
//! each in-progress render as an explicit stack frame. Relative references
//! resolve against the current frame's directory; `/name` references
//! resolve against the entry view's directory, so a deeply nested partial
//! can still address paths relative to where rendering began.
//!
//! ## Concurrency
//!
//! A `View` holds its render stack and block store behind interior
//! mutability and is `!Sync`: concurrent rendering takes one instance per
//! thread. Instances never share state.

mod blocks;
mod error;
mod executor;
mod locale;
mod placeholder;
mod resolve;
mod stack;
mod theme;
mod view;

pub use blocks::Blocks;
pub use error::{Result, ViewError};
pub use executor::{MiniJinjaExecutor, TemplateExecutor};
pub use locale::{fallback_chain, localize, DiskProbe, FileProbe};
pub use placeholder::{signature, SIGNATURE_WIDTH};
pub use resolve::{AliasResolver, PathResolver, StaticAliases};
pub use stack::{RenderFrame, RenderStack, DEFAULT_DEPTH_LIMIT};
pub use theme::{ThemeMap, ThemeRule};
pub use view::{View, DEFAULT_EXTENSION, DEFAULT_SOURCE_LOCALE};

pub use vantage_events::{AfterRender, BeforeRender, Parameters, RenderHooks};
