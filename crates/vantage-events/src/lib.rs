//! Render lifecycle notifications for the `vantage` view engine.
//!
//! Every render publishes two events: [`BeforeRender`] immediately before
//! the template executor runs, and [`AfterRender`] once output has been
//! captured. Subscribers are registered on a [`RenderHooks`] registry and
//! run in registration order.
//!
//! Both events carry mutable payloads rather than read-only snapshots:
//!
//! - [`BeforeRender`] exposes the merged parameter set for in-place
//!   rewriting, and can stop the render entirely, optionally supplying
//!   substitute output.
//! - [`AfterRender`] exposes the captured output for overriding.
//!
//! # Example
//!
//! ```rust
//! use vantage_events::{BeforeRender, RenderHooks};
//! use serde_json::json;
//!
//! let hooks = RenderHooks::new().before_render(|event| {
//!     event
//!         .parameters_mut()
//!         .insert("injected".into(), json!(true));
//! });
//!
//! let mut event = BeforeRender::new("/views/home.jinja", Default::default());
//! hooks.run_before(&mut event);
//! assert_eq!(event.parameters()["injected"], json!(true));
//! ```

mod events;
mod hooks;

pub use events::{AfterRender, BeforeRender};
pub use hooks::{AfterRenderFn, BeforeRenderFn, RenderHooks};

/// A render parameter set: template variable names mapped to JSON values.
pub type Parameters = serde_json::Map<String, serde_json::Value>;
