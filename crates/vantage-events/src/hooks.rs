//! Subscriber registry for render lifecycle events.
//!
//! Hooks fit into the render pipeline as follows:
//!
//! ```text
//! resolved file + merged parameters
//!   → BEFORE-RENDER HOOKS ← (parameter injection, caching, short-circuit)
//!   → template executor
//!   → AFTER-RENDER HOOKS ← (output transformation, collection)
//!   → final output
//! ```
//!
//! Before-render subscribers run in registration order until one stops the
//! event; after-render subscribers always all run, each seeing the output
//! as left by the previous one.

use std::fmt;
use std::rc::Rc;

use crate::events::{AfterRender, BeforeRender};

/// Type alias for before-render subscriber functions.
pub type BeforeRenderFn = Rc<dyn Fn(&mut BeforeRender)>;

/// Type alias for after-render subscriber functions.
pub type AfterRenderFn = Rc<dyn Fn(&mut AfterRender)>;

/// Ordered collection of render lifecycle subscribers.
///
/// Subscribers are plain closures over mutable event payloads; they cannot
/// fail. A before-render subscriber that needs to abort a render does so by
/// stopping the event with output it controls.
///
/// # Example
///
/// ```rust
/// use vantage_events::RenderHooks;
///
/// let hooks = RenderHooks::new()
///     .before_render(|event| {
///         if event.file().ends_with("maintenance.jinja") {
///             event.stop_with("down for maintenance");
///         }
///     })
///     .after_render(|event| {
///         let wrapped = format!("<!-- rendered -->{}", event.result());
///         event.set_result(wrapped);
///     });
/// # let _ = hooks;
/// ```
#[derive(Clone, Default)]
pub struct RenderHooks {
    before: Vec<BeforeRenderFn>,
    after: Vec<AfterRenderFn>,
}

impl RenderHooks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no subscribers are registered.
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Adds a before-render subscriber.
    pub fn before_render<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut BeforeRender) + 'static,
    {
        self.before.push(Rc::new(f));
        self
    }

    /// Adds an after-render subscriber.
    pub fn after_render<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut AfterRender) + 'static,
    {
        self.after.push(Rc::new(f));
        self
    }

    /// Publishes a before-render event.
    ///
    /// Propagation is stoppable: once a subscriber stops the event, the
    /// remaining subscribers are not notified.
    pub fn run_before(&self, event: &mut BeforeRender) {
        for subscriber in &self.before {
            if event.is_stopped() {
                break;
            }
            subscriber(event);
        }
    }

    /// Publishes an after-render event to every subscriber in order.
    pub fn run_after(&self, event: &mut AfterRender) {
        for subscriber in &self.after {
            subscriber(event);
        }
    }
}

impl fmt::Debug for RenderHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderHooks")
            .field("before_count", &self.before.len())
            .field("after_count", &self.after.len())
            .finish()
    }
}
