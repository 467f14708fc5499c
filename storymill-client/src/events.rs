//! Connection lifecycle event handlers
//!
//! Callback hooks for conditions that concern the whole client rather
//! than a single request:
//!
//! - [`on_unreachable`](EventHandlers::on_unreachable): a request
//!   failed at transport level (connect error, timeout)
//! - [`on_update_required`](EventHandlers::on_update_required): the
//!   server answered HTTP 426 and refuses this client version
//!
//! Handlers are injected into an [`ApiClient`](crate::ApiClient) at
//! construction and live exactly as long as it does; there is no
//! process-wide listener registry.
//!
//! # Example
//!
//! ```rust
//! use storymill_client::EventHandlers;
//!
//! let handlers = EventHandlers::new()
//!     .on_unreachable(|message| eprintln!("server unreachable: {}", message))
//!     .on_update_required(|| eprintln!("please update the app"));
//! assert!(handlers.has_any());
//! ```

use std::fmt;
use std::sync::Arc;

/// Type alias for the on_unreachable callback.
pub type OnUnreachableCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Type alias for the on_update_required callback.
pub type OnUpdateRequiredCallback = Arc<dyn Fn() + Send + Sync>;

/// Connection lifecycle event handlers.
///
/// All handlers are optional; the builder registers only the ones the
/// caller needs. Handlers are `Send + Sync` so they can fire from any
/// task polling through the client.
#[derive(Clone, Default)]
pub struct EventHandlers {
    pub(crate) on_unreachable: Option<OnUnreachableCallback>,
    pub(crate) on_update_required: Option<OnUpdateRequiredCallback>,
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("on_unreachable", &self.on_unreachable.is_some())
            .field("on_update_required", &self.on_update_required.is_some())
            .finish()
    }
}

impl EventHandlers {
    /// Create a new empty `EventHandlers` (no callbacks registered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked when a request fails at transport
    /// level. The callback receives a human-readable description.
    pub fn on_unreachable(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_unreachable = Some(Arc::new(f));
        self
    }

    /// Register a callback invoked when the server demands a newer
    /// client version (HTTP 426).
    pub fn on_update_required(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_update_required = Some(Arc::new(f));
        self
    }

    /// Returns `true` if any handler is registered.
    pub fn has_any(&self) -> bool {
        self.on_unreachable.is_some() || self.on_update_required.is_some()
    }

    pub(crate) fn emit_unreachable(&self, message: &str) {
        if let Some(cb) = &self.on_unreachable {
            cb(message);
        }
    }

    pub(crate) fn emit_update_required(&self) {
        if let Some(cb) = &self.on_update_required {
            cb();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_empty_handlers_emit_nothing() {
        let handlers = EventHandlers::new();
        assert!(!handlers.has_any());
        // No handler registered; emitting must be a no-op, not a panic.
        handlers.emit_unreachable("connection refused");
        handlers.emit_update_required();
    }

    #[test]
    fn test_registered_handlers_fire() {
        let unreachable = Arc::new(AtomicUsize::new(0));
        let updates = Arc::new(AtomicUsize::new(0));

        let handlers = {
            let unreachable = Arc::clone(&unreachable);
            let updates = Arc::clone(&updates);
            EventHandlers::new()
                .on_unreachable(move |_| {
                    unreachable.fetch_add(1, Ordering::SeqCst);
                })
                .on_update_required(move || {
                    updates.fetch_add(1, Ordering::SeqCst);
                })
        };

        assert!(handlers.has_any());
        handlers.emit_unreachable("connection refused");
        handlers.emit_unreachable("timed out");
        handlers.emit_update_required();

        assert_eq!(unreachable.load(Ordering::SeqCst), 2);
        assert_eq!(updates.load(Ordering::SeqCst), 1);
    }
}
