//! Hook for reacting to logout.
//!
//! The session layer does not know about pages, routes, or windows. When a
//! logout completes it calls [`Navigator::on_logout`] exactly once and the
//! host decides what that means (redirect to a login screen, close a
//! window, emit an event).

/// Receives the logout signal.
///
/// Any `Fn()` closure is a navigator:
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use tessera_session::Navigator;
///
/// let redirects = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&redirects);
/// let navigator = move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// };
///
/// navigator.on_logout();
/// assert_eq!(redirects.load(Ordering::SeqCst), 1);
/// ```
pub trait Navigator: Send + Sync + 'static {
    /// Called after the session state has been cleared.
    fn on_logout(&self);
}

impl<F> Navigator for F
where
    F: Fn() + Send + Sync + 'static,
{
    fn on_logout(&self) {
        self()
    }
}

/// A navigator that ignores logout, for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn on_logout(&self) {}
}
