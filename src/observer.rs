//! Verbose output sink for the formulas.
//!
//! Formulas never print. They hand intermediate values to an [`Observer`],
//! and the caller decides whether those messages are dropped, logged, or
//! collected.

/// Receives human-readable notes about intermediate calculation steps.
pub trait Observer {
    fn observe(&self, message: &str);
}

impl<F> Observer for F
where
    F: Fn(&str),
{
    fn observe(&self, message: &str) {
        self(message)
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Observer for Silent {
    fn observe(&self, _message: &str) {}
}

/// Forwards messages to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, message: &str) {
        tracing::debug!(target: "invest_calc", "{message}");
    }
}
