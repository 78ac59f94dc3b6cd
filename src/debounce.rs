//! Trailing-edge debounce with an explicit, cancelable pending slot.
//!
//! The host owns the clock: every call takes `now_ms`, and [`Debouncer::poll`]
//! is driven from the host's tick. Rapid [`Debouncer::schedule`] calls
//! coalesce, so the value released is always the latest one, once the quiet
//! window has passed since the last call.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due_at_ms: u64,
}

/// Coalesces values until `wait_ms` passes without a new one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait_ms: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(wait_ms: u64) -> Self {
        Self { wait_ms, pending: None }
    }

    #[must_use]
    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    /// Replace any pending value with `value` and restart the quiet window.
    pub fn schedule(&mut self, value: T, now_ms: u64) {
        self.pending = Some(Pending { value, due_at_ms: now_ms.saturating_add(self.wait_ms) });
    }

    /// Release the pending value if its quiet window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| now_ms >= p.due_at_ms) {
            return self.pending.take().map(|p| p.value);
        }
        None
    }

    /// Release the pending value immediately, regardless of the window.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value. Returns `true` if one was discarded.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    #[must_use]
    pub fn due_at_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due_at_ms)
    }
}
