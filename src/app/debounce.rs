//! Debounced input buffer.
//!
//! Zellij timers cannot be revoked once armed, so cancellation is logical.
//! Every [`Debouncer::schedule`] call arms a new generation and the runtime
//! arms one host timer for it. Host timers fire in the order they were armed
//! (all share the same interval), so each firing pops the oldest outstanding
//! generation. Only the newest live generation may emit.
//!
//! ```
//! use cinescout::app::Debouncer;
//! use std::time::Duration;
//!
//! let mut debouncer = Debouncer::new(Duration::from_millis(1000));
//! debouncer.schedule("b");
//! debouncer.schedule("ba");
//! debouncer.schedule("bat");
//!
//! assert_eq!(debouncer.fire(), None);
//! assert_eq!(debouncer.fire(), None);
//! assert_eq!(debouncer.fire(), Some("bat".to_string()));
//! ```

use std::collections::VecDeque;
use std::time::Duration;

/// Default quiet period before a query is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Timer-reset debouncer holding the latest value and one live generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    interval: Duration,
    value: String,
    generation: u64,
    live: Option<u64>,
    outstanding: VecDeque<u64>,
}

impl Debouncer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            value: String::new(),
            generation: 0,
            live: None,
            outstanding: VecDeque::new(),
        }
    }

    /// Replaces the pending value and restarts the quiet period.
    ///
    /// Returns the interval the caller must arm a host timer for.
    pub fn schedule(&mut self, value: impl Into<String>) -> Duration {
        self.value = value.into();
        self.generation += 1;
        self.live = Some(self.generation);
        self.outstanding.push_back(self.generation);
        self.interval
    }

    /// Drops the pending value. Timers already armed fire as no-ops.
    pub fn cancel(&mut self) {
        self.live = None;
    }

    /// True while a scheduled value is waiting to be committed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.live.is_some()
    }

    /// Handles one host timer expiry.
    ///
    /// Returns the committed value if the expired timer belongs to the live
    /// generation, `None` for superseded or cancelled timers. Expiries with
    /// nothing outstanding (timers armed by someone else) are ignored.
    pub fn fire(&mut self) -> Option<String> {
        let expired = self.outstanding.pop_front()?;
        if self.live != Some(expired) {
            return None;
        }
        self.live = None;
        Some(self.value.clone())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_update_commits_after_one_expiry() {
        let mut debouncer = Debouncer::default();
        assert_eq!(debouncer.schedule("dune"), DEFAULT_DEBOUNCE);
        assert!(debouncer.is_pending());

        assert_eq!(debouncer.fire(), Some("dune".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_suppresses_the_armed_timer() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule("x");
        debouncer.cancel();

        assert_eq!(debouncer.fire(), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn schedule_after_cancel_emits_only_the_new_value() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule("old");
        debouncer.cancel();
        debouncer.schedule("new");

        assert_eq!(debouncer.fire(), None);
        assert_eq!(debouncer.fire(), Some("new".to_string()));
    }

    #[test]
    fn foreign_timer_is_ignored() {
        let mut debouncer = Debouncer::default();
        assert_eq!(debouncer.fire(), None);
    }

    #[test]
    fn separate_bursts_each_commit_once() {
        let mut debouncer = Debouncer::default();

        debouncer.schedule("a");
        assert_eq!(debouncer.fire(), Some("a".to_string()));

        debouncer.schedule("ab");
        debouncer.schedule("abc");
        assert_eq!(debouncer.fire(), None);
        assert_eq!(debouncer.fire(), Some("abc".to_string()));
        assert_eq!(debouncer.fire(), None);
    }

    proptest! {
        #[test]
        fn burst_commits_only_the_final_value(values in proptest::collection::vec("[a-z ]{0,8}", 1..30)) {
            let mut debouncer = Debouncer::default();
            for value in &values {
                debouncer.schedule(value.clone());
            }

            let emitted: Vec<String> = (0..values.len()).filter_map(|_| debouncer.fire()).collect();

            prop_assert_eq!(emitted, vec![values.last().cloned().unwrap_or_default()]);
            prop_assert_eq!(debouncer.fire(), None);
        }
    }
}
