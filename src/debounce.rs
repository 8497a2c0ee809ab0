//! Trailing debounce as an explicit state machine.
//!
//! Each keystroke replaces the pending value and pushes the deadline out;
//! replacing IS the cancellation. Only the most recently scheduled value
//! can ever fire, so "last write wins" holds by construction rather than
//! by timing luck. The driver (see [`crate::controller`]) sleeps until
//! [`Debounce::deadline`] and then calls [`Debounce::fire`].

use std::time::Duration;
use tokio::time::Instant;

/// A single pending action with a cancellable deadline.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
    pending: Option<String>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Debounce {
            delay,
            deadline: None,
            pending: None,
        }
    }

    /// Schedule `value`, cancelling whatever was pending.
    pub fn schedule(&mut self, value: String, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// When the pending value becomes due, if anything is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Yield the pending value if its deadline has passed. Fires at most
    /// once per scheduled value.
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn fires_only_after_deadline() {
        let mut debounce = Debounce::new(DELAY);
        let start = Instant::now();
        debounce.schedule("he".to_string(), start);

        assert_eq!(debounce.fire(start), None);
        assert_eq!(debounce.fire(start + Duration::from_millis(299)), None);
        assert_eq!(debounce.fire(start + DELAY), Some("he".to_string()));
    }

    #[test]
    fn rescheduling_cancels_the_previous_value() {
        let mut debounce = Debounce::new(DELAY);
        let start = Instant::now();
        debounce.schedule("h".to_string(), start);
        debounce.schedule("he".to_string(), start + Duration::from_millis(100));
        debounce.schedule("hel".to_string(), start + Duration::from_millis(200));

        // The first two deadlines have passed, but they were replaced.
        assert_eq!(debounce.fire(start + Duration::from_millis(450)), None);
        assert_eq!(
            debounce.fire(start + Duration::from_millis(500)),
            Some("hel".to_string())
        );
    }

    #[test]
    fn fires_at_most_once() {
        let mut debounce = Debounce::new(DELAY);
        let start = Instant::now();
        debounce.schedule("query".to_string(), start);

        assert!(debounce.fire(start + DELAY).is_some());
        assert_eq!(debounce.fire(start + DELAY * 2), None);
        assert_eq!(debounce.deadline(), None);
    }

    #[test]
    fn cancel_clears_pending_and_deadline() {
        let mut debounce = Debounce::new(DELAY);
        let start = Instant::now();
        debounce.schedule("query".to_string(), start);
        debounce.cancel();

        assert_eq!(debounce.deadline(), None);
        assert_eq!(debounce.fire(start + DELAY), None);
    }
}
