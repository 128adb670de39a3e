use std::time::{Duration, Instant};

/// Single-shot deferred task slot. At most one task is pending; arming a new
/// one replaces it and cancelling an empty slot does nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    due: Option<Instant>,
}

impl Deadline {
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Consumes the task when it has come due.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let t0 = Instant::now();
        let mut deadline = Deadline::default();
        deadline.arm(t0, Duration::from_millis(10));

        assert!(!deadline.fire(t0 + Duration::from_millis(9)));
        assert!(deadline.fire(t0 + Duration::from_millis(10)));
        assert!(!deadline.fire(t0 + Duration::from_millis(11)));
    }

    #[test]
    fn test_rearm_replaces() {
        let t0 = Instant::now();
        let mut deadline = Deadline::default();
        deadline.arm(t0, Duration::from_millis(5));
        deadline.arm(t0, Duration::from_millis(20));

        assert!(!deadline.fire(t0 + Duration::from_millis(5)));
        assert_eq!(deadline.due(), Some(t0 + Duration::from_millis(20)));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let t0 = Instant::now();
        let mut deadline = Deadline::default();
        deadline.cancel();
        deadline.arm(t0, Duration::ZERO);
        deadline.cancel();
        deadline.cancel();
        assert!(!deadline.is_pending());
        assert!(!deadline.fire(t0));
    }
}
