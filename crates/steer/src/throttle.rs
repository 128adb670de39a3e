use crate::error::{Error, Result};
use crate::timer::Deadline;
use std::time::{Duration, Instant};

/// Rate limiter for listener callbacks.
///
/// Requests only arm a deadline; whoever polls the throttle reads the wheel's
/// state at fire time, so a burst of requests collapses into one trailing
/// callback carrying the newest values.
#[derive(Debug, Clone, Default)]
pub struct NotifyThrottle {
    interval: Duration,
    last_fired: Option<Instant>,
    pending: Deadline,
}

impl NotifyThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval_ms(&mut self, ms: i64) -> Result<()> {
        let ms = u64::try_from(ms).map_err(|_| Error::NegativeInterval(ms))?;
        self.interval = Duration::from_millis(ms);
        Ok(())
    }

    pub fn request(&mut self, now: Instant) {
        let delay = self
            .last_fired
            .map(|last| now.saturating_duration_since(last))
            .filter(|elapsed| *elapsed < self.interval)
            .map_or(Duration::ZERO, |elapsed| self.interval - elapsed);

        self.pending.arm(now, delay);
    }

    /// Returns true when a callback is due; the caller delivers it.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending.fire(now) {
            self.last_fired = Some(now);
            true
        } else {
            false
        }
    }

    pub fn next_wakeup(&self) -> Option<Instant> {
        self.pending.due()
    }

    pub fn cancel(&mut self) {
        self.pending.cancel();
    }
}
