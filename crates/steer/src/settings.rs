use crate::curve::{Curve, CurveKind, DEFAULT_TENSION};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for a wheel, as found in a host's config file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum spacing between listener callbacks. Signed so that a bad value
    /// reaches the wheel and gets rejected there instead of failing to parse.
    pub notify_interval_ms: i64,
    pub release_duration_ms: u64,
    pub frame_interval_ms: u64,
    pub curve: CurveKind,
    pub tension: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notify_interval_ms: 0,
            release_duration_ms: 150,
            frame_interval_ms: 16,
            curve: CurveKind::default(),
            tension: DEFAULT_TENSION,
        }
    }
}

impl Settings {
    pub fn curve(&self) -> Curve {
        self.curve.with_tension(self.tension)
    }

    pub fn release_duration(&self) -> Duration {
        Duration::from_millis(self.release_duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
