//! Time interpolation curves for the release animation.
//!
//! Input is linear progress in `[0.0, 1.0]`; output is the fraction of the way
//! from start to target. Output may leave `[0, 1]` in between (overshoot) but
//! every curve here maps 0 to 0 and 1 to 1.

use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::PI;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_TENSION: f64 = 2.0;

pub trait Interpolator {
    fn interpolate(&self, progress: f64) -> f64;
}

impl<F> Interpolator for F
where
    F: Fn(f64) -> f64,
{
    fn interpolate(&self, progress: f64) -> f64 {
        self(progress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Linear,
    AccelerateDecelerate,
    Decelerate,
    /// Flings past the target and settles back; higher tension overshoots more.
    Overshoot { tension: f64 },
}

impl Default for Curve {
    fn default() -> Self {
        Self::Overshoot {
            tension: DEFAULT_TENSION,
        }
    }
}

impl Interpolator for Curve {
    fn interpolate(&self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Self::Overshoot { tension } => {
                let t = t - 1.0;
                t * t * ((tension + 1.0) * t + tension) + 1.0
            }
        }
    }
}

/// Curve name as written in settings files.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    #[strum(serialize = "linear")]
    Linear,
    #[strum(
        serialize = "accelerate_decelerate",
        serialize = "accelerate-decelerate",
        serialize = "ease"
    )]
    AccelerateDecelerate,
    #[strum(serialize = "decelerate")]
    Decelerate,
    #[default]
    #[strum(serialize = "overshoot")]
    Overshoot,
}

impl CurveKind {
    pub fn with_tension(self, tension: f64) -> Curve {
        match self {
            Self::Linear => Curve::Linear,
            Self::AccelerateDecelerate => Curve::AccelerateDecelerate,
            Self::Decelerate => Curve::Decelerate,
            Self::Overshoot => Curve::Overshoot { tension },
        }
    }
}
