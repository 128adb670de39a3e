use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Coarse heading of the ball, a quantization of the wheel angle.
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
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[strum(serialize = "Right", serialize = "r", serialize = "0")]
    Right,
    #[strum(serialize = "Up", serialize = "u", serialize = "1")]
    Up,
    #[strum(serialize = "Left", serialize = "l", serialize = "2")]
    Left,
    #[strum(serialize = "Down", serialize = "d", serialize = "4")]
    Down,
    #[default]
    #[strum(serialize = "Idle", serialize = "i", serialize = "-1")]
    Idle,
}

impl Direction {
    /// Buckets an angle in degrees. Bands are half-open, `(a, b]`, except that
    /// RIGHT also owns everything up to and including 45.
    pub fn from_angle(angle: f64) -> Self {
        if angle <= 45.0 || angle > 315.0 {
            Self::Right
        } else if angle <= 135.0 {
            Self::Up
        } else if angle <= 225.0 {
            Self::Left
        } else {
            Self::Down
        }
    }

    /// Numeric code used on the listener wire.
    pub fn code(&self) -> i32 {
        match self {
            Self::Right => 0,
            Self::Up => 1,
            Self::Left => 2,
            Self::Down => 4,
            Self::Idle => -1,
        }
    }
}
