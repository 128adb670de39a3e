//! Recorded pointer input, one event per line:
//!
//! ```text
//! # ms  action  [x y]
//! 0     down
//! 8     move 150 100
//! 200   up
//! ```
//!
//! Actions other than `down`, `move`, `up` and `cancel` are skipped.

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::wheel::TouchEvent;
use std::str::FromStr;
use std::time::Duration;
use strum::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
enum Action {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Offset from the start of the recording.
    pub at: Duration,
    pub event: TouchEvent,
}

pub fn parse(source: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    let mut last = Duration::ZERO;

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let fail = |reason: String| Error::Script { line, reason };
        let mut fields = content.split_whitespace();

        let at = fields
            .next()
            .map(u64::from_str)
            .transpose()
            .map_err(|e| fail(format!("bad timestamp: {e}")))?
            .map(Duration::from_millis)
            .ok_or_else(|| fail("missing timestamp".into()))?;
        if at < last {
            return Err(fail(format!(
                "timestamp {} ms goes backwards",
                at.as_millis()
            )));
        }
        last = at;

        let name = fields.next().ok_or_else(|| fail("missing action".into()))?;
        let Ok(action) = Action::from_str(name) else {
            log::debug!("line {line}: skipping unknown action '{name}'");
            continue;
        };

        let event = match action {
            Action::Down => TouchEvent::Down,
            Action::Up => TouchEvent::Up,
            Action::Cancel => TouchEvent::Cancel,
            Action::Move => {
                let mut coord = |axis: &str| -> Result<f64> {
                    fields
                        .next()
                        .ok_or_else(|| fail(format!("move without {axis}")))?
                        .parse::<f64>()
                        .map_err(|e| fail(format!("bad {axis}: {e}")))
                };
                let x = coord("x")?;
                let y = coord("y")?;
                TouchEvent::Move(Point::new(x, y))
            }
        };

        steps.push(Step { at, event });
    }

    Ok(steps)
}
