pub mod animator;
pub mod curve;
pub mod direction;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod script;
pub mod settings;
pub mod throttle;
pub mod timer;
pub mod wheel;

pub use curve::{Curve, CurveKind, Interpolator};
pub use direction::Direction;
pub use error::{AssetKind, Error, Result};
pub use geometry::{Point, WheelGeometry};
pub use layout::{Bounds, Layout, Padding, Rect, SpriteSize, Sprites};
pub use settings::Settings;
pub use wheel::{Phase, StatusListener, TouchEvent, Wheel, WheelStatus};
