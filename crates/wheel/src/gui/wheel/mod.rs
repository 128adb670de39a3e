pub mod assets;
pub mod model;
pub mod view;

pub use model::{SpriteSet, WheelModel};
pub use view::draw;

pub const STROKE_WIDTH: f64 = 2.0;
pub const AXIS_WIDTH: f64 = 1.0;
pub const BALL_DIAMETER: i32 = 40; // generated ball sprite
pub const ARROW_SIZE: i32 = 24; // generated arrow sprite, square
