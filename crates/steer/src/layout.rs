use crate::error::{AssetKind, Error, Result};
use crate::geometry::{Point, WheelGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub fn uniform(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Widget bounds as handed over by the host's layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
    pub padding: Padding,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
        }
    }

    pub fn with_padding(self, padding: Padding) -> Self {
        Self { padding, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSize {
    pub width: i32,
    pub height: i32,
}

impl SpriteSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Pixel rectangle of a sprite centred on `center`, halves truncated the
    /// same way on every side.
    pub fn centered(center: Point, size: SpriteSize) -> Self {
        let (hw, hh) = ((size.width / 2) as f64, (size.height / 2) as f64);
        Self {
            left: (center.x - hw) as i32,
            top: (center.y - hh) as i32,
            right: (center.x + hw) as i32,
            bottom: (center.y + hh) as i32,
        }
    }
}

/// Intrinsic sizes of the sprites the wheel is drawn with. The ball and arrow
/// drive the geometry, so they are mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprites {
    pub ball: SpriteSize,
    pub ball_pressed: SpriteSize,
    pub arrow: SpriteSize,
}

impl Sprites {
    pub fn new(
        ball: Option<SpriteSize>,
        ball_pressed: Option<SpriteSize>,
        arrow: Option<SpriteSize>,
    ) -> Result<Self> {
        let ball = ball.ok_or(Error::MissingAsset(AssetKind::Ball))?;
        let arrow = arrow.ok_or(Error::MissingAsset(AssetKind::Arrow))?;
        Ok(Self {
            ball,
            ball_pressed: ball_pressed.unwrap_or(ball),
            arrow,
        })
    }

    pub fn ball_radius(&self) -> f64 {
        (self.ball.width / 2) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub geometry: WheelGeometry,
    /// Arrow rectangle before rotation; it sits on the right-hand rim.
    pub arrow: Rect,
}

impl Layout {
    pub fn compute(bounds: Bounds, sprites: &Sprites) -> Self {
        let pad = bounds.padding;
        let width = bounds
            .width
            .saturating_sub(pad.left)
            .saturating_sub(pad.right)
            .max(0);
        let height = bounds
            .height
            .saturating_sub(pad.top)
            .saturating_sub(pad.bottom)
            .max(0);

        let radius = (width.min(height) / 2).saturating_sub(sprites.arrow.width / 2);
        let center = Point::new(
            pad.left.saturating_add(width / 2) as f64,
            pad.top.saturating_add(height / 2) as f64,
        );
        let rim = Point::new(center.x + radius as f64, center.y);

        Self {
            geometry: WheelGeometry::new(center, radius as f64, sprites.ball_radius()),
            arrow: Rect::centered(rim, sprites.arrow),
        }
    }
}
