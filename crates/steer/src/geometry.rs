use crate::direction::Direction;

/// Tolerance for treating the ball as resting on the centre.
pub const CENTER_EPSILON: f64 = 1e-8;
/// Slack for float error when a clamped point lands a hair inside the rim.
const POWER_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn lerp(&self, to: Point, fraction: f64) -> Point {
        Point::new(
            self.x + (to.x - self.x) * fraction,
            self.y + (to.y - self.y) * fraction,
        )
    }
}

/// Screen quadrant around the centre, y growing downwards. Axis points are
/// owned by exactly one quadrant, following the comparisons in `classify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
}

impl Quadrant {
    fn classify(center: Point, p: Point) -> Option<Self> {
        let (cx, cy) = (center.x, center.y);
        if p.x >= cx && p.y < cy {
            Some(Self::First)
        } else if p.x < cx && p.y <= cy {
            Some(Self::Second)
        } else if p.x <= cx && p.y > cy {
            Some(Self::Third)
        } else if p.x > cx && p.y >= cy {
            Some(Self::Fourth)
        } else {
            None
        }
    }

    /// Raw angle in degrees. The fourth quadrant yields 360 on the positive x
    /// axis; callers fold that back to 0.
    fn angle(&self, center: Point, p: Point) -> f64 {
        let (cx, cy) = (center.x, center.y);
        match self {
            Self::First => ((cy - p.y) / (p.x - cx)).atan().to_degrees(),
            Self::Second => 180.0 - ((cy - p.y) / (cx - p.x)).atan().to_degrees(),
            Self::Third => 270.0 - ((cx - p.x) / (p.y - cy)).atan().to_degrees(),
            Self::Fourth => 360.0 - ((p.y - cy) / (p.x - cx)).atan().to_degrees(),
        }
    }

    fn project(&self, center: Point, angle: f64, reach: f64) -> Point {
        let (cx, cy) = (center.x, center.y);
        match self {
            Self::First => {
                let a = angle.to_radians();
                Point::new(cx + a.cos() * reach, cy - a.sin() * reach)
            }
            Self::Second => {
                let a = (180.0 - angle).to_radians();
                Point::new(cx - a.cos() * reach, cy - a.sin() * reach)
            }
            Self::Third => {
                let a = (angle - 180.0).to_radians();
                Point::new(cx - a.cos() * reach, cy + a.sin() * reach)
            }
            Self::Fourth => {
                let a = (360.0 - angle).to_radians();
                Point::new(cx + a.cos() * reach, cy + a.sin() * reach)
            }
        }
    }
}

/// Where a pointer sample ends up once it has been applied to the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// `None` when the sample sits exactly on the centre.
    pub angle: Option<f64>,
    pub position: Point,
}

/// Circle the ball travels in. Immutable between layouts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelGeometry {
    pub center: Point,
    pub radius: f64,
    pub ball_radius: f64,
}

impl WheelGeometry {
    pub fn new(center: Point, radius: f64, ball_radius: f64) -> Self {
        Self {
            center,
            radius,
            ball_radius,
        }
    }

    /// Clamp radius: the furthest the ball centre may get from the circle centre.
    pub fn reach(&self) -> f64 {
        (self.radius - self.ball_radius).max(0.0)
    }

    /// Angle of `p` around the centre in `[0, 360)`, 0 pointing right and
    /// growing counter-clockwise on screen.
    pub fn angle(&self, p: Point) -> Option<f64> {
        Quadrant::classify(self.center, p).map(|q| fold(q.angle(self.center, p)))
    }

    fn out_of_range(&self, p: Point) -> bool {
        let (dx, dy) = (p.x - self.center.x, p.y - self.center.y);
        dx * dx + dy * dy > self.reach() * self.reach()
    }

    /// Projects `p` back onto the clamp circle along its own angle when it lies
    /// outside; anything inside is returned untouched.
    pub fn clamp(&self, p: Point) -> Point {
        self.place(p).position
    }

    pub fn place(&self, p: Point) -> Placement {
        let Some(quadrant) = Quadrant::classify(self.center, p) else {
            return Placement {
                angle: None,
                position: p,
            };
        };

        let raw = quadrant.angle(self.center, p);
        let position = if self.out_of_range(p) {
            quadrant.project(self.center, raw, self.reach())
        } else {
            p
        };

        Placement {
            angle: Some(fold(raw)),
            position,
        }
    }

    /// Radial displacement as a whole percentage of the clamp radius,
    /// truncated. Points projected onto the rim still read 100.
    pub fn power(&self, p: Point) -> u8 {
        let reach = self.reach();
        if reach <= 0.0 {
            return 0;
        }
        (100.0 * self.center.distance(p) / reach + POWER_EPSILON)
            .floor()
            .min(100.0) as u8
    }

    pub fn is_centered(&self, p: Point) -> bool {
        (self.center.x - p.x).abs() < CENTER_EPSILON
            && (self.center.y - p.y).abs() < CENTER_EPSILON
    }

    /// IDLE on the centre, otherwise the bucket of `angle`. The angle is taken
    /// as given so a retained heading survives frames that do not recompute it.
    pub fn direction(&self, p: Point, angle: f64) -> Direction {
        if self.is_centered(p) {
            Direction::Idle
        } else {
            Direction::from_angle(angle)
        }
    }
}

fn fold(angle: f64) -> f64 {
    if angle >= 360.0 { angle - 360.0 } else { angle }
}
