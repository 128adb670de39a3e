use crate::animator::{Frame, ReleaseAnimator};
use crate::curve::{Curve, Interpolator};
use crate::direction::Direction;
use crate::error::Result;
use crate::geometry::Point;
use crate::layout::{Bounds, Layout, Sprites};
use crate::settings::Settings;
use crate::throttle::NotifyThrottle;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// What a listener is told about the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelStatus {
    /// Degrees in `[0, 360)`: right 0, up 90, left 180, down 270.
    pub angle: u16,
    /// Percentage of the clamp radius, `0..=100`.
    pub power: u8,
    pub direction: Direction,
}

impl fmt::Display for WheelStatus {
    /// One line with the direction's wire code in parentheses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "angle = {:3}  power = {:3}  direction = {} ({})",
            self.angle,
            self.power,
            self.direction,
            self.direction.code()
        )
    }
}

pub trait StatusListener {
    fn on_status_changed(&mut self, status: WheelStatus);
}

impl<F> StatusListener for F
where
    F: FnMut(WheelStatus),
{
    fn on_status_changed(&mut self, status: WheelStatus) {
        self(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Down,
    Move(Point),
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Releasing,
}

/// Headless steering wheel: a ball dragged inside a circle, springing back to
/// the centre on release.
///
/// The wheel never reads a clock. Every entry point takes `now`, deferred work
/// is reported through [`Wheel::next_wakeup`] and delivered by [`Wheel::advance`].
pub struct Wheel {
    sprites: Sprites,
    bounds: Option<Bounds>,
    layout: Layout,
    ball: Point,
    pressed: bool,
    angle: f64,
    power: u8,
    direction: Direction,
    phase: Phase,
    curve: Rc<dyn Interpolator>,
    animator: ReleaseAnimator,
    throttle: NotifyThrottle,
    listener: Option<Box<dyn StatusListener>>,
    dirty: bool,
}

impl fmt::Debug for Wheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wheel")
            .field("layout", &self.layout)
            .field("ball", &self.ball)
            .field("phase", &self.phase)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl Wheel {
    pub fn new(sprites: Sprites) -> Self {
        Self {
            sprites,
            bounds: None,
            layout: Layout::default(),
            ball: Point::default(),
            pressed: false,
            angle: 0.0,
            power: 0,
            direction: Direction::Idle,
            phase: Phase::Idle,
            curve: Rc::new(Curve::default()),
            animator: ReleaseAnimator::default(),
            throttle: NotifyThrottle::default(),
            listener: None,
            dirty: true,
        }
    }

    pub fn notify_interval(&mut self, ms: i64) -> Result<&mut Self> {
        self.throttle.set_interval_ms(ms)?;
        Ok(self)
    }

    /// Curve for the next release animation.
    pub fn interpolator(&mut self, curve: impl Interpolator + 'static) -> &mut Self {
        self.curve = Rc::new(curve);
        self
    }

    pub fn reset_interpolator(&mut self) -> &mut Self {
        self.interpolator(Curve::default())
    }

    pub fn release_timing(&mut self, duration: Duration, frame_interval: Duration) -> &mut Self {
        self.animator.set_timing(duration, frame_interval);
        self
    }

    pub fn listener(&mut self, listener: impl StatusListener + 'static) -> &mut Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn clear_listener(&mut self) -> &mut Self {
        self.listener = None;
        self.throttle.cancel();
        self
    }

    pub fn apply_settings(&mut self, settings: &Settings) -> Result<&mut Self> {
        self.notify_interval(settings.notify_interval_ms)?;
        Ok(self
            .interpolator(settings.curve())
            .release_timing(settings.release_duration(), settings.frame_interval()))
    }

    /// Re-derives the circle from new bounds and recentres the ball. Repeating
    /// the same bounds is a no-op.
    pub fn size_changed(&mut self, bounds: Bounds, now: Instant) {
        if self.bounds == Some(bounds) {
            return;
        }
        log::debug!(
            "size changed: {}x{} padding {:?}",
            bounds.width,
            bounds.height,
            bounds.padding
        );

        self.bounds = Some(bounds);
        self.layout = Layout::compute(bounds, &self.sprites);
        self.ball = self.layout.geometry.center;
        self.dirty = true;

        if self.phase == Phase::Releasing {
            self.animator.abort();
            self.finish_release(now);
        } else {
            self.update_power();
            self.update_direction();
        }
    }

    pub fn handle(&mut self, event: TouchEvent, now: Instant) {
        match (event, self.phase) {
            (TouchEvent::Down, _) => {
                if let Some(held) = self.animator.cancel(now) {
                    log::debug!("release animation interrupted at {held:?}");
                    self.set_ball(held, now);
                }
                self.pressed = true;
                self.phase = Phase::Dragging;
                self.dirty = true;
            }
            (TouchEvent::Move(p), Phase::Dragging) => self.drag_to(p),
            (TouchEvent::Up | TouchEvent::Cancel, Phase::Dragging) => {
                self.pressed = false;
                self.phase = Phase::Releasing;
                self.dirty = true;
                self.animator.start(
                    self.ball,
                    self.layout.geometry.center,
                    now,
                    Rc::clone(&self.curve),
                );
            }
            (event, phase) => {
                log::trace!("ignoring {event:?} while {phase:?}");
                return;
            }
        }
        self.request_notify(now);
    }

    /// Runs every deferred task due at `now`: one animation frame, then the
    /// pending notification.
    pub fn advance(&mut self, now: Instant) {
        match self.animator.poll(now) {
            Some(Frame::Running(p)) => self.set_ball(p, now),
            Some(Frame::Finished(p)) => {
                self.set_ball(p, now);
                self.finish_release(now);
            }
            None => {}
        }

        if self.throttle.poll(now) {
            self.fire();
        }
    }

    pub fn next_wakeup(&self) -> Option<Instant> {
        match (self.animator.next_wakeup(), self.throttle.next_wakeup()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn status(&self) -> WheelStatus {
        WheelStatus {
            angle: self.angle as u16,
            power: self.power,
            direction: self.direction,
        }
    }

    pub fn ball(&self) -> Point {
        self.ball
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn power(&self) -> u8 {
        self.power
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn notify_interval_ms(&self) -> u128 {
        self.throttle.interval().as_millis()
    }

    /// Whether anything visible changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn drag_to(&mut self, p: Point) {
        let placement = self.layout.geometry.place(p);
        if let Some(angle) = placement.angle {
            self.angle = angle;
        }
        self.ball = placement.position;
        self.update_power();
        self.update_direction();
        self.dirty = true;
    }

    /// Frame setter shared by the animator; the heading is left alone.
    fn set_ball(&mut self, p: Point, now: Instant) {
        if p == self.ball {
            return;
        }
        self.ball = p;
        self.update_power();
        self.update_direction();
        self.dirty = true;
        self.request_notify(now);
    }

    fn finish_release(&mut self, now: Instant) {
        self.angle = 0.0;
        self.power = 0;
        self.direction = Direction::Idle;
        self.phase = Phase::Idle;
        self.dirty = true;
        self.request_notify(now);
    }

    fn update_power(&mut self) {
        self.power = self.layout.geometry.power(self.ball);
        log::trace!("power = {}", self.power);
    }

    fn update_direction(&mut self) {
        self.direction = self.layout.geometry.direction(self.ball, self.angle);
    }

    fn request_notify(&mut self, now: Instant) {
        if self.listener.is_some() {
            self.throttle.request(now);
        }
    }

    fn fire(&mut self) {
        let status = self.status();
        log::debug!("notify {status:?}");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_status_changed(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SpriteSize;
    use std::cell::RefCell;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn sprites() -> Sprites {
        let size = Some(SpriteSize::new(20, 20));
        Sprites::new(size, size, size).unwrap()
    }

    /// Wheel centred on (100, 100) with R = 90 and r = 10.
    fn wheel(t0: Instant) -> (Wheel, Rc<RefCell<Vec<WheelStatus>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut wheel = Wheel::new(sprites());
        wheel
            .listener(move |status: WheelStatus| sink.borrow_mut().push(status))
            .size_changed(Bounds::new(200, 200), t0);
        (wheel, seen)
    }

    fn run_until_idle(wheel: &mut Wheel) -> Instant {
        let mut last = None;
        while let Some(due) = wheel.next_wakeup() {
            wheel.advance(due);
            last = Some(due);
        }
        last.expect("nothing was scheduled")
    }

    #[test]
    fn test_drag_right_and_up() {
        let t0 = Instant::now();
        let (mut wheel, _) = wheel(t0);

        wheel.handle(TouchEvent::Down, t0);
        assert!(wheel.is_pressed());
        assert_eq!(wheel.phase(), Phase::Dragging);

        wheel.handle(TouchEvent::Move(Point::new(180.0, 100.0)), t0 + ms(5));
        assert_eq!(wheel.ball(), Point::new(180.0, 100.0));
        assert_eq!(
            wheel.status(),
            WheelStatus {
                angle: 0,
                power: 100,
                direction: Direction::Right
            }
        );

        wheel.handle(TouchEvent::Move(Point::new(100.0, 20.0)), t0 + ms(10));
        assert_eq!(
            wheel.status(),
            WheelStatus {
                angle: 90,
                power: 100,
                direction: Direction::Up
            }
        );
    }

    #[test]
    fn test_drag_is_clamped() {
        let t0 = Instant::now();
        let (mut wheel, _) = wheel(t0);
        wheel.handle(TouchEvent::Down, t0);

        wheel.handle(TouchEvent::Move(Point::new(400.0, 100.0)), t0);
        assert_eq!(wheel.ball(), Point::new(180.0, 100.0));

        wheel.handle(TouchEvent::Move(Point::new(-100.0, 300.0)), t0);
        let geometry = wheel.layout().geometry;
        assert!((geometry.center.distance(wheel.ball()) - 80.0).abs() < 1e-9);
        assert_eq!(wheel.direction(), Direction::Left);
        assert_eq!(wheel.status().angle, 225);
        assert_eq!(wheel.power(), 100);
    }

    #[test]
    fn test_move_without_touch_is_ignored() {
        let t0 = Instant::now();
        let (mut wheel, seen) = wheel(t0);
        wheel.take_redraw();

        wheel.handle(TouchEvent::Move(Point::new(150.0, 100.0)), t0);
        wheel.handle(TouchEvent::Up, t0);

        assert_eq!(wheel.phase(), Phase::Idle);
        assert_eq!(wheel.ball(), Point::new(100.0, 100.0));
        assert!(!wheel.take_redraw());
        assert_eq!(wheel.next_wakeup(), None);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_release_springs_back_and_zeroes() {
        let t0 = Instant::now();
        let (mut wheel, seen) = wheel(t0);
        wheel.handle(TouchEvent::Down, t0);
        wheel.handle(TouchEvent::Move(Point::new(140.0, 60.0)), t0);
        wheel.handle(TouchEvent::Up, t0 + ms(1));

        assert!(!wheel.is_pressed());
        assert_eq!(wheel.phase(), Phase::Releasing);

        let end = run_until_idle(&mut wheel);
        assert!(end >= t0 + ms(151));
        assert_eq!(wheel.phase(), Phase::Idle);
        assert_eq!(wheel.ball(), Point::new(100.0, 100.0));
        assert_eq!(wheel.status(), WheelStatus::default());
        assert_eq!(seen.borrow().last(), Some(&WheelStatus::default()));
    }

    #[test]
    fn test_release_keeps_heading_until_done() {
        let t0 = Instant::now();
        let (mut wheel, seen) = wheel(t0);
        wheel.interpolator(Curve::Linear);
        wheel.handle(TouchEvent::Down, t0);
        wheel.handle(TouchEvent::Move(Point::new(100.0, 40.0)), t0);
        wheel.handle(TouchEvent::Up, t0);
        run_until_idle(&mut wheel);

        let seen = seen.borrow();
        let (finale, frames) = seen.split_last().unwrap();
        assert_eq!(*finale, WheelStatus::default());
        assert!(frames.len() > 2);
        for status in frames {
            assert_eq!(status.angle, 90);
            assert_eq!(status.direction, Direction::Up);
        }
        let powers: Vec<u8> = frames.iter().map(|s| s.power).collect();
        assert!(powers.windows(2).all(|w| w[0] >= w[1]), "{powers:?}");
    }

    #[test]
    fn test_overshoot_reports_live_power() {
        let t0 = Instant::now();
        let (mut wheel, seen) = wheel(t0);
        wheel.handle(TouchEvent::Down, t0);
        wheel.handle(TouchEvent::Move(Point::new(180.0, 100.0)), t0);
        wheel.handle(TouchEvent::Up, t0);
        run_until_idle(&mut wheel);

        // the overshoot carries the ball past the centre, so power dips and
        // rises again before the final zeroed report
        let powers: Vec<u8> = seen.borrow().iter().map(|s| s.power).collect();
        let dip = powers.iter().position(|&p| p < 10).unwrap();
        assert!(powers[dip..].iter().any(|&p| p >= 10), "{powers:?}");
        assert_eq!(powers.last(), Some(&0));
    }

    #[test]
    fn test_touch_down_interrupts_release() {
        let t0 = Instant::now();
        let (mut wheel, _) = wheel(t0);
        wheel.interpolator(Curve::Linear);
        wheel.handle(TouchEvent::Down, t0);
        wheel.handle(TouchEvent::Move(Point::new(120.0, 80.0)), t0);
        wheel.handle(TouchEvent::Up, t0);

        wheel.advance(t0 + ms(16));
        wheel.advance(t0 + ms(32));
        wheel.handle(TouchEvent::Down, t0 + ms(50));

        let ball = wheel.ball();
        assert!((ball.x - (120.0 - 20.0 / 3.0)).abs() < 1e-9, "{ball:?}");
        assert!((ball.y - (80.0 + 20.0 / 3.0)).abs() < 1e-9, "{ball:?}");
        assert_eq!(wheel.phase(), Phase::Dragging);
        assert!(wheel.is_pressed());

        // no more animation frames; the angle survived the interruption
        wheel.advance(t0 + ms(400));
        assert_eq!(wheel.ball(), ball);
        assert_eq!(wheel.direction(), Direction::Right);
        assert_eq!(wheel.status().angle, 45);
    }

    /// Releases from (120, 80) and touches down again after `held`.
    fn interrupted_release(wheel: &mut Wheel, t0: Instant, held: Duration) {
        wheel.handle(TouchEvent::Down, t0);
        wheel.handle(TouchEvent::Move(Point::new(120.0, 80.0)), t0);
        wheel.handle(TouchEvent::Up, t0);
        wheel.handle(TouchEvent::Down, t0 + held);
    }

    #[test]
    fn test_default_curve_interrupt_position() {
        let t0 = Instant::now();
        let (mut wheel, _) = wheel(t0);
        interrupted_release(&mut wheel, t0, ms(40));

        let fraction = Curve::default().interpolate(40.0 / 150.0);
        let expected = Point::new(120.0, 80.0).lerp(Point::new(100.0, 100.0), fraction);
        assert!(wheel.ball().distance(expected) < 1e-9);
        assert_ne!(wheel.ball(), Point::new(120.0, 80.0));
        assert_ne!(wheel.ball(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_reset_interpolator_restores_overshoot() {
        let t0 = Instant::now();
        let (mut wheel, _) = wheel(t0);
        wheel.interpolator(Curve::Linear).reset_interpolator();
        interrupted_release(&mut wheel, t0, ms(40));

        let overshoot = Curve::default().interpolate(40.0 / 150.0);
        let linear = Curve::Linear.interpolate(40.0 / 150.0);
        let start = Point::new(120.0, 80.0);
        let center = Point::new(100.0, 100.0);
        assert!(wheel.ball().distance(start.lerp(center, overshoot)) < 1e-9);
        assert!(wheel.ball().distance(start.lerp(center, linear)) > 1.0);
    }

    #[test]
    fn test_cleared_listener_hears_nothing() {
        let t0 = Instant::now();
        let (mut wheel, seen) = wheel(t0);
        wheel.notify_interval(16).unwrap();
        wheel.handle(TouchEvent::Down, t0);
        wheel.advance(t0);
        wheel.handle(TouchEvent::Move(Point::new(150.0, 100.0)), t0 + ms(1));
        assert_eq!(wheel.next_wakeup(), Some(t0 + ms(16)));

        // the pending notification is dropped along with the listener
        wheel.clear_listener();
        assert_eq!(wheel.next_wakeup(), None);
        wheel.handle(TouchEvent::Move(Point::new(160.0, 100.0)), t0 + ms(20));
        wheel.advance(t0 + ms(40));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(wheel.power(), 75);
    }

    #[test]
    fn test_status_display() {
        let cases = vec![
            (
                WheelStatus {
                    angle: 7,
                    power: 62,
                    direction: Direction::Right,
                },
                "angle =   7  power =  62  direction = Right (0)",
            ),
            (
                WheelStatus::default(),
                "angle =   0  power =   0  direction = Idle (-1)",
            ),
            (
                WheelStatus {
                    angle: 270,
                    power: 100,
                    direction: Direction::Down,
                },
                "angle = 270  power = 100  direction = Down (4)",
            ),
        ];

        for (status, expected) in cases {
            assert_eq!(status.to_string(), expected);
        }
    }

    #[test]
    fn test_throttle_delivers_latest_state() {
        let t0 = Instant::now();
        let (mut wheel, seen) = wheel(t0);
        wheel.notify_interval(16).unwrap();
        wheel.handle(TouchEvent::Down, t0);
        wheel.advance(t0);
        assert_eq!(seen.borrow().len(), 1);

        for i in 1..=10u32 {
            let now = t0 + Duration::from_micros(500) * i;
            let x = 100.0 + 5.0 * i as f64;
            wheel.handle(TouchEvent::Move(Point::new(x, 100.0)), now);
            wheel.advance(now);
        }
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(wheel.next_wakeup(), Some(t0 + ms(16)));

        wheel.advance(t0 + ms(16));
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].power, 62);
        assert_eq!(seen[1].direction, Direction::Right);
    }

    #[test]
    fn test_burst_before_first_fire_is_single_callback() {
        let t0 = Instant::now();
        let (mut wheel, seen) = wheel(t0);
        wheel.notify_interval(16).unwrap();
        wheel.handle(TouchEvent::Down, t0);
        for i in 1..=9u32 {
            let x = 100.0 + 8.0 * i as f64;
            wheel.handle(TouchEvent::Move(Point::new(x, 100.0)), t0 + ms(i as u64 / 2));
        }
        wheel.advance(t0 + ms(5));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].power, 90);
    }

    #[test]
    fn test_negative_interval_is_an_error() {
        let t0 = Instant::now();
        let (mut wheel, _) = wheel(t0);
        wheel.notify_interval(20).unwrap();
        assert!(wheel.notify_interval(-16).is_err());
        assert_eq!(wheel.notify_interval_ms(), 20);
    }

    #[test]
    fn test_without_listener_nothing_is_scheduled() {
        let t0 = Instant::now();
        let mut wheel = Wheel::new(sprites());
        wheel.size_changed(Bounds::new(200, 200), t0);
        wheel.handle(TouchEvent::Down, t0);
        wheel.handle(TouchEvent::Move(Point::new(150.0, 100.0)), t0);
        assert_eq!(wheel.next_wakeup(), None);

        wheel.handle(TouchEvent::Up, t0);
        assert_eq!(wheel.next_wakeup(), Some(t0 + ms(16)));
    }

    #[test]
    fn test_size_change_is_idempotent() {
        let t0 = Instant::now();
        let (mut wheel, _) = wheel(t0);
        let bounds = Bounds::new(320, 240);

        wheel.size_changed(bounds, t0);
        let first = (*wheel.layout(), wheel.ball());
        wheel.handle(TouchEvent::Down, t0);
        wheel.handle(TouchEvent::Move(Point::new(200.0, 120.0)), t0);
        wheel.size_changed(bounds, t0);
        assert_eq!(*wheel.layout(), first.0);
        assert_eq!(wheel.ball(), Point::new(200.0, 120.0));

        wheel.size_changed(Bounds::new(200, 200), t0);
        wheel.size_changed(bounds, t0);
        assert_eq!((*wheel.layout(), wheel.ball()), first);
    }

    #[test]
    fn test_resize_during_release_settles_immediately() {
        let t0 = Instant::now();
        let (mut wheel, seen) = wheel(t0);
        wheel.handle(TouchEvent::Down, t0);
        wheel.handle(TouchEvent::Move(Point::new(150.0, 100.0)), t0);
        wheel.handle(TouchEvent::Up, t0);
        wheel.size_changed(Bounds::new(400, 400), t0 + ms(20));

        assert_eq!(wheel.phase(), Phase::Idle);
        assert_eq!(wheel.ball(), Point::new(200.0, 200.0));
        run_until_idle(&mut wheel);
        assert_eq!(seen.borrow().last(), Some(&WheelStatus::default()));
    }

    #[test]
    fn test_apply_settings() {
        let t0 = Instant::now();
        let (mut wheel, _) = wheel(t0);
        let settings = Settings {
            notify_interval_ms: 33,
            release_duration_ms: 40,
            ..Settings::default()
        };
        wheel.apply_settings(&settings).unwrap();
        assert_eq!(wheel.notify_interval_ms(), 33);

        let bad = Settings {
            notify_interval_ms: -1,
            ..Settings::default()
        };
        assert!(wheel.apply_settings(&bad).is_err());
    }
}
