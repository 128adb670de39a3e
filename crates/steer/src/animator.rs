use crate::curve::Interpolator;
use crate::geometry::Point;
use crate::timer::Deadline;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(150);
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    Running(Point),
    /// Last frame; the position is the curve evaluated at full progress.
    Finished(Point),
}

/// One spring-back tween from the release point to the centre.
pub struct ReleaseAnimation {
    from: Point,
    to: Point,
    started: Instant,
    duration: Duration,
    curve: Rc<dyn Interpolator>,
}

impl ReleaseAnimation {
    pub fn new(
        from: Point,
        to: Point,
        started: Instant,
        duration: Duration,
        curve: Rc<dyn Interpolator>,
    ) -> Self {
        Self {
            from,
            to,
            started,
            duration,
            curve,
        }
    }

    pub fn sample(&self, now: Instant) -> Frame {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return Frame::Finished(self.position_at(1.0));
        }
        Frame::Running(self.position_at(elapsed.as_secs_f64() / self.duration.as_secs_f64()))
    }

    fn position_at(&self, progress: f64) -> Point {
        self.from.lerp(self.to, self.curve.interpolate(progress))
    }
}

/// Drives at most one release animation, one frame per wakeup.
pub struct ReleaseAnimator {
    duration: Duration,
    frame_interval: Duration,
    running: Option<ReleaseAnimation>,
    frame: Deadline,
}

impl Default for ReleaseAnimator {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            running: None,
            frame: Deadline::default(),
        }
    }
}

impl ReleaseAnimator {
    pub fn set_timing(&mut self, duration: Duration, frame_interval: Duration) {
        self.duration = duration;
        self.frame_interval = frame_interval.max(Duration::from_millis(1));
    }

    pub fn start(&mut self, from: Point, to: Point, now: Instant, curve: Rc<dyn Interpolator>) {
        self.running = Some(ReleaseAnimation::new(from, to, now, self.duration, curve));
        self.frame.arm(now, self.frame_interval);
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Stops the animation where it stands at `now`. Nothing happens, and
    /// `None` is returned, when no animation is in flight.
    pub fn cancel(&mut self, now: Instant) -> Option<Point> {
        self.frame.cancel();
        let animation = self.running.take()?;
        match animation.sample(now) {
            Frame::Running(p) | Frame::Finished(p) => Some(p),
        }
    }

    /// Drops the animation without sampling it.
    pub fn abort(&mut self) {
        self.frame.cancel();
        self.running = None;
    }

    pub fn poll(&mut self, now: Instant) -> Option<Frame> {
        if !self.frame.fire(now) {
            return None;
        }
        let frame = self.running.as_ref()?.sample(now);
        match frame {
            Frame::Running(_) => self.frame.arm(now, self.frame_interval),
            Frame::Finished(_) => self.running = None,
        }
        Some(frame)
    }

    pub fn next_wakeup(&self) -> Option<Instant> {
        self.frame.due()
    }
}
