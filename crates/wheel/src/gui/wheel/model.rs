use crate::config::{Config, SpriteConfig};
use crate::gui::theme;
use gdk_pixbuf::Pixbuf;
use palette::Srgba;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;
use steer::{Bounds, Padding, SpriteSize, Sprites, Wheel, WheelStatus};

#[derive(Clone, Default)]
pub struct SpriteSet {
    pub ball: Option<Pixbuf>,
    pub ball_pressed: Option<Pixbuf>,
    pub arrow: Option<Pixbuf>,
}

impl SpriteSet {
    pub fn load(config: &SpriteConfig) -> Self {
        Self {
            ball: Self::load_one(config.ball.as_ref()),
            ball_pressed: Self::load_one(config.ball_pressed.as_ref()),
            arrow: Self::load_one(config.arrow.as_ref()),
        }
    }

    fn load_one(path: Option<&PathBuf>) -> Option<Pixbuf> {
        let path = path?;
        Pixbuf::from_file(path)
            .inspect_err(|e| log::warn!("Failed to load sprite {}: {}", path.display(), e))
            .ok()
    }

    pub fn sizes(&self) -> steer::Result<Sprites> {
        let size = |p: &Option<Pixbuf>| p.as_ref().map(|p| SpriteSize::new(p.width(), p.height()));
        Sprites::new(size(&self.ball), size(&self.ball_pressed), size(&self.arrow))
    }

    /// Ball sprite for the current press state; the pressed variant falls
    /// back to the plain ball.
    pub fn ball(&self, pressed: bool) -> Option<&Pixbuf> {
        if pressed {
            self.ball_pressed.as_ref().or(self.ball.as_ref())
        } else {
            self.ball.as_ref()
        }
    }
}

/// The wheel plus everything the window needs to draw and describe it.
pub struct WheelModel {
    pub wheel: Wheel,
    pub sprites: SpriteSet,
    pub stroke: Option<Srgba<f64>>,
    config: Config,
    size: (i32, i32),
    latest: Rc<Cell<Option<WheelStatus>>>,
}

impl WheelModel {
    pub fn new(config: &Config, sprite_dir: Option<&Path>) -> steer::Result<Self> {
        let sprites = SpriteSet::load(&config.sprites.resolve(sprite_dir));
        Self::from_parts(config, sprites)
    }

    pub fn from_parts(config: &Config, sprites: SpriteSet) -> steer::Result<Self> {
        let latest = Rc::new(Cell::new(None));
        let wheel = Self::build_wheel(config, &sprites, &latest)?;
        Ok(Self {
            wheel,
            sprites,
            stroke: config.color.as_deref().and_then(theme::parse_color),
            config: config.clone(),
            size: (0, 0),
            latest,
        })
    }

    fn build_wheel(
        config: &Config,
        sprites: &SpriteSet,
        latest: &Rc<Cell<Option<WheelStatus>>>,
    ) -> steer::Result<Wheel> {
        let mut wheel = Wheel::new(sprites.sizes()?);
        let sink = Rc::clone(latest);
        wheel
            .apply_settings(&config.wheel)?
            .listener(move |status: WheelStatus| sink.set(Some(status)));
        Ok(wheel)
    }

    pub fn size_request(&self) -> i32 {
        self.config.size
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.size.0, self.size.1).with_padding(Padding::uniform(self.config.padding))
    }

    pub fn resize(&mut self, width: i32, height: i32, now: Instant) {
        self.size = (width, height);
        self.wheel.size_changed(self.bounds(), now);
    }

    /// Swaps in a freshly built wheel. An in-flight drag or release is
    /// dropped; on error the current wheel stays untouched.
    pub fn reconfigure(
        &mut self,
        config: &Config,
        sprite_dir: Option<&Path>,
        now: Instant,
    ) -> steer::Result<()> {
        let sprites = SpriteSet::load(&config.sprites.resolve(sprite_dir));
        let wheel = Self::build_wheel(config, &sprites, &self.latest)?;

        self.wheel = wheel;
        self.sprites = sprites;
        self.stroke = config.color.as_deref().and_then(theme::parse_color);
        self.config = config.clone();
        self.wheel.size_changed(self.bounds(), now);
        self.latest.set(Some(self.wheel.status()));
        Ok(())
    }

    /// Most recent notification since the last call.
    pub fn take_status(&self) -> Option<WheelStatus> {
        self.latest.take()
    }

    pub fn describe(&self, status: WheelStatus) -> String {
        format!(
            "angle = {:3}\npower = {:3}\ndirection = {}",
            status.angle,
            status.power,
            self.config.label(status.direction)
        )
    }
}
