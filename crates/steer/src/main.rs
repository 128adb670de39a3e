use anyhow::Context;
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;
use steer::{
    Bounds, CurveKind, Padding, Point, SpriteSize, Sprites, Wheel, WheelStatus, curve, script,
};

#[derive(Parser, Debug)]
#[command(name = "steer", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    widget: WidgetArgs,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct WidgetArgs {
    /// Widget width in pixels
    #[arg(long, global = true, default_value_t = 200)]
    width: i32,

    /// Widget height in pixels
    #[arg(long, global = true, default_value_t = 200)]
    height: i32,

    /// Padding on every side
    #[arg(long, global = true, default_value_t = 0)]
    padding: i32,

    /// Ball sprite diameter
    #[arg(long, global = true, default_value_t = 20)]
    ball: i32,

    /// Arrow sprite width, inset from the outer radius
    #[arg(long, global = true, default_value_t = 20)]
    arrow: i32,
}

impl WidgetArgs {
    fn wheel(&self) -> anyhow::Result<Wheel> {
        let sprites = Sprites::new(
            Some(SpriteSize::new(self.ball, self.ball)),
            None,
            Some(SpriteSize::new(self.arrow, self.arrow)),
        )?;
        let mut wheel = Wheel::new(sprites);
        let bounds =
            Bounds::new(self.width, self.height).with_padding(Padding::uniform(self.padding));
        wheel.size_changed(bounds, Instant::now());
        Ok(wheel)
    }
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show where a single pointer sample puts the ball.
    Probe {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Replay a recorded pointer script and print every notification.
    Replay {
        script: PathBuf,

        /// Minimum milliseconds between notifications
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        interval: i64,

        /// Release curve (linear, accelerate_decelerate, decelerate, overshoot)
        #[arg(short, long, default_value_t = CurveKind::Overshoot)]
        curve: CurveKind,

        /// Overshoot tension
        #[arg(long, default_value_t = curve::DEFAULT_TENSION)]
        tension: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Probe { x, y } => probe(cli.widget, Point::new(x, y)),
        Commands::Replay {
            script,
            interval,
            curve,
            tension,
        } => replay(cli.widget, &script, interval, curve.with_tension(tension)),
    }
}

fn probe(widget: WidgetArgs, sample: Point) -> anyhow::Result<()> {
    let wheel = widget.wheel()?;
    let geometry = wheel.layout().geometry;
    let placement = geometry.place(sample);
    let angle = placement.angle.unwrap_or_default();

    println!(
        "center   = ({:.1}, {:.1}) radius {:.1} reach {:.1}",
        geometry.center.x,
        geometry.center.y,
        geometry.radius,
        geometry.reach()
    );
    println!(
        "ball     = ({:.3}, {:.3})",
        placement.position.x, placement.position.y
    );
    println!("angle    = {:3}", angle as u16);
    println!("power    = {:3}", geometry.power(placement.position));
    println!(
        "direction = {}",
        geometry.direction(placement.position, angle)
    );
    Ok(())
}

fn replay(
    widget: WidgetArgs,
    path: &Path,
    interval: i64,
    curve: steer::Curve,
) -> anyhow::Result<()> {
    let source = fs_err::read_to_string(path)?;
    let steps =
        script::parse(&source).with_context(|| format!("Failed to parse {}", path.display()))?;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut wheel = widget.wheel()?;
    wheel
        .notify_interval(interval)?
        .interpolator(curve)
        .listener(move |status: WheelStatus| sink.borrow_mut().push(status));

    let origin = Instant::now();
    let report = |at: Instant| {
        for status in seen.borrow_mut().drain(..) {
            println!("{:>6} ms  {}", at.duration_since(origin).as_millis(), status);
        }
    };

    let run_until = |wheel: &mut Wheel, limit: Option<Instant>| {
        while let Some(due) = wheel.next_wakeup()
            && limit.is_none_or(|limit| due <= limit)
        {
            wheel.advance(due);
            report(due);
        }
    };

    let count = steps.len();
    for step in steps {
        let at = origin + step.at;
        run_until(&mut wheel, Some(at));
        log::debug!("{:?} at {} ms", step.event, step.at.as_millis());
        wheel.handle(step.event, at);
    }
    run_until(&mut wheel, None);

    log::info!("replayed {count} events from {}", path.display());
    Ok(())
}
