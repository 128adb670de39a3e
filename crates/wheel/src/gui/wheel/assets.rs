//! Default sprites written next to the config on first start, so the wheel
//! has something to draw before the user supplies artwork.

use super::{ARROW_SIZE, BALL_DIAMETER};
use crate::config::SpriteConfig;
use cairo::{Context, Format, ImageSurface, RadialGradient};
use std::f64::consts::PI;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("PNG error: {0}")]
    Png(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes any default sprite that is not already present in `dir`.
pub fn write_defaults(dir: &Path) -> Result<(), AssetError> {
    fs_err::create_dir_all(dir)?;
    write_if_missing(&dir.join(SpriteConfig::BALL_FILE), BALL_DIAMETER, |cr, size| {
        paint_ball(cr, size, (0.55, 0.55, 0.6))
    })?;
    write_if_missing(
        &dir.join(SpriteConfig::BALL_PRESSED_FILE),
        BALL_DIAMETER,
        |cr, size| paint_ball(cr, size, (0.35, 0.45, 0.85)),
    )?;
    write_if_missing(&dir.join(SpriteConfig::ARROW_FILE), ARROW_SIZE, paint_arrow)
}

fn write_if_missing(
    path: &Path,
    size: i32,
    paint: impl FnOnce(&Context, f64) -> Result<(), cairo::Error>,
) -> Result<(), AssetError> {
    if path.exists() {
        return Ok(());
    }

    let surface = ImageSurface::create(Format::ARgb32, size, size)?;
    {
        let cr = Context::new(&surface)?;
        paint(&cr, size as f64)?;
    }

    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    log::info!("Wrote default sprite {}", path.display());
    Ok(())
}

fn paint_ball(cr: &Context, size: f64, (r, g, b): (f64, f64, f64)) -> Result<(), cairo::Error> {
    let c = size / 2.0;
    let shade = RadialGradient::new(c * 0.7, c * 0.7, 0.0, c, c, c);
    shade.add_color_stop_rgba(0.0, r + 0.3, g + 0.3, b + 0.3, 1.0);
    shade.add_color_stop_rgba(1.0, r, g, b, 1.0);

    cr.set_source(&shade)?;
    cr.arc(c, c, c - 1.0, 0.0, 2.0 * PI);
    cr.fill()
}

// points right; the wheel rotates it to the heading
fn paint_arrow(cr: &Context, size: f64) -> Result<(), cairo::Error> {
    cr.set_source_rgba(0.95, 0.95, 0.95, 0.9);
    cr.move_to(size * 0.2, size * 0.15);
    cr.line_to(size * 0.9, size / 2.0);
    cr.line_to(size * 0.2, size * 0.85);
    cr.line_to(size * 0.4, size / 2.0);
    cr.close_path();
    cr.fill()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdk_pixbuf::Pixbuf;

    #[test]
    fn test_write_defaults() {
        let dir = std::env::temp_dir().join(format!("wheel-assets-{}", std::process::id()));
        let _ = fs_err::remove_dir_all(&dir);

        write_defaults(&dir).unwrap();

        let cases = vec![
            (SpriteConfig::BALL_FILE, BALL_DIAMETER),
            (SpriteConfig::BALL_PRESSED_FILE, BALL_DIAMETER),
            (SpriteConfig::ARROW_FILE, ARROW_SIZE),
        ];
        for (file, size) in cases {
            let pixbuf = Pixbuf::from_file(dir.join(file)).unwrap();
            assert_eq!((pixbuf.width(), pixbuf.height()), (size, size), "{file}");
        }

        // existing files are left alone
        fs_err::write(dir.join(SpriteConfig::ARROW_FILE), b"custom").unwrap();
        write_defaults(&dir).unwrap();
        assert_eq!(
            fs_err::read(dir.join(SpriteConfig::ARROW_FILE)).unwrap(),
            b"custom"
        );

        let _ = fs_err::remove_dir_all(&dir);
    }
}
