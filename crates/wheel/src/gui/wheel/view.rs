use super::model::WheelModel;
use super::{AXIS_WIDTH, STROKE_WIDTH};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;
use steer::{Point, Rect, SpriteSize};

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn paint_sprite(cr: &Context, pixbuf: &Pixbuf, rect: Rect) -> Result<(), cairo::Error> {
    cr.set_source_pixbuf(pixbuf, rect.left as f64, rect.top as f64);
    cr.paint()
}

pub fn draw(cr: &Context, model: &WheelModel, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let geometry = model.wheel.layout().geometry;
    if geometry.radius <= 0.0 {
        return Ok(());
    }

    draw_axes(cr, geometry.center, geometry.radius, colors)?;
    draw_rim(cr, geometry.center, geometry.radius, colors)?;
    draw_ball(cr, model, colors)?;
    if model.wheel.is_pressed() {
        draw_arrow(cr, model)?;
    }
    Ok(())
}

fn draw_axes(
    cr: &Context,
    center: Point,
    radius: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.axis);
    cr.set_line_width(AXIS_WIDTH);
    cr.move_to(center.x - radius, center.y);
    cr.line_to(center.x + radius, center.y);
    cr.move_to(center.x, center.y - radius);
    cr.line_to(center.x, center.y + radius);
    cr.stroke()
}

fn draw_rim(
    cr: &Context,
    center: Point,
    radius: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.stroke);
    cr.set_line_width(STROKE_WIDTH);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.stroke()
}

fn draw_ball(cr: &Context, model: &WheelModel, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let ball = model.wheel.ball();
    match model.sprites.ball(model.wheel.is_pressed()) {
        Some(pixbuf) => {
            let size = SpriteSize::new(pixbuf.width(), pixbuf.height());
            paint_sprite(cr, pixbuf, Rect::centered(ball, size))
        }
        None => {
            set_color(cr, colors.knob);
            cr.arc(
                ball.x,
                ball.y,
                model.wheel.layout().geometry.ball_radius,
                0.0,
                2.0 * PI,
            );
            cr.fill()
        }
    }
}

/// The arrow is laid out on the right-hand rim and rotated about the centre
/// to the heading. Screen y grows downwards, hence the negated angle.
fn draw_arrow(cr: &Context, model: &WheelModel) -> Result<(), cairo::Error> {
    let Some(pixbuf) = &model.sprites.arrow else {
        return Ok(());
    };
    let layout = model.wheel.layout();
    let center = layout.geometry.center;

    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate(-model.wheel.angle().to_radians());
    cr.translate(-center.x, -center.y);
    paint_sprite(cr, pixbuf, layout.arrow)?;
    cr.restore()
}
