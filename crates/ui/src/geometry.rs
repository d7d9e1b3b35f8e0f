use std::f32::consts::FRAC_PI_2;

use gpui::{Pixels, Point, point, px};

/// The angle where circular paths start: 12 o'clock.
pub const START_ANGLE: f32 = -FRAC_PI_2;

/// A trait for converting [`Pixels`] to `f32`.
pub trait PixelsExt {
    fn as_f32(&self) -> f32;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }
}

/// Returns the point at `angle` (radians, clockwise on screen) on a circle.
#[inline]
pub fn polar(center: Point<Pixels>, radius: f32, angle: f32) -> Point<Pixels> {
    point(
        center.x + px(radius * angle.cos()),
        center.y + px(radius * angle.sin()),
    )
}
