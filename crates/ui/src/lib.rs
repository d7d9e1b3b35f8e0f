mod geometry;
mod styled;
mod theme;

pub mod animation;
pub mod progress;

pub use geometry::*;
pub use styled::*;
pub use theme::*;

/// Initialize the progress components.
///
/// This must be called before rendering any of the components.
pub fn init(cx: &mut gpui::App) {
    theme::init(cx);
}
