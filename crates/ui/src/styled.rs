use gpui::{Div, Pixels, Refineable, StyleRefinement, Styled, div, px};

/// Returns a `Div` as horizontal flex layout.
#[inline]
pub fn h_flex() -> Div {
    div().h_flex()
}

/// Returns a `Div` as vertical flex layout.
#[inline]
pub fn v_flex() -> Div {
    div().v_flex()
}

/// Extends [`Styled`] with the helpers the components share.
pub trait StyledExt: Styled + Sized {
    /// Refine the style of this element, applying the given style refinement.
    fn refine_style(mut self, style: &StyleRefinement) -> Self {
        self.style().refine(style);
        self
    }

    /// Apply self into a horizontal flex layout.
    #[inline]
    fn h_flex(self) -> Self {
        self.flex().flex_row().items_center()
    }

    /// Apply self into a vertical flex layout.
    #[inline]
    fn v_flex(self) -> Self {
        self.flex().flex_col()
    }
}

impl<E: Styled> StyledExt for E {}

/// A size preset, or an exact size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Size {
    Size(Pixels),
    XSmall,
    Small,
    #[default]
    Medium,
    Large,
}

impl From<Pixels> for Size {
    fn from(size: Pixels) -> Self {
        Size::Size(size)
    }
}

impl From<f32> for Size {
    fn from(size: f32) -> Self {
        Size::Size(px(size))
    }
}

/// A trait for elements that can be sized.
pub trait Sizable: Sized {
    /// Set the size, a [`Size`] preset or [`Pixels`].
    fn with_size(self, size: impl Into<Size>) -> Self;

    fn xsmall(self) -> Self {
        self.with_size(Size::XSmall)
    }

    fn small(self) -> Self {
        self.with_size(Size::Small)
    }

    fn medium(self) -> Self {
        self.with_size(Size::Medium)
    }

    fn large(self) -> Self {
        self.with_size(Size::Large)
    }
}
