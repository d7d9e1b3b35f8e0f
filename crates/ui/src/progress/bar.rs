use std::time::{Duration, Instant};

use gpui::prelude::FluentBuilder as _;
use gpui::{
    App, Bounds, Corners, ElementId, Entity, Hsla, InteractiveElement as _, IntoElement, ParentElement,
    Pixels, RenderOnce, StyleRefinement, Styled, Window, canvas, div, fill, point, px, size,
};

use super::{
    DEFAULT_ANIMATION_DURATION, DEFAULT_CYCLE_DURATION, ProgressFrame, ProgressMode,
    ProgressState, ProgressTarget, clamp_progress,
};
use crate::animation::RepeatMode;
use crate::geometry::PixelsExt as _;
use crate::{ActiveTheme, Sizable, Size, StyledExt};

/// Fraction of the container covered by the sliding segment.
const INDETERMINATE_SEGMENT: f32 = 0.3;

/// How the width of a [`ProgressBar`] is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BarWidth {
    /// Fill the container and measure it on layout.
    #[default]
    Auto,
    Fixed(Pixels),
}

/// The filled segment of a progress bar for one frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub container_width: f32,
    pub filled_width: f32,
    pub offset: f32,
}

impl BarGeometry {
    /// A segment from the leading edge covering `progress`, which is clamped first.
    pub fn determinate(container_width: f32, progress: f32) -> Self {
        let container_width = container_width.max(0.);
        Self {
            container_width,
            filled_width: container_width * clamp_progress(progress),
            offset: 0.,
        }
    }

    /// A fixed 30% segment sliding between both edges as `phase` goes `0 -> 1`.
    pub fn indeterminate(container_width: f32, phase: f32) -> Self {
        let container_width = container_width.max(0.);
        let filled_width = container_width * INDETERMINATE_SEGMENT;
        Self {
            container_width,
            filled_width,
            offset: phase.clamp(0., 1.) * (container_width - filled_width),
        }
    }

    /// Lay out one frame inside `track`, the bar's content box.
    ///
    /// The width is always the measured one: a fixed width is applied to the
    /// outer box, so borders are already taken out of `track`.
    pub(crate) fn layout(track: Bounds<Pixels>, frame: ProgressFrame) -> Bounds<Pixels> {
        let width = track.size.width.as_f32();
        let geometry = match frame {
            ProgressFrame::Determinate(progress) => Self::determinate(width, progress),
            ProgressFrame::Indeterminate(phase) => Self::indeterminate(width, phase),
        };

        Bounds::new(
            point(track.origin.x + px(geometry.offset), track.origin.y),
            size(px(geometry.filled_width), track.size.height),
        )
    }
}

/// The corner radius of the filled segment, inset by the track's border.
fn inner_radius(radius: Pixels, border_width: Pixels) -> Pixels {
    px((radius.as_f32() - border_width.as_f32()).max(0.))
}

/// A linear progress bar element.
#[derive(IntoElement)]
pub struct ProgressBar {
    id: ElementId,
    style: StyleRefinement,
    progress: f32,
    width: BarWidth,
    size: Option<Size>,
    color: Option<Hsla>,
    unfilled_color: Option<Hsla>,
    animated: bool,
    animation_duration: Duration,
    indeterminate: bool,
    indeterminate_duration: Duration,
}

impl ProgressBar {
    /// Create a new progress bar.
    pub fn new(id: impl Into<ElementId>) -> Self {
        ProgressBar {
            id: id.into(),
            style: StyleRefinement::default(),
            progress: 0.,
            width: BarWidth::Auto,
            size: None,
            color: None,
            unfilled_color: None,
            animated: true,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            indeterminate: false,
            indeterminate_duration: DEFAULT_CYCLE_DURATION,
        }
    }

    /// Set the progress fraction, clamped to `0.0..=1.0`.
    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = clamp_progress(progress);
        self
    }

    /// Set a fixed width, by default the bar fills and measures its container.
    pub fn width(mut self, width: impl Into<Pixels>) -> Self {
        self.width = BarWidth::Fixed(width.into());
        self
    }

    /// Set the color of the filled segment.
    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the color of the track, also the default border color.
    pub fn unfilled_color(mut self, color: impl Into<Hsla>) -> Self {
        self.unfilled_color = Some(color.into());
        self
    }

    /// Animate progress changes, default is true.
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Slide a fixed segment back and forth instead of showing the progress.
    pub fn indeterminate(mut self, indeterminate: bool) -> Self {
        self.indeterminate = indeterminate;
        self
    }

    /// Set the time the segment takes to cross the bar once, default is 1s.
    pub fn indeterminate_duration(mut self, duration: Duration) -> Self {
        self.indeterminate_duration = duration;
        self
    }

    fn height(&self) -> Pixels {
        match self.size {
            None => px(4.),
            Some(Size::XSmall) => px(4.),
            Some(Size::Small) => px(6.),
            Some(Size::Medium) => px(8.),
            Some(Size::Large) => px(10.),
            Some(Size::Size(height)) => height,
        }
    }

    fn target(&self) -> ProgressTarget {
        ProgressTarget {
            mode: ProgressMode::from(self.indeterminate),
            progress: self.progress,
            animation: self.animated.then_some(self.animation_duration),
            cycle: self.indeterminate_duration,
            repeat_mode: RepeatMode::PingPong,
        }
    }

    fn render_fill(
        &self,
        state: Entity<ProgressState>,
        window: &Window,
        cx: &App,
    ) -> impl IntoElement + use<> {
        let color = self.color.unwrap_or(cx.theme().progress_bar);
        let rem_size = window.rem_size();
        let radius = self
            .style
            .corner_radii
            .top_left
            .map(|radius| radius.to_pixels(rem_size))
            .unwrap_or_default();
        let border_width = self
            .style
            .border_widths
            .left
            .map(|width| width.to_pixels(rem_size))
            .unwrap_or_default();
        let radius = inner_radius(radius, border_width);

        canvas(
            move |track: Bounds<Pixels>, window: &mut Window, cx: &mut App| {
                let now = Instant::now();
                let frame = state.update(cx, |state, _| {
                    if state.is_animating(now) {
                        window.request_animation_frame();
                    }
                    state.frame(now)
                });

                BarGeometry::layout(track, frame)
            },
            move |_, segment: Bounds<Pixels>, window: &mut Window, _: &mut App| {
                if segment.size.width <= px(0.) {
                    return;
                }

                window.paint_quad(fill(segment, color).corner_radii(Corners::all(radius)));
            },
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full()
    }
}

impl Styled for ProgressBar {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl Sizable for ProgressBar {
    fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }
}

impl RenderOnce for ProgressBar {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let unfilled_color = self.unfilled_color.unwrap_or(cx.theme().progress_track);
        let target = self.target();
        let state = window.use_keyed_state(self.id.clone(), cx, |_, _| {
            ProgressState::new(&target)
        });
        state.update(cx, |state, _| state.sync(&target, Instant::now()));

        let segment = self.render_fill(state, window, cx);

        div()
            .id(self.id.clone())
            .relative()
            .overflow_hidden()
            .map(|this| match self.width {
                BarWidth::Auto => this.w_full(),
                BarWidth::Fixed(width) => this.w(width),
            })
            .h(self.height())
            .bg(unfilled_color)
            .border_color(unfilled_color)
            .refine_style(&self.style)
            .child(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn approx_px(a: Pixels, b: f32) -> bool {
        approx_eq(a.as_f32(), b)
    }

    #[test]
    fn test_layout_inside_border() {
        // `.width(px(240.)).border_2()`: the content box is 236px from x = 2.
        let track = Bounds::new(point(px(2.), px(2.)), size(px(236.), px(6.)));

        let half = BarGeometry::layout(track, ProgressFrame::Determinate(0.5));
        assert!(approx_px(half.origin.x, 2.));
        assert!(approx_px(half.size.width, 118.));
        assert_eq!(half.size.height, px(6.));

        let full = BarGeometry::layout(track, ProgressFrame::Determinate(1.));
        assert!(approx_px(full.origin.x + full.size.width, 238.));

        let almost = BarGeometry::layout(track, ProgressFrame::Determinate(0.99));
        assert!(almost.size.width < full.size.width);

        let far = BarGeometry::layout(track, ProgressFrame::Indeterminate(1.));
        assert!(approx_px(far.size.width, 70.8));
        assert!(approx_px(far.origin.x + far.size.width, 238.));
    }

    #[test]
    fn test_inner_radius() {
        assert_eq!(inner_radius(px(8.), px(2.)), px(6.));
        assert_eq!(inner_radius(px(8.), px(0.)), px(8.));
        assert_eq!(inner_radius(px(1.), px(2.)), px(0.));
        assert_eq!(inner_radius(px(0.), px(0.)), px(0.));
    }

    #[test]
    fn test_determinate_geometry() {
        let geometry = BarGeometry::determinate(200., 0.5);
        assert_eq!(geometry.filled_width, 100.);
        assert_eq!(geometry.offset, 0.);

        for width in [1., 37.5, 200., 1024.] {
            for progress in [-1., 0., 0.25, 0.9, 1., 4.] {
                let geometry = BarGeometry::determinate(width, progress);
                assert!(approx_eq(
                    geometry.filled_width,
                    width * clamp_progress(progress)
                ));
            }
        }
    }

    #[test]
    fn test_indeterminate_geometry() {
        let start = BarGeometry::indeterminate(200., 0.);
        assert!(approx_eq(start.filled_width, 60.));
        assert_eq!(start.offset, 0.);

        let end = BarGeometry::indeterminate(200., 1.);
        assert!(approx_eq(end.filled_width, 60.));
        assert!(approx_eq(end.offset, 140.));
        assert!(approx_eq(end.offset + end.filled_width, 200.));

        let middle = BarGeometry::indeterminate(200., 0.5);
        assert!(approx_eq(middle.offset, 70.));
    }

    #[test]
    fn test_indeterminate_ping_pong() {
        use crate::animation::Repeat;

        let start = Instant::now();
        let cycle = Repeat::new(start, Duration::from_millis(1000), RepeatMode::PingPong);
        let offset_at = |millis| {
            let phase = cycle.phase_at(start + Duration::from_millis(millis));
            BarGeometry::indeterminate(300., phase).offset
        };

        assert!(approx_eq(offset_at(0), 0.));
        assert!(approx_eq(offset_at(1000), 210.));
        // Reverses at the far edge instead of jumping back.
        assert!(offset_at(1200) < offset_at(1000));
        assert!(approx_eq(offset_at(2000), 0.));
        assert!(offset_at(2200) > offset_at(2000));
    }

    #[test]
    fn test_builder() {
        let bar = ProgressBar::new("bar").progress(-2.).width(px(320.));
        assert_eq!(bar.progress, 0.);
        assert_eq!(bar.width, BarWidth::Fixed(px(320.)));
        assert_eq!(BarWidth::default(), BarWidth::Auto);
        assert_eq!(bar.height(), px(4.));

        let bar = ProgressBar::new("bar")
            .large()
            .indeterminate(true)
            .indeterminate_duration(Duration::from_millis(1500));
        assert_eq!(bar.height(), px(10.));
        let target = bar.target();
        assert_eq!(target.mode, ProgressMode::Indeterminate);
        assert_eq!(target.repeat_mode, RepeatMode::PingPong);
        assert_eq!(target.cycle, Duration::from_millis(1500));
    }
}
