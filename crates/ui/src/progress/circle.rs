use std::f32::consts::TAU;
use std::fmt::{self, Display, Formatter};
use std::time::{Duration, Instant};

use gpui::{
    AnyElement, App, Bounds, ElementId, Entity, Hsla, InteractiveElement as _, IntoElement,
    ParentElement, Path, PathBuilder, Pixels, Point, RenderOnce, StyleRefinement, Styled, Window,
    canvas, div, px,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{
    DEFAULT_ANIMATION_DURATION, DEFAULT_CYCLE_DURATION, ProgressFrame, ProgressMode,
    ProgressState, ProgressTarget, clamp_progress,
};
use crate::animation::RepeatMode;
use crate::geometry::{PixelsExt as _, START_ANGLE, polar};
use crate::{ActiveTheme, Sizable, Size, StyledExt};

/// Fraction of the circumference covered by the spinning arc.
const INDETERMINATE_ARC: f32 = 0.25;
/// Line segments used to approximate a full circle.
const ARC_STEPS: f32 = 96.;

/// The direction the filled arc grows in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "clockwise")]
    Clockwise,
    #[serde(rename = "counter-clockwise")]
    CounterClockwise,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Clockwise => write!(f, "clockwise"),
            Direction::CounterClockwise => write!(f, "counter-clockwise"),
        }
    }
}

/// The stroke geometry of a progress ring for one frame.
///
/// The arc is described the way a dashed stroke is: a `dash` drawn, a `gap`
/// skipped, the pattern shifted by `dash_offset`, and the whole shape turned
/// by `rotation` radians around the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleGeometry {
    pub radius: f32,
    pub circumference: f32,
    pub dash: f32,
    pub gap: f32,
    pub dash_offset: f32,
    pub rotation: f32,
}

impl CircleGeometry {
    fn ring(size: f32, thickness: f32) -> (f32, f32) {
        let radius = ((size - thickness) / 2.).max(0.);
        (radius, TAU * radius)
    }

    /// A ring filled to `progress`, which is clamped first.
    pub fn determinate(size: f32, thickness: f32, progress: f32, direction: Direction) -> Self {
        let (radius, circumference) = Self::ring(size, thickness);
        let offset = circumference * (1. - clamp_progress(progress));

        Self {
            radius,
            circumference,
            dash: circumference,
            gap: circumference,
            dash_offset: match direction {
                Direction::Clockwise => offset,
                Direction::CounterClockwise => -offset,
            },
            rotation: 0.,
        }
    }

    /// A fixed quarter arc, turned by `phase` of a full rotation.
    pub fn indeterminate(size: f32, thickness: f32, phase: f32) -> Self {
        let (radius, circumference) = Self::ring(size, thickness);

        Self {
            radius,
            circumference,
            dash: circumference * INDETERMINATE_ARC,
            gap: circumference * (1. - INDETERMINATE_ARC),
            dash_offset: 0.,
            rotation: phase * TAU,
        }
    }

    /// The drawn parts of the ring, as `(start, end)` arc lengths from the top.
    ///
    /// Arc length `s` is drawn when `(s + dash_offset) mod (dash + gap) < dash`.
    pub fn visible_segments(&self) -> SmallVec<[(f32, f32); 2]> {
        let mut segments = SmallVec::new();
        let period = self.dash + self.gap;
        if self.circumference <= 0. || period <= 0. || self.dash <= 0. {
            return segments;
        }

        let mut s = 0.;
        let mut pos = self.dash_offset.rem_euclid(period);
        while s < self.circumference {
            if pos < self.dash {
                let end = (s + self.dash - pos).min(self.circumference);
                if end > s {
                    segments.push((s, end));
                }
                s += self.dash - pos;
                pos = self.dash;
            } else {
                s += period - pos;
                pos = 0.;
            }
        }

        segments
    }

    /// The screen angle, in radians, of the point at arc length `s`.
    pub fn angle_at(&self, s: f32) -> f32 {
        if self.radius <= 0. {
            return START_ANGLE + self.rotation;
        }

        START_ANGLE + self.rotation + s / self.radius
    }
}

/// A circular progress indicator element.
#[derive(IntoElement)]
pub struct ProgressCircle {
    id: ElementId,
    style: StyleRefinement,
    progress: f32,
    size: Size,
    thickness: Pixels,
    color: Option<Hsla>,
    unfilled_color: Option<Hsla>,
    fill: Option<Hsla>,
    direction: Direction,
    animated: bool,
    animation_duration: Duration,
    indeterminate: bool,
    spin_duration: Duration,
    children: SmallVec<[AnyElement; 1]>,
}

impl ProgressCircle {
    /// Create a new circular progress indicator.
    pub fn new(id: impl Into<ElementId>) -> Self {
        ProgressCircle {
            id: id.into(),
            style: StyleRefinement::default(),
            progress: 0.,
            size: Size::default(),
            thickness: px(4.),
            color: None,
            unfilled_color: None,
            fill: None,
            direction: Direction::default(),
            animated: true,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            indeterminate: false,
            spin_duration: DEFAULT_CYCLE_DURATION,
            children: SmallVec::new(),
        }
    }

    /// Set the progress fraction, clamped to `0.0..=1.0`.
    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = clamp_progress(progress);
        self
    }

    /// Set the stroke width of the ring, default is 4px.
    pub fn thickness(mut self, thickness: impl Into<Pixels>) -> Self {
        self.thickness = thickness.into();
        self
    }

    /// Set the color of the filled arc.
    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the color of the unfilled track.
    pub fn unfilled_color(mut self, color: impl Into<Hsla>) -> Self {
        self.unfilled_color = Some(color.into());
        self
    }

    /// Set the color inside the ring, transparent by default.
    pub fn fill(mut self, color: impl Into<Hsla>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
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

    /// Spin a fixed arc instead of showing the progress.
    pub fn indeterminate(mut self, indeterminate: bool) -> Self {
        self.indeterminate = indeterminate;
        self
    }

    /// Set the time of one full turn in indeterminate mode, default is 1s.
    pub fn spin_duration(mut self, duration: Duration) -> Self {
        self.spin_duration = duration;
        self
    }

    fn diameter(&self) -> Pixels {
        match self.size {
            Size::XSmall => px(16.),
            Size::Small => px(24.),
            Size::Medium => px(32.),
            Size::Large => px(48.),
            Size::Size(size) => size,
        }
    }

    fn target(&self) -> ProgressTarget {
        ProgressTarget {
            mode: ProgressMode::from(self.indeterminate),
            progress: self.progress,
            animation: self.animated.then_some(self.animation_duration),
            cycle: self.spin_duration,
            repeat_mode: RepeatMode::Restart,
        }
    }

    fn render_ring(&self, state: Entity<ProgressState>, cx: &App) -> impl IntoElement + use<> {
        let theme = cx.theme();
        let color = self.color.unwrap_or(theme.progress_bar);
        let unfilled_color = self.unfilled_color.unwrap_or(theme.progress_track);
        let fill = self.fill.unwrap_or(theme.progress_fill);
        let thickness = self.thickness.as_f32();
        let direction = self.direction;

        struct PrepaintState {
            geometry: CircleGeometry,
            center: Point<Pixels>,
        }

        canvas(
            move |bounds: Bounds<Pixels>, window: &mut Window, cx: &mut App| {
                let now = Instant::now();
                let state = state.read(cx);
                if state.is_animating(now) {
                    window.request_animation_frame();
                }

                let size = bounds.size.width.min(bounds.size.height).as_f32();
                let geometry = match state.frame(now) {
                    ProgressFrame::Determinate(progress) => {
                        CircleGeometry::determinate(size, thickness, progress, direction)
                    }
                    ProgressFrame::Indeterminate(phase) => {
                        CircleGeometry::indeterminate(size, thickness, phase)
                    }
                };

                PrepaintState {
                    geometry,
                    center: bounds.center(),
                }
            },
            move |_, prepaint, window: &mut Window, _: &mut App| {
                let PrepaintState { geometry, center } = prepaint;
                if geometry.radius <= 0. {
                    return;
                }

                if fill.a > 0. {
                    if let Some(path) = disc_path(center, geometry.radius) {
                        window.paint_path(path, fill);
                    }
                }

                if let Some(path) = arc_path(center, geometry.radius, thickness, 0., TAU) {
                    window.paint_path(path, unfilled_color);
                }

                for (start, end) in geometry.visible_segments() {
                    let start_angle = geometry.angle_at(start);
                    let end_angle = geometry.angle_at(end);
                    if let Some(path) =
                        arc_path(center, geometry.radius, thickness, start_angle, end_angle)
                    {
                        window.paint_path(path, color);
                    }
                }
            },
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full()
    }
}

/// Build a stroked arc from `start_angle` to `end_angle`, clockwise.
fn arc_path(
    center: Point<Pixels>,
    radius: f32,
    thickness: f32,
    start_angle: f32,
    end_angle: f32,
) -> Option<Path<Pixels>> {
    let sweep = (end_angle - start_angle).min(TAU);
    if radius <= 0. || thickness <= 0. || sweep <= 0. {
        return None;
    }

    let steps = ((sweep / TAU) * ARC_STEPS).ceil().max(2.) as usize;
    let mut builder = PathBuilder::stroke(px(thickness));
    builder.move_to(polar(center, radius, start_angle));
    for i in 1..=steps {
        let angle = start_angle + sweep * (i as f32 / steps as f32);
        builder.line_to(polar(center, radius, angle));
    }
    if sweep >= TAU {
        builder.close();
    }

    builder.build().ok()
}

fn disc_path(center: Point<Pixels>, radius: f32) -> Option<Path<Pixels>> {
    let steps = ARC_STEPS as usize;
    let mut builder = PathBuilder::fill();
    builder.move_to(polar(center, radius, START_ANGLE));
    for i in 1..steps {
        let angle = START_ANGLE + TAU * (i as f32 / steps as f32);
        builder.line_to(polar(center, radius, angle));
    }
    builder.close();

    builder.build().ok()
}

impl Styled for ProgressCircle {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl Sizable for ProgressCircle {
    fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }
}

impl ParentElement for ProgressCircle {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for ProgressCircle {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let target = self.target();
        let state = window.use_keyed_state(self.id.clone(), cx, |_, _| {
            ProgressState::new(&target)
        });
        state.update(cx, |state, _| state.sync(&target, Instant::now()));

        let ring = self.render_ring(state, cx);
        let diameter = self.diameter();

        div()
            .id(self.id)
            .relative()
            .flex()
            .flex_shrink_0()
            .items_center()
            .justify_center()
            .size(diameter)
            .refine_style(&self.style)
            .child(ring)
            .children(self.children)
    }
}
