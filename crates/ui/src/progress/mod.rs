mod bar;
mod circle;

use std::time::{Duration, Instant};

use crate::animation::{AnimatedValue, Repeat, RepeatMode};

pub use bar::{BarGeometry, BarWidth, ProgressBar};
pub use circle::{CircleGeometry, Direction, ProgressCircle};

/// Default duration of the determinate transition.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);
/// Default duration of one indeterminate cycle leg.
pub const DEFAULT_CYCLE_DURATION: Duration = Duration::from_millis(1000);

/// Clamp a progress fraction into `0.0..=1.0`, NaN becomes 0.0.
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        return 0.;
    }

    progress.clamp(0., 1.)
}

/// The display mode of a progress component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressMode {
    /// Shows a known fraction of completion.
    #[default]
    Determinate,
    /// Loops, independent of the progress value.
    Indeterminate,
}

impl From<bool> for ProgressMode {
    fn from(indeterminate: bool) -> Self {
        if indeterminate {
            Self::Indeterminate
        } else {
            Self::Determinate
        }
    }
}

/// The props a [`ProgressState`] is synced against on every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ProgressTarget {
    pub(crate) mode: ProgressMode,
    pub(crate) progress: f32,
    /// `None` when the determinate transition is disabled.
    pub(crate) animation: Option<Duration>,
    pub(crate) cycle: Duration,
    pub(crate) repeat_mode: RepeatMode,
}

/// What a component paints for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ProgressFrame {
    Determinate(f32),
    Indeterminate(f32),
}

/// Shared state for progress components.
pub(crate) struct ProgressState {
    progress: AnimatedValue,
    cycle: Option<Repeat>,
    mode: ProgressMode,
}

impl ProgressState {
    pub(crate) fn new(target: &ProgressTarget) -> Self {
        let mut this = Self {
            progress: AnimatedValue::new(clamp_progress(target.progress)),
            cycle: None,
            mode: ProgressMode::Determinate,
        };
        this.sync(target, Instant::now());
        this
    }

    /// Apply the latest props, cancelling whatever the inactive mode was running.
    pub(crate) fn sync(&mut self, target: &ProgressTarget, now: Instant) {
        let progress = clamp_progress(target.progress);

        match target.mode {
            ProgressMode::Determinate => {
                if self.cycle.take().is_some() {
                    tracing::trace!("progress: cancel indeterminate cycle");
                }

                match target.animation {
                    Some(duration) => self.progress.animate_to(progress, duration, now),
                    None => self.progress.jump_to(progress),
                }
            }
            ProgressMode::Indeterminate => {
                self.progress.stop(now);

                let restart = match &self.cycle {
                    Some(cycle) => {
                        cycle.duration() != target.cycle || cycle.mode() != target.repeat_mode
                    }
                    None => true,
                };
                if restart {
                    tracing::trace!(
                        "progress: start indeterminate cycle, duration: {:?}",
                        target.cycle
                    );
                    self.cycle = Some(Repeat::new(now, target.cycle, target.repeat_mode));
                }
            }
        }

        if self.mode != target.mode {
            tracing::trace!("progress: mode {:?} -> {:?}", self.mode, target.mode);
            self.mode = target.mode;
        }
    }

    pub(crate) fn frame(&self, now: Instant) -> ProgressFrame {
        match &self.cycle {
            Some(cycle) => ProgressFrame::Indeterminate(cycle.phase_at(now)),
            None => ProgressFrame::Determinate(self.progress.value_at(now)),
        }
    }

    pub(crate) fn is_animating(&self, now: Instant) -> bool {
        self.cycle.is_some_and(|cycle| cycle.is_running()) || self.progress.is_animating(now)
    }
}
