use std::time::{Duration, Instant};

use gpui::ease_in_out;

/// A timed transition of a single value from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl Transition {
    pub fn new(from: f32, to: f32, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// A transition that is already at rest on `value`.
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, Instant::now(), Duration::ZERO)
    }

    /// The linear progress of the transition at `now`, between 0.0 and 1.0.
    pub fn delta_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.;
        }

        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0., 1.)
    }

    /// The eased value at `now`.
    pub fn value_at(&self, now: Instant) -> f32 {
        let delta = self.delta_at(now);
        if delta >= 1. {
            return self.to;
        }

        self.from + (self.to - self.from) * ease_in_out(delta)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.delta_at(now) >= 1.
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}

/// How a [`Repeat`] behaves at the end of each leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// Jump back to the start, e.g. a spinner.
    #[default]
    Restart,
    /// Reverse direction at each bound.
    PingPong,
}

/// An indefinitely repeating cycle, sampled as a phase between 0.0 and 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repeat {
    start: Instant,
    duration: Duration,
    mode: RepeatMode,
}

impl Repeat {
    pub fn new(start: Instant, duration: Duration, mode: RepeatMode) -> Self {
        Self {
            start,
            duration,
            mode,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn mode(&self) -> RepeatMode {
        self.mode
    }

    /// Whether the phase moves at all, a zero duration holds it at 0.0.
    pub fn is_running(&self) -> bool {
        !self.duration.is_zero()
    }

    /// Position within the current cycle, in legs: `0.0..1.0` for
    /// [`RepeatMode::Restart`], `0.0..2.0` for [`RepeatMode::PingPong`].
    ///
    /// The remainder is taken in whole nanoseconds, so the resolution does not
    /// degrade however long the repeat has been running.
    fn legs_at(&self, now: Instant) -> f32 {
        let leg = self.duration.as_nanos();
        if leg == 0 {
            return 0.;
        }

        let legs_per_cycle = match self.mode {
            RepeatMode::Restart => 1,
            RepeatMode::PingPong => 2,
        };
        let elapsed = now.saturating_duration_since(self.start).as_nanos();
        let remainder = elapsed % (legs_per_cycle * leg);
        (remainder as f64 / leg as f64) as f32
    }

    /// The phase of the cycle at `now`.
    ///
    /// Every leg takes `duration`. For [`RepeatMode::PingPong`] the odd legs
    /// run backwards, so the phase goes `0 -> 1 -> 0` over two legs.
    pub fn phase_at(&self, now: Instant) -> f32 {
        let legs = self.legs_at(now);
        match self.mode {
            RepeatMode::Restart => legs,
            RepeatMode::PingPong => {
                if legs <= 1. {
                    legs
                } else {
                    2. - legs
                }
            }
        }
    }
}

/// A value that is driven towards its latest target by a [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValue {
    transition: Transition,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            transition: Transition::settled(value),
        }
    }

    /// Animate to `target`, starting from the value displayed at `now`.
    ///
    /// Calling this again with the same target keeps the running transition.
    pub fn animate_to(&mut self, target: f32, duration: Duration, now: Instant) {
        if self.transition.target() == target {
            return;
        }

        let from = self.value_at(now);
        self.transition = Transition::new(from, target, now, duration);
    }

    /// Set `target` immediately, dropping any running transition.
    pub fn jump_to(&mut self, target: f32) {
        self.transition = Transition::settled(target);
    }

    /// Cancel the running transition, freezing the value displayed at `now`.
    pub fn stop(&mut self, now: Instant) {
        if !self.transition.is_finished(now) {
            self.transition = Transition::settled(self.value_at(now));
        }
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        self.transition.value_at(now)
    }

    pub fn target(&self) -> f32 {
        self.transition.target()
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.transition.is_finished(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_transition() {
        let start = Instant::now();
        let transition = Transition::new(0., 1., start, ms(300));

        assert_eq!(transition.value_at(start), 0.);
        assert!(approx_eq(transition.value_at(start + ms(150)), 0.5));
        assert_eq!(transition.value_at(start + ms(300)), 1.);
        assert_eq!(transition.value_at(start + ms(1000)), 1.);
        assert!(!transition.is_finished(start + ms(299)));
        assert!(transition.is_finished(start + ms(300)));

        // Eased, so a quarter of the time covers less than a quarter of the way.
        assert!(transition.value_at(start + ms(75)) < 0.25);
    }

    #[test]
    fn test_settled_transition() {
        let transition = Transition::settled(0.4);
        assert!(transition.is_finished(Instant::now()));
        assert_eq!(transition.value_at(Instant::now()), 0.4);
        assert_eq!(transition.target(), 0.4);
    }

    #[test]
    fn test_repeat_restart() {
        let start = Instant::now();
        let repeat = Repeat::new(start, ms(1000), RepeatMode::Restart);

        assert_eq!(repeat.phase_at(start), 0.);
        assert!(approx_eq(repeat.phase_at(start + ms(250)), 0.25));
        assert!(approx_eq(repeat.phase_at(start + ms(1250)), 0.25));
        assert!(approx_eq(repeat.phase_at(start + ms(10_750)), 0.75));
    }

    #[test]
    fn test_repeat_keeps_resolution_over_long_runs() {
        let start = Instant::now();
        let days = Duration::from_secs(20 * 24 * 60 * 60);

        let spin = Repeat::new(start, ms(1000), RepeatMode::Restart);
        let base = start + days;
        assert!(approx_eq(spin.phase_at(base + ms(250)), 0.25));

        // One frame apart still moves the phase by one frame's worth.
        for i in 0..6 {
            let a = spin.phase_at(base + ms(16 * i));
            let b = spin.phase_at(base + ms(16 * (i + 1)));
            assert!(approx_eq(b - a, 0.016), "frame {i}: {a} -> {b}");
        }

        let bar = Repeat::new(start, ms(1000), RepeatMode::PingPong);
        assert!(approx_eq(bar.phase_at(base + ms(250)), 0.25));
        assert!(approx_eq(bar.phase_at(base + ms(1250)), 0.75));
        assert!(approx_eq(bar.phase_at(base + days + ms(1500)), 0.5));
    }

    #[test]
    fn test_repeat_ping_pong() {
        let start = Instant::now();
        let repeat = Repeat::new(start, ms(1000), RepeatMode::PingPong);

        assert!(approx_eq(repeat.phase_at(start + ms(250)), 0.25));
        assert!(approx_eq(repeat.phase_at(start + ms(1000)), 1.));
        assert!(approx_eq(repeat.phase_at(start + ms(1250)), 0.75));
        assert!(approx_eq(repeat.phase_at(start + ms(2000)), 0.));
        assert!(approx_eq(repeat.phase_at(start + ms(2250)), 0.25));
    }

    #[test]
    fn test_repeat_zero_duration() {
        let start = Instant::now();
        let repeat = Repeat::new(start, Duration::ZERO, RepeatMode::PingPong);
        assert_eq!(repeat.phase_at(start + ms(500)), 0.);
        assert!(!repeat.is_running());
        assert!(Repeat::new(start, ms(1), RepeatMode::Restart).is_running());
    }

    #[test]
    fn test_animated_value_retarget() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.);

        value.animate_to(1., ms(300), start);
        assert!(value.is_animating(start + ms(100)));

        // Retargeting mid-flight continues from the displayed value.
        let mid = start + ms(150);
        let shown = value.value_at(mid);
        value.animate_to(0.2, ms(300), mid);
        assert!(approx_eq(value.value_at(mid), shown));
        assert_eq!(value.value_at(mid + ms(300)), 0.2);
        assert!(!value.is_animating(mid + ms(300)));
    }

    #[test]
    fn test_animated_value_same_target_keeps_transition() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.);

        value.animate_to(1., ms(300), start);
        value.animate_to(1., ms(300), start + ms(200));
        assert_eq!(value.value_at(start + ms(300)), 1.);
    }

    #[test]
    fn test_animated_value_stop_and_jump() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.);

        value.animate_to(1., ms(300), start);
        let now = start + ms(150);
        let shown = value.value_at(now);
        value.stop(now);
        assert!(!value.is_animating(now));
        assert!(approx_eq(value.value_at(now + ms(1000)), shown));

        value.jump_to(0.8);
        assert_eq!(value.value_at(now), 0.8);
        assert_eq!(value.target(), 0.8);
    }
}
