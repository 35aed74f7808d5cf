//! Fixed-step accumulator decoupling bar motion from frame timing.

/// Turns variable frame deltas into a whole number of fixed steps.
///
/// The step count is derived from the total elapsed time since the last
/// reset, so the same total always yields the same number of steps no matter
/// how it was split across calls.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedStepClock {
    step: f32,
    elapsed: f64,
    consumed: u64,
}

impl FixedStepClock {
    /// Relative slack for totals that land a rounding error short of a step
    /// boundary (an `f32` step such as 1/60 is not exact).
    const BOUNDARY_SLACK: f64 = 1e-6;

    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            1.0 / 60.0
        };
        Self {
            step,
            elapsed: 0.0,
            consumed: 0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds `dt` and returns how many fixed steps are now due.
    pub fn accumulate(&mut self, dt: f32) -> u64 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += f64::from(dt);
        }

        let ratio = self.elapsed / f64::from(self.step);
        let due = (ratio * (1.0 + Self::BOUNDARY_SLACK)).floor() as u64;
        let steps = due.saturating_sub(self.consumed);
        self.consumed = due.max(self.consumed);
        steps
    }

    /// Drops all elapsed time, including any pending partial step.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.consumed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_remainder_between_calls() {
        let mut clock = FixedStepClock::new(0.25);
        assert_eq!(clock.accumulate(0.125), 0);
        assert_eq!(clock.accumulate(0.25), 1);
        assert_eq!(clock.accumulate(0.5), 2);
    }

    #[test]
    fn long_deltas_keep_every_step() {
        let mut single = FixedStepClock::new(1.0 / 60.0);
        let mut split = FixedStepClock::new(1.0 / 60.0);

        let whole = single.accumulate(5.0);
        let parts: u64 = (0..5).map(|_| split.accumulate(1.0)).sum();

        assert_eq!(whole, 300);
        assert_eq!(parts, 300);
    }

    #[test]
    fn reset_drops_partial_step() {
        let mut clock = FixedStepClock::new(0.25);
        assert_eq!(clock.accumulate(0.2), 0);
        clock.reset();
        assert_eq!(clock.accumulate(0.2), 0);
        assert_eq!(clock.accumulate(0.05), 1);
    }

    #[test]
    fn invalid_step_falls_back() {
        let clock = FixedStepClock::new(0.0);
        assert!((clock.step() - 1.0 / 60.0).abs() < f32::EPSILON);
    }
}
