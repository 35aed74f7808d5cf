//! Timing minigame: a bouncing indicator sampled at a player-chosen instant.
//!
//! The bar is a pure function of elapsed simulated time and zone geometry.
//! Nothing here reads a frame timer; callers advance it with explicit `dt`
//! values, typically through [`FixedStepClock`].

mod clock;
mod zone;

pub use clock::FixedStepClock;
pub use zone::{AttackZones, Tier, Zone};

/// Direction of indicator travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Continuously bouncing indicator on `[-W/2, +W/2]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingBar {
    half_width: f32,
    speed: f32,
    position: f32,
    direction: Direction,
    moving: bool,
}

impl TimingBar {
    /// Creates a bar of full width `width` parked at the left bound.
    ///
    /// Negative or non-finite inputs collapse to a zero-width, stationary bar.
    pub fn new(width: f32, speed: f32) -> Self {
        let half_width = if width.is_finite() && width > 0.0 {
            width / 2.0
        } else {
            0.0
        };
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            0.0
        };
        Self {
            half_width,
            speed,
            position: -half_width,
            direction: Direction::Right,
            moving: false,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    /// Resets to the left bound and resumes motion.
    pub fn restart(&mut self) {
        self.position = -self.half_width;
        self.direction = Direction::Right;
        self.moving = true;
    }

    /// Stops motion and parks at the left bound.
    pub fn stop(&mut self) {
        self.position = -self.half_width;
        self.direction = Direction::Right;
        self.moving = false;
    }

    /// Advances the indicator by `speed * dt`, reflecting at both bounds.
    pub fn advance(&mut self, dt: f32) {
        if !self.moving || !dt.is_finite() || dt <= 0.0 || self.half_width <= 0.0 {
            return;
        }

        // One full round trip is 2W; only the remainder changes the state.
        let period = self.half_width * 4.0;
        let mut remaining = (self.speed * dt) % period;

        while remaining > 0.0 {
            let to_bound = match self.direction {
                Direction::Right => self.half_width - self.position,
                Direction::Left => self.position + self.half_width,
            };

            if remaining < to_bound {
                match self.direction {
                    Direction::Right => self.position += remaining,
                    Direction::Left => self.position -= remaining,
                }
                remaining = 0.0;
            } else {
                self.position = match self.direction {
                    Direction::Right => self.half_width,
                    Direction::Left => -self.half_width,
                };
                remaining -= to_bound;
                self.direction = self.direction.flipped();
            }
        }
    }

    /// Freezes the indicator and returns the innermost matching tier.
    ///
    /// `zones` pairs each tier with its zone; the best (highest) tier whose
    /// zone contains the frozen position wins, `Tier::Miss` if none do.
    pub fn check(&mut self, zones: &[(Tier, Zone)]) -> Tier {
        self.moving = false;
        zones
            .iter()
            .filter(|(_, zone)| zone.contains(self.position))
            .map(|(tier, _)| *tier)
            .max()
            .unwrap_or(Tier::Miss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_bar() -> TimingBar {
        let mut bar = TimingBar::new(800.0, 500.0);
        bar.restart();
        bar
    }

    #[test]
    fn starts_parked_at_left_bound() {
        let bar = TimingBar::new(800.0, 500.0);
        assert_eq!(bar.position(), -400.0);
        assert!(!bar.is_moving());
    }

    #[test]
    fn advances_by_speed_times_dt() {
        let mut bar = running_bar();
        bar.advance(0.5);
        assert_eq!(bar.position(), -150.0);
        assert_eq!(bar.direction(), Direction::Right);
    }

    #[test]
    fn reflects_at_right_bound() {
        let mut bar = running_bar();
        // 800 to reach the right bound, then 100 back.
        bar.advance(1.8);
        assert!((bar.position() - 300.0).abs() < 1e-3);
        assert_eq!(bar.direction(), Direction::Left);
    }

    #[test]
    fn full_period_returns_to_start() {
        let mut bar = running_bar();
        bar.advance(3.2);
        assert!((bar.position() + 400.0).abs() < 1e-3);
    }

    #[test]
    fn step_size_does_not_change_result() {
        let mut coarse = running_bar();
        coarse.advance(1.0);

        let mut fine = running_bar();
        for _ in 0..100 {
            fine.advance(0.01);
        }

        assert!((coarse.position() - fine.position()).abs() < 0.5);
        assert_eq!(coarse.direction(), fine.direction());
    }

    #[test]
    fn check_freezes_and_returns_innermost_tier() {
        let zones = AttackZones::default();
        let mut bar = running_bar();
        bar.advance(0.8); // position 0: inside every zone
        assert_eq!(bar.check(&zones.tiers()), Tier::Perfect);
        assert!(!bar.is_moving());

        bar.advance(1.0);
        assert_eq!(bar.position(), 0.0);
    }

    #[test]
    fn check_outside_zones_is_miss() {
        let zones = AttackZones::default();
        let mut bar = running_bar();
        assert_eq!(bar.check(&zones.tiers()), Tier::Miss);
    }

    #[test]
    fn restart_resumes_from_left_bound() {
        let mut bar = running_bar();
        bar.advance(0.3);
        bar.check(&[]);
        bar.restart();
        assert_eq!(bar.position(), -400.0);
        assert!(bar.is_moving());
    }

    #[test]
    fn degenerate_bar_never_moves() {
        let mut bar = TimingBar::new(-5.0, f32::NAN);
        bar.restart();
        bar.advance(10.0);
        assert_eq!(bar.position(), 0.0);
    }
}
