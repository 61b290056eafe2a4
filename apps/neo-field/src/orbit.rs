//! Circular orbit placement and per-frame angular motion.
//!
//! Not a physical model: a body's starting angle comes from the time of day of its
//! close approach, and its angular speed from its relative velocity.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::config::OrbitConfig;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
const MS_PER_DAY: f64 = SECONDS_PER_DAY * 1000.0;

/// Hour and minute of a close approach, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    hours: u32,
    minutes: u32,
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        (hours < 24 && minutes < 60).then_some(Self { hours, minutes })
    }

    /// From a Unix timestamp in milliseconds.
    pub fn from_epoch_ms(epoch_ms: f64) -> Option<Self> {
        if !epoch_ms.is_finite() {
            return None;
        }
        let minute_of_day = (epoch_ms.rem_euclid(MS_PER_DAY) / 60_000.0).floor() as u32;
        Self::new(minute_of_day / 60 % 24, minute_of_day % 60)
    }

    /// From a timestamp ending in `HH:MM`, e.g. `2024-Jan-05 13:45`.
    pub fn parse_hh_mm(text: &str) -> Option<Self> {
        let clock = text.split_whitespace().last()?;
        let mut parts = clock.split(':');
        let hours = parts.next()?.parse().ok()?;
        let minutes = parts.next()?.parse().ok()?;
        Self::new(hours, minutes)
    }

    pub fn hours(self) -> u32 {
        self.hours
    }

    pub fn minutes(self) -> u32 {
        self.minutes
    }

    /// Fraction of the day elapsed, in [0, 1).
    pub fn fraction(self) -> f64 {
        (self.hours as f64 + self.minutes as f64 / 60.0) / 24.0
    }
}

/// Reduce an angle into [0, TAU).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Starting angle for a body: the time of day mapped onto one revolution.
pub fn initial_angle(time: TimeOfDay) -> f64 {
    wrap_angle(time.fraction() * TAU)
}

/// Radians per frame. One revolution per simulated day, sped up by relative velocity.
/// Negative or non-finite velocities count as zero, so bodies only ever turn one way.
pub fn angular_increment(velocity_kmh: f64, config: &OrbitConfig) -> f64 {
    let base = TAU * config.simulated_seconds_per_second / (SECONDS_PER_DAY * config.frames_per_second);
    let velocity = if velocity_kmh.is_finite() { velocity_kmh.max(0.0) } else { 0.0 };
    base * (1.0 + velocity / config.velocity_scale_kmh)
}

/// World position on a circle of `radius` around the origin.
pub fn orbit_position(radius: f64, angle: f64) -> DVec2 {
    DVec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Angular state of one orbiting body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    radius_px: f64,
    angle: f64,
    increment: f64,
}

impl OrbitState {
    pub fn new(radius_px: f64, angle: f64, increment: f64) -> Self {
        Self {
            radius_px: radius_px.max(0.0),
            angle: wrap_angle(angle),
            increment: if increment.is_finite() { increment.max(0.0) } else { 0.0 },
        }
    }

    /// A body pinned at the center.
    pub fn fixed() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn radius(&self) -> f64 {
        self.radius_px
    }

    pub fn set_radius(&mut self, radius_px: f64) {
        self.radius_px = radius_px.max(0.0);
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Step one frame. The angle is reduced every step, so it never drifts out of range.
    pub fn advance(&mut self) -> f64 {
        self.angle = wrap_angle(self.angle + self.increment);
        self.angle
    }

    pub fn position(&self) -> DVec2 {
        orbit_position(self.radius_px, self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_from_epoch_is_utc() {
        // 2024-01-05T13:45:30Z
        let t = TimeOfDay::from_epoch_ms(1_704_462_330_000.0).unwrap();
        assert_eq!((t.hours(), t.minutes()), (13, 45));
        assert!(TimeOfDay::from_epoch_ms(f64::NAN).is_none());
        // Before 1970 still lands inside the day.
        let t = TimeOfDay::from_epoch_ms(-60_000.0).unwrap();
        assert_eq!((t.hours(), t.minutes()), (23, 59));
    }

    #[test]
    fn time_of_day_from_text() {
        let t = TimeOfDay::parse_hh_mm("2024-Jan-05 07:09").unwrap();
        assert_eq!((t.hours(), t.minutes()), (7, 9));
        assert!(TimeOfDay::parse_hh_mm("2024-Jan-05").is_none());
        assert!(TimeOfDay::parse_hh_mm("2024-Jan-05 25:00").is_none());
    }

    #[test]
    fn initial_angle_follows_the_clock() {
        assert_eq!(initial_angle(TimeOfDay::new(0, 0).unwrap()), 0.0);
        let noon = initial_angle(TimeOfDay::new(12, 0).unwrap());
        assert!((noon - std::f64::consts::PI).abs() < 1e-12);
        let late = initial_angle(TimeOfDay::new(23, 59).unwrap());
        assert!(late < TAU);
    }

    #[test]
    fn increment_scales_with_velocity() {
        let config = OrbitConfig::default();
        let base = angular_increment(0.0, &config);
        // One revolution per day at 60 frames per second.
        assert!((base - TAU / (24.0 * 3600.0 * 60.0)).abs() < 1e-18);
        assert!((angular_increment(50_000.0, &config) - 2.0 * base).abs() < 1e-15);
        assert_eq!(angular_increment(-10.0, &config), base);
        assert_eq!(angular_increment(f64::NAN, &config), base);
    }

    #[test]
    fn time_lapse_is_opt_in() {
        let config = OrbitConfig { simulated_seconds_per_second: 3600.0, ..OrbitConfig::default() };
        let fast = angular_increment(0.0, &config);
        assert!((fast - 3600.0 * angular_increment(0.0, &OrbitConfig::default())).abs() < 1e-15);
    }

    #[test]
    fn angle_after_n_steps_matches_closed_form() {
        let start = 1.0;
        let inc = 0.0123;
        let mut orbit = OrbitState::new(100.0, start, inc);
        for n in 1..=10_000u32 {
            let angle = orbit.advance();
            assert!((0.0..TAU).contains(&angle));
            if n % 1000 == 0 {
                let expected = (start + n as f64 * inc).rem_euclid(TAU);
                let diff = (angle - expected).abs();
                assert!(diff.min(TAU - diff) < 1e-9, "step {n}: {angle} vs {expected}");
            }
        }
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        assert_eq!(wrap_angle(TAU), 0.0);
        assert!(wrap_angle(-1e-18) < TAU);
        assert!((wrap_angle(-1.0) - (TAU - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn orbit_state_never_runs_backwards() {
        let orbit = OrbitState::new(-5.0, 0.0, -0.1);
        assert_eq!(orbit.radius(), 0.0);
        assert_eq!(orbit.increment(), 0.0);
    }

    #[test]
    fn position_lies_on_the_circle() {
        let orbit = OrbitState::new(250.0, 0.7, 0.0);
        assert!((orbit.position().length() - 250.0).abs() < 1e-9);
        assert_eq!(OrbitState::fixed().position(), DVec2::ZERO);
    }
}
