//! Difficulty curve
//!
//! Maps elapsed play time to the five parameters that make the game harder.
//! Scroll speed grows with the cube root of normalized time; everything else
//! follows the *relative* speed increase, not time directly.

use serde::Serialize;

use crate::tuning::Tuning;

/// Difficulty parameters at one instant of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difficulty {
    /// Abstract scroll speed, see [`Difficulty::scroll_pixels`]
    pub scroll_speed: f32,
    /// Downward acceleration in pixels per frame²
    pub gravity: f32,
    /// Velocity set by a flap (negative)
    pub impulse_force: f32,
    /// Vertical opening between the pipes of a pair
    pub gap_size: i32,
    /// Minimum horizontal distance between consecutive pairs
    pub pair_spacing: f32,
}

impl Difficulty {
    /// Pure function of elapsed play time
    pub fn at(elapsed_ms: u64, tuning: &Tuning) -> Self {
        let accel = elapsed_ms as f32 / tuning.difficulty_time_constant_ms;
        let speed_increase = accel.cbrt() * tuning.speed_increase_scale;
        let scroll_speed =
            (tuning.base_scroll_speed + speed_increase).min(tuning.max_scroll_speed);

        let relative = (scroll_speed - tuning.base_scroll_speed) / tuning.base_scroll_speed;
        let physics_scale = 1.0 + relative * tuning.physics_coupling;

        let gap = tuning.base_gap / (1.0 + relative * tuning.gap_shrink);
        let spacing = tuning.base_pair_spacing / (1.0 + relative * tuning.spacing_shrink);

        Self {
            scroll_speed,
            gravity: tuning.base_gravity * physics_scale,
            impulse_force: tuning.base_impulse_force * physics_scale,
            gap_size: gap.max(tuning.min_gap).floor() as i32,
            pair_spacing: spacing.max(tuning.min_pair_spacing),
        }
    }

    /// Whole pixels every obstacle moves left per frame (at least one)
    pub fn scroll_pixels(&self, tuning: &Tuning) -> i32 {
        ((self.scroll_speed * tuning.pixels_per_speed_unit).round() as i32).max(1)
    }

    /// Frames between spawns: time to travel `pair_spacing`, floor-bounded
    pub fn spawn_interval_frames(&self, tuning: &Tuning) -> u32 {
        let frames = (self.pair_spacing / self.scroll_pixels(tuning) as f32).ceil() as u32;
        frames.max(tuning.min_spawn_interval_frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base_values_at_zero() {
        let t = Tuning::default();
        let d = Difficulty::at(0, &t);
        assert_eq!(d.scroll_speed, t.base_scroll_speed);
        assert_eq!(d.gravity, t.base_gravity);
        assert_eq!(d.impulse_force, t.base_impulse_force);
        assert_eq!(d.gap_size, 220);
        assert_eq!(d.pair_spacing, 360.0);
        assert_eq!(d.scroll_pixels(&t), 2);
        assert_eq!(d.spawn_interval_frames(&t), 180);
    }

    #[test]
    fn test_three_minutes_in() {
        let t = Tuning::default();
        // cbrt(1) * 0.1 = 0.1 above base -> 50% relative increase
        let d = Difficulty::at(180_000, &t);
        assert!((d.scroll_speed - 0.3).abs() < 1e-5);
        assert!((d.gravity - 0.15 * 1.015).abs() < 1e-5);
        assert!((d.impulse_force - -4.5 * 1.015).abs() < 1e-4);
        assert_eq!(d.gap_size, 183);
        assert!((d.pair_spacing - 300.0).abs() < 1e-3);
        assert_eq!(d.scroll_pixels(&t), 3);
        assert_eq!(d.spawn_interval_frames(&t), 100);
    }

    #[test]
    fn test_clamped_far_out() {
        let t = Tuning::default();
        let d = Difficulty::at(u64::MAX / 4, &t);
        assert_eq!(d.scroll_speed, t.max_scroll_speed);
        assert_eq!(d.gap_size, t.min_gap as i32);
        assert_eq!(d.pair_spacing, t.min_pair_spacing);
        assert!(d.spawn_interval_frames(&t) >= t.min_spawn_interval_frames);
    }

    proptest! {
        #[test]
        fn prop_monotonic(a in 0u64..50_000_000, b in 0u64..50_000_000) {
            let t = Tuning::default();
            let (t1, t2) = if a <= b { (a, b) } else { (b, a) };
            let d1 = Difficulty::at(t1, &t);
            let d2 = Difficulty::at(t2, &t);

            prop_assert!(d2.scroll_speed >= d1.scroll_speed);
            prop_assert!(d2.gravity >= d1.gravity);
            prop_assert!(d2.impulse_force.abs() >= d1.impulse_force.abs());
            prop_assert!(d2.gap_size <= d1.gap_size);
            prop_assert!(d2.pair_spacing <= d1.pair_spacing);
            prop_assert!(d2.gap_size >= t.min_gap as i32);
            prop_assert!(d2.pair_spacing >= t.min_pair_spacing);
        }

        #[test]
        fn prop_deterministic(ms in any::<u64>()) {
            let t = Tuning::default();
            prop_assert_eq!(Difficulty::at(ms, &t), Difficulty::at(ms, &t));
        }
    }
}
