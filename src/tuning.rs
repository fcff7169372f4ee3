//! Data-driven game balance
//!
//! Every gameplay constant lives here so the simulation never reaches for a
//! literal. `Tuning::default()` is the canonical tuning the game ships with.

use serde::{Deserialize, Serialize};

/// Gameplay constants supplied to [`crate::sim::GameState`] at construction.
///
/// Lengths are screen pixels (y grows downward), velocities are pixels per
/// frame, angles are degrees.
///
/// A deserialized tuning is not trusted: [`Tuning::validate`] checks that
/// `min_rotation <= max_rotation`, that the scroll speed, time constant and
/// pixel scale are positive, and that the screen leaves room for the ground
/// and pipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    // === Screen ===
    pub screen_width: i32,
    pub screen_height: i32,
    /// Height of the ground band at the bottom of the screen
    pub ground_height: i32,

    // === Bird ===
    pub bird_width: i32,
    pub bird_height: i32,
    /// Fixed horizontal position of the bird's left edge
    pub bird_x: i32,
    /// Cap on downward velocity
    pub terminal_velocity: f32,
    /// Nose-up angle, applied while rising
    pub min_rotation: f32,
    /// Nose-down angle, approached while falling
    pub max_rotation: f32,
    /// Per-frame rotation increment while falling
    pub rotation_step: f32,
    /// Vertical amplitude of the idle bob in the Waiting phase
    pub idle_sway_amplitude: f32,
    /// Milliseconds per radian of the idle bob
    pub idle_sway_period_ms: f32,

    // === Obstacles ===
    pub pipe_width: i32,
    /// Minimum height of either pipe of a pair
    pub pipe_min_height: i32,
    /// Never spawn pairs more often than this, whatever the speed
    pub min_spawn_interval_frames: u32,

    // === Difficulty curve ===
    pub base_gravity: f32,
    /// Negative: impulses point up
    pub base_impulse_force: f32,
    pub base_scroll_speed: f32,
    pub max_scroll_speed: f32,
    /// Elapsed play time is divided by this before the cube root
    pub difficulty_time_constant_ms: f32,
    /// Scale applied to the cube-root growth term
    pub speed_increase_scale: f32,
    /// Gravity and impulse grow by this fraction per unit of relative speed increase
    pub physics_coupling: f32,
    /// Converts scroll speed units into pixels per frame
    pub pixels_per_speed_unit: f32,
    pub base_gap: f32,
    pub min_gap: f32,
    pub gap_shrink: f32,
    pub base_pair_spacing: f32,
    pub min_pair_spacing: f32,
    pub spacing_shrink: f32,

    // === Background ===
    /// Parallax pixels per frame while waiting
    pub idle_scroll: f32,
    /// Parallax pixels per frame while playing
    pub play_scroll: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        let screen_width = 800;
        let screen_height = 600;
        Self {
            screen_width,
            screen_height,
            ground_height: 100,

            bird_width: 40,
            bird_height: 40,
            bird_x: screen_width / 4,
            terminal_velocity: 4.0,
            min_rotation: -25.0,
            max_rotation: 70.0,
            rotation_step: 2.0,
            idle_sway_amplitude: 30.0,
            idle_sway_period_ms: 500.0,

            pipe_width: 60,
            pipe_min_height: 100,
            min_spawn_interval_frames: 60,

            base_gravity: 0.15,
            base_impulse_force: -4.5,
            base_scroll_speed: 0.2,
            max_scroll_speed: 0.6,
            difficulty_time_constant_ms: 180_000.0,
            speed_increase_scale: 0.1,
            physics_coupling: 0.03,
            pixels_per_speed_unit: 10.0,
            base_gap: 220.0,
            min_gap: 160.0,
            gap_shrink: 0.4,
            // 360 px at 2 px/frame spawns a pair every 180 frames
            base_pair_spacing: 360.0,
            min_pair_spacing: 240.0,
            spacing_shrink: 0.4,

            idle_scroll: 0.5,
            play_scroll: 1.0,
        }
    }
}

impl Tuning {
    /// Top edge of the ground band
    pub fn ground_y(&self) -> i32 {
        self.screen_height - self.ground_height
    }

    /// Resting vertical position of the bird before and after a run
    pub fn bird_start_y(&self) -> i32 {
        self.screen_height / 2
    }

    /// Check the ranges the simulation relies on
    pub fn validate(&self) -> Result<(), String> {
        if self.min_rotation > self.max_rotation {
            return Err(format!(
                "min_rotation {} exceeds max_rotation {}",
                self.min_rotation, self.max_rotation
            ));
        }
        if self.base_scroll_speed <= 0.0 {
            return Err(format!(
                "base_scroll_speed must be positive, got {}",
                self.base_scroll_speed
            ));
        }
        if self.max_scroll_speed < self.base_scroll_speed {
            return Err(format!(
                "max_scroll_speed {} is below base_scroll_speed {}",
                self.max_scroll_speed, self.base_scroll_speed
            ));
        }
        if self.difficulty_time_constant_ms <= 0.0 {
            return Err(format!(
                "difficulty_time_constant_ms must be positive, got {}",
                self.difficulty_time_constant_ms
            ));
        }
        if self.pixels_per_speed_unit <= 0.0 {
            return Err(format!(
                "pixels_per_speed_unit must be positive, got {}",
                self.pixels_per_speed_unit
            ));
        }
        if self.screen_width <= 0 || self.ground_height < 0 || self.ground_y() <= self.bird_height {
            return Err(format!(
                "screen {}x{} with ground {} leaves no room for the bird",
                self.screen_width, self.screen_height, self.ground_height
            ));
        }
        if self.pipe_width <= 0 || self.pipe_min_height < 0 {
            return Err(format!(
                "pipe width {} and min height {} must not be negative or empty",
                self.pipe_width, self.pipe_min_height
            ));
        }
        Ok(())
    }

    /// Highest legal top-pipe height for a given gap.
    ///
    /// Never below `pipe_min_height`, so a range built from it is never empty.
    pub fn max_top_height(&self, gap: i32) -> i32 {
        (self.screen_height - gap - self.pipe_min_height - self.ground_height)
            .max(self.pipe_min_height)
    }
}
