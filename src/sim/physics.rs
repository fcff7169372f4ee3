//! Bird physics integrator
//!
//! Frame-coupled stepping: every call advances exactly one frame with fixed
//! per-frame increments. Difficulty tuning assumes this, so there is no `dt`.

use super::state::Bird;
use crate::tuning::Tuning;

/// Result of one integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Airborne,
    /// Bird reached the ground band; it is clamped to rest on it
    HitGround,
}

/// Advance the bird by one frame under `gravity`
pub fn integrate(bird: &mut Bird, gravity: f32, tuning: &Tuning) -> Outcome {
    bird.velocity = (bird.velocity + gravity).min(tuning.terminal_velocity);

    // Truncation toward zero, not rounding
    bird.rect.y += bird.velocity as i32;

    if bird.velocity < 0.0 {
        bird.rotation = tuning.min_rotation;
    } else {
        bird.rotation = (bird.rotation + tuning.rotation_step).min(tuning.max_rotation);
    }

    // Ceiling stops the bird dead, it is not fatal
    if bird.rect.y < 0 {
        bird.rect.y = 0;
        bird.velocity = 0.0;
    }

    let ground_y = tuning.ground_y();
    if bird.rect.bottom() > ground_y {
        bird.rect.y = ground_y - bird.rect.height;
        return Outcome::HitGround;
    }

    Outcome::Airborne
}

/// Flap: replace the velocity and snap the nose up
pub fn apply_impulse(bird: &mut Bird, impulse_force: f32, tuning: &Tuning) {
    bird.velocity = impulse_force;
    bird.rotation = tuning.min_rotation;
}
