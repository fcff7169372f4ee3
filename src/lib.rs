//! Flappy Bird - a side-scrolling one-button arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, phases)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player audio preferences
//! - `headless`: Windowless demo runs
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Web Audio cues and music (browser only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod headless;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal display refresh the game was balanced for
    pub const TARGET_FPS: u64 = 60;

    /// Synthetic clock reading for frame `n` when no real clock is available
    /// (headless runs and tests)
    #[inline]
    pub const fn frame_time_ms(frame: u64) -> u64 {
        frame * 1000 / TARGET_FPS
    }
}

#[cfg(test)]
mod tests {
    use super::consts::*;

    #[test]
    fn test_frame_clock() {
        assert_eq!(frame_time_ms(0), 0);
        assert_eq!(frame_time_ms(60), 1000);
        assert_eq!(frame_time_ms(180 * 60), 180_000);
    }
}
