//! Demo pilot
//!
//! A simple controller that flies toward the middle of the next gap. Drives
//! the attract mode on the web build and the headless runner.

use super::state::{GamePhase, GameState};

/// Margin below the target before the pilot flaps, in pixels
const FLAP_MARGIN: f32 = 12.0;

/// Whether the pilot wants to flap this frame.
///
/// Only meaningful while playing; returns false in every other phase.
pub fn should_flap(state: &GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }

    let bird = &state.bird;
    let target = state
        .obstacles
        .next_ahead_of(bird.rect.x)
        .map(|pair| pair.gap_center())
        .unwrap_or(state.tuning.bird_start_y() as f32);

    let center = bird.rect.center().y;
    center > target + FLAP_MARGIN && bird.velocity >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::phase::InputEvent;
    use crate::sim::tick::{TickInput, tick};
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let mut state = GameState::new(Tuning::default(), 5);
        state.apply_input(InputEvent::Start, 0);
        state
    }

    #[test]
    fn test_idle_phases_never_flap() {
        let state = GameState::new(Tuning::default(), 5);
        assert!(!should_flap(&state));
    }

    #[test]
    fn test_flaps_when_low_and_falling() {
        let mut state = playing();
        state.bird.rect.y = 420;
        state.bird.velocity = 1.0;
        assert!(should_flap(&state));
    }

    #[test]
    fn test_holds_when_high_or_rising() {
        let mut state = playing();
        state.bird.rect.y = 100;
        state.bird.velocity = 2.0;
        assert!(!should_flap(&state));

        state.bird.rect.y = 420;
        state.bird.velocity = -3.0;
        assert!(!should_flap(&state));
    }

    #[test]
    fn test_pilot_scores() {
        let mut state = playing();
        for frame in 1..3_000u64 {
            let mut input = TickInput::at(frame * 16);
            if should_flap(&state) {
                input = input.with(InputEvent::Impulse);
            }
            tick(&mut state, &input);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert!(state.score >= 1, "pilot scored {}", state.score);
    }
}
