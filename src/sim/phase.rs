//! Phase state machine
//!
//! Decides which inputs each phase accepts and what they do. The machine only
//! returns the action; [`GameState::apply_input`](super::GameState::apply_input)
//! carries it out.

use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// Discrete input delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Begin a run from the Waiting phase (or restart from Ended)
    Start,
    /// Flap while playing
    Impulse,
    /// Start over after a run ended
    Restart,
    /// Leave the game loop
    Quit,
    ToggleMusic,
    ToggleSound,
    MusicVolumeUp,
    MusicVolumeDown,
}

impl InputEvent {
    /// Inputs the platform layer consumes itself
    pub fn is_platform_only(&self) -> bool {
        matches!(
            self,
            InputEvent::Quit
                | InputEvent::ToggleMusic
                | InputEvent::ToggleSound
                | InputEvent::MusicVolumeUp
                | InputEvent::MusicVolumeDown
        )
    }
}

/// Effect of an accepted input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    /// Waiting -> Playing: new clock origin, zero velocity, one impulse
    BeginRun,
    /// Playing -> Playing: one impulse
    Impulse,
    /// Ended -> Playing: full reset followed by the BeginRun sequence
    Restart,
}

impl GamePhase {
    /// Action for `input` in this phase, or `None` when the phase ignores it
    pub fn on_input(self, input: InputEvent) -> Option<PhaseAction> {
        match (self, input) {
            (GamePhase::Waiting, InputEvent::Start) => Some(PhaseAction::BeginRun),
            (GamePhase::Playing, InputEvent::Impulse) => Some(PhaseAction::Impulse),
            (GamePhase::Ended, InputEvent::Start | InputEvent::Restart) => {
                Some(PhaseAction::Restart)
            }
            _ => None,
        }
    }

    /// Phase after a fatal collision
    pub fn on_death(self) -> GamePhase {
        match self {
            GamePhase::Playing => GamePhase::Ended,
            other => other,
        }
    }

    /// What the single action key (space, click, tap) means in this phase
    pub fn primary_input(self) -> InputEvent {
        match self {
            GamePhase::Waiting => InputEvent::Start,
            GamePhase::Playing => InputEvent::Impulse,
            GamePhase::Ended => InputEvent::Restart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_INPUTS: [InputEvent; 8] = [
        InputEvent::Start,
        InputEvent::Impulse,
        InputEvent::Restart,
        InputEvent::Quit,
        InputEvent::ToggleMusic,
        InputEvent::ToggleSound,
        InputEvent::MusicVolumeUp,
        InputEvent::MusicVolumeDown,
    ];

    #[test]
    fn test_legal_transitions() {
        assert_eq!(
            GamePhase::Waiting.on_input(InputEvent::Start),
            Some(PhaseAction::BeginRun)
        );
        assert_eq!(
            GamePhase::Playing.on_input(InputEvent::Impulse),
            Some(PhaseAction::Impulse)
        );
        assert_eq!(
            GamePhase::Ended.on_input(InputEvent::Start),
            Some(PhaseAction::Restart)
        );
        assert_eq!(
            GamePhase::Ended.on_input(InputEvent::Restart),
            Some(PhaseAction::Restart)
        );
    }

    #[test]
    fn test_everything_else_ignored() {
        let accepted = |phase: GamePhase| {
            ALL_INPUTS
                .iter()
                .filter(|&&i| phase.on_input(i).is_some())
                .count()
        };
        assert_eq!(accepted(GamePhase::Waiting), 1);
        assert_eq!(accepted(GamePhase::Playing), 1);
        assert_eq!(accepted(GamePhase::Ended), 2);

        for input in ALL_INPUTS.iter().filter(|i| i.is_platform_only()) {
            for phase in [GamePhase::Waiting, GamePhase::Playing, GamePhase::Ended] {
                assert_eq!(phase.on_input(*input), None);
            }
        }
    }

    #[test]
    fn test_primary_input_is_always_accepted() {
        for phase in [GamePhase::Waiting, GamePhase::Playing, GamePhase::Ended] {
            assert!(phase.on_input(phase.primary_input()).is_some());
        }
    }

    #[test]
    fn test_death_only_ends_a_run_in_progress() {
        assert_eq!(GamePhase::Playing.on_death(), GamePhase::Ended);
        assert_eq!(GamePhase::Waiting.on_death(), GamePhase::Waiting);
        assert_eq!(GamePhase::Ended.on_death(), GamePhase::Ended);
    }
}
