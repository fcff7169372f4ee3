//! Headless runs
//!
//! Drives the simulation with the demo pilot and a synthetic frame clock, no
//! window or audio. Used by the native binary and by tests.

use serde::Serialize;

use crate::consts::frame_time_ms;
use crate::sim::autopilot;
use crate::sim::{Difficulty, GameEvent, GamePhase, GameState, InputEvent, TickInput, tick};
use crate::tuning::Tuning;

/// Options for one headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub seed: u64,
    /// Upper bound on simulated frames
    pub max_ticks: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            // Five minutes at 60 fps
            max_ticks: 5 * 60 * 60,
        }
    }
}

impl RunConfig {
    /// Parse `[seed] [max_ticks]` (program name already stripped)
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, String> {
        let mut config = Self::default();
        match args {
            [] => {}
            [seed] => config.seed = parse_arg("seed", seed.as_ref())?,
            [seed, ticks] => {
                config.seed = parse_arg("seed", seed.as_ref())?;
                config.max_ticks = parse_arg("max_ticks", ticks.as_ref())?;
            }
            _ => return Err(format!("expected at most 2 arguments, got {}", args.len())),
        }
        Ok(config)
    }
}

fn parse_arg(name: &str, value: &str) -> Result<u64, String> {
    value
        .parse()
        .map_err(|e| format!("invalid {name} {value:?}: {e}"))
}

/// What happened during a headless run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score: u32,
    pub elapsed_ms: u64,
    pub phase: GamePhase,
    pub flaps: u32,
    /// Cue names in emission order, starting at the death cues
    pub final_cues: Vec<&'static str>,
    pub difficulty: Difficulty,
}

/// Play one run with the demo pilot until it ends or `max_ticks` is reached
pub fn run(config: &RunConfig) -> RunSummary {
    let mut state = GameState::new(Tuning::default(), config.seed);
    let mut flaps = 0;
    let mut last_cues = Vec::new();
    let mut ticks = 0;

    for frame in 0..config.max_ticks {
        let mut input = TickInput::at(frame_time_ms(frame));
        match state.phase {
            GamePhase::Waiting => input = input.with(InputEvent::Start),
            GamePhase::Playing if autopilot::should_flap(&state) => {
                input = input.with(InputEvent::Impulse)
            }
            _ => {}
        }

        tick(&mut state, &input);
        ticks += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::Jump => flaps += 1,
                GameEvent::Hit => last_cues.clear(),
                _ => {}
            }
            if matches!(event, GameEvent::Hit | GameEvent::Death) {
                last_cues.push(event.cue_name());
            }
        }

        if state.phase == GamePhase::Ended {
            break;
        }
    }

    log::info!(
        "Headless run finished: score {} in {} ticks ({:?})",
        state.score,
        ticks,
        state.phase
    );

    RunSummary {
        seed: config.seed,
        ticks,
        score: state.score,
        elapsed_ms: state.elapsed_ms,
        phase: state.phase,
        flaps,
        final_cues: last_cues,
        difficulty: state.difficulty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let empty: [&str; 0] = [];
        assert_eq!(RunConfig::from_args(&empty), Ok(RunConfig::default()));
        assert_eq!(
            RunConfig::from_args(&["42"]).map(|c| c.seed),
            Ok(42)
        );
        let config = RunConfig::from_args(&["7", "100"]).unwrap();
        assert_eq!((config.seed, config.max_ticks), (7, 100));

        assert!(RunConfig::from_args(&["seven"]).is_err());
        assert!(RunConfig::from_args(&["1", "-5"]).is_err());
        assert!(RunConfig::from_args(&["1", "2", "3"]).is_err());
    }

    #[test]
    fn test_short_run_stops_at_limit() {
        let summary = run(&RunConfig {
            seed: 3,
            max_ticks: 30,
        });
        assert_eq!(summary.ticks, 30);
        assert_eq!(summary.phase, GamePhase::Playing);
        assert!(summary.flaps >= 1);
        assert!(summary.final_cues.is_empty());
    }

    #[test]
    fn test_same_seed_same_summary() {
        let config = RunConfig {
            seed: 11,
            max_ticks: 2_000,
        };
        let a = serde_json::to_string(&run(&config)).unwrap();
        let b = serde_json::to_string(&run(&config)).unwrap();
        assert_eq!(a, b);
    }
}
