//! Per-frame simulation tick
//!
//! Inputs first, then physics, obstacles and collision, in that order, so the
//! collision test always sees this frame's positions.

use super::collision;
use super::phase::InputEvent;
use super::physics::{self, Outcome};
use super::state::{GameEvent, GamePhase, GameState};

/// Everything the platform hands the simulation for one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Monotonic clock reading for this frame, in milliseconds
    pub now_ms: u64,
    /// Inputs in delivery order
    pub inputs: Vec<InputEvent>,
}

impl TickInput {
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms,
            inputs: Vec::new(),
        }
    }

    pub fn with(mut self, input: InputEvent) -> Self {
        self.inputs.push(input);
        self
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    for &event in &input.inputs {
        if event.is_platform_only() {
            continue;
        }
        state.apply_input(event, input.now_ms);
    }

    match state.phase {
        GamePhase::Waiting => idle(state, input.now_ms),
        GamePhase::Playing => play(state, input.now_ms),
        GamePhase::Ended => {}
    }
}

/// Waiting phase: the bird bobs in place and the background drifts
fn idle(state: &mut GameState, now_ms: u64) {
    let tuning = &state.tuning;
    let sway = (now_ms as f32 / tuning.idle_sway_period_ms).sin() * tuning.idle_sway_amplitude;
    state.bird.rect.y = (tuning.bird_start_y() as f32 + sway) as i32;
    let drift = tuning.idle_scroll;
    state.scroll_background(drift);
}

fn play(state: &mut GameState, now_ms: u64) {
    state.update_clock(now_ms);
    let difficulty = state.difficulty();

    if physics::integrate(&mut state.bird, difficulty.gravity, &state.tuning) == Outcome::HitGround
    {
        state.end_run(&[GameEvent::Hit, GameEvent::Death]);
        return;
    }

    let drift = state.tuning.play_scroll;
    state.scroll_background(drift);
    state.advance_obstacles(&difficulty);

    if collision::bird_hits_pipes(&state.bird.rect, state.obstacles.pairs()) {
        state.end_run(&[GameEvent::Hit]);
    }
}
