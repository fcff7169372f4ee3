//! Game state and core simulation types
//!
//! Everything the presentation layer reads lives here. The state owns no
//! collaborator references, so it can be built and ticked without a window,
//! GPU or audio device.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::phase::{InputEvent, PhaseAction};
use super::physics;
use super::pipes::Obstacles;
use crate::tuning::Tuning;

/// Axis-aligned rectangle in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

/// The player-controlled bird
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub rect: Rect,
    /// Vertical velocity in pixels per frame (negative = rising)
    pub velocity: f32,
    /// Body angle in degrees (negative = nose up)
    pub rotation: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(
                tuning.bird_x,
                tuning.bird_start_y(),
                tuning.bird_width,
                tuning.bird_height,
            ),
            velocity: 0.0,
            rotation: 0.0,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle bob, no physics, waiting for the first flap
    #[default]
    Waiting,
    /// Full simulation running
    Playing,
    /// Run over, simulation frozen until restart
    Ended,
}

/// Cue emitted by the simulation for the audio/presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    Score,
    Hit,
    Death,
}

impl GameEvent {
    pub fn cue_name(&self) -> &'static str {
        match self {
            GameEvent::Jump => "jump",
            GameEvent::Score => "score",
            GameEvent::Hit => "hit",
            GameEvent::Death => "death",
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Gameplay constants, fixed for the lifetime of the state
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    pub bird: Bird,
    pub obstacles: Obstacles,
    pub score: u32,
    pub phase: GamePhase,
    /// Play time of the current run (ms since the run started)
    pub elapsed_ms: u64,
    /// Background parallax offset in pixels, in (-screen_width, 0]
    pub scroll_offset: f32,
    /// Clock reading when the current run started
    start_ms: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state in the Waiting phase
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        if let Err(e) = tuning.validate() {
            log::warn!("Tuning out of range, simulation may misbehave: {}", e);
        }
        Self {
            bird: Bird::new(&tuning),
            obstacles: Obstacles::default(),
            score: 0,
            phase: GamePhase::Waiting,
            elapsed_ms: 0,
            scroll_offset: 0.0,
            start_ms: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            seed,
            tuning,
        }
    }

    /// Difficulty parameters for the current elapsed play time
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::at(self.elapsed_ms, &self.tuning)
    }

    /// Return every cue queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cues queued since the last drain, without consuming them
    #[cfg(test)]
    pub(crate) fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        log::trace!("cue: {}", event.cue_name());
        self.events.push(event);
    }

    /// Run the obstacle generator for one frame and credit cleared pairs
    pub(crate) fn advance_obstacles(&mut self, difficulty: &Difficulty) {
        let cleared = self.obstacles.advance(
            self.bird.rect.x,
            difficulty,
            &self.tuning,
            &mut self.rng,
        );
        for _ in 0..cleared {
            self.score += 1;
            self.emit(GameEvent::Score);
        }
    }

    /// Re-initialize every per-run field; the phase goes back to Waiting
    pub fn reset(&mut self) {
        self.bird = Bird::new(&self.tuning);
        self.obstacles.clear();
        self.score = 0;
        self.phase = GamePhase::Waiting;
        self.elapsed_ms = 0;
        self.start_ms = 0;
        self.scroll_offset = 0.0;
    }

    /// Feed one input event through the phase machine
    pub fn apply_input(&mut self, input: InputEvent, now_ms: u64) {
        let Some(action) = self.phase.on_input(input) else {
            log::debug!("Ignoring {:?} in {:?}", input, self.phase);
            return;
        };

        match action {
            PhaseAction::BeginRun => self.begin_run(now_ms),
            PhaseAction::Impulse => {
                // Flap strength follows this frame's clock, like gravity
                self.update_clock(now_ms);
                self.impulse();
            }
            PhaseAction::Restart => {
                log::info!("Restarting after score {}", self.score);
                self.reset();
                self.begin_run(now_ms);
            }
        }
    }

    /// Start sequence shared by start and restart: new clock origin, zero
    /// velocity, one impulse
    fn begin_run(&mut self, now_ms: u64) {
        self.phase = GamePhase::Playing;
        self.start_ms = now_ms;
        self.elapsed_ms = 0;
        self.bird.velocity = 0.0;
        log::info!("Run started (seed {})", self.seed);
        self.impulse();
    }

    fn impulse(&mut self) {
        let force = self.difficulty().impulse_force;
        physics::apply_impulse(&mut self.bird, force, &self.tuning);
        self.emit(GameEvent::Jump);
    }

    /// Advance the run clock from a monotonic clock reading
    pub(crate) fn update_clock(&mut self, now_ms: u64) {
        self.elapsed_ms = now_ms.saturating_sub(self.start_ms);
    }

    /// Terminal transition out of Playing
    pub(crate) fn end_run(&mut self, cues: &[GameEvent]) {
        self.phase = self.phase.on_death();
        for &cue in cues {
            self.emit(cue);
        }
        log::info!(
            "Run ended: score {} after {:.1}s",
            self.score,
            self.elapsed_ms as f32 / 1000.0
        );
    }

    /// Scroll the background parallax, wrapping at screen width
    pub(crate) fn scroll_background(&mut self, pixels: f32) {
        self.scroll_offset -= pixels;
        if self.scroll_offset <= -(self.tuning.screen_width as f32) {
            self.scroll_offset = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_waiting() {
        let state = GameState::new(Tuning::default(), 1);
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.bird.rect, Rect::new(200, 300, 40, 40));
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_start_applies_impulse_and_jump_cue() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.apply_input(InputEvent::Start, 5_000);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bird.velocity, state.tuning.base_impulse_force);
        assert_eq!(state.bird.rotation, state.tuning.min_rotation);
        assert_eq!(state.drain_events(), vec![GameEvent::Jump]);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_impulse_ignored_while_waiting() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.apply_input(InputEvent::Impulse, 0);
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.bird.velocity, 0.0);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_impulse_uses_current_clock() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.apply_input(InputEvent::Start, 0);
        state.apply_input(InputEvent::Impulse, 180_000);
        assert_eq!(state.elapsed_ms, 180_000);
        let d = Difficulty::at(180_000, &state.tuning);
        assert_eq!(state.bird.velocity, d.impulse_force);
    }

    #[test]
    fn test_restart_clears_spawn_timer() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.apply_input(InputEvent::Start, 0);
        for _ in 0..10 {
            let d = state.difficulty();
            state.advance_obstacles(&d);
        }
        assert_eq!(state.obstacles.frames_since_spawn(), 9);

        state.end_run(&[GameEvent::Hit]);
        state.apply_input(InputEvent::Restart, 5_000);
        assert_eq!(state.obstacles.frames_since_spawn(), 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_clock_measures_from_run_start() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.apply_input(InputEvent::Start, 10_000);
        state.update_clock(12_500);
        assert_eq!(state.elapsed_ms, 2_500);
        // A clock reading from before the origin saturates instead of wrapping
        state.update_clock(9_000);
        assert_eq!(state.elapsed_ms, 0);
    }

    #[test]
    fn test_background_scroll_wraps() {
        let mut state = GameState::new(Tuning::default(), 1);
        for _ in 0..799 {
            state.scroll_background(1.0);
        }
        assert_eq!(state.scroll_offset, -799.0);
        state.scroll_background(1.0);
        assert_eq!(state.scroll_offset, 0.0);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
        assert!(!r.is_empty());
        assert!(Rect::new(0, 0, 0, 10).is_empty());
    }
}
