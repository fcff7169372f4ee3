//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock `dt`
//! - Seeded RNG only
//! - Pipes kept in creation order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod phase;
pub mod physics;
pub mod pipes;
pub mod state;
pub mod tick;

pub use collision::{bird_hits_pipes, intersects};
pub use difficulty::Difficulty;
pub use phase::{InputEvent, PhaseAction};
pub use pipes::{Obstacles, PipePair};
pub use state::{Bird, GameEvent, GamePhase, GameState, Rect};
pub use tick::{TickInput, tick};
