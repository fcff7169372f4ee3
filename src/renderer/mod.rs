//! WebGPU rendering module
//!
//! The scene is rebuilt from `GameState` every frame as a flat triangle list
//! in screen pixels, then mapped to NDC and drawn in one pass.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, screen_to_ndc};
pub use shapes::scene;
pub use vertex::Vertex;
