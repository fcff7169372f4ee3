//! Collision detection
//!
//! Axis-aligned rectangle overlap between the bird and pipe rectangles.
//! Stateless: the same rectangles always give the same answer.

use super::pipes::PipePair;
use super::state::Rect;

/// Strict overlap test. Rectangles that only share an edge do not intersect,
/// and an empty rectangle intersects nothing.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// True if the bird overlaps either pipe of any pair
pub fn bird_hits_pipes<'a>(bird: &Rect, pairs: impl IntoIterator<Item = &'a PipePair>) -> bool {
    pairs
        .into_iter()
        .flat_map(|pair| pair.rects())
        .any(|pipe| intersects(bird, &pipe))
}
