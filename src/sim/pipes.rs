//! Obstacle generator
//!
//! Pipe pairs are spawned at the right edge, scrolled left every frame,
//! scored once when the bird clears them and culled from the front once they
//! leave the screen. The deque keeps creation order, which is also screen-x
//! order, so culling only ever looks at the front.

use std::collections::VecDeque;

use rand::Rng;
use serde::Serialize;

use super::difficulty::Difficulty;
use super::state::Rect;
use crate::tuning::Tuning;

/// A top and bottom pipe framing one gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipePair {
    pub top: Rect,
    pub bottom: Rect,
    pub scored: bool,
}

impl PipePair {
    /// Build a pair at `x` whose top pipe is `top_height` tall.
    ///
    /// The bottom pipe fills the rest of the sky below the gap, so
    /// `top.height + gap + bottom.height + ground_height == screen_height`.
    pub fn new(x: i32, top_height: i32, gap: i32, tuning: &Tuning) -> Self {
        let bottom_y = top_height + gap;
        Self {
            top: Rect::new(x, 0, tuning.pipe_width, top_height),
            bottom: Rect::new(x, bottom_y, tuning.pipe_width, tuning.ground_y() - bottom_y),
            scored: false,
        }
    }

    pub fn x(&self) -> i32 {
        self.top.x
    }

    /// Trailing (right) edge
    pub fn right(&self) -> i32 {
        self.top.right()
    }

    pub fn gap(&self) -> i32 {
        self.bottom.y - self.top.bottom()
    }

    /// Vertical middle of the opening
    pub fn gap_center(&self) -> f32 {
        (self.top.bottom() + self.bottom.y) as f32 / 2.0
    }

    pub fn rects(&self) -> [Rect; 2] {
        [self.top, self.bottom]
    }

    fn shift(&mut self, dx: i32) {
        self.top.x -= dx;
        self.bottom.x = self.top.x;
    }
}

/// All active pipe pairs plus the spawn timer
#[derive(Debug, Clone, Default)]
pub struct Obstacles {
    pairs: VecDeque<PipePair>,
    frames_since_spawn: u32,
}

impl Obstacles {
    pub fn pairs(&self) -> impl Iterator<Item = &PipePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn frames_since_spawn(&self) -> u32 {
        self.frames_since_spawn
    }

    /// First pair whose trailing edge is not yet behind `x`
    pub fn next_ahead_of(&self, x: i32) -> Option<&PipePair> {
        self.pairs.iter().find(|p| p.right() >= x)
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
        self.frames_since_spawn = 0;
    }

    /// Spawn, scroll, score and cull for one frame.
    ///
    /// Returns how many pairs the bird cleared this frame.
    pub fn advance(
        &mut self,
        bird_x: i32,
        difficulty: &Difficulty,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> u32 {
        self.frames_since_spawn += 1;
        if self.pairs.is_empty()
            || self.frames_since_spawn >= difficulty.spawn_interval_frames(tuning)
        {
            self.spawn(difficulty, tuning, rng);
        }

        let dx = difficulty.scroll_pixels(tuning);
        let mut cleared = 0;
        for pair in &mut self.pairs {
            pair.shift(dx);
            if !pair.scored && bird_x > pair.right() {
                pair.scored = true;
                cleared += 1;
            }
        }

        while self.pairs.front().is_some_and(|p| p.right() < 0) {
            self.pairs.pop_front();
            log::trace!("Culled pipe pair, {} active", self.pairs.len());
        }

        cleared
    }

    fn spawn(&mut self, difficulty: &Difficulty, tuning: &Tuning, rng: &mut impl Rng) {
        let gap = difficulty.gap_size;
        let top_height = rng.random_range(tuning.pipe_min_height..=tuning.max_top_height(gap));
        let x = self.spawn_x(difficulty, tuning);
        self.pairs.push_back(PipePair::new(x, top_height, gap, tuning));
        self.frames_since_spawn = 0;
        log::debug!("Spawned pipe pair at x={} top={} gap={}", x, top_height, gap);
    }

    /// Right edge for the first pair, otherwise at least `pair_spacing`
    /// behind the previous one
    fn spawn_x(&self, difficulty: &Difficulty, tuning: &Tuning) -> i32 {
        match self.pairs.back() {
            Some(last) => {
                let spaced = last.x() + difficulty.pair_spacing.ceil() as i32;
                spaced.max(tuning.screen_width)
            }
            None => tuning.screen_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn base() -> (Tuning, Difficulty) {
        let tuning = Tuning::default();
        let difficulty = Difficulty::at(0, &tuning);
        (tuning, difficulty)
    }

    #[test]
    fn test_pair_fills_sky_at_range_extremes() {
        let tuning = Tuning::default();
        for top in [100, tuning.max_top_height(220)] {
            let pair = PipePair::new(800, top, 220, &tuning);
            assert_eq!(pair.bottom.height, 600 - 100 - (top + 220));
            assert_eq!(pair.top.height + 220 + pair.bottom.height + 100, 600);
            assert_eq!(pair.gap(), 220);
        }
        assert_eq!(PipePair::new(800, 180, 220, &tuning).bottom.height, 100);
    }

    #[test]
    fn test_first_spawn_is_immediate_at_right_edge() {
        let (tuning, d) = base();
        let mut obstacles = Obstacles::default();
        let mut rng = Pcg32::seed_from_u64(3);
        obstacles.advance(200, &d, &tuning, &mut rng);
        assert_eq!(obstacles.len(), 1);
        // Spawned at 800 and scrolled in the same frame
        assert_eq!(obstacles.pairs().next().map(|p| p.x()), Some(798));
    }

    #[test]
    fn test_spawn_cadence_follows_interval() {
        let (tuning, d) = base();
        let interval = d.spawn_interval_frames(&tuning);
        let mut obstacles = Obstacles::default();
        let mut rng = Pcg32::seed_from_u64(3);

        obstacles.advance(200, &d, &tuning, &mut rng);
        for _ in 1..interval {
            obstacles.advance(200, &d, &tuning, &mut rng);
        }
        assert_eq!(obstacles.len(), 1);
        obstacles.advance(200, &d, &tuning, &mut rng);
        assert_eq!(obstacles.len(), 2);

        let xs: Vec<i32> = obstacles.pairs().map(|p| p.x()).collect();
        assert_eq!(xs[1] - xs[0], d.pair_spacing as i32);
    }

    #[test]
    fn test_spawn_respects_pair_spacing() {
        let (tuning, d) = base();
        let mut obstacles = Obstacles::default();
        obstacles.pairs.push_back(PipePair::new(700, 150, 220, &tuning));
        assert_eq!(obstacles.spawn_x(&d, &tuning), 1060);

        obstacles.pairs.push_back(PipePair::new(100, 150, 220, &tuning));
        assert_eq!(obstacles.spawn_x(&d, &tuning), tuning.screen_width);
    }

    #[test]
    fn test_scored_exactly_once() {
        let (tuning, d) = base();
        let mut obstacles = Obstacles::default();
        let mut rng = Pcg32::seed_from_u64(3);
        // Trailing edge at 141 after the first shift, bird at 200 is past it
        obstacles.pairs.push_back(PipePair::new(83, 150, 220, &tuning));

        let mut total = 0;
        for _ in 0..20 {
            total += obstacles.advance(200, &d, &tuning, &mut rng);
        }
        assert_eq!(total, 1);
    }

    #[test]
    fn test_not_scored_at_exact_edge() {
        let (tuning, d) = base();
        let mut obstacles = Obstacles::default();
        let mut rng = Pcg32::seed_from_u64(3);
        // Trailing edge lands exactly on the bird's left edge
        obstacles.pairs.push_back(PipePair::new(142, 150, 220, &tuning));
        assert_eq!(obstacles.advance(200, &d, &tuning, &mut rng), 0);
        assert_eq!(obstacles.advance(200, &d, &tuning, &mut rng), 1);
    }

    #[test]
    fn test_culls_whole_pairs_from_front() {
        let (tuning, d) = base();
        let mut obstacles = Obstacles::default();
        let mut rng = Pcg32::seed_from_u64(3);
        obstacles.pairs.push_back(PipePair::new(-59, 150, 220, &tuning));
        obstacles.pairs.push_back(PipePair::new(300, 120, 220, &tuning));

        obstacles.advance(200, &d, &tuning, &mut rng);
        let remaining: Vec<i32> = obstacles.pairs().map(|p| p.x()).collect();
        assert_eq!(remaining, vec![298]);
        for pair in obstacles.pairs() {
            assert_eq!(pair.top.x, pair.bottom.x);
        }
    }

    #[test]
    fn test_clear_resets_spawn_timer() {
        let (tuning, d) = base();
        let mut obstacles = Obstacles::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..10 {
            obstacles.advance(200, &d, &tuning, &mut rng);
        }
        assert_eq!(obstacles.frames_since_spawn(), 9);
        obstacles.clear();
        assert!(obstacles.is_empty());
        assert_eq!(obstacles.frames_since_spawn(), 0);
    }

    proptest! {
        #[test]
        fn prop_spawned_pairs_fill_the_sky(seed in any::<u64>(), elapsed in 0u64..20_000_000) {
            let tuning = Tuning::default();
            let d = Difficulty::at(elapsed, &tuning);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut obstacles = Obstacles::default();
            for _ in 0..400 {
                obstacles.advance(tuning.bird_x, &d, &tuning, &mut rng);
            }
            for pair in obstacles.pairs() {
                prop_assert_eq!(
                    pair.top.height + d.gap_size + pair.bottom.height + tuning.ground_height,
                    tuning.screen_height
                );
                prop_assert!(pair.top.height >= tuning.pipe_min_height);
                prop_assert!(pair.bottom.height >= tuning.pipe_min_height);
            }
            let xs: Vec<i32> = obstacles.pairs().map(|p| p.x()).collect();
            prop_assert!(xs.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
