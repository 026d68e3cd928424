//! RNG module - random block generation and the upcoming-piece queue
//!
//! Every block of a new piece is drawn uniformly and independently from the
//! playable colors. There is no bag: the same color may repeat freely.
//!
//! Randomness goes through [`RandomSource`] so tests can pin exact sequences.
//! The default source is a small seedable LCG.

use std::collections::VecDeque;

use crate::mino::Mino;
use crate::types::{BlockType, MINO_LEN};

/// Source of uniform random integers.
pub trait RandomSource {
    /// Random value in `[0, max)`. `max` is never zero.
    fn next_range(&mut self, max: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current state, usable as a seed to replay from here.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Draw one random playable color.
pub fn random_block<R: RandomSource + ?Sized>(rng: &mut R) -> BlockType {
    let colors = BlockType::COLORS;
    colors[rng.next_range(colors.len() as u32) as usize]
}

/// FIFO of upcoming pieces
///
/// Always holds exactly `depth` pieces: taking the head appends a fresh piece
/// at the tail.
#[derive(Debug, Clone)]
pub struct MinoQueue<R> {
    queue: VecDeque<Mino>,
    depth: usize,
    spawn_x: i32,
    rng: R,
}

impl<R: RandomSource> MinoQueue<R> {
    pub fn new(depth: usize, spawn_x: i32, mut rng: R) -> Self {
        let queue = (0..depth)
            .map(|_| Self::generate(&mut rng, spawn_x))
            .collect();
        Self {
            queue,
            depth,
            spawn_x,
            rng,
        }
    }

    fn generate(rng: &mut R, spawn_x: i32) -> Mino {
        let mut kinds = [BlockType::None; MINO_LEN];
        for kind in &mut kinds {
            *kind = random_block(rng);
        }
        Mino::new(spawn_x, 0, kinds)
    }

    /// Remove the head and refill the tail.
    pub fn draw(&mut self) -> Mino {
        let fresh = Self::generate(&mut self.rng, self.spawn_x);
        self.queue.push_back(fresh);
        match self.queue.pop_front() {
            Some(head) => head,
            // depth == 0 is rejected by config validation; degrade to the fresh piece.
            None => fresh,
        }
    }

    pub fn peek(&self) -> Option<&Mino> {
        self.queue.front()
    }

    pub fn peek_mut(&mut self) -> Option<&mut Mino> {
        self.queue.front_mut()
    }

    /// Upcoming pieces, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Mino> + '_ {
        self.queue.iter()
    }

    /// Copy of the queue, head first.
    pub fn to_vec(&self) -> Vec<Mino> {
        self.queue.iter().copied().collect()
    }

    /// Throw away every queued piece and generate new ones.
    pub fn regenerate(&mut self) {
        self.queue.clear();
        for _ in 0..self.depth {
            let mino = Self::generate(&mut self.rng, self.spawn_x);
            self.queue.push_back(mino);
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of values, wrapping around.
    struct Script {
        values: Vec<u32>,
        pos: usize,
    }

    impl RandomSource for Script {
        fn next_range(&mut self, max: u32) -> u32 {
            let v = self.values[self.pos % self.values.len()];
            self.pos += 1;
            v % max
        }
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(6) < 6);
        }
    }

    #[test]
    fn test_random_block_covers_all_colors() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let block = random_block(&mut rng);
            assert!(block.is_color());
            seen[(block.index() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "colors seen: {:?}", seen);
    }

    #[test]
    fn test_queue_keeps_depth() {
        let mut queue = MinoQueue::new(2, 4, SimpleRng::new(1));
        assert_eq!(queue.len(), 2);
        for _ in 0..10 {
            queue.draw();
            assert_eq!(queue.len(), 2);
        }
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = MinoQueue::new(2, 4, SimpleRng::new(5));
        let preview = queue.to_vec();
        let first = queue.draw();
        assert_eq!(first, preview[0]);
        assert_eq!(queue.peek(), Some(&preview[1]));
    }

    #[test]
    fn test_iter_walks_head_first() {
        let mut queue = MinoQueue::new(3, 4, SimpleRng::new(9));
        assert!(queue.iter().copied().eq(queue.to_vec()));
        let head = queue.iter().next().copied();
        assert_eq!(head, Some(queue.draw()));
        assert_eq!(queue.iter().count(), 3);
    }

    #[test]
    fn test_scripted_source_pins_colors() {
        let script = Script {
            values: vec![0, 1, 2, 3, 4, 5],
            pos: 0,
        };
        let queue = MinoQueue::new(2, 3, script);
        let minos = queue.to_vec();
        assert_eq!(
            minos[0].kinds(),
            [BlockType::Red, BlockType::Green, BlockType::Blue]
        );
        assert_eq!(
            minos[1].kinds(),
            [BlockType::Yellow, BlockType::Purple, BlockType::Orange]
        );
        assert_eq!((minos[0].x, minos[0].y), (3, 0));
    }
}
