//! RNG module - uniform piece selection with one piece of lookahead
//!
//! Shape selection is a pure function over explicit RNG state:
//! [`next_piece`] takes a [`SimpleRng`] by value and hands back the chosen kind
//! together with the advanced state. [`PieceQueue`] wraps that function with the
//! single "next piece" preview the game shows.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG cycle quickly; use the high half.
        (self.next_u32() >> 16) % max
    }
}

/// Draw one uniformly distributed piece kind.
///
/// Pure: the input state is consumed and the advanced state returned, so the
/// same seed always yields the same sequence.
pub fn next_piece(rng: SimpleRng) -> (PieceKind, SimpleRng) {
    let mut rng = rng;
    let idx = rng.next_range(PieceKind::ALL.len() as u32) as usize;
    (PieceKind::ALL[idx], rng)
}

/// Piece generator holding one piece of lookahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceQueue {
    next: PieceKind,
    rng: SimpleRng,
    seed: u32,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let (next, rng) = next_piece(SimpleRng::new(seed));
        Self { next, rng, seed }
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the previewed piece and roll a new preview
    pub fn draw(&mut self) -> PieceKind {
        let drawn = self.next;
        let (next, rng) = next_piece(self.rng);
        self.next = next;
        self.rng = rng;
        drawn
    }

    /// Seed this queue was created with (restart replays the same sequence)
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        assert_eq!(SimpleRng::new(0), SimpleRng::new(1));
    }

    #[test]
    fn test_next_piece_is_pure() {
        let rng = SimpleRng::new(42);
        let (a, rng_a) = next_piece(rng);
        let (b, rng_b) = next_piece(rng);
        assert_eq!(a, b);
        assert_eq!(rng_a, rng_b);
        assert_ne!(rng_a, rng);
    }

    #[test]
    fn test_next_piece_covers_all_kinds() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let (kind, next) = next_piece(rng);
            rng = next;
            seen[(kind.code() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "missing kinds: {:?}", seen);
    }

    #[test]
    fn test_piece_queue_peek_matches_draw() {
        let mut queue = PieceQueue::new(1);
        for _ in 0..20 {
            let peeked = queue.peek();
            assert_eq!(queue.draw(), peeked);
        }
    }

    #[test]
    fn test_piece_queue_same_seed_same_sequence() {
        let mut a = PieceQueue::new(99);
        let mut b = PieceQueue::new(99);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
        assert_eq!(a.seed(), 99);
    }
}
