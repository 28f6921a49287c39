//! Template selection
//!
//! Small-talk replies rotate through a fixed pool. The choice is injected so
//! production picks uniformly at random while tests stay reproducible.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index into a non-empty template pool
pub trait TemplateSelector: Send + Sync {
    /// Index in `0..len`; `len` is never zero
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl TemplateSelector for RandomSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform choice from a seeded RNG; same seed, same sequence
#[derive(Debug)]
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TemplateSelector for SeededSelector {
    fn pick(&self, len: usize) -> usize {
        self.rng.lock().gen_range(0..len)
    }
}

/// Always the same slot, wrapped to the pool size
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl TemplateSelector for FixedSelector {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_in_range() {
        for _ in 0..100 {
            assert!(RandomSelector.pick(3) < 3);
        }
    }

    #[test]
    fn test_seeded_reproducible() {
        let a = SeededSelector::new(42);
        let b = SeededSelector::new(42);
        let seq_a: Vec<usize> = (0..20).map(|_| a.pick(3)).collect();
        let seq_b: Vec<usize> = (0..20).map(|_| b.pick(3)).collect();
        assert_eq!(seq_a, seq_b);
        assert!(seq_a.iter().all(|&i| i < 3));
    }

    #[test]
    fn test_fixed_wraps() {
        assert_eq!(FixedSelector(1).pick(3), 1);
        assert_eq!(FixedSelector(4).pick(3), 1);
    }
}
