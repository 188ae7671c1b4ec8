use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Source of the randomness behind tool responses.
pub trait RandomSource: Send + Sync {
    /// An index in `0..len`. `len` must be non-zero.
    fn choose(&self, len: usize) -> usize;

    /// `min(amount, len)` distinct indices in `0..len`.
    fn sample(&self, len: usize, amount: usize) -> Vec<usize>;
}

pub struct StdRandom {
    rng: Mutex<StdRng>,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn choose(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..len)
    }

    fn sample(&self, len: usize, amount: usize) -> Vec<usize> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rand::seq::index::sample(&mut *rng, len, amount.min(len)).into_vec()
    }
}

/// Replays a fixed list of offsets, cycling when exhausted.
///
/// `choose` reduces the next offset modulo `len`. `sample` draws each pick from
/// the indices not yet taken, so the result stays distinct.
pub struct ScriptedRandom {
    script: Vec<usize>,
    cursor: AtomicUsize,
}

impl ScriptedRandom {
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: AtomicUsize::new(0),
        }
    }

    fn next(&self) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let at = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.script[at % self.script.len()]
    }
}

impl RandomSource for ScriptedRandom {
    fn choose(&self, len: usize) -> usize {
        self.next() % len
    }

    fn sample(&self, len: usize, amount: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let mut picked = Vec::with_capacity(amount.min(len));
        while picked.len() < amount && !pool.is_empty() {
            let at = self.next() % pool.len();
            picked.push(pool.remove(at));
        }
        picked
    }
}
