use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Injectable source of randomness for the scoring stages.
///
/// Stages draw through this trait instead of a process-global RNG so a
/// run can be made reproducible (seeded) or fully deterministic (zero
/// variance) without touching stage code.
pub trait Sampler: Send {
    /// Mean-zero draw bounded to [-scale, +scale].
    fn perturbation(&mut self, scale: f64) -> f64;

    /// Uniform draw in [lo, hi).
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

/// `StdRng`-backed sampler; seeded when a seed is supplied, entropy
/// otherwise.
pub struct StdSampler {
    rng: StdRng,
}

impl StdSampler {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Sampler for StdSampler {
    fn perturbation(&mut self, scale: f64) -> f64 {
        if scale <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-scale..scale)
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }
}

/// Zero-variance sampler for tests: perturbations vanish and uniform
/// draws collapse to their lower bound.
pub struct ZeroSampler;

impl Sampler for ZeroSampler {
    fn perturbation(&mut self, _scale: f64) -> f64 {
        0.0
    }

    fn uniform(&mut self, lo: f64, _hi: f64) -> f64 {
        lo
    }
}
