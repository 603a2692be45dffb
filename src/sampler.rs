use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Counts how many of `count` random points in the square `[-1, 1)²` land
/// inside the unit circle.
///
/// Each call owns a fresh generator seeded from `seed`, so concurrent callers
/// never share generator state and the same `(count, seed)` always yields the
/// same hit count.
pub fn sample(count: u64, seed: u64) -> u64 {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut inside = 0;

    for _ in 0..count {
        let x = rng.gen::<f64>() * 2.0 - 1.0;
        let y = rng.gen::<f64>() * 2.0 - 1.0;
        if x * x + y * y < 1.0 {
            inside += 1;
        }
    }

    inside
}

/// Scales a hit count over `samples` trials into a π estimate.
pub fn pi_from_hits(hits: u64, samples: u64) -> f64 {
    4.0 * hits as f64 / samples as f64
}
