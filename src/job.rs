use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{MonteCarloError, Result};

/// Seed distance between neighbouring workers.
pub const WORKER_SEED_STRIDE: u64 = 1000;

/// A fixed amount of sampling work split across a pool of workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingJob {
    total_samples: u64,
    worker_count: usize,
    seed_base: u64,
}

impl SamplingJob {
    /// Creates a job sized to the available hardware parallelism and seeded
    /// from the wall clock.
    pub fn new(total_samples: u64) -> Result<Self> {
        if total_samples == 0 {
            return Err(MonteCarloError::InvalidSampleCount(0));
        }

        Ok(SamplingJob {
            total_samples,
            worker_count: default_workers(),
            seed_base: clock_seed(),
        })
    }

    pub fn with_workers(mut self, worker_count: usize) -> Result<Self> {
        if worker_count == 0 {
            return Err(MonteCarloError::InvalidArgument(
                "worker count must be greater than zero".to_string(),
            ));
        }
        self.worker_count = worker_count;
        Ok(self)
    }

    pub fn with_seed_base(mut self, seed_base: u64) -> Self {
        self.seed_base = seed_base;
        self
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn seed_base(&self) -> u64 {
        self.seed_base
    }

    /// Samples assigned to `worker`. The first `total % workers` workers take
    /// one extra sample each.
    pub fn share(&self, worker: usize) -> u64 {
        let workers = self.worker_count as u64;
        let base = self.total_samples / workers;
        let remainder = self.total_samples % workers;
        if (worker as u64) < remainder {
            base + 1
        } else {
            base
        }
    }

    pub fn shares(&self) -> Vec<u64> {
        (0..self.worker_count).map(|worker| self.share(worker)).collect()
    }

    pub fn worker_seed(&self, worker: usize) -> u64 {
        self.seed_base
            .wrapping_add((worker as u64).wrapping_mul(WORKER_SEED_STRIDE))
    }
}

/// Number of hardware threads available to this process.
pub fn default_workers() -> usize {
    num_cpus::get()
}

/// Nanoseconds since the Unix epoch, truncated to 64 bits.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_samples_over_four_workers() {
        let job = SamplingJob::new(10).unwrap().with_workers(4).unwrap();
        assert_eq!(job.shares(), vec![3, 3, 2, 2]);
    }

    #[test]
    fn shares_cover_total_exactly() {
        for total in [1u64, 7, 100, 1_000_003] {
            for workers in 1..=17 {
                let job = SamplingJob::new(total).unwrap().with_workers(workers).unwrap();
                let shares = job.shares();
                assert_eq!(shares.len(), workers);
                assert_eq!(shares.iter().sum::<u64>(), total);

                let max = *shares.iter().max().unwrap();
                let min = *shares.iter().min().unwrap();
                assert!(max - min <= 1, "uneven shares {:?}", shares);
            }
        }
    }

    #[test]
    fn more_workers_than_samples() {
        let job = SamplingJob::new(3).unwrap().with_workers(5).unwrap();
        assert_eq!(job.shares(), vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn partition_is_reproducible() {
        let a = SamplingJob::new(1234).unwrap().with_workers(9).unwrap();
        let b = SamplingJob::new(1234).unwrap().with_workers(9).unwrap();
        assert_eq!(a.shares(), b.shares());
    }

    #[test]
    fn worker_seeds_are_distinct() {
        let job = SamplingJob::new(100)
            .unwrap()
            .with_workers(8)
            .unwrap()
            .with_seed_base(u64::MAX - 2500);
        let mut seeds: Vec<u64> = (0..8).map(|w| job.worker_seed(w)).collect();
        assert_eq!(seeds[1], (u64::MAX - 2500).wrapping_add(1000));
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), 8);
    }

    #[test]
    fn rejects_zero_samples() {
        assert!(matches!(
            SamplingJob::new(0),
            Err(MonteCarloError::InvalidSampleCount(0))
        ));
    }

    #[test]
    fn rejects_zero_workers() {
        let err = SamplingJob::new(10).unwrap().with_workers(0).unwrap_err();
        assert!(matches!(err, MonteCarloError::InvalidArgument(_)));
    }

    #[test]
    fn defaults_to_hardware_parallelism() {
        let job = SamplingJob::new(10).unwrap();
        assert_eq!(job.worker_count(), num_cpus::get());
        assert!(job.worker_count() >= 1);
    }
}
