use std::sync::mpsc;
use std::thread;

use tracing::{debug, trace, warn};

use crate::error::{MonteCarloError, Result};
use crate::job::{clock_seed, SamplingJob};
use crate::sampler::{pi_from_hits, sample};

/// Hits reported by one worker over its share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialResult {
    pub worker: usize,
    pub hits: u64,
}

/// Estimates π on the calling thread with a clock-derived seed.
pub fn estimate(total_samples: u64) -> Result<f64> {
    estimate_with_seed(total_samples, clock_seed())
}

pub fn estimate_with_seed(total_samples: u64, seed: u64) -> Result<f64> {
    if total_samples == 0 {
        return Err(MonteCarloError::InvalidSampleCount(0));
    }

    let hits = sample(total_samples, seed);
    debug!(total_samples, hits, "single threaded sampling finished");
    Ok(pi_from_hits(hits, total_samples))
}

/// Estimates π by spreading `total_samples` over `num_workers` threads.
pub fn estimate_parallel(total_samples: u64, num_workers: usize) -> Result<f64> {
    let job = SamplingJob::new(total_samples)?.with_workers(num_workers)?;
    let hits = run_job(&job)?;
    Ok(pi_from_hits(hits, job.total_samples()))
}

/// Runs every worker of `job` on its own thread and returns the summed hits.
pub fn run_job(job: &SamplingJob) -> Result<u64> {
    run_job_with(job, |worker| {
        thread::Builder::new().name(format!("sampler-{}", worker))
    })
}

fn run_job_with<B>(job: &SamplingJob, builder: B) -> Result<u64>
where
    B: Fn(usize) -> thread::Builder,
{
    let num_workers = job.worker_count();
    debug!(
        total_samples = job.total_samples(),
        num_workers,
        seed_base = job.seed_base(),
        "spawning sampling threads"
    );

    let (tx, rx) = mpsc::channel();
    let mut handles = Vec::with_capacity(num_workers);

    for worker in 0..num_workers {
        let samples = job.share(worker);
        let seed = job.worker_seed(worker);
        let worker_tx = tx.clone();

        let spawned = builder(worker).spawn(move || {
            let hits = sample(samples, seed);
            trace!(worker, samples, hits, "worker finished");
            let _ = worker_tx.send(PartialResult { worker, hits });
        });

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                warn!(worker, error = %source, "failed to spawn sampling thread");
                drop(tx);
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(MonteCarloError::Spawn { worker, source });
            }
        }
    }

    drop(tx);

    let mut total_inside = 0;
    let mut reported = vec![false; num_workers];
    for partial in rx {
        reported[partial.worker] = true;
        total_inside += partial.hits;
    }

    for (worker, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            return Err(MonteCarloError::WorkerPanicked(worker));
        }
    }

    if let Some(worker) = reported.iter().position(|done| !done) {
        return Err(MonteCarloError::WorkerPanicked(worker));
    }

    debug!(total_inside, "all workers reported");
    Ok(total_inside)
}
