use tokio::sync::mpsc;
use tokio::task;

use tracing::{debug, trace};

use crate::error::{MonteCarloError, Result};
use crate::job::SamplingJob;
use crate::monte_carlo::PartialResult;
use crate::sampler::{pi_from_hits, sample};

/// Async counterpart of [`crate::monte_carlo::estimate_parallel`]. Sampling
/// is CPU-bound, so each worker runs on tokio's blocking pool.
pub async fn estimate_parallel_async(total_samples: u64, num_tasks: usize) -> Result<f64> {
    let job = SamplingJob::new(total_samples)?.with_workers(num_tasks)?;
    let hits = run_job_async(&job).await?;
    Ok(pi_from_hits(hits, job.total_samples()))
}

pub async fn run_job_async(job: &SamplingJob) -> Result<u64> {
    let num_tasks = job.worker_count();
    debug!(
        total_samples = job.total_samples(),
        num_tasks,
        seed_base = job.seed_base(),
        "spawning blocking sampling tasks"
    );

    let (tx, mut rx) = mpsc::channel(num_tasks);
    let mut handles = Vec::with_capacity(num_tasks);

    for task_id in 0..num_tasks {
        let samples = job.share(task_id);
        let seed = job.worker_seed(task_id);
        let tx = tx.clone();

        let handle = task::spawn_blocking(move || {
            let hits = sample(samples, seed);
            trace!(task_id, samples, hits, "task finished");
            let _ = tx.blocking_send(PartialResult {
                worker: task_id,
                hits,
            });
        });

        handles.push(handle);
    }

    drop(tx);

    let mut total_inside = 0;
    let mut reported = vec![false; num_tasks];
    while let Some(partial) = rx.recv().await {
        reported[partial.worker] = true;
        total_inside += partial.hits;
    }

    for (task_id, handle) in handles.into_iter().enumerate() {
        if handle.await.is_err() {
            return Err(MonteCarloError::WorkerPanicked(task_id));
        }
    }

    if let Some(task_id) = reported.iter().position(|done| !done) {
        return Err(MonteCarloError::WorkerPanicked(task_id));
    }

    debug!(total_inside, "all tasks reported");
    Ok(total_inside)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monte_carlo::run_job;

    #[tokio::test(flavor = "multi_thread")]
    async fn async_estimate_converges() {
        let pi = estimate_parallel_async(1_000_000, 4).await.unwrap();
        assert!((3.10..=3.18).contains(&pi), "estimate {} out of range", pi);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn matches_threaded_run_for_same_job() {
        let job = SamplingJob::new(50_000)
            .unwrap()
            .with_workers(5)
            .unwrap()
            .with_seed_base(2024);
        assert_eq!(run_job_async(&job).await.unwrap(), run_job(&job).unwrap());
    }

    #[tokio::test]
    async fn current_thread_runtime_completes() {
        let pi = estimate_parallel_async(1_000, 3).await.unwrap();
        assert!((0.0..=4.0).contains(&pi));
    }

    #[tokio::test]
    async fn rejects_zero_tasks() {
        assert!(matches!(
            estimate_parallel_async(100, 0).await,
            Err(MonteCarloError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn rejects_zero_samples() {
        assert!(matches!(
            estimate_parallel_async(0, 2).await,
            Err(MonteCarloError::InvalidSampleCount(0))
        ));
    }
}
