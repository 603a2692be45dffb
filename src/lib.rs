//! Monte Carlo estimation of π, single threaded, across OS threads, or across
//! tokio blocking tasks.

pub mod cli;
pub mod error;
pub mod job;
pub mod monte_carlo;
pub mod monte_carlo_async;
pub mod report;
pub mod sampler;

pub use error::{MonteCarloError, Result};
pub use job::SamplingJob;
pub use monte_carlo::{estimate, estimate_parallel, PartialResult};
pub use monte_carlo_async::estimate_parallel_async;
pub use report::BenchmarkResult;
