//! Structured result line printed after every run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const LANGUAGE: &str = "rust";
pub const LANGUAGE_ASYNC: &str = "rust (tokio)";
pub const FORMAT_SINGLE: &str = "single threaded";
pub const FORMAT_MULTI: &str = "multi threaded";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub language: String,
    pub format: String,
    /// Wall-clock nanoseconds spent estimating.
    pub time: u128,
    pub cores: usize,
    pub sample: u64,
    pub pi: f64,
}

impl BenchmarkResult {
    pub fn new(
        language: &str,
        format: &str,
        elapsed: Duration,
        cores: usize,
        sample: u64,
        pi: f64,
    ) -> Self {
        BenchmarkResult {
            language: language.to_string(),
            format: format.to_string(),
            time: elapsed.as_nanos(),
            cores,
            sample,
            pi,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
