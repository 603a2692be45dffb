use std::str::FromStr;

use crate::error::{MonteCarloError, Result};

/// Runtime flavour selected by the first positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Single,
    Multi,
    Async,
}

impl FromStr for Mode {
    type Err = MonteCarloError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(Mode::Single),
            "multi" => Ok(Mode::Multi),
            "async" => Ok(Mode::Async),
            _ => Err(MonteCarloError::InvalidArgument(
                "unsupported runtime used".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub samples: u64,
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {} <mode> <number_of_samples>\n  mode: 'single', 'multi' or 'async'",
        program
    )
}

/// Parses `<program> <mode> <sampleCount>`.
///
/// Returns `Ok(None)` when too few arguments were given and the caller should
/// print usage. The sample count is validated before the mode.
pub fn parse_args(args: &[String]) -> Result<Option<Invocation>> {
    if args.len() < 3 {
        return Ok(None);
    }

    let samples = args[2].parse::<i64>().map_err(|e| {
        MonteCarloError::InvalidArgument(format!("invalid number of samples provided: {}", e))
    })?;
    if samples <= 0 {
        return Err(MonteCarloError::InvalidSampleCount(samples));
    }

    let mode = args[1].parse::<Mode>()?;

    Ok(Some(Invocation {
        mode,
        samples: samples as u64,
    }))
}
