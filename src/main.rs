use std::env;
use std::time::Instant;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use monte_carlo_pi::cli::{self, Invocation, Mode};
use monte_carlo_pi::job::default_workers;
use monte_carlo_pi::report::{self, BenchmarkResult};
use monte_carlo_pi::{monte_carlo, monte_carlo_async, Result};

fn setup_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {}", e);
    }
}

fn run_estimate(invocation: &Invocation) -> Result<BenchmarkResult> {
    let samples = invocation.samples;

    let (result, elapsed) = match invocation.mode {
        Mode::Single => {
            let start = Instant::now();
            let pi = monte_carlo::estimate(samples)?;
            let elapsed = start.elapsed();
            let result = BenchmarkResult::new(
                report::LANGUAGE,
                report::FORMAT_SINGLE,
                elapsed,
                1,
                samples,
                pi,
            );
            (result, elapsed)
        }
        Mode::Multi => {
            let cores = default_workers();
            let start = Instant::now();
            let pi = monte_carlo::estimate_parallel(samples, cores)?;
            let elapsed = start.elapsed();
            let result = BenchmarkResult::new(
                report::LANGUAGE,
                report::FORMAT_MULTI,
                elapsed,
                cores,
                samples,
                pi,
            );
            (result, elapsed)
        }
        Mode::Async => {
            let cores = default_workers();
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            let start = Instant::now();
            let pi = runtime.block_on(monte_carlo_async::estimate_parallel_async(samples, cores))?;
            let elapsed = start.elapsed();
            let result = BenchmarkResult::new(
                report::LANGUAGE_ASYNC,
                report::FORMAT_MULTI,
                elapsed,
                cores,
                samples,
                pi,
            );
            (result, elapsed)
        }
    };

    info!("{} estimate of {} samples took {:?}", result.format, samples, elapsed);
    Ok(result)
}

fn main() {
    setup_logging();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("monte_carlo_pi");

    let invocation = match cli::parse_args(&args) {
        Ok(Some(invocation)) => invocation,
        Ok(None) => {
            eprintln!("{}", cli::usage(program));
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let result = match run_estimate(&invocation) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    match result.to_json() {
        Ok(line) => println!("{}", line),
        Err(e) => eprintln!("failed to encode result: {}", e),
    }
}
