//! Throughput measurement
//!
//! Each codec operation is warmed up, then run in fixed-size batches
//! ("windows") until the measurement time is spent. The per-window rates
//! give the mean iterations per second and its error margin.

use super::bench_config::BenchConfig;
use super::bench_stats::Summary;
use super::{guarded, Operation};
use crate::codec::{Codec, CodecRegistry};
use crate::error::{CodecResult, ConfigResult};
use crate::value::{Sample, Value};
use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};
use tracing::{debug, info, info_span, warn};

/// Shortest window duration used when computing a rate
const MIN_WINDOW_SECS: f64 = 1e-9;

/// Measured throughput of one codec operation
#[derive(Debug, Clone, PartialEq)]
pub struct Throughput {
    /// Operations completed while measuring
    pub iterations: u64,
    /// Wall-clock time spent measuring
    pub elapsed: Duration,
    /// Statistics over the per-window rates (operations per second)
    pub summary: Summary,
}

impl Throughput {
    /// Mean operations per second
    pub fn ips(&self) -> f64 {
        self.summary.mean
    }

    /// Error margin in operations per second
    pub fn margin(&self) -> f64 {
        self.summary.margin
    }

    /// Error margin as a percentage of [`Throughput::ips`]
    pub fn margin_percent(&self) -> f64 {
        self.summary.margin_percent()
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} i/s ± {:.1}%",
            super::bench_report::format_rate(self.ips()),
            self.margin_percent()
        )
    }
}

/// Outcome of measuring one codec operation
#[derive(Debug, Clone, PartialEq)]
pub enum TimingStatus {
    /// The operation ran for the whole measurement
    Measured(Throughput),
    /// The operation failed or panicked on the sample
    Unsupported {
        /// The first failure seen
        reason: String,
    },
}

/// Timing of one operation of one registered codec
#[derive(Debug, Clone, PartialEq)]
pub struct TimingResult {
    /// Codec display name
    pub codec: String,
    /// Measured operation
    pub operation: Operation,
    /// Measurement outcome
    pub status: TimingStatus,
}

impl TimingResult {
    /// The throughput, if the operation was supported
    pub fn throughput(&self) -> Option<&Throughput> {
        match &self.status {
            TimingStatus::Measured(t) => Some(t),
            TimingStatus::Unsupported { .. } => None,
        }
    }

    /// Check if the operation ran successfully
    pub fn is_supported(&self) -> bool {
        self.throughput().is_some()
    }
}

/// Measure serialize, then deserialize, for every registered codec
///
/// Results are grouped by operation, each group in registry order. The
/// whole sample is encoded as a single mapping. The config is validated
/// before anything runs.
pub fn measure_throughput(
    registry: &CodecRegistry,
    sample: &Sample,
    config: &BenchConfig,
) -> ConfigResult<Vec<TimingResult>> {
    if let Err(e) = config.validate() {
        warn!(error = %e, "refusing to measure with an invalid config");
        return Err(e);
    }
    let value = sample.to_value();
    let mut results = Vec::with_capacity(registry.len() * Operation::ALL.len());
    for operation in Operation::ALL {
        info!(%operation, codecs = registry.len(), "measuring throughput");
        for codec in registry.list() {
            results.push(measure_operation(codec, operation, &value, config));
        }
    }
    Ok(results)
}

/// Measure one operation of one codec
///
/// Deserialize is timed against a payload serialized once beforehand, so
/// the loop contains no serialize work. `config` is expected to pass
/// [`BenchConfig::validate`]; [`measure_throughput`] checks this for you.
pub fn measure_operation(
    codec: &dyn Codec,
    operation: Operation,
    value: &Value,
    config: &BenchConfig,
) -> TimingResult {
    let span = info_span!("measure", codec = codec.name(), %operation);
    let _enter = span.enter();

    let outcome = match operation {
        Operation::Serialize => guarded(codec.name(), operation, || {
            run_windows(config, || {
                codec.serialize(black_box(value)).map(|payload| {
                    black_box(payload);
                })
            })
        }),
        Operation::Deserialize => guarded(codec.name(), Operation::Serialize, || {
            codec.serialize(value)
        })
        .and_then(|payload| {
            debug!(bytes = payload.len(), "prepared deserialize payload");
            guarded(codec.name(), operation, || {
                run_windows(config, || {
                    codec.deserialize(black_box(&payload)).map(|decoded| {
                        black_box(decoded);
                    })
                })
            })
        }),
    };

    let status = match outcome {
        Ok(throughput) => {
            debug!(
                ips = throughput.ips(),
                margin_percent = throughput.margin_percent(),
                windows = throughput.summary.count,
                "measured"
            );
            TimingStatus::Measured(throughput)
        }
        Err(e) => {
            warn!(error = %e, "codec failed, marking unsupported");
            TimingStatus::Unsupported {
                reason: e.to_string(),
            }
        }
    };

    TimingResult {
        codec: codec.name().to_string(),
        operation,
        status,
    }
}

/// Warm up, size the batches, then sample windows until the measurement
/// time is used up. The first error aborts the measurement.
fn run_windows<F>(config: &BenchConfig, mut op: F) -> CodecResult<Throughput>
where
    F: FnMut() -> CodecResult<()>,
{
    let warmup_start = Instant::now();
    let mut warmup_iterations: u64 = 0;
    loop {
        op()?;
        warmup_iterations += 1;
        if warmup_start.elapsed() >= config.warmup {
            break;
        }
    }
    let batch = batch_size(warmup_iterations, warmup_start.elapsed(), config.window);

    let mut rates = Vec::new();
    let mut iterations: u64 = 0;
    let start = Instant::now();
    loop {
        let window_start = Instant::now();
        for _ in 0..batch {
            op()?;
        }
        let window_secs = window_start.elapsed().as_secs_f64().max(MIN_WINDOW_SECS);
        rates.push(batch as f64 / window_secs);
        iterations += batch;
        if start.elapsed() >= config.measurement {
            break;
        }
    }

    Ok(Throughput {
        iterations,
        elapsed: start.elapsed(),
        summary: Summary::from_samples(&rates, config.confidence_z),
    })
}

/// Iterations expected to fill one window at the warmup rate
fn batch_size(iterations: u64, elapsed: Duration, window: Duration) -> u64 {
    let per_sec = iterations as f64 / elapsed.as_secs_f64().max(MIN_WINDOW_SECS);
    let batch = (per_sec * window.as_secs_f64()).ceil();
    if batch.is_finite() && batch >= 1.0 {
        batch.min(u64::MAX as f64) as u64
    } else {
        1
    }
}
