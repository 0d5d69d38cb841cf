//! Benchmark and fidelity runner
//!
//! This module measures codec throughput and checks round-trip fidelity.
//! Both entry points are stateless: they read the registry and the sample
//! and return fresh results. Codec failures never escape; they become
//! "unsupported" markers in the results.
//!
//! # Example
//!
//! ```rust,no_run
//! use codec_bench::bench::{check_fidelity, measure_throughput, BenchConfig, ThroughputReport};
//! use codec_bench::codec::CodecRegistry;
//! use codec_bench::value::Sample;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = CodecRegistry::with_defaults()?;
//! let sample = Sample::fixture();
//!
//! let timings = measure_throughput(&registry, &sample, &BenchConfig::quick())?;
//! println!("{}", ThroughputReport::new(&timings));
//! println!("{}", check_fidelity(&registry, &sample));
//! # Ok(())
//! # }
//! ```

pub mod bench_config;
pub mod bench_stats;
pub mod bench_throughput;
pub mod bench_fidelity;
pub mod bench_report;

// Re-export main types for convenience
pub use bench_config::BenchConfig;
pub use bench_stats::Summary;
pub use bench_throughput::{
    measure_operation, measure_throughput, Throughput, TimingResult, TimingStatus,
};
pub use bench_fidelity::{
    check_fidelity, FidelityReport, FidelityResult, FieldOutcome, RoundTripExample,
};
pub use bench_report::{Comparison, FidelityRow, RankedEntry, ThroughputReport, ThroughputRow};

use crate::error::{CodecError, CodecResult};
use crate::utils::panic_message;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A codec operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Value to payload
    Serialize,
    /// Payload to value
    Deserialize,
}

impl Operation {
    /// Both operations, in measurement order
    pub const ALL: [Operation; 2] = [Operation::Serialize, Operation::Deserialize];

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Operation::Serialize => "serialize",
            Operation::Deserialize => "deserialize",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run a codec call, turning a panic into [`CodecError::Panicked`]
pub(crate) fn guarded<T>(
    codec: &str,
    operation: Operation,
    call: impl FnOnce() -> CodecResult<T>,
) -> CodecResult<T> {
    catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        Err(CodecError::Panicked {
            codec: codec.to_string(),
            operation: operation.to_string(),
            message: panic_message(payload.as_ref()),
        })
    })
}
