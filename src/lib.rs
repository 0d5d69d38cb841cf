//! # codec-bench
//!
//! A harness for comparing serialization formats. Given a set of pluggable
//! codecs and a sample of representative values, it measures serialize and
//! deserialize throughput and checks which kinds of value survive a round
//! trip through each format.
//!
//! ## Features
//!
//! - **Codec Module**: the `Codec` trait, an ordered registry, and bundled
//!   adapters for bincode, serde_json, rmp-serde and ciborium
//! - **Value Module**: the dynamically typed sample value and its serde mapping
//! - **Bench Module**: throughput measurement, fidelity checks and reports
//!
//! ## Optional Features
//!
//! - `msgpack`: MessagePack codec via rmp-serde (default)
//! - `cbor`: CBOR codec via ciborium (default)
//!
//! ## Example
//!
//! ```rust
//! use codec_bench::prelude::*;
//!
//! let mut registry = CodecRegistry::new();
//! registry.register_codec(JsonCodec)?;
//!
//! let sample = Sample::new()
//!     .with_field("count", Value::Integer(123))
//!     .with_field("tag", Value::symbol("symbol"));
//!
//! let report = check_fidelity(&registry, &sample);
//! assert_eq!(report.unsupported("serde_json"), Some(vec!["tag"]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core error types
pub use error::{Error, Result};

// Core modules
pub mod error;
pub mod value;
pub mod codec;
pub mod bench;

// Utility modules
mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::error::{CodecError, Error, RegistryError, Result};
    pub use crate::value::{Sample, Value, ValueKind};
    pub use crate::codec::{BincodeCodec, Codec, CodecRegistry, JsonCodec, JsonValueCodec, Payload};
    pub use crate::bench::{
        check_fidelity, measure_throughput, BenchConfig, FidelityReport, Operation,
        ThroughputReport, TimingStatus,
    };
}

// Version information
/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert_eq!(CRATE_NAME, "codec-bench");
    }
}
