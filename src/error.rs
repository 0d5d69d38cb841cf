//! Error types for the codec benchmarking harness
//!
//! This module provides a unified error handling system using `thiserror` for
//! the registry, the codecs under test and the benchmark configuration.

use thiserror::Error;

/// The main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    /// Codec registry errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Serialization/deserialization errors raised by a codec
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Benchmark configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Registry-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A codec with this name is already registered
    #[error("Codec already registered: {name}")]
    DuplicateName {
        /// The conflicting codec name
        name: String,
    },

    /// The codec name cannot be used as a display name
    #[error("Invalid codec name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Codec-specific error types
///
/// These never escape the runner: they are downgraded to "unsupported"
/// markers for the codec that produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Serialization failed
    #[error("{codec}: serialization failed: {reason}")]
    SerializationFailed {
        /// Codec display name
        codec: String,
        /// Underlying library error
        reason: String,
    },

    /// Deserialization failed
    #[error("{codec}: deserialization failed: {reason}")]
    DeserializationFailed {
        /// Codec display name
        codec: String,
        /// Underlying library error
        reason: String,
    },

    /// The payload handed to deserialize is not the kind the codec produces
    #[error("{codec}: expected {expected} payload, got {actual}")]
    PayloadMismatch {
        /// Codec display name
        codec: String,
        /// Payload kind the codec accepts
        expected: String,
        /// Payload kind it was given
        actual: String,
    },

    /// The codec panicked instead of returning an error
    #[error("{codec}: panicked during {operation}: {message}")]
    Panicked {
        /// Codec display name
        codec: String,
        /// Operation that panicked
        operation: String,
        /// Panic payload, when it was a string
        message: String,
    },
}

/// Configuration-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A duration setting is out of range
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Setting name
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// A non-duration setting is out of range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// The configuration source could not be parsed
    #[error("Failed to parse {source_name}: {reason}")]
    Parse {
        /// File path or environment variable
        source_name: String,
        /// Parser error
        reason: String,
    },
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for Registry Results
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Convenience type alias for Codec Results
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Convenience type alias for Config Results
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let registry_error = RegistryError::DuplicateName {
            name: "bincode".to_string(),
        };
        let error = Error::Registry(registry_error);
        assert!(error.to_string().contains("Registry error"));
        assert!(error.to_string().contains("Codec already registered: bincode"));
    }

    #[test]
    fn test_codec_error_names_codec() {
        let codec_error = CodecError::PayloadMismatch {
            codec: "serde_json".to_string(),
            expected: "text".to_string(),
            actual: "binary".to_string(),
        };
        let error = Error::from(codec_error);
        assert!(error.to_string().contains("serde_json: expected text payload, got binary"));
    }
}
