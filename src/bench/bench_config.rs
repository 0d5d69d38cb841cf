//! Benchmark configuration
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! environment variables. Durations are expressed in milliseconds outside of
//! the process.

use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding [`BenchConfig::warmup`]
pub const ENV_WARMUP_MS: &str = "CODEC_BENCH_WARMUP_MS";
/// Environment variable overriding [`BenchConfig::measurement`]
pub const ENV_MEASUREMENT_MS: &str = "CODEC_BENCH_MEASUREMENT_MS";
/// Environment variable overriding [`BenchConfig::window`]
pub const ENV_WINDOW_MS: &str = "CODEC_BENCH_WINDOW_MS";
/// Environment variable overriding [`BenchConfig::confidence_z`]
pub const ENV_CONFIDENCE_Z: &str = "CODEC_BENCH_CONFIDENCE_Z";

/// Timing configuration for throughput measurement
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Time spent running an operation before measuring it
    pub warmup: Duration,
    /// Time spent measuring an operation
    pub measurement: Duration,
    /// Target length of one sampling window
    pub window: Duration,
    /// Critical value used for the error margin (1.96 for 95%)
    pub confidence_z: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            warmup: Duration::from_secs(2),
            measurement: Duration::from_secs(5),
            window: Duration::from_millis(100),
            confidence_z: 1.96,
        }
    }
}

/// On-disk form of the configuration; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    warmup_ms: Option<u64>,
    measurement_ms: Option<u64>,
    window_ms: Option<u64>,
    confidence_z: Option<f64>,
}

impl BenchConfig {
    /// Short timings for smoke runs and tests
    pub fn quick() -> Self {
        Self {
            warmup: Duration::from_millis(20),
            measurement: Duration::from_millis(100),
            window: Duration::from_millis(10),
            ..Self::default()
        }
    }

    /// Set the warmup duration
    pub fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    /// Set the measurement duration
    pub fn with_measurement(mut self, measurement: Duration) -> Self {
        self.measurement = measurement;
        self
    }

    /// Set the sampling window length
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Check that the settings describe a runnable measurement
    pub fn validate(&self) -> ConfigResult<()> {
        if self.measurement.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "measurement".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }
        if self.window.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "window".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }
        if self.window > self.measurement {
            return Err(ConfigError::InvalidDuration {
                field: "window".to_string(),
                reason: format!(
                    "Window {:?} is longer than the measurement {:?}",
                    self.window, self.measurement
                ),
            });
        }
        if !self.confidence_z.is_finite() || self.confidence_z <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "confidence_z".to_string(),
                reason: format!("Must be a positive number, got {}", self.confidence_z),
            });
        }
        Ok(())
    }

    /// Apply overrides from a JSON file
    ///
    /// Recognized keys: `warmup_ms`, `measurement_ms`, `window_ms`,
    /// `confidence_z`.
    pub fn merge_file(mut self, path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            source_name: source_name.clone(),
            reason: e.to_string(),
        })?;
        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            source_name: source_name.clone(),
            reason: e.to_string(),
        })?;

        if let Some(ms) = file.warmup_ms {
            self.warmup = Duration::from_millis(ms);
        }
        if let Some(ms) = file.measurement_ms {
            self.measurement = Duration::from_millis(ms);
        }
        if let Some(ms) = file.window_ms {
            self.window = Duration::from_millis(ms);
        }
        if let Some(z) = file.confidence_z {
            self.confidence_z = z;
        }
        debug!(source = %source_name, config = ?self, "merged config file");
        Ok(self)
    }

    /// Apply overrides from the process environment
    pub fn merge_env(self) -> ConfigResult<Self> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_vars<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = parse_var::<u64>(&lookup, ENV_WARMUP_MS)? {
            self.warmup = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, ENV_MEASUREMENT_MS)? {
            self.measurement = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, ENV_WINDOW_MS)? {
            self.window = Duration::from_millis(ms);
        }
        if let Some(z) = parse_var::<f64>(&lookup, ENV_CONFIDENCE_Z)? {
            self.confidence_z = z;
        }
        Ok(self)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> ConfigResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Parse {
                source_name: key.to_string(),
                reason: format!("{:?}: {}", raw, e),
            }),
    }
}
