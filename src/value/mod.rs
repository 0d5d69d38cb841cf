//! Value module for benchmark sample data
//!
//! This module provides the dynamically typed [`Value`] that codecs encode,
//! its serde integration, and the [`Sample`] container passed to the runner.

pub mod value_types;
pub mod value_serde;
pub mod sample;

// Re-export main types for convenience
pub use value_types::{Value, ValueKind};
pub use sample::Sample;
