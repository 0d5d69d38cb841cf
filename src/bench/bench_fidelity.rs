//! Round-trip fidelity checks
//!
//! Every sample field is serialized and deserialized on its own and compared
//! structurally with the original. Coercions count as failures: a symbol
//! that comes back as text is not the same value.

use super::{guarded, Operation};
use crate::codec::{Codec, CodecRegistry, Payload};
use crate::error::CodecResult;
use crate::value::{Sample, Value};
use tracing::{debug, info, warn};

/// What happened to one field of the sample
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// Came back structurally equal
    Supported,
    /// Came back as a different value
    Mismatch {
        /// The value the codec returned
        round_tripped: Value,
    },
    /// Serialize or deserialize failed
    Failed {
        /// The failure
        reason: String,
    },
}

impl FieldOutcome {
    /// Check if the field survived the round trip
    pub fn is_supported(&self) -> bool {
        matches!(self, FieldOutcome::Supported)
    }
}

/// The whole sample pushed through one codec, kept for inspection
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTripExample {
    /// Serialized sample, if serialize succeeded
    pub payload: Option<Payload>,
    /// Deserialized payload, if both operations succeeded
    pub round_tripped: Option<Value>,
    /// First failure, if any
    pub error: Option<String>,
}

impl RoundTripExample {
    fn capture(codec: &dyn Codec, value: &Value) -> Self {
        match guarded(codec.name(), Operation::Serialize, || codec.serialize(value)) {
            Err(e) => Self {
                payload: None,
                round_tripped: None,
                error: Some(e.to_string()),
            },
            Ok(payload) => {
                let decoded = guarded(codec.name(), Operation::Deserialize, || {
                    codec.deserialize(&payload)
                });
                match decoded {
                    Ok(round_tripped) => Self {
                        payload: Some(payload),
                        round_tripped: Some(round_tripped),
                        error: None,
                    },
                    Err(e) => Self {
                        payload: Some(payload),
                        round_tripped: None,
                        error: Some(e.to_string()),
                    },
                }
            }
        }
    }
}

/// Fidelity of one codec over every sample field
#[derive(Debug, Clone, PartialEq)]
pub struct FidelityResult {
    /// Codec display name
    pub codec: String,
    /// Outcome per field, in sample order
    pub fields: Vec<(String, FieldOutcome)>,
    /// The whole sample round-tripped
    pub example: RoundTripExample,
}

impl FidelityResult {
    /// Names of the fields that did not survive, in sample order
    pub fn unsupported(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, outcome)| !outcome.is_supported())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Check if a field survived; `false` for unknown fields
    pub fn is_supported(&self, field: &str) -> bool {
        self.fields
            .iter()
            .any(|(name, outcome)| name == field && outcome.is_supported())
    }

    /// Outcome for a field
    pub fn outcome(&self, field: &str) -> Option<&FieldOutcome> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, outcome)| outcome)
    }
}

/// Fidelity of every registered codec, in registry order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FidelityReport {
    /// Per-codec results
    pub results: Vec<FidelityResult>,
}

impl FidelityReport {
    /// Result for a codec
    pub fn get(&self, codec: &str) -> Option<&FidelityResult> {
        self.results.iter().find(|r| r.codec == codec)
    }

    /// Unsupported field names for a codec
    pub fn unsupported(&self, codec: &str) -> Option<Vec<&str>> {
        self.get(codec).map(FidelityResult::unsupported)
    }
}

/// Round-trip every sample field through every registered codec
pub fn check_fidelity(registry: &CodecRegistry, sample: &Sample) -> FidelityReport {
    info!(codecs = registry.len(), fields = sample.len(), "checking fidelity");
    let whole = sample.to_value();
    let results = registry
        .list()
        .map(|codec| check_codec(codec, sample, &whole))
        .collect();
    FidelityReport { results }
}

fn check_codec(codec: &dyn Codec, sample: &Sample, whole: &Value) -> FidelityResult {
    let fields = sample
        .iter()
        .map(|(field, original)| {
            let outcome = match round_trip(codec, original) {
                Ok(back) if back == *original => FieldOutcome::Supported,
                Ok(back) => {
                    debug!(
                        codec = codec.name(),
                        field,
                        original = %original,
                        round_tripped = %back,
                        "lossy round trip"
                    );
                    FieldOutcome::Mismatch { round_tripped: back }
                }
                Err(e) => {
                    warn!(codec = codec.name(), field, error = %e, "round trip failed");
                    FieldOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            (field.to_string(), outcome)
        })
        .collect();

    FidelityResult {
        codec: codec.name().to_string(),
        fields,
        example: RoundTripExample::capture(codec, whole),
    }
}

fn round_trip(codec: &dyn Codec, value: &Value) -> CodecResult<Value> {
    let payload = guarded(codec.name(), Operation::Serialize, || codec.serialize(value))?;
    guarded(codec.name(), Operation::Deserialize, || codec.deserialize(&payload))
}
