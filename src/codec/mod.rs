//! Codec module for the formats under test
//!
//! A codec is a named pair of serialize/deserialize operations. The harness
//! treats every codec as opaque: it only calls the two operations and
//! compares what comes back.

pub mod codec_payload;
pub mod codec_registry;
pub mod codec_formats;

// Re-export main types for convenience
pub use codec_payload::Payload;
pub use codec_registry::CodecRegistry;
pub use codec_formats::{BincodeCodec, JsonCodec, JsonValueCodec};

#[cfg(feature = "msgpack")]
pub use codec_formats::MessagePackCodec;

#[cfg(feature = "cbor")]
pub use codec_formats::CborCodec;

use crate::error::CodecResult;
use crate::value::Value;
use std::fmt;

/// A serialization format under test
///
/// Implementations must not share mutable state between calls.
pub trait Codec: Send + Sync {
    /// Unique display name
    fn name(&self) -> &str;

    /// Serialize a value
    fn serialize(&self, value: &Value) -> CodecResult<Payload>;

    /// Deserialize a payload produced by [`Codec::serialize`]
    fn deserialize(&self, payload: &Payload) -> CodecResult<Value>;
}

type SerializeFn = dyn Fn(&Value) -> CodecResult<Payload> + Send + Sync;
type DeserializeFn = dyn Fn(&Payload) -> CodecResult<Value> + Send + Sync;

/// A codec assembled from a pair of closures
pub struct FnCodec {
    name: String,
    serialize: Box<SerializeFn>,
    deserialize: Box<DeserializeFn>,
}

impl FnCodec {
    /// Create a codec from a serialize and a deserialize closure
    pub fn new<S, D>(name: impl Into<String>, serialize: S, deserialize: D) -> Self
    where
        S: Fn(&Value) -> CodecResult<Payload> + Send + Sync + 'static,
        D: Fn(&Payload) -> CodecResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            serialize: Box::new(serialize),
            deserialize: Box::new(deserialize),
        }
    }
}

impl Codec for FnCodec {
    fn name(&self) -> &str {
        &self.name
    }

    fn serialize(&self, value: &Value) -> CodecResult<Payload> {
        (self.serialize)(value)
    }

    fn deserialize(&self, payload: &Payload) -> CodecResult<Value> {
        (self.deserialize)(payload)
    }
}

impl fmt::Debug for FnCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCodec").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_fn_codec_delegates() {
        let codec = FnCodec::new(
            "display",
            |value| Ok(Payload::Text(value.to_string())),
            |payload| match payload {
                Payload::Text(s) => Ok(Value::Text(s.clone())),
                other => Err(CodecError::PayloadMismatch {
                    codec: "display".to_string(),
                    expected: "text".to_string(),
                    actual: other.kind().to_string(),
                }),
            },
        );

        assert_eq!(codec.name(), "display");
        let payload = codec.serialize(&Value::symbol("symbol")).unwrap();
        assert_eq!(payload, Payload::Text(":symbol".to_string()));
        assert_eq!(codec.deserialize(&payload).unwrap(), Value::text(":symbol"));
        assert!(codec.deserialize(&Payload::from(vec![1u8])).is_err());
    }
}
