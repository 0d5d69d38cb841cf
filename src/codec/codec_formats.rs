//! Bundled codecs over third-party serialization crates
//!
//! Each codec is a thin adapter: it forwards to the library and maps library
//! errors into [`CodecError`]. None of them special-cases any value kind.

use super::{Codec, Payload};
use crate::error::{CodecError, CodecResult};
use crate::value::Value;

fn serialize_failed(codec: &str, reason: impl ToString) -> CodecError {
    CodecError::SerializationFailed {
        codec: codec.to_string(),
        reason: reason.to_string(),
    }
}

fn deserialize_failed(codec: &str, reason: impl ToString) -> CodecError {
    CodecError::DeserializationFailed {
        codec: codec.to_string(),
        reason: reason.to_string(),
    }
}

fn expect_binary<'a>(codec: &str, payload: &'a Payload) -> CodecResult<&'a [u8]> {
    match payload {
        Payload::Binary(bytes) => Ok(&bytes[..]),
        Payload::Text(_) => Err(CodecError::PayloadMismatch {
            codec: codec.to_string(),
            expected: "binary".to_string(),
            actual: payload.kind().to_string(),
        }),
    }
}

fn expect_text<'a>(codec: &str, payload: &'a Payload) -> CodecResult<&'a str> {
    match payload {
        Payload::Text(text) => Ok(text.as_str()),
        Payload::Binary(_) => Err(CodecError::PayloadMismatch {
            codec: codec.to_string(),
            expected: "text".to_string(),
            actual: payload.kind().to_string(),
        }),
    }
}

/// Binary object-graph format: bincode's native encoding of the full value
/// tree, symbols included
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl BincodeCodec {
    /// Display name
    pub const NAME: &'static str = "bincode";
}

impl Codec for BincodeCodec {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn serialize(&self, value: &Value) -> CodecResult<Payload> {
        bincode::encode_to_vec(value, bincode::config::standard())
            .map(Payload::from)
            .map_err(|e| serialize_failed(Self::NAME, e))
    }

    fn deserialize(&self, payload: &Payload) -> CodecResult<Value> {
        let bytes = expect_binary(Self::NAME, payload)?;
        let (value, read): (Value, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())
                .map_err(|e| deserialize_failed(Self::NAME, e))?;
        if read != bytes.len() {
            return Err(deserialize_failed(
                Self::NAME,
                format!("{} trailing bytes", bytes.len() - read),
            ));
        }
        Ok(value)
    }
}

/// JSON written and parsed directly from the value, no intermediate tree
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Display name
    pub const NAME: &'static str = "serde_json";
}

impl Codec for JsonCodec {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn serialize(&self, value: &Value) -> CodecResult<Payload> {
        serde_json::to_string(value)
            .map(Payload::Text)
            .map_err(|e| serialize_failed(Self::NAME, e))
    }

    fn deserialize(&self, payload: &Payload) -> CodecResult<Value> {
        let text = expect_text(Self::NAME, payload)?;
        serde_json::from_str(text).map_err(|e| deserialize_failed(Self::NAME, e))
    }
}

/// JSON going through the generic `serde_json::Value` document tree in both
/// directions
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonValueCodec;

impl JsonValueCodec {
    /// Display name
    pub const NAME: &'static str = "serde_json::Value";
}

impl Codec for JsonValueCodec {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn serialize(&self, value: &Value) -> CodecResult<Payload> {
        let document = serde_json::to_value(value).map_err(|e| serialize_failed(Self::NAME, e))?;
        serde_json::to_string(&document)
            .map(Payload::Text)
            .map_err(|e| serialize_failed(Self::NAME, e))
    }

    fn deserialize(&self, payload: &Payload) -> CodecResult<Value> {
        let text = expect_text(Self::NAME, payload)?;
        let document: serde_json::Value =
            serde_json::from_str(text).map_err(|e| deserialize_failed(Self::NAME, e))?;
        serde::Deserialize::deserialize(document).map_err(|e| deserialize_failed(Self::NAME, e))
    }
}

/// MessagePack via rmp-serde
#[cfg(feature = "msgpack")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePackCodec;

#[cfg(feature = "msgpack")]
impl MessagePackCodec {
    /// Display name
    pub const NAME: &'static str = "rmp-serde";
}

#[cfg(feature = "msgpack")]
impl Codec for MessagePackCodec {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn serialize(&self, value: &Value) -> CodecResult<Payload> {
        rmp_serde::to_vec(value)
            .map(Payload::from)
            .map_err(|e| serialize_failed(Self::NAME, e))
    }

    fn deserialize(&self, payload: &Payload) -> CodecResult<Value> {
        let bytes = expect_binary(Self::NAME, payload)?;
        rmp_serde::from_slice(bytes).map_err(|e| deserialize_failed(Self::NAME, e))
    }
}

/// CBOR via ciborium
#[cfg(feature = "cbor")]
#[derive(Debug, Clone, Copy, Default)]
pub struct CborCodec;

#[cfg(feature = "cbor")]
impl CborCodec {
    /// Display name
    pub const NAME: &'static str = "ciborium";
}

#[cfg(feature = "cbor")]
impl Codec for CborCodec {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn serialize(&self, value: &Value) -> CodecResult<Payload> {
        let mut buffer = Vec::new();
        ciborium::into_writer(value, &mut buffer).map_err(|e| serialize_failed(Self::NAME, e))?;
        Ok(Payload::from(buffer))
    }

    fn deserialize(&self, payload: &Payload) -> CodecResult<Value> {
        let bytes = expect_binary(Self::NAME, payload)?;
        ciborium::from_reader(bytes).map_err(|e| deserialize_failed(Self::NAME, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Sample;

    fn round_trip(codec: &dyn Codec, value: &Value) -> Value {
        let payload = codec.serialize(value).unwrap();
        codec.deserialize(&payload).unwrap()
    }

    #[test]
    fn test_bincode_preserves_everything() {
        let value = Sample::fixture().to_value();
        assert_eq!(round_trip(&BincodeCodec, &value), value);
    }

    #[test]
    fn test_bincode_rejects_trailing_bytes() {
        let Payload::Binary(bytes) = BincodeCodec.serialize(&Value::Integer(1)).unwrap() else {
            panic!("bincode produces binary payloads");
        };
        let mut padded = bytes.to_vec();
        padded.push(0);
        assert!(BincodeCodec.deserialize(&Payload::from(padded)).is_err());
    }

    #[test]
    fn test_json_codecs_agree_on_text() {
        let value = Value::Mapping(vec![(Value::symbol("key"), Value::text("value"))]);
        let direct = JsonCodec.serialize(&value).unwrap();
        let dom = JsonValueCodec.serialize(&value).unwrap();
        assert_eq!(direct, Payload::Text(r#"{"key":"value"}"#.to_string()));
        assert_eq!(direct, dom);
    }

    #[test]
    fn test_json_turns_symbols_into_text() {
        for codec in [&JsonCodec as &dyn Codec, &JsonValueCodec] {
            assert_eq!(round_trip(codec, &Value::symbol("symbol")), Value::text("symbol"));
            assert_eq!(round_trip(codec, &Value::Float(123.456)), Value::Float(123.456));
            assert_eq!(round_trip(codec, &Value::Integer(-7)), Value::Integer(-7));
        }
    }

    #[test]
    fn test_json_rejects_sequence_keys() {
        let value = Value::Mapping(vec![(Value::Sequence(vec![]), Value::Null)]);
        assert!(matches!(
            JsonCodec.serialize(&value),
            Err(CodecError::SerializationFailed { .. })
        ));
    }

    #[test]
    fn test_payload_kind_mismatch() {
        let err = JsonCodec.deserialize(&Payload::from(vec![1u8])).unwrap_err();
        assert!(matches!(err, CodecError::PayloadMismatch { .. }));
        let err = BincodeCodec.deserialize(&Payload::from("1".to_string())).unwrap_err();
        assert!(matches!(err, CodecError::PayloadMismatch { .. }));
    }

    #[cfg(feature = "msgpack")]
    #[test]
    fn test_messagepack_round_trips_plain_data() {
        let value = Value::Sequence(vec![
            Value::Integer(123),
            Value::Float(123.456),
            Value::Null,
            Value::Bool(false),
            Value::text("string"),
        ]);
        assert_eq!(round_trip(&MessagePackCodec, &value), value);
        assert_eq!(round_trip(&MessagePackCodec, &Value::symbol("s")), Value::text("s"));
    }

    #[cfg(feature = "cbor")]
    #[test]
    fn test_cbor_round_trips_plain_data() {
        let value = Value::Mapping(vec![
            (Value::text("fixnum"), Value::Integer(123)),
            (Value::Integer(-1), Value::Float(123.456)),
            (Value::text("nil"), Value::Null),
        ]);
        assert_eq!(round_trip(&CborCodec, &value), value);
    }
}
