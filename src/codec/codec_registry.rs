//! Codec registry
//!
//! Holds the codecs of a run in registration order. The order is the row
//! order of every report.

use super::{Codec, FnCodec, Payload};
use crate::error::{CodecResult, RegistryError, RegistryResult};
use crate::value::Value;
use std::fmt;
use tracing::debug;

/// Ordered collection of uniquely named codecs
#[derive(Default)]
pub struct CodecRegistry {
    codecs: Vec<Box<dyn Codec>>,
}

impl CodecRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Create a registry holding every bundled format
    ///
    /// Order: bincode, serde_json, serde_json::Value, then rmp-serde and
    /// ciborium when their features are enabled.
    pub fn with_defaults() -> RegistryResult<Self> {
        let mut registry = Self::new();
        registry.register_codec(super::BincodeCodec)?;
        registry.register_codec(super::JsonCodec)?;
        registry.register_codec(super::JsonValueCodec)?;
        #[cfg(feature = "msgpack")]
        registry.register_codec(super::MessagePackCodec)?;
        #[cfg(feature = "cbor")]
        registry.register_codec(super::CborCodec)?;
        Ok(registry)
    }

    /// Register a codec built from a serialize and a deserialize closure
    pub fn register<S, D>(
        &mut self,
        name: impl Into<String>,
        serialize: S,
        deserialize: D,
    ) -> RegistryResult<()>
    where
        S: Fn(&Value) -> CodecResult<Payload> + Send + Sync + 'static,
        D: Fn(&Payload) -> CodecResult<Value> + Send + Sync + 'static,
    {
        self.register_codec(FnCodec::new(name, serialize, deserialize))
    }

    /// Register a codec; fails without touching the registry if the name is
    /// empty or already taken
    pub fn register_codec<C: Codec + 'static>(&mut self, codec: C) -> RegistryResult<()> {
        let name = codec.name();
        if name.trim().is_empty() {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
                reason: "Name cannot be empty".to_string(),
            });
        }
        if self.contains(name) {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }

        debug!(codec = name, position = self.codecs.len(), "registered codec");
        self.codecs.push(Box::new(codec));
        Ok(())
    }

    /// Registered codecs in registration order
    pub fn list(&self) -> impl ExactSizeIterator<Item = &dyn Codec> + '_ {
        self.codecs.iter().map(|c| c.as_ref())
    }

    /// Look up a codec by name
    pub fn get(&self, name: &str) -> Option<&dyn Codec> {
        self.list().find(|c| c.name() == name)
    }

    /// Check if a codec with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.codecs.iter().any(|c| c.name() == name)
    }

    /// Codec names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.codecs.iter().map(|c| c.name()).collect()
    }

    /// Number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Check if no codec is registered
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codecs", &self.names())
            .finish()
    }
}
