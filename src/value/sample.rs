//! Benchmark samples

use super::Value;

/// An ordered set of named values fed to every codec
///
/// Field names double as the labels of the fidelity report, so the default
/// fixture names each field after the kind of value it holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample {
    fields: Vec<(String, Value)>,
}

impl Sample {
    /// Create an empty sample
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// The default benchmark fixture: one field per value kind
    pub fn fixture() -> Self {
        Self::new()
            .with_field("array", vec!["a", "b", "c"])
            .with_field("fixnum", Value::Integer(123))
            .with_field("float", Value::Float(123.456))
            .with_field(
                "hash",
                Value::Mapping(vec![(Value::symbol("key"), Value::text("value"))]),
            )
            .with_field("string", "string")
            .with_field("symbol", Value::symbol("symbol"))
            .with_field("boolean", true)
            .with_field("nil", Value::Null)
    }

    /// Add a field, builder style
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field; an existing field with the same name is replaced in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Field names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the sample has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The whole sample as one mapping keyed by symbols
    pub fn to_value(&self) -> Value {
        Value::Mapping(
            self.fields
                .iter()
                .map(|(n, v)| (Value::symbol(n.as_str()), v.clone()))
                .collect(),
        )
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Sample {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut sample = Sample::new();
        for (name, value) in iter {
            sample.insert(name, value);
        }
        sample
    }
}
