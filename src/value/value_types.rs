//! Value definitions for benchmark samples
//!
//! This module provides the dynamically typed value that samples are built
//! from, its kind classification and its textual rendering.

use std::fmt;

/// A dynamically typed sample value
///
/// Mappings keep insertion order and allow any value as a key. Text and
/// symbols are distinct variants, so a format that collapses one into the
/// other does not round-trip.
#[derive(Debug, Clone, bincode::Encode, bincode::Decode)]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Integer(i64),
    /// Double-precision float
    Float(f64),
    /// Text string
    Text(String),
    /// Symbolic (interned) text
    Symbol(String),
    /// Ordered sequence
    Sequence(Vec<Value>),
    /// Ordered key/value mapping
    Mapping(Vec<(Value, Value)>),
}

/// Kind of a [`Value`], used to label sample fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Boolean,
    /// [`Value::Integer`]
    Integer,
    /// [`Value::Float`]
    Float,
    /// [`Value::Text`]
    Text,
    /// [`Value::Symbol`]
    Symbol,
    /// [`Value::Sequence`]
    Sequence,
    /// [`Value::Mapping`]
    Mapping,
}

impl ValueKind {
    /// All kinds, in declaration order
    pub const ALL: [ValueKind; 8] = [
        ValueKind::Null,
        ValueKind::Boolean,
        ValueKind::Integer,
        ValueKind::Float,
        ValueKind::Text,
        ValueKind::Symbol,
        ValueKind::Sequence,
        ValueKind::Mapping,
    ];

    /// Short lowercase name
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "string",
            ValueKind::Symbol => "symbol",
            ValueKind::Sequence => "array",
            ValueKind::Mapping => "hash",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Build a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Build a symbol value
    pub fn symbol(s: impl Into<String>) -> Self {
        Value::Symbol(s.into())
    }

    /// Get the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Look up a mapping entry by key
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

// Structural equality. NaN equals NaN so a float field holding NaN is not
// reported as lossy by every codec.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => write!(f, ":{}", s),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} => {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_is_not_text() {
        assert_ne!(Value::symbol("symbol"), Value::text("symbol"));
        assert_eq!(Value::symbol("symbol"), Value::symbol("symbol"));
    }

    #[test]
    fn test_integer_is_not_float() {
        assert_ne!(Value::Integer(123), Value::Float(123.0));
    }

    #[test]
    fn test_nan_equals_nan() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(f64::NAN), Value::Float(0.0));
    }

    #[test]
    fn test_mapping_order_matters() {
        let one = (Value::Integer(1), Value::Integer(2));
        let three = (Value::Integer(3), Value::Integer(4));
        let a = Value::Mapping(vec![one.clone(), three.clone()]);
        let b = Value::Mapping(vec![three, one]);
        assert_ne!(a, b);
        assert_eq!(a.get(&Value::Integer(3)), Some(&Value::Integer(4)));
    }

    #[test]
    fn test_display() {
        let value = Value::Mapping(vec![
            (Value::symbol("array"), vec!["a", "b"].into()),
            (Value::symbol("float"), Value::Float(123.456)),
            (Value::symbol("one"), Value::Float(1.0)),
            (Value::symbol("nil"), Value::Null),
            (Value::symbol("symbol"), Value::symbol("symbol")),
        ]);
        assert_eq!(
            value.to_string(),
            r#"{:array => ["a", "b"], :float => 123.456, :one => 1.0, :nil => nil, :symbol => :symbol}"#
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind().name(), "null");
        assert_eq!(Value::symbol("s").kind(), ValueKind::Symbol);
        assert_eq!(ValueKind::ALL.len(), 8);
        assert_eq!(ValueKind::Mapping.to_string(), "hash");
    }
}
