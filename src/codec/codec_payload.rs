//! Serialized payloads and their presentation forms

use crate::utils::bytes_to_hex;
use bytes::Bytes;
use std::fmt::Write;

/// Output of a codec's serialize: raw bytes or text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Binary formats
    Binary(Bytes),
    /// Text formats
    Text(String),
}

impl Payload {
    /// Short name of the payload kind
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Binary(_) => "binary",
            Payload::Text(_) => "text",
        }
    }

    /// Raw bytes of the payload (UTF-8 for text)
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Binary(b) => b,
            Payload::Text(s) => s.as_bytes(),
        }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Printable rendering
    ///
    /// Binary payloads keep printable ASCII and write every other byte as
    /// `\xNN`. Text payloads keep every character except controls.
    pub fn printable(&self) -> String {
        let mut out = String::with_capacity(self.len());
        match self {
            Payload::Binary(bytes) => {
                for &byte in bytes.iter() {
                    if byte.is_ascii_graphic() || byte == b' ' {
                        out.push(byte as char);
                    } else {
                        let _ = write!(out, "\\x{:02x}", byte);
                    }
                }
            }
            Payload::Text(text) => {
                for c in text.chars() {
                    if !c.is_control() {
                        out.push(c);
                    } else if c.is_ascii() {
                        let _ = write!(out, "\\x{:02x}", c as u32);
                    } else {
                        out.extend(c.escape_unicode());
                    }
                }
            }
        }
        out
    }

    /// Exact literal dump: `b"..."` for binary, a quoted string for text
    pub fn literal(&self) -> String {
        match self {
            Payload::Binary(bytes) => {
                let escaped: String = bytes
                    .iter()
                    .flat_map(|b| std::ascii::escape_default(*b))
                    .map(char::from)
                    .collect();
                format!("b\"{}\"", escaped)
            }
            Payload::Text(s) => format!("{:?}", s),
        }
    }

    /// Lowercase hex of the raw bytes
    pub fn hex(&self) -> String {
        bytes_to_hex(self.as_bytes())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Binary(Bytes::from(bytes))
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}
