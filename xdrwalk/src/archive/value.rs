//! Decoded and normalised value representations.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::format::amount::ScaledAmount;

/// A decoded XDR value, as produced by the codec boundary.
///
/// Structs preserve field declaration order; that order is semantically
/// significant and flows unchanged into the normalised output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XdrValue {
    /// A composite value with named fields, in declaration order.
    Struct(Vec<(String, XdrValue)>),
    /// An ordered collection of homogeneous values.
    List(Vec<XdrValue>),
    /// Any XDR integer kind, widened to a signed 64-bit value.
    Int(i64),
    /// A fixed or variable-length opaque byte field.
    Bytes(Vec<u8>),
    /// A string field, already validated as text by the codec.
    Text(String),
    /// An XDR void, e.g. an empty union arm.
    Void,
}

impl XdrValue {
    /// Look up a named field of a struct value.
    pub fn field(&self, name: &str) -> Option<&XdrValue> {
        match self {
            XdrValue::Struct(fields) => fields.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Mutable variant of [`XdrValue::field`].
    pub fn field_mut(&mut self, name: &str) -> Option<&mut XdrValue> {
        match self {
            XdrValue::Struct(fields) => {
                fields.iter_mut().find(|(k, _)| k == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Append a field to a struct value. No-op for other variants.
    pub fn push_field(&mut self, name: impl Into<String>, value: XdrValue) {
        if let XdrValue::Struct(fields) = self {
            fields.push((name.into(), value));
        }
    }
}

/// A normalised, JSON-compatible value tree.
///
/// Produced fresh for every parse; shares no identity with the decoded
/// [`XdrValue`] graph it came from. Serialises directly to JSON with
/// insertion order preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    /// Ordered field-name to value mapping.
    Object(IndexMap<String, TreeValue>),
    /// Ordered list of values.
    Array(Vec<TreeValue>),
    /// Signed 64-bit integer scalar.
    Int(i64),
    /// Text scalar (addresses, hex, base64 and decoded strings land here).
    Str(String),
    /// Exact fixed-point amount scalar.
    Amount(ScaledAmount),
    /// Absent value (decoded XDR void).
    Null,
}

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeValue::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            TreeValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TreeValue::Int(i) => serializer.serialize_i64(*i),
            TreeValue::Str(s) => serializer.serialize_str(s),
            // Exact decimals render as strings so no precision is lost to a
            // binary float on the way out.
            TreeValue::Amount(amount) => serializer.collect_str(amount),
            TreeValue::Null => serializer.serialize_none(),
        }
    }
}
