//! Tree normalisation: decoded record graphs to JSON-compatible trees.

use indexmap::IndexMap;

use crate::archive::error::ParseError;
use crate::archive::value::{TreeValue, XdrValue};
use crate::format::{format_scalar, FormatOptions, PathSegment};

/// Normalise a record sequence into a single output tree.
///
/// The root of the tree is the record list itself, so every path starts
/// with the record's index. Record order is preserved exactly; downstream
/// consumers rely on indices in paths referring to archive order.
pub fn normalize_records(
    records: &[XdrValue],
    options: &FormatOptions,
) -> Result<TreeValue, ParseError> {
    let mut path = Vec::new();
    let mut array = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        path.push(PathSegment::Index(index));
        array.push(normalize_value(record, &mut path, options)?);
        path.pop();
    }
    Ok(TreeValue::Array(array))
}

/// Depth-first walk of one decoded value.
///
/// Structs become objects in field declaration order, lists become arrays
/// with decimal index segments, and every other value is a scalar leaf that
/// is offered to the formatter exactly once with its accumulated path. The
/// formatter may itself return an array (a raw byte list); that return value
/// is a leaf and is not descended into again.
fn normalize_value<'a>(
    value: &'a XdrValue,
    path: &mut Vec<PathSegment<'a>>,
    options: &FormatOptions,
) -> Result<TreeValue, ParseError> {
    match value {
        XdrValue::Struct(fields) => {
            let mut object = IndexMap::with_capacity(fields.len());
            for (name, field_value) in fields {
                path.push(PathSegment::Field(name));
                let normalized = normalize_value(field_value, path, options)?;
                path.pop();
                object.insert(name.clone(), normalized);
            }
            Ok(TreeValue::Object(object))
        }
        XdrValue::List(items) => {
            let mut array = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                array.push(normalize_value(item, path, options)?);
                path.pop();
            }
            Ok(TreeValue::Array(array))
        }
        scalar => format_scalar(scalar, path, options),
    }
}
