use crate::path;
use crate::shape::Shape;
use crate::type_tag::TypeTag;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// What callers show when a comparison turns up no mismatches.
pub const NO_MISMATCHES: &str = "No mismatches found";

/// A place where a document doesn't conform to a shape.
///
/// Paths are rendered the same way in both variants: object keys are joined
/// with `.`, array indices are appended as `[i]`, and the top of the document
/// is `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// The value at `path` classified as `found` where the shape wanted
    /// `expected`.
    Type {
        path: String,
        expected: TypeTag,
        found: TypeTag,
    },

    /// The object shape declares a key the document's object lacks. `path`
    /// includes the missing key.
    Missing { path: String },
}

impl Mismatch {
    /// Where the mismatch is, without the `is missing` suffix.
    pub fn path(&self) -> &str {
        match self {
            Mismatch::Type { path, .. } | Mismatch::Missing { path } => path,
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Type { path, .. } => f.write_str(path),
            Mismatch::Missing { path } => write!(f, "{} is missing", path),
        }
    }
}

/// Compares a document against a shape, starting from the top of the document.
pub fn compare_shape(shape: &Shape, value: &Value) -> Vec<Mismatch> {
    compare_shape_at(shape, value, "")
}

/// Compares a document against a shape, as though the document sat at `path`
/// inside some larger one. Every reported path is prefixed accordingly.
///
/// Array shapes are checked as a full cross product: every candidate shape is
/// compared against every item, and every failing pair is reported. An item
/// does not escape a mismatch by matching some other candidate. Empty arrays
/// are never descended into, so they conform to any array shape.
///
/// Keys present in the document but absent from an object shape are ignored.
pub fn compare_shape_at(shape: &Shape, value: &Value, path: &str) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    compare(shape, value, path, &mut mismatches);
    mismatches
}

fn compare(shape: &Shape, value: &Value, at: &str, out: &mut Vec<Mismatch>) {
    match (shape, value) {
        (Shape::Array(candidates), Value::Array(items)) => {
            for candidate in candidates {
                for (i, item) in items.iter().enumerate() {
                    compare(candidate, item, &path::join_index(at, i), out);
                }
            }
        }
        (Shape::Object(fields), Value::Object(obj)) => {
            for (key, field) in fields {
                let key_path = path::join_key(at, key);
                match obj.get(key) {
                    Some(v) => compare(field, v, &key_path, out),
                    None => out.push(Mismatch::Missing { path: key_path }),
                }
            }
        }
        _ => {
            let expected = shape.expected_tag();
            let found = TypeTag::classify(value);
            if expected != found {
                out.push(Mismatch::Type {
                    path: path::display(at),
                    expected,
                    found,
                });
            }
        }
    }
}
