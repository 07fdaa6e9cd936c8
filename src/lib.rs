//! Derives structural shapes from example JSON, and checks documents against
//! them.
//!
//! A shape is a lightweight sketch of a JSON document's structure: which
//! objects have which keys, what kind of value each one holds, and what the
//! items of each array look like. It isn't a full schema language; it knows
//! about the six JSON kinds and nothing else. If you are looking to use this
//! package as a CLI tool, run `json-shape --help`.
//!
//! # Quick start
//!
//! Derive a shape from one document, then check another against it:
//!
//! ```
//! use serde_json::json;
//! use json_shape::{compare_shape, derive_shape};
//!
//! let shape = derive_shape(&json!({
//!     "id": 1,
//!     "tags": ["a", "b"],
//!     "owner": { "name": "ada" },
//! }));
//!
//! assert_eq!(
//!     json!({
//!         "id": "number",
//!         "tags": ["string"],
//!         "owner": { "name": "string" },
//!     }),
//!     serde_json::to_value(&shape).unwrap(),
//! );
//!
//! let mismatches = compare_shape(&shape, &json!({
//!     "id": "2",
//!     "tags": ["c", 4],
//!     "owner": {},
//! }));
//!
//! let messages: Vec<_> = mismatches.iter().map(ToString::to_string).collect();
//! assert_eq!(vec!["id", "owner.name is missing", "tags[1]"], messages);
//! ```
//!
//! Keys are visited in sorted order, which is why `owner` is reported before
//! `tags` above.

mod compare;
mod error;
mod path;
mod pointer;
mod shape;
mod type_tag;
mod typedef;

pub use crate::compare::{compare_shape, compare_shape_at, Mismatch, NO_MISMATCHES};
pub use crate::error::{Error, Result};
pub use crate::pointer::Pointer;
pub use crate::shape::Shape;
pub use crate::type_tag::{TypeTag, UnknownTypeTag};
use serde_json::Value;

/// Derives the shape of a value.
///
/// This is shorthand for [`Shape::derive`].
pub fn derive_shape(value: &Value) -> Shape {
    Shape::derive(value)
}
