use crate::error::{Error, Result};
use crate::path;
use crate::type_tag::TypeTag;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// The structure of a JSON value.
///
/// Object shapes are ordered maps, so two shapes are equal (`==`) whenever they
/// describe the same structure, regardless of the order keys appeared in the
/// data they were derived from.
///
/// A shape serializes to the JSON it reads as: primitives become their tag
/// name, objects an object of shapes, and arrays an array of candidate shapes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Shape {
    Primitive(TypeTag),
    Array(Vec<Shape>),
    Object(BTreeMap<String, Shape>),
}

impl Shape {
    /// Derives the shape of a value.
    ///
    /// Arrays become the list of distinct shapes among their items, in the
    /// order each shape was first seen. An array whose items all share one
    /// shape therefore becomes a one-element list, and an empty array becomes
    /// an empty list.
    pub fn derive(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                // `seen` only indexes `candidates`, which keeps first-seen order.
                let mut seen = BTreeSet::new();
                let mut candidates = Vec::new();
                for item in items {
                    let shape = Shape::derive(item);
                    if seen.insert(shape.clone()) {
                        candidates.push(shape);
                    }
                }

                Shape::Array(candidates)
            }
            Value::Object(obj) => Shape::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), Shape::derive(v)))
                    .collect(),
            ),
            _ => Shape::Primitive(TypeTag::classify(value)),
        }
    }

    /// Reads a shape back out of its JSON form.
    ///
    /// Strings must name one of the six type tags. Nulls, booleans and numbers
    /// are never valid shapes.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_value_at(value, "")
    }

    fn from_value_at(value: &Value, at: &str) -> Result<Self> {
        match value {
            Value::String(s) => s.parse::<TypeTag>().map(Shape::Primitive).map_err(|err| {
                Error::InvalidShape {
                    path: path::display(at),
                    reason: err.to_string(),
                }
            }),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Self::from_value_at(item, &path::join_index(at, i)))
                .collect::<Result<Vec<_>>>()
                .map(Shape::Array),
            Value::Object(obj) => obj
                .iter()
                .map(|(k, v)| {
                    Self::from_value_at(v, &path::join_key(at, k)).map(|shape| (k.clone(), shape))
                })
                .collect::<Result<BTreeMap<_, _>>>()
                .map(Shape::Object),
            _ => Err(Error::InvalidShape {
                path: path::display(at),
                reason: format!(
                    "expected a type tag, array or object, found {}",
                    TypeTag::classify(value)
                ),
            }),
        }
    }

    /// The tag a value must classify as to be compared against this shape.
    pub fn expected_tag(&self) -> TypeTag {
        match self {
            Shape::Primitive(tag) => *tag,
            Shape::Array(_) => TypeTag::Array,
            Shape::Object(_) => TypeTag::Object,
        }
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Shape::from_value(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn shape(value: Value) -> Shape {
        Shape::from_value(&value).unwrap()
    }

    #[test]
    fn derive_primitives() {
        assert_eq!(Shape::Primitive(TypeTag::Null), Shape::derive(&json!(null)));
        assert_eq!(Shape::Primitive(TypeTag::Boolean), Shape::derive(&json!(true)));
        assert_eq!(Shape::Primitive(TypeTag::Number), Shape::derive(&json!(1.5)));
        assert_eq!(Shape::Primitive(TypeTag::String), Shape::derive(&json!("x")));
    }

    #[test]
    fn derive_objects() {
        assert_eq!(Shape::Object(BTreeMap::new()), Shape::derive(&json!({})));

        assert_eq!(
            shape(json!({
                "id": "number",
                "name": "string",
                "tags": ["string"],
                "owner": { "id": "number", "admin": "boolean" },
                "deleted_at": "null",
            })),
            Shape::derive(&json!({
                "id": 7,
                "name": "x",
                "tags": ["a", "b"],
                "owner": { "id": 1, "admin": false },
                "deleted_at": null,
            }))
        );
    }

    #[test]
    fn derive_uniform_array() {
        assert_eq!(
            shape(json!([{ "x": "number" }])),
            Shape::derive(&json!([{ "x": 1 }, { "x": 2 }]))
        );

        assert_eq!(shape(json!(["number"])), Shape::derive(&json!([1, 2.5, -3])));
    }

    #[test]
    fn derive_heterogeneous_array() {
        assert_eq!(
            shape(json!([{ "x": "number" }, { "x": "string" }])),
            Shape::derive(&json!([{ "x": 1 }, { "x": "s" }]))
        );

        // Deduplicated, in order of first appearance.
        assert_eq!(
            shape(json!(["string", "number", "null"])),
            Shape::derive(&json!(["a", 1, "b", null, 2, "c"]))
        );
    }

    #[test]
    fn derive_many_distinct_shapes() {
        fn keyed(i: usize, value: Value) -> Value {
            let mut obj = serde_json::Map::new();
            obj.insert(format!("k{:02}", 49 - i), value);
            Value::Object(obj)
        }

        // Shapes repeat in the second half; order follows first appearance,
        // not key order.
        let items: Vec<Value> = (0..50)
            .map(|i| keyed(i, json!(i)))
            .chain((0..50).map(|i| keyed(i, json!(i + 100))))
            .collect();

        let expected: Vec<Shape> = (0..50).map(|i| shape(keyed(i, json!("number")))).collect();

        assert_eq!(Shape::Array(expected), Shape::derive(&Value::Array(items)));
    }

    #[test]
    fn derive_empty_array() {
        assert_eq!(Shape::Array(vec![]), Shape::derive(&json!([])));

        // An empty array is a distinct shape from a non-empty one.
        assert_eq!(
            shape(json!([[], ["number"]])),
            Shape::derive(&json!([[], [1], [2, 3]]))
        );
    }

    #[test]
    fn derive_dedup_ignores_key_order() {
        let a: Value = serde_json::from_str(r#"{ "x": 1, "y": "a" }"#).unwrap();
        let b: Value = serde_json::from_str(r#"{ "y": "b", "x": 2 }"#).unwrap();

        assert_eq!(
            shape(json!([{ "x": "number", "y": "string" }])),
            Shape::derive(&Value::Array(vec![a, b]))
        );
    }

    #[test]
    fn serialize() {
        let derived = Shape::derive(&json!({
            "a": [1, "b", { "c": null }],
            "d": [],
        }));

        assert_eq!(
            json!({
                "a": ["number", "string", { "c": "null" }],
                "d": [],
            }),
            serde_json::to_value(&derived).unwrap()
        );

        assert_eq!(
            derived,
            serde_json::from_value::<Shape>(serde_json::to_value(&derived).unwrap()).unwrap()
        );
    }

    #[test]
    fn from_value_rejects_bad_shapes() {
        assert_eq!(
            Err(Error::InvalidShape {
                path: "root".to_owned(),
                reason: "expected a type tag, array or object, found number".to_owned(),
            }),
            Shape::from_value(&json!(5))
        );

        assert_eq!(
            Err(Error::InvalidShape {
                path: "a.b[1]".to_owned(),
                reason: "unknown type tag \"integer\"".to_owned(),
            }),
            Shape::from_value(&json!({ "a": { "b": ["string", "integer"] } }))
        );

        assert!(serde_json::from_str::<Shape>(r#"{ "a": true }"#).is_err());
    }

    #[test]
    fn expected_tag() {
        assert_eq!(TypeTag::String, shape(json!("string")).expected_tag());
        assert_eq!(TypeTag::Array, shape(json!([])).expected_tag());
        assert_eq!(TypeTag::Object, shape(json!({})).expected_tag());
    }
}
