use crate::shape::Shape;
use crate::type_tag::TypeTag;
use jtd::{Schema, Type};
use std::collections::BTreeMap;

impl Shape {
    /// Converts the shape to a JSON Type Definition schema.
    ///
    /// JSON Typedef can't say everything a shape can, so the conversion widens
    /// where it has to: a `null` shape becomes the empty schema, and an array
    /// with anything other than exactly one candidate shape gets the empty
    /// schema for its elements. Numbers are always `float64`. Object shapes
    /// allow additional properties, as comparison does.
    pub fn into_schema(self) -> Schema {
        match self {
            Shape::Primitive(TypeTag::Null) => empty(),
            Shape::Primitive(TypeTag::Boolean) => type_schema(Type::Boolean),
            Shape::Primitive(TypeTag::Number) => type_schema(Type::Float64),
            Shape::Primitive(TypeTag::String) => type_schema(Type::String),
            Shape::Primitive(TypeTag::Array) => Schema::Elements {
                definitions: Default::default(),
                metadata: Default::default(),
                nullable: false,
                elements: Box::new(empty()),
            },
            Shape::Primitive(TypeTag::Object) => Schema::Values {
                definitions: Default::default(),
                metadata: Default::default(),
                nullable: false,
                values: Box::new(empty()),
            },
            Shape::Array(mut candidates) => {
                let elements = if candidates.len() == 1 {
                    candidates.remove(0).into_schema()
                } else {
                    empty()
                };

                Schema::Elements {
                    definitions: Default::default(),
                    metadata: Default::default(),
                    nullable: false,
                    elements: Box::new(elements),
                }
            }
            Shape::Object(fields) => Schema::Properties {
                definitions: Default::default(),
                metadata: Default::default(),
                nullable: false,
                properties: fields
                    .into_iter()
                    .map(|(k, v)| (k, v.into_schema()))
                    .collect(),
                optional_properties: BTreeMap::new(),
                properties_is_present: true,
                additional_properties: true,
            },
        }
    }
}

fn empty() -> Schema {
    Schema::Empty {
        definitions: Default::default(),
        metadata: Default::default(),
    }
}

fn type_schema(type_: Type) -> Schema {
    Schema::Type {
        definitions: Default::default(),
        metadata: Default::default(),
        nullable: false,
        type_,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn to_jtd(shape: Value) -> Value {
        let schema = Shape::from_value(&shape).unwrap().into_schema();
        serde_json::to_value(schema.into_serde_schema()).unwrap()
    }

    #[test]
    fn primitives() {
        assert_eq!(json!({}), to_jtd(json!("null")));
        assert_eq!(json!({ "type": "boolean" }), to_jtd(json!("boolean")));
        assert_eq!(json!({ "type": "float64" }), to_jtd(json!("number")));
        assert_eq!(json!({ "type": "string" }), to_jtd(json!("string")));
        assert_eq!(json!({ "elements": {} }), to_jtd(json!("array")));
        assert_eq!(json!({ "values": {} }), to_jtd(json!("object")));
    }

    #[test]
    fn arrays() {
        assert_eq!(
            json!({ "elements": { "type": "string" } }),
            to_jtd(json!(["string"]))
        );

        // No single element type to pick.
        assert_eq!(json!({ "elements": {} }), to_jtd(json!([])));
        assert_eq!(json!({ "elements": {} }), to_jtd(json!(["string", "number"])));
    }

    #[test]
    fn objects() {
        let schema = to_jtd(json!({
            "id": "number",
            "tags": ["string"],
        }));

        assert_eq!(
            json!({
                "id": { "type": "float64" },
                "tags": { "elements": { "type": "string" } },
            }),
            schema["properties"]
        );
        assert_eq!(json!(true), schema["additionalProperties"]);
    }
}
