use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The kind of a JSON value.
///
/// Every JSON value classifies as exactly one of these tags. Arrays are
/// [`TypeTag::Array`] regardless of what they contain, and `null` is its own
/// tag rather than a kind of object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Corresponds to JSON `null`.
    Null,

    /// Corresponds to JSON `true` and `false`.
    Boolean,

    /// Corresponds to any JSON number, integral or not.
    Number,

    /// Corresponds to a JSON string.
    String,

    /// Corresponds to a JSON array.
    Array,

    /// Corresponds to a JSON object.
    Object,
}

impl TypeTag {
    /// Classifies a JSON value.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// The tag's name, as it appears in a serialized shape.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a string that is not one of the six tag names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown type tag {0:?}")]
pub struct UnknownTypeTag(pub String);

impl FromStr for TypeTag {
    type Err = UnknownTypeTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(Self::Null),
            "boolean" => Ok(Self::Boolean),
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "array" => Ok(Self::Array),
            "object" => Ok(Self::Object),
            _ => Err(UnknownTypeTag(s.to_owned())),
        }
    }
}
