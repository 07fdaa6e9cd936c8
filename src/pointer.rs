use crate::error::{Error, Result};
use crate::path;
use serde_json::Value;

/// A parsed [RFC 6901](https://tools.ietf.org/html/rfc6901) JSON Pointer.
///
/// Pointers select the part of a document to derive a shape from or compare
/// against a shape.
///
/// ```
/// use json_shape::Pointer;
/// use serde_json::json;
///
/// let doc = json!({ "users": [{ "name": "ada" }] });
/// let pointer = Pointer::parse("/users/0").unwrap();
/// let (value, path) = pointer.resolve(&doc).unwrap();
///
/// assert_eq!(&json!({ "name": "ada" }), value);
/// assert_eq!("users[0]", path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    raw: String,
    segments: Vec<String>,
}

impl Pointer {
    /// Parses a pointer such as `/a/0`. The empty string points at the whole
    /// document; anything else must start with `/`.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        if !s.starts_with('/') {
            return Err(Error::InvalidPointer(s.to_owned()));
        }

        let segments = s[1..]
            .split('/')
            .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
            .collect();

        Ok(Pointer {
            raw: s.to_owned(),
            segments,
        })
    }

    /// The pointer to the whole document.
    pub fn root() -> Self {
        Pointer {
            raw: String::new(),
            segments: vec![],
        }
    }

    /// The unescaped reference tokens, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Walks the pointer into `value`, returning what it points at and the path
    /// to it in the same `a.b[0]` form mismatches use. The root resolves to
    /// `value` itself and the empty path.
    pub fn resolve<'v>(&self, value: &'v Value) -> Result<(&'v Value, String)> {
        let mut current = value;
        let mut at = String::new();

        for segment in &self.segments {
            let next = match current {
                Value::Object(obj) => {
                    at = path::join_key(&at, segment);
                    obj.get(segment)
                }
                Value::Array(items) => parse_index(segment).and_then(|i| {
                    at = path::join_index(&at, i);
                    items.get(i)
                }),
                _ => None,
            };

            current = next.ok_or_else(|| Error::UnresolvedPointer(self.raw.clone()))?;
        }

        Ok((current, at))
    }
}

// RFC 6901 array indices: "0", or digits without a leading zero.
fn parse_index(segment: &str) -> Option<usize> {
    let well_formed = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));

    if well_formed {
        segment.parse().ok()
    } else {
        None
    }
}
