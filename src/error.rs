use thiserror::Error;

/// Errors raised while decoding shapes or resolving JSON pointers.
///
/// Deriving and comparing shapes never fails; a document that doesn't match a
/// shape produces [`Mismatch`][`crate::Mismatch`]es, not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A JSON document could not be read as a shape.
    #[error("invalid shape at {path}: {reason}")]
    InvalidShape { path: String, reason: String },

    /// A JSON pointer was not empty and did not start with `/`.
    #[error("invalid JSON pointer {0:?}: must be empty or start with '/'")]
    InvalidPointer(String),

    /// A JSON pointer did not point at anything in the document.
    #[error("JSON pointer {0:?} does not resolve to a value")]
    UnresolvedPointer(String),
}

pub type Result<T> = std::result::Result<T, Error>;
