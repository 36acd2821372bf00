//! Failure messages.
//!
//! Every reportable condition is a variant here so the exact wording lives
//! in one place. The messages are wire-compatible with the historical
//! format, including the missing space after the comma in the mismatch
//! variant.

use thiserror::Error;

/// A failed assertion, formatted for the [`Reporter`](crate::Reporter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// Fatal: the subject is not a record type.
    #[error("Must be struct")]
    NotStruct,

    /// No field with the requested name exists, including promoted fields.
    #[error("{type_name}: Field <{field}> not found")]
    FieldNotFound { type_name: String, field: String },

    /// The field exists but is private; its tags are not introspectable.
    #[error("{type_name}: Field <{field}> is private")]
    FieldPrivate { type_name: String, field: String },

    /// The tag key is absent, or the owning field never resolved.
    #[error("{field}: Tag <{tag}> not found")]
    TagNotFound { field: String, tag: String },

    /// The tag resolved but its value differs from the expected one.
    #[error("{field}: Tag <{tag}> does not have a value of <{expected}>,but actual <{actual}>")]
    TagMismatch {
        field: String,
        tag: String,
        expected: String,
        actual: String,
    },

    /// The tag resolved to the empty string.
    #[error("{field}: Tag <{tag}> is empty")]
    TagEmpty { field: String, tag: String },

    /// The field was asserted tag-free but carries tags.
    #[error("{field}: Not empty")]
    NotEmpty { field: String },
}
