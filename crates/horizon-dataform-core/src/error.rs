//! Error types for Horizon Dataform values and schemas.

/// Errors raised while converting or checking field values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// The value has a different kind than the field type requires.
    #[error("expected {expected} value, got {got}")]
    TypeMismatch { expected: String, got: String },

    /// An integer lies outside the range of its field type.
    #[error("value {value} is out of range [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },

    /// A record value lacks a field its schema declares.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A record value belongs to a different record type.
    #[error("record type mismatch: expected `{expected}`, got `{got}`")]
    RecordMismatch { expected: String, got: String },

    /// A choice name is not one of the enumerated variants.
    #[error("unknown choice `{name}` for `{type_name}`")]
    UnknownChoice { type_name: String, name: String },

    /// A tuple value has the wrong number of elements.
    #[error("tuple length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// A user-supplied display converter rejected the value.
    #[error("conversion failed: {0}")]
    Conversion(String),
}

impl ValueError {
    /// Create a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create a conversion error.
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion(message.into())
    }
}

/// A specialized Result type for value conversions.
pub type ValueResult<T> = std::result::Result<T, ValueError>;
