//! Error types for form construction and form data access.

use horizon_dataform_core::{FieldType, ValueError};

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, DataformError>;

/// Errors that can occur while building or using form widgets.
#[derive(Debug, thiserror::Error)]
pub enum DataformError {
    /// No control exists for this field type.
    ///
    /// Raised at construction time; the schema cannot be rendered.
    #[error("unsupported field type `{field_type}`")]
    UnsupportedFieldType { field_type: String },

    /// A control holds text that does not form a valid value.
    #[error("invalid input for field '{field}': {text:?}")]
    InvalidInput { field: String, text: String },

    /// A value was rejected by its field type or a display converter.
    #[error("invalid value for field '{field}': {source}")]
    InvalidValue {
        field: String,
        #[source]
        source: ValueError,
    },

    /// A container already holds a record widget for this record type.
    #[error("record type '{0}' has already been added")]
    DuplicateRecordType(String),

    /// The record has no field with this name.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// Form configuration could not be parsed.
    #[error("invalid form configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Form configuration could not be read.
    #[error("failed to read form configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl DataformError {
    /// Create an unsupported field type error.
    pub fn unsupported(field_type: &FieldType) -> Self {
        Self::UnsupportedFieldType {
            field_type: field_type.to_string(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(field: impl Into<String>, source: ValueError) -> Self {
        Self::InvalidValue {
            field: field.into(),
            source,
        }
    }

    /// Fill in the field name of an input or value error raised by an
    /// unnamed control.
    pub(crate) fn or_field(mut self, name: &str) -> Self {
        match &mut self {
            Self::InvalidInput { field, .. } | Self::InvalidValue { field, .. }
                if field.is_empty() =>
            {
                *field = name.to_string();
            }
            _ => {}
        }
        self
    }
}
