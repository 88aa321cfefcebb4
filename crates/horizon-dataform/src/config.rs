//! Form configuration.
//!
//! [`FormConfig`] holds the settings the default widget factory applies to
//! every control it builds. It can be loaded from TOML; missing keys keep
//! their defaults.
//!
//! ```
//! use horizon_dataform::{FloatNotation, FormConfig};
//!
//! let config = FormConfig::from_toml_str(r#"
//! float_decimals = 3
//! float_notation = "scientific"
//! empty_int_default = 0
//! "#).unwrap();
//!
//! assert_eq!(config.float_decimals, Some(3));
//! assert_eq!(config.float_notation, FloatNotation::Scientific);
//! assert!(config.label_fields);
//! ```

use std::path::Path;

use horizon_dataform_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::widget::validator::FloatNotation;

/// Settings applied by the default widget factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Fractional digits shown and accepted by float entries (`None` = unlimited).
    ///
    /// Values written to a float entry are rounded to this many digits, so
    /// reading the entry back yields the rounded value, not the one written.
    pub float_decimals: Option<u32>,

    /// Notation used by float entries.
    pub float_notation: FloatNotation,

    /// Whether controls built for record fields show the field name.
    pub label_fields: bool,

    /// Value read from an empty, non-nullable integer entry without a field default.
    pub empty_int_default: Option<i64>,

    /// Value read from an empty, non-nullable float entry without a field default.
    pub empty_float_default: Option<f64>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            float_decimals: None,
            float_notation: FloatNotation::Standard,
            label_fields: true,
            empty_int_default: None,
            empty_float_default: None,
        }
    }
}

impl FormConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config = toml::from_str(text)?;
        tracing::debug!(target: targets::CONFIG, ?config, "form configuration parsed");
        Ok(config)
    }

    /// Read a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "reading form configuration");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration as a TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
