//! Input validation for text entry controls.
//!
//! This module provides a validation framework inspired by Qt's QValidator system.
//! Validators are attached to a [`LineEdit`](super::widgets::LineEdit) and decide,
//! keystroke by keystroke, whether the text may change.
//!
//! # Validation States
//!
//! Input can be in one of three states:
//!
//! - [`ValidationState::Invalid`]: The input is clearly wrong
//! - [`ValidationState::Intermediate`]: The input is incomplete but could become valid
//! - [`ValidationState::Acceptable`]: The input is valid as a final result
//!
//! A keystroke that would make the text `Invalid` is rejected, so typing
//! `1.1` into an integer entry leaves `11`.
//!
//! # Built-in Validators
//!
//! - [`IntValidator`]: Validates integer input within a range
//! - [`DoubleValidator`]: Validates floating-point input within a range
//!
//! # Example
//!
//! ```
//! use horizon_dataform::widget::validator::{IntValidator, ValidationState, Validator};
//!
//! let validator = IntValidator::new(0, 100);
//! assert_eq!(validator.validate("42"), ValidationState::Acceptable);
//! assert_eq!(validator.validate("4.2"), ValidationState::Invalid);
//! ```

use serde::{Deserialize, Serialize};

/// The result of validating input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationState {
    /// The input is clearly invalid and cannot be made valid by further editing.
    Invalid,
    /// The input is incomplete but could potentially become valid with more input.
    Intermediate,
    /// The input is valid and acceptable as a final result.
    #[default]
    Acceptable,
}

/// Trait for input validators.
///
/// Validators must be `Send + Sync` so controls holding them can be shared.
pub trait Validator: Send + Sync {
    /// Validate the input string.
    fn validate(&self, input: &str) -> ValidationState;

    /// Attempt to fix input that is not acceptable.
    ///
    /// Called when the user finishes editing. The default implementation
    /// returns `None`, meaning no fixup is attempted.
    fn fixup(&self, _input: &str) -> Option<String> {
        None
    }
}

/// Validator for integer input within a specified range.
///
/// Partial inputs (an empty string, a lone sign) are intermediate.
///
/// ```
/// use horizon_dataform::widget::validator::{IntValidator, ValidationState, Validator};
///
/// let validator = IntValidator::new(0, 255);
/// assert_eq!(validator.validate("200"), ValidationState::Acceptable);
/// assert_eq!(validator.validate("300"), ValidationState::Invalid);
/// assert_eq!(validator.validate("-"), ValidationState::Invalid);
/// assert_eq!(validator.validate(""), ValidationState::Intermediate);
/// ```
#[derive(Debug, Clone)]
pub struct IntValidator {
    minimum: i64,
    maximum: i64,
}

impl IntValidator {
    /// Create a new integer validator with the given inclusive range.
    pub fn new(minimum: i64, maximum: i64) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum: minimum.max(maximum),
        }
    }
}

impl Validator for IntValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let trimmed = input.trim();

        if trimmed.is_empty() || trimmed == "+" {
            return ValidationState::Intermediate;
        }

        if trimmed == "-" {
            return if self.minimum < 0 {
                ValidationState::Intermediate
            } else {
                ValidationState::Invalid
            };
        }

        let is_valid_format = trimmed
            .chars()
            .enumerate()
            .all(|(i, c)| c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')));

        if !is_valid_format {
            return ValidationState::Invalid;
        }

        match trimmed.parse::<i64>() {
            Ok(value) if value >= self.minimum && value <= self.maximum => {
                ValidationState::Acceptable
            }
            Ok(value) if value < self.minimum && self.minimum > 0 && value >= 0 => {
                // More digits may still bring it into range: "5" on the way to "50"
                let max_digits = self.maximum.to_string().len();
                if value.to_string().len() < max_digits {
                    ValidationState::Intermediate
                } else {
                    ValidationState::Invalid
                }
            }
            Ok(value) if value > self.maximum && self.maximum < 0 && value <= 0 => {
                // Likewise below zero: "-5" on the way to "-50"
                let min_digits = self.minimum.unsigned_abs().to_string().len();
                if value.unsigned_abs().to_string().len() < min_digits {
                    ValidationState::Intermediate
                } else {
                    ValidationState::Invalid
                }
            }
            // Out of range or overflow
            _ => ValidationState::Invalid,
        }
    }

    fn fixup(&self, input: &str) -> Option<String> {
        let value = input.trim().parse::<i64>().ok()?;
        let clamped = value.clamp(self.minimum, self.maximum);
        (clamped != value).then(|| clamped.to_string())
    }
}

/// How a floating-point value is written in a text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatNotation {
    /// Plain decimal notation, e.g. `1250.5`.
    #[default]
    Standard,
    /// Decimal notation with an optional exponent, e.g. `1.2505e3`.
    Scientific,
}

impl FloatNotation {
    /// Format `value` in this notation, with `decimals` fractional digits if given.
    pub fn format(self, value: f64, decimals: Option<u32>) -> String {
        match (self, decimals) {
            (FloatNotation::Standard, None) => value.to_string(),
            (FloatNotation::Standard, Some(prec)) => format!("{:.*}", prec as usize, value),
            (FloatNotation::Scientific, None) => format!("{value:e}"),
            (FloatNotation::Scientific, Some(prec)) => format!("{:.*e}", prec as usize, value),
        }
    }
}

/// Validator for floating-point input within a specified range.
///
/// The number of fractional digits may be limited, and scientific notation
/// may be allowed.
///
/// ```
/// use horizon_dataform::widget::validator::{DoubleValidator, ValidationState, Validator};
///
/// let validator = DoubleValidator::new(-10.0, 10.0, Some(2));
/// assert_eq!(validator.validate("3.14"), ValidationState::Acceptable);
/// assert_eq!(validator.validate("3."), ValidationState::Intermediate);
/// assert_eq!(validator.validate("3.141"), ValidationState::Invalid);
/// assert_eq!(validator.validate("100.0"), ValidationState::Invalid);
/// ```
#[derive(Debug, Clone)]
pub struct DoubleValidator {
    minimum: f64,
    maximum: f64,
    decimals: Option<u32>,
    notation: FloatNotation,
}

impl DoubleValidator {
    /// Create a new double validator with the given range and decimal places.
    ///
    /// `decimals` of `None` places no limit on the fractional digits.
    pub fn new(minimum: f64, maximum: f64, decimals: Option<u32>) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum: minimum.max(maximum),
            decimals,
            notation: FloatNotation::Standard,
        }
    }

    /// A validator accepting every finite `f64`.
    pub fn unbounded() -> Self {
        Self::new(f64::MIN, f64::MAX, None)
    }

    /// Set the notation using builder pattern.
    pub fn with_notation(mut self, notation: FloatNotation) -> Self {
        self.notation = notation;
        self
    }

    /// Set the maximum decimal places using builder pattern.
    pub fn with_decimals(mut self, decimals: Option<u32>) -> Self {
        self.decimals = decimals;
        self
    }

    /// Validate the mantissa part: sign, digits and one decimal point.
    fn validate_mantissa(&self, mantissa: &str) -> ValidationState {
        match mantissa {
            "" | "+" | "." | "+." | "-." => return ValidationState::Intermediate,
            "-" => {
                return if self.minimum < 0.0 {
                    ValidationState::Intermediate
                } else {
                    ValidationState::Invalid
                };
            }
            _ => {}
        }

        let mut has_dot = false;
        let is_valid_format = mantissa.chars().enumerate().all(|(i, c)| {
            if c.is_ascii_digit() {
                true
            } else if c == '.' && !has_dot {
                has_dot = true;
                true
            } else {
                i == 0 && (c == '-' || c == '+')
            }
        });

        if !is_valid_format {
            return ValidationState::Invalid;
        }

        if let (Some(limit), Some(dot_pos)) = (self.decimals, mantissa.find('.')) {
            let digit_count = mantissa[dot_pos + 1..].len();
            if digit_count > limit as usize {
                return ValidationState::Invalid;
            }
        }

        if mantissa.ends_with('.') {
            ValidationState::Intermediate
        } else {
            ValidationState::Acceptable
        }
    }
}

impl Validator for DoubleValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let trimmed = input.trim();

        let (mantissa, exponent) = match trimmed.find(['e', 'E']) {
            Some(pos) if self.notation == FloatNotation::Scientific => {
                (&trimmed[..pos], Some(&trimmed[pos + 1..]))
            }
            Some(_) => return ValidationState::Invalid,
            None => (trimmed, None),
        };

        let mut state = self.validate_mantissa(mantissa);
        if state == ValidationState::Invalid {
            return state;
        }

        if let Some(exponent) = exponent {
            let digits = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);
            if mantissa.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return ValidationState::Invalid;
            }
            if digits.is_empty() {
                state = ValidationState::Intermediate;
            }
        }

        if state == ValidationState::Intermediate {
            return state;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if !value.is_finite() => ValidationState::Invalid,
            Ok(value) if value >= self.minimum && value <= self.maximum => {
                ValidationState::Acceptable
            }
            // More digits may still bring it into range
            Ok(value) if value < self.minimum && self.minimum >= 0.0 && value >= 0.0 => {
                ValidationState::Intermediate
            }
            Ok(value) if value > self.maximum && self.maximum <= 0.0 && value <= 0.0 => {
                ValidationState::Intermediate
            }
            _ => ValidationState::Invalid,
        }
    }

    fn fixup(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();

        // A trailing decimal point or a dangling exponent is normalized away
        let normalized = trimmed.trim_end_matches(['e', 'E', '+', '-']).trim_end_matches('.');
        let needs_normalization = normalized.len() != trimmed.len();

        let value = normalized.parse::<f64>().ok().filter(|v| v.is_finite())?;
        let clamped = value.clamp(self.minimum, self.maximum);

        if clamped != value || needs_normalization {
            Some(self.notation.format(clamped, self.decimals))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_validator_states() {
        let validator = IntValidator::new(i64::MIN, i64::MAX);
        assert_eq!(validator.validate("-"), ValidationState::Intermediate);
        assert_eq!(validator.validate("-12"), ValidationState::Acceptable);
        assert_eq!(validator.validate("1.1"), ValidationState::Invalid);
        assert_eq!(validator.validate("1a"), ValidationState::Invalid);
        assert_eq!(
            validator.validate("99999999999999999999"),
            ValidationState::Invalid
        );
    }

    #[test]
    fn test_int_validator_intermediate_below_minimum() {
        let validator = IntValidator::new(10, 100);
        assert_eq!(validator.validate("5"), ValidationState::Intermediate);
        assert_eq!(validator.validate("500"), ValidationState::Invalid);
    }

    #[test]
    fn test_int_validator_negative_range() {
        let validator = IntValidator::new(-100, -10);
        assert_eq!(validator.validate("-"), ValidationState::Intermediate);
        assert_eq!(validator.validate("-5"), ValidationState::Intermediate);
        assert_eq!(validator.validate("-50"), ValidationState::Acceptable);
        assert_eq!(validator.validate("-500"), ValidationState::Invalid);
        assert_eq!(validator.validate("5"), ValidationState::Invalid);
    }

    #[test]
    fn test_int_validator_fixup_clamps() {
        let validator = IntValidator::new(0, 10);
        assert_eq!(validator.fixup("15"), Some("10".to_string()));
        assert_eq!(validator.fixup("5"), None);
        assert_eq!(validator.fixup("abc"), None);
    }

    #[test]
    fn test_double_validator_standard() {
        let validator = DoubleValidator::unbounded();
        assert_eq!(validator.validate("-0.5"), ValidationState::Acceptable);
        assert_eq!(validator.validate("."), ValidationState::Intermediate);
        assert_eq!(validator.validate("1..2"), ValidationState::Invalid);
        assert_eq!(validator.validate("1e3"), ValidationState::Invalid);
        assert_eq!(validator.validate("inf"), ValidationState::Invalid);
    }

    #[test]
    fn test_double_validator_scientific() {
        let validator = DoubleValidator::unbounded().with_notation(FloatNotation::Scientific);
        assert_eq!(validator.validate("1.5e3"), ValidationState::Acceptable);
        assert_eq!(validator.validate("1.5e"), ValidationState::Intermediate);
        assert_eq!(validator.validate("1.5e-"), ValidationState::Intermediate);
        assert_eq!(validator.validate("e3"), ValidationState::Invalid);
        assert_eq!(validator.validate("1e3.5"), ValidationState::Invalid);
        assert_eq!(validator.validate("1e999"), ValidationState::Invalid);
    }

    #[test]
    fn test_double_validator_fixup() {
        let validator = DoubleValidator::new(0.0, 1.0, Some(2));
        assert_eq!(validator.fixup("0.5"), None);
        assert_eq!(validator.fixup("0.5."), Some("0.50".to_string()));
        assert_eq!(validator.fixup("3"), Some("1.00".to_string()));
        assert_eq!(validator.fixup("0."), Some("0.00".to_string()));
    }

    #[test]
    fn test_notation_format() {
        assert_eq!(FloatNotation::Standard.format(2.5, None), "2.5");
        assert_eq!(FloatNotation::Standard.format(2.5, Some(2)), "2.50");
        assert_eq!(FloatNotation::Scientific.format(1500.0, None), "1.5e3");
    }
}
