//! Single-line text entry controls.
//!
//! [`LineEdit`] is the plain text entry. The typed wrappers
//! [`IntLineEdit`], [`FloatLineEdit`] and [`StrLineEdit`] parse its text into
//! a field value:
//!
//! - The placeholder text is the control's data name.
//! - Each accepted keystroke that leaves a parsable value emits
//!   `data_value_edited`.
//! - Finishing the edit (Enter or focus loss) emits `data_value_changed`.
//! - Empty text reads as [`Value::None`] for nullable entries, else as the
//!   configured empty value, else it is an input error.
//!
//! # Example
//!
//! ```
//! use horizon_dataform::prelude::*;
//!
//! let edit = IntLineEdit::new(IntRange::I64);
//! edit.type_text("1.1");
//! assert_eq!(edit.line_edit().text(), "11");
//!
//! assert!(edit.finish_editing());
//! assert_eq!(edit.data_value().unwrap(), Value::Int(11));
//! ```

use std::any::Any;
use std::sync::Arc;

use horizon_dataform_core::logging::targets;
use horizon_dataform_core::{IntRange, Property, Signal, Value, ValueError};

use crate::error::{DataformError, Result};
use crate::widget::DataWidget;
use crate::widget::validator::{
    DoubleValidator, FloatNotation, IntValidator, ValidationState, Validator,
};

/// A single-line text input.
///
/// Editing is modelled as typing at the end of the text. A keystroke that
/// would make the text [`ValidationState::Invalid`] is rejected.
///
/// # Signals
///
/// - `text_changed`: Emitted when the text content changes, programmatically or by the user
/// - `text_edited`: Emitted when the user changes the text
/// - `editing_finished`: Emitted when editing finishes with acceptable input
pub struct LineEdit {
    /// The actual text content.
    text: Property<String>,

    /// Placeholder text displayed when empty.
    placeholder: Property<String>,

    /// Validator consulted on every keystroke.
    validator: Option<Arc<dyn Validator>>,

    /// Signal emitted when text changes.
    pub text_changed: Signal<String>,

    /// Signal emitted when the user edits the text.
    pub text_edited: Signal<String>,

    /// Signal emitted when editing is finished (focus lost or Enter pressed).
    pub editing_finished: Signal<()>,
}

impl Default for LineEdit {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEdit {
    /// Create a new empty LineEdit.
    pub fn new() -> Self {
        Self {
            text: Property::new(String::new()),
            placeholder: Property::new(String::new()),
            validator: None,
            text_changed: Signal::new(),
            text_edited: Signal::new(),
            editing_finished: Signal::new(),
        }
    }

    /// Set the placeholder using builder pattern.
    pub fn with_placeholder(self, text: impl Into<String>) -> Self {
        self.placeholder.set(text.into());
        self
    }

    /// Set the validator using builder pattern.
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Get the current text.
    pub fn text(&self) -> String {
        self.text.get()
    }

    /// Set the text content.
    ///
    /// The validator is not consulted.
    pub fn set_text(&self, text: impl Into<String>) {
        let new_text = text.into();
        if self.text.set(new_text.clone()) {
            self.text_changed.emit(new_text);
        }
    }

    /// Clear all text.
    pub fn clear(&self) {
        self.set_text("");
    }

    /// Get the placeholder text.
    pub fn placeholder(&self) -> String {
        self.placeholder.get()
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&self, text: impl Into<String>) {
        self.placeholder.set(text.into());
    }

    /// Get the validator, if any.
    pub fn validator(&self) -> Option<&Arc<dyn Validator>> {
        self.validator.as_ref()
    }

    /// Validate the current text. Without a validator every text is acceptable.
    pub fn validation_state(&self) -> ValidationState {
        self.validate(&self.text())
    }

    /// Returns `true` if the current text is acceptable.
    pub fn has_acceptable_input(&self) -> bool {
        self.validation_state() == ValidationState::Acceptable
    }

    fn validate(&self, text: &str) -> ValidationState {
        self.validator
            .as_ref()
            .map_or(ValidationState::Acceptable, |v| v.validate(text))
    }

    /// Type one character at the end of the text.
    ///
    /// Returns `false` if the keystroke was rejected.
    pub fn insert_char(&self, ch: char) -> bool {
        let mut candidate = self.text();
        candidate.push(ch);
        if self.validate(&candidate) == ValidationState::Invalid {
            tracing::trace!(target: targets::CONTROL, %ch, text = %candidate, "keystroke rejected");
            return false;
        }

        self.text.set(candidate.clone());
        self.text_changed.emit(candidate.clone());
        self.text_edited.emit(candidate);
        true
    }

    /// Type `text` character by character, returning how many were accepted.
    pub fn insert(&self, text: &str) -> usize {
        text.chars().filter(|&ch| self.insert_char(ch)).count()
    }

    /// Delete the last character, as the user would.
    ///
    /// Returns `false` if the text was already empty.
    pub fn backspace(&self) -> bool {
        let mut text = self.text();
        if text.pop().is_none() {
            return false;
        }

        self.text.set(text.clone());
        self.text_changed.emit(text.clone());
        self.text_edited.emit(text);
        true
    }

    /// Finish editing (Enter pressed or focus lost).
    ///
    /// Input that is not acceptable is passed through the validator's fixup
    /// first. `editing_finished` is emitted only if the resulting text is
    /// acceptable; the return value says whether it was.
    pub fn finish_editing(&self) -> bool {
        if !self.has_acceptable_input()
            && let Some(fixed) = self.validator.as_ref().and_then(|v| v.fixup(&self.text()))
        {
            self.set_text(fixed);
        }

        if self.has_acceptable_input() {
            self.editing_finished.emit(());
            true
        } else {
            false
        }
    }
}

/// Shared state of the typed text entries: the line edit, nullability and
/// the data signals.
struct TextEntry {
    edit: LineEdit,
    nullable: bool,
    data_value_changed: Signal<Value>,
    data_value_edited: Signal<Value>,
}

impl TextEntry {
    fn new(edit: LineEdit) -> Self {
        Self {
            edit,
            nullable: false,
            data_value_changed: Signal::new(),
            data_value_edited: Signal::new(),
        }
    }

    fn field(&self) -> String {
        self.edit.placeholder()
    }

    fn type_text(&self, text: &str, parse: impl Fn(&str) -> Result<Value>) -> usize {
        let mut accepted = 0;
        for ch in text.chars() {
            if self.edit.insert_char(ch) {
                accepted += 1;
                self.edited(&parse);
            }
        }
        accepted
    }

    fn backspace(&self, parse: impl Fn(&str) -> Result<Value>) -> bool {
        let removed = self.edit.backspace();
        if removed {
            self.edited(&parse);
        }
        removed
    }

    fn edited(&self, parse: &impl Fn(&str) -> Result<Value>) {
        if let Ok(value) = parse(&self.edit.text()) {
            self.data_value_edited.emit(value);
        }
    }

    fn finish(&self, parse: impl Fn(&str) -> Result<Value>) -> bool {
        self.edit.finish_editing();
        match parse(&self.edit.text()) {
            Ok(value) => {
                self.data_value_changed.emit(value);
                true
            }
            Err(err) => {
                tracing::trace!(target: targets::CONTROL, %err, "editing finished without a value");
                false
            }
        }
    }

    /// Show `text` for a programmatically set `value`.
    fn show(&self, text: String, value: Value) {
        if text != self.edit.text() {
            self.edit.set_text(text);
            self.data_value_changed.emit(value);
        }
    }

    fn empty_text_value(&self, empty_value: Option<Value>, text: &str) -> Result<Value> {
        if self.nullable {
            Ok(Value::None)
        } else {
            empty_value.ok_or_else(|| DataformError::invalid_input(self.field(), text))
        }
    }

    fn reject(&self, expected: &str, value: &Value) -> DataformError {
        DataformError::invalid_value(
            self.field(),
            ValueError::type_mismatch(expected, value.kind_name()),
        )
    }
}

/// A text entry editing an integer value within a range.
///
/// # Signals
///
/// - `data_value_edited()`: Emitted on every accepted keystroke that leaves a value
/// - [`data_value_changed`](DataWidget::data_value_changed): Emitted when editing
///   finishes with a value, and when the value is set programmatically
pub struct IntLineEdit {
    entry: TextEntry,
    range: IntRange,
    empty_value: Property<Option<i64>>,
}

impl IntLineEdit {
    /// Create an integer entry accepting values in `range`.
    pub fn new(range: IntRange) -> Self {
        let edit = LineEdit::new().with_validator(IntValidator::new(range.min, range.max));
        Self {
            entry: TextEntry::new(edit),
            range,
            empty_value: Property::new(None),
        }
    }

    /// Make empty text read as [`Value::None`] using builder pattern.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.entry.nullable = nullable;
        self
    }

    /// Set the value read from empty text using builder pattern.
    pub fn with_empty_value(self, value: Option<i64>) -> Self {
        self.set_empty_value(value);
        self
    }

    /// Set the value read from empty text (ignored when nullable).
    pub fn set_empty_value(&self, value: Option<i64>) {
        self.empty_value.set(value);
    }

    /// Get the value read from empty text.
    pub fn empty_value(&self) -> Option<i64> {
        self.empty_value.get()
    }

    /// Returns `true` if empty text reads as [`Value::None`].
    pub fn is_nullable(&self) -> bool {
        self.entry.nullable
    }

    /// The accepted range.
    pub fn range(&self) -> IntRange {
        self.range
    }

    /// The underlying line edit.
    pub fn line_edit(&self) -> &LineEdit {
        &self.entry.edit
    }

    /// Signal emitted on every accepted keystroke that leaves a value.
    pub fn data_value_edited(&self) -> &Signal<Value> {
        &self.entry.data_value_edited
    }

    /// Type `text` as the user would, returning how many characters were accepted.
    pub fn type_text(&self, text: &str) -> usize {
        self.entry.type_text(text, |t| self.parse(t))
    }

    /// Delete the last character as the user would.
    pub fn backspace(&self) -> bool {
        self.entry.backspace(|t| self.parse(t))
    }

    /// Finish editing as the user would, returning whether a value resulted.
    pub fn finish_editing(&self) -> bool {
        self.entry.finish(|t| self.parse(t))
    }

    fn parse(&self, text: &str) -> Result<Value> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self
                .entry
                .empty_text_value(self.empty_value().map(Value::Int), text);
        }

        match trimmed.parse::<i64>() {
            Ok(value) if self.range.contains(value) => Ok(Value::Int(value)),
            _ => Err(DataformError::invalid_input(self.entry.field(), text)),
        }
    }
}

impl DataWidget for IntLineEdit {
    fn data_name(&self) -> String {
        self.entry.field()
    }

    fn set_data_name(&self, name: &str) {
        self.entry.edit.set_placeholder(name);
    }

    fn data_value(&self) -> Result<Value> {
        self.parse(&self.entry.edit.text())
    }

    fn set_data_value(&self, value: &Value) -> Result<()> {
        match value {
            Value::Int(i) if self.range.contains(*i) => {
                self.entry.show(i.to_string(), Value::Int(*i));
                Ok(())
            }
            Value::Int(i) => Err(DataformError::invalid_value(
                self.entry.field(),
                ValueError::OutOfRange {
                    value: *i,
                    min: self.range.min,
                    max: self.range.max,
                },
            )),
            Value::None if self.entry.nullable => {
                self.entry.show(String::new(), Value::None);
                Ok(())
            }
            other => Err(self.entry.reject("int", other)),
        }
    }

    fn data_value_changed(&self) -> &Signal<Value> {
        &self.entry.data_value_changed
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A text entry editing a floating-point value.
///
/// Values are written with the configured notation and number of decimals.
pub struct FloatLineEdit {
    entry: TextEntry,
    decimals: Option<u32>,
    notation: FloatNotation,
    empty_value: Property<Option<f64>>,
}

impl FloatLineEdit {
    /// Create a float entry.
    ///
    /// `decimals` limits the fractional digits that may be typed and that are
    /// shown; `None` places no limit.
    pub fn new(decimals: Option<u32>, notation: FloatNotation) -> Self {
        let validator = DoubleValidator::unbounded()
            .with_decimals(decimals)
            .with_notation(notation);
        Self {
            entry: TextEntry::new(LineEdit::new().with_validator(validator)),
            decimals,
            notation,
            empty_value: Property::new(None),
        }
    }

    /// Make empty text read as [`Value::None`] using builder pattern.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.entry.nullable = nullable;
        self
    }

    /// Set the value read from empty text using builder pattern.
    pub fn with_empty_value(self, value: Option<f64>) -> Self {
        self.set_empty_value(value);
        self
    }

    /// Set the value read from empty text (ignored when nullable).
    pub fn set_empty_value(&self, value: Option<f64>) {
        self.empty_value.set(value);
    }

    /// Get the value read from empty text.
    pub fn empty_value(&self) -> Option<f64> {
        self.empty_value.get()
    }

    /// Returns `true` if empty text reads as [`Value::None`].
    pub fn is_nullable(&self) -> bool {
        self.entry.nullable
    }

    /// The number of decimals shown, if limited.
    pub fn decimals(&self) -> Option<u32> {
        self.decimals
    }

    /// The notation values are written in.
    pub fn notation(&self) -> FloatNotation {
        self.notation
    }

    /// The underlying line edit.
    pub fn line_edit(&self) -> &LineEdit {
        &self.entry.edit
    }

    /// Signal emitted on every accepted keystroke that leaves a value.
    pub fn data_value_edited(&self) -> &Signal<Value> {
        &self.entry.data_value_edited
    }

    /// Type `text` as the user would, returning how many characters were accepted.
    pub fn type_text(&self, text: &str) -> usize {
        self.entry.type_text(text, |t| self.parse(t))
    }

    /// Delete the last character as the user would.
    pub fn backspace(&self) -> bool {
        self.entry.backspace(|t| self.parse(t))
    }

    /// Finish editing as the user would, returning whether a value resulted.
    pub fn finish_editing(&self) -> bool {
        self.entry.finish(|t| self.parse(t))
    }

    fn parse(&self, text: &str) -> Result<Value> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self
                .entry
                .empty_text_value(self.empty_value().map(Value::Float), text);
        }

        let acceptable = self.entry.edit.validate(trimmed) == ValidationState::Acceptable;
        match trimmed.parse::<f64>() {
            Ok(value) if acceptable && value.is_finite() => Ok(Value::Float(value)),
            _ => Err(DataformError::invalid_input(self.entry.field(), text)),
        }
    }
}

impl DataWidget for FloatLineEdit {
    fn data_name(&self) -> String {
        self.entry.field()
    }

    fn set_data_name(&self, name: &str) {
        self.entry.edit.set_placeholder(name);
    }

    fn data_value(&self) -> Result<Value> {
        self.parse(&self.entry.edit.text())
    }

    fn set_data_value(&self, value: &Value) -> Result<()> {
        match value {
            Value::Float(_) | Value::Int(_) => {
                let number = value.as_float().unwrap_or_default();
                if !number.is_finite() {
                    return Err(DataformError::invalid_value(
                        self.entry.field(),
                        ValueError::conversion(format!("{number} cannot be edited as text")),
                    ));
                }
                let text = self.notation.format(number, self.decimals);
                // Report what reading the rounded text back will yield
                let shown = text.parse::<f64>().unwrap_or(number);
                self.entry.show(text, Value::Float(shown));
                Ok(())
            }
            Value::None if self.entry.nullable => {
                self.entry.show(String::new(), Value::None);
                Ok(())
            }
            other => Err(self.entry.reject("float", other)),
        }
    }

    fn data_value_changed(&self) -> &Signal<Value> {
        &self.entry.data_value_changed
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A text entry editing a string value.
///
/// When nullable, empty text reads as [`Value::None`], so an empty string
/// cannot be told apart from no value.
pub struct StrLineEdit {
    entry: TextEntry,
}

impl Default for StrLineEdit {
    fn default() -> Self {
        Self::new()
    }
}

impl StrLineEdit {
    /// Create a string entry.
    pub fn new() -> Self {
        Self {
            entry: TextEntry::new(LineEdit::new()),
        }
    }

    /// Make empty text read as [`Value::None`] using builder pattern.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.entry.nullable = nullable;
        self
    }

    /// Returns `true` if empty text reads as [`Value::None`].
    pub fn is_nullable(&self) -> bool {
        self.entry.nullable
    }

    /// The underlying line edit.
    pub fn line_edit(&self) -> &LineEdit {
        &self.entry.edit
    }

    /// Signal emitted on every keystroke.
    pub fn data_value_edited(&self) -> &Signal<Value> {
        &self.entry.data_value_edited
    }

    /// Type `text` as the user would, returning how many characters were accepted.
    pub fn type_text(&self, text: &str) -> usize {
        self.entry.type_text(text, |t| self.parse(t))
    }

    /// Delete the last character as the user would.
    pub fn backspace(&self) -> bool {
        self.entry.backspace(|t| self.parse(t))
    }

    /// Finish editing as the user would.
    pub fn finish_editing(&self) -> bool {
        self.entry.finish(|t| self.parse(t))
    }

    fn parse(&self, text: &str) -> Result<Value> {
        if text.is_empty() && self.entry.nullable {
            Ok(Value::None)
        } else {
            Ok(Value::Str(text.to_string()))
        }
    }
}

impl DataWidget for StrLineEdit {
    fn data_name(&self) -> String {
        self.entry.field()
    }

    fn set_data_name(&self, name: &str) {
        self.entry.edit.set_placeholder(name);
    }

    fn data_value(&self) -> Result<Value> {
        self.parse(&self.entry.edit.text())
    }

    fn set_data_value(&self, value: &Value) -> Result<()> {
        match value {
            Value::Str(text) => {
                self.entry.show(text.clone(), value.clone());
                Ok(())
            }
            Value::None if self.entry.nullable => {
                self.entry.show(String::new(), Value::None);
                Ok(())
            }
            other => Err(self.entry.reject("str", other)),
        }
    }

    fn data_value_changed(&self) -> &Signal<Value> {
        &self.entry.data_value_changed
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(LineEdit: Send, Sync);
static_assertions::assert_impl_all!(IntLineEdit: Send, Sync);
static_assertions::assert_impl_all!(FloatLineEdit: Send, Sync);
static_assertions::assert_impl_all!(StrLineEdit: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn collect(signal: &Signal<Value>) -> Arc<Mutex<Vec<Value>>> {
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        signal.connect(move |value| {
            received_clone.lock().push(value.clone());
        });
        received
    }

    #[test]
    fn test_line_edit_text_signals() {
        let edit = LineEdit::new().with_placeholder("name");
        let changed = Arc::new(Mutex::new(Vec::new()));
        let edited = Arc::new(Mutex::new(Vec::new()));

        let changed_clone = changed.clone();
        edit.text_changed.connect(move |text| changed_clone.lock().push(text.clone()));
        let edited_clone = edited.clone();
        edit.text_edited.connect(move |text| edited_clone.lock().push(text.clone()));

        edit.set_text("ab");
        edit.set_text("ab");
        edit.insert("c");
        assert!(edit.backspace());

        assert_eq!(*changed.lock(), vec!["ab", "abc", "ab"]);
        assert_eq!(*edited.lock(), vec!["abc", "ab"]);
        assert_eq!(edit.placeholder(), "name");
    }

    #[test]
    fn test_line_edit_finish_applies_fixup() {
        let edit = LineEdit::new().with_validator(IntValidator::new(0, 10));
        let finished = Arc::new(Mutex::new(0));
        let finished_clone = finished.clone();
        edit.editing_finished.connect(move |_| *finished_clone.lock() += 1);

        edit.set_text("15");
        assert!(edit.finish_editing());
        assert_eq!(edit.text(), "10");

        edit.clear();
        assert!(!edit.finish_editing());
        assert_eq!(*finished.lock(), 1);
    }

    #[test]
    fn test_int_rejects_invalid_keystrokes() {
        let edit = IntLineEdit::new(IntRange::I64);
        assert_eq!(edit.type_text("1.1"), 2);
        assert_eq!(edit.line_edit().text(), "11");
        assert_eq!(edit.data_value().unwrap(), Value::Int(11));
    }

    #[test]
    fn test_int_edited_per_keystroke_changed_on_finish() {
        let edit = IntLineEdit::new(IntRange::new(-100, 100));
        let edited = collect(edit.data_value_edited());
        let changed = collect(edit.data_value_changed());

        edit.type_text("-12");
        assert_eq!(*edited.lock(), vec![Value::Int(-1), Value::Int(-12)]);
        assert!(changed.lock().is_empty());

        assert!(edit.finish_editing());
        assert_eq!(*changed.lock(), vec![Value::Int(-12)]);
    }

    #[test]
    fn test_int_empty_text() {
        let edit = IntLineEdit::new(IntRange::I64);
        edit.set_data_name("count");
        assert!(matches!(
            edit.data_value(),
            Err(DataformError::InvalidInput { ref field, .. }) if field == "count"
        ));
        assert!(!edit.finish_editing());

        edit.set_empty_value(Some(0));
        assert_eq!(edit.data_value().unwrap(), Value::Int(0));

        let nullable = IntLineEdit::new(IntRange::I64)
            .with_nullable(true)
            .with_empty_value(Some(3));
        assert_eq!(nullable.data_value().unwrap(), Value::None);
    }

    #[test]
    fn test_int_set_data_value() {
        let edit = IntLineEdit::new(IntRange::new(0, 255)).with_nullable(true);
        let changed = collect(edit.data_value_changed());

        edit.set_data_value(&Value::Int(200)).unwrap();
        edit.set_data_value(&Value::Int(200)).unwrap();
        assert_eq!(edit.line_edit().text(), "200");
        edit.set_data_value(&Value::None).unwrap();
        assert_eq!(edit.data_value().unwrap(), Value::None);

        assert!(edit.set_data_value(&Value::Int(256)).is_err());
        assert!(edit.set_data_value(&Value::Str("1".into())).is_err());
        assert_eq!(*changed.lock(), vec![Value::Int(200), Value::None]);
    }

    #[test]
    fn test_float_round_trip() {
        let edit = FloatLineEdit::new(None, FloatNotation::Standard);
        for value in [0.1, -2.5, 1e-7, 12345.678] {
            edit.set_data_value(&Value::Float(value)).unwrap();
            assert_eq!(edit.data_value().unwrap(), Value::Float(value));
        }
        assert!(edit.set_data_value(&Value::Float(f64::NAN)).is_err());
    }

    #[test]
    fn test_float_scientific_and_decimals() {
        let edit = FloatLineEdit::new(Some(2), FloatNotation::Scientific);
        edit.set_data_value(&Value::Float(1500.0)).unwrap();
        assert_eq!(edit.line_edit().text(), "1.50e3");
        assert_eq!(edit.data_value().unwrap(), Value::Float(1500.0));

        let edit = FloatLineEdit::new(Some(1), FloatNotation::Standard);
        assert_eq!(edit.type_text("2.55"), 3);
        assert_eq!(edit.data_value().unwrap(), Value::Float(2.5));
    }

    #[test]
    fn test_float_decimals_emit_rounded_value() {
        let edit = FloatLineEdit::new(Some(2), FloatNotation::Standard);
        let changed = collect(edit.data_value_changed());
        edit.set_data_value(&Value::Float(2.345678)).unwrap();

        assert_eq!(edit.line_edit().text(), "2.35");
        assert_eq!(*changed.lock(), vec![Value::Float(2.35)]);
        assert_eq!(edit.data_value().unwrap(), Value::Float(2.35));
    }

    #[test]
    fn test_float_accepts_int_value() {
        let edit = FloatLineEdit::new(None, FloatNotation::Standard);
        edit.set_data_value(&Value::Int(4)).unwrap();
        assert_eq!(edit.data_value().unwrap(), Value::Float(4.0));
    }

    #[test]
    fn test_str_nullable() {
        let edit = StrLineEdit::new().with_nullable(true);
        assert_eq!(edit.data_value().unwrap(), Value::None);
        edit.type_text("hi");
        assert_eq!(edit.data_value().unwrap(), Value::Str("hi".into()));

        let plain = StrLineEdit::new();
        assert_eq!(plain.data_value().unwrap(), Value::Str(String::new()));
        assert!(plain.set_data_value(&Value::None).is_err());
    }

    #[test]
    fn test_str_finish_emits_changed() {
        let edit = StrLineEdit::new();
        let changed = collect(edit.data_value_changed());
        edit.type_text("abc");
        assert!(edit.finish_editing());
        assert_eq!(*changed.lock(), vec![Value::Str("abc".into())]);
    }
}
