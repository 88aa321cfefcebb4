//! Boolean checkbox control.
//!
//! This module provides [`BoolCheckBox`], a control that edits `bool` fields,
//! with tri-state support for `Option<bool>` fields.
//!
//! # Example
//!
//! ```
//! use horizon_dataform::prelude::*;
//!
//! // A tri-state checkbox: partially checked means "no value"
//! let checkbox = BoolCheckBox::new("Enabled").with_tri_state(true);
//! assert_eq!(checkbox.data_value().unwrap(), Value::Bool(false));
//!
//! checkbox.click();
//! checkbox.click();
//! assert_eq!(checkbox.check_state(), CheckState::PartiallyChecked);
//! assert_eq!(checkbox.data_value().unwrap(), Value::None);
//! ```

use std::any::Any;

use horizon_dataform_core::logging::targets;
use horizon_dataform_core::{Property, Signal, Value, ValueError};

use crate::error::{DataformError, Result};
use crate::widget::DataWidget;

/// The check state of a checkbox.
///
/// Checkboxes can be in one of three states:
/// - `Unchecked`: The checkbox is not selected
/// - `Checked`: The checkbox is fully selected
/// - `PartiallyChecked`: The indeterminate state (tri-state mode only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckState {
    /// The checkbox is not checked.
    #[default]
    Unchecked,
    /// The checkbox is checked.
    Checked,
    /// The checkbox is in a partially checked (indeterminate) state.
    PartiallyChecked,
}

impl CheckState {
    /// Returns `true` if the state is `Checked`.
    pub fn is_checked(&self) -> bool {
        matches!(self, CheckState::Checked)
    }

    /// Returns `true` if the state is `PartiallyChecked`.
    pub fn is_partially_checked(&self) -> bool {
        matches!(self, CheckState::PartiallyChecked)
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

/// A checkbox editing a boolean value.
///
/// In normal mode, the checkbox toggles between `Checked` and `Unchecked`.
/// When tri-state mode is enabled, clicking cycles through
/// `Unchecked`, `Checked`, `PartiallyChecked`, and the partially checked
/// state reads as [`Value::None`].
///
/// # Signals
///
/// - `state_changed(CheckState)`: Emitted when the check state changes
/// - `toggled(bool)`: Emitted when the boolean checked state changes
/// - `clicked(bool)`: Emitted when clicked
/// - [`data_value_changed`](DataWidget::data_value_changed): Emitted with the
///   new value on every state change, user or programmatic
pub struct BoolCheckBox {
    /// The label text, also the control's data name.
    text: Property<String>,

    /// Whether tri-state mode is enabled.
    tri_state: bool,

    /// The current check state.
    check_state: Property<CheckState>,

    /// Signal emitted when the check state changes.
    pub state_changed: Signal<CheckState>,

    /// Signal emitted when the boolean checked state changes.
    pub toggled: Signal<bool>,

    /// Signal emitted when the checkbox is clicked.
    pub clicked: Signal<bool>,

    data_value_changed: Signal<Value>,
}

impl BoolCheckBox {
    /// Create a new unchecked checkbox with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Property::new(text.into()),
            tri_state: false,
            check_state: Property::new(CheckState::Unchecked),
            state_changed: Signal::new(),
            toggled: Signal::new(),
            clicked: Signal::new(),
            data_value_changed: Signal::new(),
        }
    }

    /// Enable or disable tri-state mode using builder pattern.
    pub fn with_tri_state(mut self, enabled: bool) -> Self {
        self.tri_state = enabled;
        if !enabled && self.check_state.get().is_partially_checked() {
            self.check_state.set_silent(CheckState::Unchecked);
        }
        self
    }

    /// Set the initial check state using builder pattern.
    pub fn with_check_state(self, state: CheckState) -> Self {
        self.set_check_state(state);
        self
    }

    /// Get the label text.
    pub fn text(&self) -> String {
        self.text.get()
    }

    /// Set the label text.
    pub fn set_text(&self, text: impl Into<String>) {
        self.text.set(text.into());
    }

    /// Check if tri-state mode is enabled.
    pub fn is_tri_state(&self) -> bool {
        self.tri_state
    }

    /// Get the current check state.
    pub fn check_state(&self) -> CheckState {
        self.check_state.get()
    }

    /// Check if the checkbox is currently checked.
    pub fn is_checked(&self) -> bool {
        self.check_state().is_checked()
    }

    /// Set the check state.
    ///
    /// If tri-state mode is disabled and `PartiallyChecked` is passed,
    /// it will be converted to `Unchecked`.
    pub fn set_check_state(&self, state: CheckState) {
        let effective_state = if !self.tri_state && state.is_partially_checked() {
            CheckState::Unchecked
        } else {
            state
        };

        let Some(old_state) = self.check_state.replace(effective_state) else {
            return;
        };

        tracing::trace!(
            target: targets::CONTROL,
            text = %self.text.get(),
            ?old_state,
            new_state = ?effective_state,
            "checkbox state changed"
        );

        if old_state.is_checked() != effective_state.is_checked() {
            self.toggled.emit(effective_state.is_checked());
        }
        self.state_changed.emit(effective_state);
        self.data_value_changed.emit(self.value_of(effective_state));
    }

    /// Set the checked state (boolean).
    pub fn set_checked(&self, checked: bool) {
        self.set_check_state(CheckState::from(checked));
    }

    /// Toggle the checkbox state.
    ///
    /// In normal mode: toggles between Checked and Unchecked.
    /// In tri-state mode: cycles Unchecked, Checked, PartiallyChecked.
    pub fn toggle(&self) {
        let next_state = match (self.tri_state, self.check_state()) {
            (_, CheckState::Unchecked) => CheckState::Checked,
            (true, CheckState::Checked) => CheckState::PartiallyChecked,
            (false, CheckState::Checked) | (_, CheckState::PartiallyChecked) => {
                CheckState::Unchecked
            }
        };
        self.set_check_state(next_state);
    }

    /// Click the checkbox as the user would.
    ///
    /// This toggles the state and emits all relevant signals.
    pub fn click(&self) {
        self.toggle();
        self.clicked.emit(self.is_checked());
    }

    fn value_of(&self, state: CheckState) -> Value {
        if self.tri_state && state.is_partially_checked() {
            Value::None
        } else {
            Value::Bool(state.is_checked())
        }
    }
}

impl DataWidget for BoolCheckBox {
    fn data_name(&self) -> String {
        self.text()
    }

    fn set_data_name(&self, name: &str) {
        self.set_text(name);
    }

    fn data_value(&self) -> Result<Value> {
        Ok(self.value_of(self.check_state()))
    }

    fn set_data_value(&self, value: &Value) -> Result<()> {
        match value {
            Value::Bool(checked) => self.set_checked(*checked),
            Value::None if self.tri_state => self.set_check_state(CheckState::PartiallyChecked),
            other => {
                let expected = if self.tri_state { "Option<bool>" } else { "bool" };
                return Err(DataformError::invalid_value(
                    self.text(),
                    ValueError::type_mismatch(expected, other.kind_name()),
                ));
            }
        }
        Ok(())
    }

    fn data_value_changed(&self) -> &Signal<Value> {
        &self.data_value_changed
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(BoolCheckBox: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_checkbox_creation() {
        let checkbox = BoolCheckBox::new("Test Checkbox");
        assert_eq!(checkbox.text(), "Test Checkbox");
        assert_eq!(checkbox.check_state(), CheckState::Unchecked);
        assert!(!checkbox.is_checked());
        assert!(!checkbox.is_tri_state());
        assert_eq!(checkbox.data_name(), "Test Checkbox");
    }

    #[test]
    fn test_checkbox_toggle() {
        let checkbox = BoolCheckBox::new("Toggle");
        checkbox.toggle();
        assert!(checkbox.is_checked());
        checkbox.toggle();
        assert!(!checkbox.is_checked());
    }

    #[test]
    fn test_tri_state_cycle() {
        let checkbox = BoolCheckBox::new("Tri").with_tri_state(true);
        checkbox.click();
        assert_eq!(checkbox.check_state(), CheckState::Checked);
        checkbox.click();
        assert_eq!(checkbox.check_state(), CheckState::PartiallyChecked);
        checkbox.click();
        assert_eq!(checkbox.check_state(), CheckState::Unchecked);
    }

    #[test]
    fn test_partial_ignored_without_tri_state() {
        let checkbox = BoolCheckBox::new("Binary");
        checkbox.set_checked(true);
        checkbox.set_check_state(CheckState::PartiallyChecked);
        assert_eq!(checkbox.check_state(), CheckState::Unchecked);
        assert!(checkbox.set_data_value(&Value::None).is_err());
    }

    #[test]
    fn test_data_value_round_trip() {
        let checkbox = BoolCheckBox::new("Optional").with_tri_state(true);
        for value in [Value::Bool(true), Value::None, Value::Bool(false)] {
            checkbox.set_data_value(&value).unwrap();
            assert_eq!(checkbox.data_value().unwrap(), value);
        }
        assert!(checkbox.set_data_value(&Value::Int(1)).is_err());
    }

    #[test]
    fn test_signals_on_change_only() {
        let checkbox = BoolCheckBox::new("Signals");
        let toggled = Arc::new(AtomicU32::new(0));
        let values = Arc::new(Mutex::new(Vec::new()));

        let toggled_clone = toggled.clone();
        checkbox.toggled.connect(move |_| {
            toggled_clone.fetch_add(1, Ordering::SeqCst);
        });
        let values_clone = values.clone();
        checkbox.data_value_changed().connect(move |value| {
            values_clone.lock().push(value.clone());
        });

        checkbox.set_checked(true);
        checkbox.set_checked(true);
        checkbox.click();

        assert_eq!(toggled.load(Ordering::SeqCst), 2);
        assert_eq!(*values.lock(), vec![Value::Bool(true), Value::Bool(false)]);
    }
}
