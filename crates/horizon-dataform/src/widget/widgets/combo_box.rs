//! Enumerated choice control.
//!
//! This module provides [`EnumComboBox`], a selectable list of the variants
//! of a [`Choice`](horizon_dataform_core::Choice) enum.
//!
//! # Example
//!
//! ```
//! use horizon_dataform::prelude::*;
//!
//! let combo = EnumComboBox::new(ChoiceSpec::new("Shape", ["Circle", "Square"]));
//! assert_eq!(combo.current_index(), 0);
//!
//! combo.select(1);
//! assert_eq!(combo.data_value().unwrap(), Value::Choice("Square".into()));
//! ```

use std::any::Any;

use horizon_dataform_core::logging::targets;
use horizon_dataform_core::{ChoiceSpec, Property, Signal, Value, ValueError};

use crate::error::{DataformError, Result};
use crate::widget::DataWidget;

/// A combo box offering the variants of an enumerated choice.
///
/// Items show the variant labels; the data value is the variant name. The
/// current index is `-1` when nothing is selected, which a nullable combo box
/// reads as [`Value::None`]. A non-nullable combo box starts on the first
/// variant.
///
/// # Signals
///
/// - `current_index_changed(i32)`: Emitted when the current index changes
/// - `current_text_changed(String)`: Emitted with the new label when the current index changes
/// - `activated(i32)`: Emitted when the user selects an item
/// - [`data_value_changed`](DataWidget::data_value_changed): Emitted with the
///   new value when the current index changes
pub struct EnumComboBox {
    /// The choice type and its variants.
    spec: ChoiceSpec,

    /// Whether "no selection" is a valid value.
    nullable: bool,

    /// Currently selected index (-1 for none).
    current_index: Property<i32>,

    /// Placeholder text shown when nothing is selected, also the data name.
    placeholder_text: Property<String>,

    /// Signal emitted when current index changes.
    pub current_index_changed: Signal<i32>,

    /// Signal emitted when current text changes.
    pub current_text_changed: Signal<String>,

    /// Signal emitted when the user selects an item.
    pub activated: Signal<i32>,

    data_value_changed: Signal<Value>,
}

impl EnumComboBox {
    /// Create a combo box for the given choice, with the first variant selected.
    pub fn new(spec: ChoiceSpec) -> Self {
        let initial = if spec.variants.is_empty() { -1 } else { 0 };
        Self {
            spec,
            nullable: false,
            current_index: Property::new(initial),
            placeholder_text: Property::new(String::new()),
            current_index_changed: Signal::new(),
            current_text_changed: Signal::new(),
            activated: Signal::new(),
            data_value_changed: Signal::new(),
        }
    }

    /// Make "no selection" a valid value using builder pattern.
    ///
    /// A nullable combo box starts with nothing selected.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        if nullable {
            self.current_index.set_silent(-1);
        }
        self
    }

    /// Returns `true` if "no selection" is a valid value.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The choice this combo box offers.
    pub fn choice_spec(&self) -> &ChoiceSpec {
        &self.spec
    }

    /// Get the number of items.
    pub fn count(&self) -> usize {
        self.spec.variants.len()
    }

    /// Get the label of the item at `index`.
    pub fn item_text(&self, index: usize) -> Option<String> {
        self.spec.variants.get(index).map(|v| v.label.clone())
    }

    /// Find the index of the item with the given label.
    pub fn find_text(&self, text: &str) -> i32 {
        self.spec
            .variants
            .iter()
            .position(|v| v.label == text)
            .map_or(-1, |i| i as i32)
    }

    /// Get the current index (-1 if nothing is selected).
    pub fn current_index(&self) -> i32 {
        self.current_index.get()
    }

    /// Get the label of the current item, or an empty string.
    pub fn current_text(&self) -> String {
        usize::try_from(self.current_index())
            .ok()
            .and_then(|i| self.item_text(i))
            .unwrap_or_default()
    }

    /// Set the current index. Out-of-range indices clear the selection.
    pub fn set_current_index(&self, index: i32) {
        let count = self.count() as i32;
        let new_index = if index < 0 || index >= count { -1 } else { index };

        if self.current_index.set(new_index) {
            tracing::trace!(
                target: targets::CONTROL,
                choice = %self.spec.type_name,
                index = new_index,
                "combo box index changed"
            );
            self.current_index_changed.emit(new_index);
            self.current_text_changed.emit(self.current_text());
            self.data_value_changed.emit(self.value_at(new_index));
        }
    }

    /// Select an item as the user would.
    pub fn select(&self, index: i32) {
        self.set_current_index(index);
        let current = self.current_index();
        if current >= 0 {
            self.activated.emit(current);
        }
    }

    /// Get the placeholder text.
    pub fn placeholder_text(&self) -> String {
        self.placeholder_text.get()
    }

    /// Set the placeholder text.
    pub fn set_placeholder_text(&self, text: impl Into<String>) {
        self.placeholder_text.set(text.into());
    }

    fn value_at(&self, index: i32) -> Value {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.spec.name_at(i))
            .map_or(Value::None, |name| Value::Choice(name.to_string()))
    }
}

impl DataWidget for EnumComboBox {
    fn data_name(&self) -> String {
        self.placeholder_text()
    }

    fn set_data_name(&self, name: &str) {
        self.set_placeholder_text(name);
    }

    fn data_value(&self) -> Result<Value> {
        match self.value_at(self.current_index()) {
            Value::None if !self.nullable => Err(DataformError::invalid_input(
                self.placeholder_text(),
                String::new(),
            )),
            value => Ok(value),
        }
    }

    fn set_data_value(&self, value: &Value) -> Result<()> {
        match value {
            Value::Choice(name) => match self.spec.index_of(name) {
                Some(index) => self.set_current_index(index as i32),
                None => {
                    return Err(DataformError::invalid_value(
                        self.placeholder_text(),
                        ValueError::UnknownChoice {
                            type_name: self.spec.type_name.clone(),
                            name: name.clone(),
                        },
                    ));
                }
            },
            Value::None if self.nullable => self.set_current_index(-1),
            other => {
                return Err(DataformError::invalid_value(
                    self.placeholder_text(),
                    ValueError::type_mismatch(self.spec.type_name.clone(), other.kind_name()),
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

static_assertions::assert_impl_all!(EnumComboBox: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_dataform_core::ChoiceVariant;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn colors() -> ChoiceSpec {
        ChoiceSpec {
            type_name: "Color".into(),
            variants: vec![
                ChoiceVariant {
                    name: "Red".into(),
                    label: "Bright red".into(),
                },
                ChoiceVariant {
                    name: "Green".into(),
                    label: "Green".into(),
                },
            ],
        }
    }

    #[test]
    fn test_items_show_labels() {
        let combo = EnumComboBox::new(colors());
        assert_eq!(combo.count(), 2);
        assert_eq!(combo.item_text(0), Some("Bright red".into()));
        assert_eq!(combo.current_text(), "Bright red");
        assert_eq!(combo.find_text("Green"), 1);
        assert_eq!(combo.find_text("Blue"), -1);
    }

    #[test]
    fn test_set_data_value_by_name() {
        let combo = EnumComboBox::new(colors());
        combo.set_data_value(&Value::Choice("Green".into())).unwrap();
        assert_eq!(combo.current_index(), 1);
        assert!(combo.set_data_value(&Value::Choice("Blue".into())).is_err());
        assert!(combo.set_data_value(&Value::None).is_err());
    }

    #[test]
    fn test_nullable_no_selection() {
        let combo = EnumComboBox::new(colors()).with_nullable(true);
        assert_eq!(combo.current_index(), -1);
        assert_eq!(combo.data_value().unwrap(), Value::None);

        combo.set_data_value(&Value::Choice("Red".into())).unwrap();
        combo.set_data_value(&Value::None).unwrap();
        assert_eq!(combo.current_text(), "");
    }

    #[test]
    fn test_non_nullable_cleared_is_invalid() {
        let combo = EnumComboBox::new(colors());
        combo.set_current_index(5);
        assert_eq!(combo.current_index(), -1);
        assert!(combo.data_value().is_err());
    }

    #[test]
    fn test_signals() {
        let combo = EnumComboBox::new(colors());
        let values = Arc::new(Mutex::new(Vec::new()));
        let activated = Arc::new(Mutex::new(Vec::new()));

        let values_clone = values.clone();
        combo.data_value_changed().connect(move |v| values_clone.lock().push(v.clone()));
        let activated_clone = activated.clone();
        combo.activated.connect(move |&i| activated_clone.lock().push(i));

        combo.select(1);
        combo.select(1);
        combo.set_current_index(0);

        assert_eq!(
            *values.lock(),
            vec![Value::Choice("Green".into()), Value::Choice("Red".into())]
        );
        assert_eq!(*activated.lock(), vec![1, 1]);
    }
}
