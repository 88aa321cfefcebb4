//! Tuple group box control.
//!
//! This module provides [`TupleGroupBox`], a titled group holding one child
//! control per element of a fixed-size tuple. Elements may themselves be
//! tuples, to any depth.

use std::any::Any;
use std::sync::{Arc, Weak};

use horizon_dataform_core::logging::targets;
use horizon_dataform_core::{FieldType, Property, Signal, Value, ValueError};

use crate::error::{DataformError, Result};
use crate::widget::{DataWidget, check_editable};

/// A group box editing a tuple value, one child control per element.
///
/// A change in any child is re-emitted as the whole tuple. Setting the
/// value updates the children with their notifications blocked and emits
/// once. A rejected value leaves every child as it was.
///
/// # Example
///
/// ```
/// use horizon_dataform::prelude::*;
/// use horizon_dataform::widget::factory::type_to_widget;
///
/// let ty = FieldType::Tuple(vec![FieldType::Int(IntRange::I64), FieldType::Bool]);
/// let group = type_to_widget(&ty).unwrap();
///
/// let value = Value::Tuple(vec![Value::Int(3), Value::Bool(true)]);
/// group.set_data_value(&value).unwrap();
/// assert_eq!(group.data_value().unwrap(), value);
/// ```
pub struct TupleGroupBox {
    /// The group box title, also the data name.
    title: Property<String>,

    /// The tuple type the children were built for.
    field_type: FieldType,

    /// One child per tuple element, in order.
    children: Vec<Arc<dyn DataWidget>>,

    data_value_changed: Signal<Value>,
}

impl TupleGroupBox {
    /// Create a group box over `children`, one per element of the tuple type
    /// `element_types`.
    pub fn new(element_types: Vec<FieldType>, children: Vec<Arc<dyn DataWidget>>) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            for (index, child) in children.iter().enumerate() {
                let this = this.clone();
                child.data_value_changed().connect(move |_| {
                    if let Some(group) = this.upgrade() {
                        group.on_child_changed(index);
                    }
                });
            }

            Self {
                title: Property::new(String::new()),
                field_type: FieldType::Tuple(element_types),
                children,
                data_value_changed: Signal::new(),
            }
        })
    }

    /// Get the title.
    pub fn title(&self) -> String {
        self.title.get()
    }

    /// Set the title.
    pub fn set_title(&self, title: impl Into<String>) {
        self.title.set(title.into());
    }

    /// The child controls, one per tuple element.
    pub fn children(&self) -> &[Arc<dyn DataWidget>] {
        &self.children
    }

    /// The tuple type this group edits.
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    fn restore(&self, previous: Vec<Option<Value>>) {
        for (child, value) in self.children.iter().zip(previous).rev() {
            let Some(value) = value else { continue };
            let _blocker = child.data_value_changed().block();
            if let Err(err) = child.set_data_value(&value) {
                tracing::trace!(target: targets::CONTROL, title = %self.title(), %err, "element not restored");
            }
        }
    }

    fn on_child_changed(&self, index: usize) {
        match self.data_value() {
            Ok(value) => self.data_value_changed.emit(value),
            Err(err) => tracing::trace!(
                target: targets::CONTROL,
                title = %self.title(),
                index,
                %err,
                "tuple element changed but tuple is incomplete"
            ),
        }
    }
}

impl DataWidget for TupleGroupBox {
    fn data_name(&self) -> String {
        self.title()
    }

    fn set_data_name(&self, name: &str) {
        self.set_title(name);
    }

    fn data_value(&self) -> Result<Value> {
        self.children
            .iter()
            .map(|child| child.data_value())
            .collect::<Result<Vec<_>>>()
            .map(Value::Tuple)
    }

    fn set_data_value(&self, value: &Value) -> Result<()> {
        let Value::Tuple(items) = value else {
            return Err(DataformError::invalid_value(
                self.title(),
                ValueError::type_mismatch(self.field_type.to_string(), value.kind_name()),
            ));
        };
        check_editable(&self.field_type, value)
            .map_err(|err| DataformError::invalid_value(self.title(), err))?;

        let previous: Vec<Option<Value>> = self
            .children
            .iter()
            .map(|child| child.data_value().ok())
            .collect();
        for (child, item) in self.children.iter().zip(items) {
            let _blocker = child.data_value_changed().block();
            if let Err(err) = child.set_data_value(item) {
                self.restore(previous);
                return Err(err);
            }
        }

        self.data_value_changed.emit(value.clone());
        Ok(())
    }

    fn data_value_changed(&self) -> &Signal<Value> {
        &self.data_value_changed
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(TupleGroupBox: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::validator::FloatNotation;
    use crate::widget::widgets::{BoolCheckBox, FloatLineEdit, IntLineEdit};
    use horizon_dataform_core::IntRange;
    use parking_lot::Mutex;

    fn pair() -> (Arc<TupleGroupBox>, Arc<BoolCheckBox>) {
        let flag = Arc::new(BoolCheckBox::new(""));
        let flag_widget: Arc<dyn DataWidget> = flag.clone();
        let count: Arc<dyn DataWidget> = Arc::new(IntLineEdit::new(IntRange::I64));
        let group = TupleGroupBox::new(
            vec![FieldType::Bool, FieldType::Int(IntRange::I64)],
            vec![flag_widget, count],
        );
        (group, flag)
    }

    fn collect(signal: &Signal<Value>) -> Arc<Mutex<Vec<Value>>> {
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        signal.connect(move |value| received_clone.lock().push(value.clone()));
        received
    }

    #[test]
    fn test_set_emits_once() {
        let (group, _) = pair();
        let values = collect(group.data_value_changed());

        let value = Value::Tuple(vec![Value::Bool(true), Value::Int(5)]);
        group.set_data_value(&value).unwrap();

        assert_eq!(group.data_value().unwrap(), value);
        assert_eq!(*values.lock(), vec![value]);
    }

    #[test]
    fn test_child_change_is_reemitted() {
        let (group, flag) = pair();
        group
            .set_data_value(&Value::Tuple(vec![Value::Bool(false), Value::Int(2)]))
            .unwrap();
        let values = collect(group.data_value_changed());

        flag.click();
        assert_eq!(
            *values.lock(),
            vec![Value::Tuple(vec![Value::Bool(true), Value::Int(2)])]
        );
    }

    #[test]
    fn test_incomplete_tuple_is_not_emitted() {
        // The integer element starts empty, so the tuple cannot be read yet
        let (group, flag) = pair();
        let values = collect(group.data_value_changed());
        flag.click();
        assert!(values.lock().is_empty());
        assert!(group.data_value().is_err());
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let (group, _) = pair();
        assert!(group.set_data_value(&Value::Tuple(vec![Value::Bool(true)])).is_err());
        assert!(group.set_data_value(&Value::Int(1)).is_err());
        assert!(
            group
                .set_data_value(&Value::Tuple(vec![Value::Int(1), Value::Int(2)]))
                .is_err()
        );
    }

    #[test]
    fn test_rejected_tuple_leaves_children_alone() {
        let count: Arc<dyn DataWidget> = Arc::new(IntLineEdit::new(IntRange::I64));
        let ratio: Arc<dyn DataWidget> = Arc::new(FloatLineEdit::new(None, FloatNotation::Standard));
        let group = TupleGroupBox::new(
            vec![FieldType::Int(IntRange::I64), FieldType::Float],
            vec![count, ratio],
        );
        let before = Value::Tuple(vec![Value::Int(1), Value::Float(1.5)]);
        group.set_data_value(&before).unwrap();
        let values = collect(group.data_value_changed());

        let bad = Value::Tuple(vec![Value::Int(2), Value::Float(f64::NAN)]);
        assert!(group.set_data_value(&bad).is_err());

        assert_eq!(group.data_value().unwrap(), before);
        assert!(values.lock().is_empty());
    }
}
