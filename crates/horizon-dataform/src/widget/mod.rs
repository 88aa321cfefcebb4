//! Form control system for Horizon Dataform.
//!
//! This module provides the data-bound control architecture:
//!
//! - [`DataWidget`] trait: The common interface of every form control
//! - [`factory`]: The type-to-widget dispatcher
//! - [`validator`]: Keystroke validation for text entries
//! - [`widgets`]: The controls, the record widget and the multi-record containers
//!
//! # Overview
//!
//! Controls are headless: they hold state, validate input and emit signals
//! the way the corresponding toolkit widgets do, but they do not render.
//! Each control is created behind an `Arc<dyn DataWidget>` so composite
//! widgets (tuple group boxes, record widgets) can own their children and
//! subscribe to them through weak references.
//!
//! Every control exchanges its content as a dynamic [`Value`]:
//!
//! ```
//! use horizon_dataform::prelude::*;
//! use horizon_dataform::widget::factory::type_to_widget;
//!
//! let widget = type_to_widget(&FieldType::Bool).unwrap();
//! widget.set_data_value(&Value::Bool(true)).unwrap();
//! assert_eq!(widget.data_value().unwrap(), Value::Bool(true));
//! ```

use std::any::Any;
use std::sync::Arc;

use horizon_dataform_core::{FieldType, Signal, Value, ValueError, ValueResult};

use crate::error::Result;

pub mod factory;
pub mod validator;
pub mod widgets;

/// The common interface of form controls.
///
/// Methods take `&self`; controls keep their state behind interior
/// mutability so they can be shared as `Arc` handles and driven from slots.
pub trait DataWidget: Send + Sync + 'static {
    /// The name shown with the control (checkbox text, line edit placeholder,
    /// group box title).
    fn data_name(&self) -> String;

    /// Set the name shown with the control.
    fn set_data_name(&self, name: &str);

    /// Read the current value of the control.
    ///
    /// Fails with [`DataformError::InvalidInput`](crate::DataformError::InvalidInput)
    /// when the control holds incomplete or invalid input.
    fn data_value(&self) -> Result<Value>;

    /// Replace the current value of the control.
    fn set_data_value(&self, value: &Value) -> Result<()>;

    /// Emitted with the new value whenever the control's value changes.
    fn data_value_changed(&self) -> &Signal<Value>;

    /// Get this as `Any` for downcasting to the concrete control.
    fn as_any(&self) -> &dyn Any;
}

/// Check that a control built for `field_type` can show `value`.
///
/// On top of the type check, non-finite floats are refused anywhere inside
/// the value since no float entry can display them.
pub(crate) fn check_editable(field_type: &FieldType, value: &Value) -> ValueResult<()> {
    field_type.check(value)?;
    reject_non_finite(value)
}

fn reject_non_finite(value: &Value) -> ValueResult<()> {
    match value {
        Value::Float(number) if !number.is_finite() => Err(ValueError::conversion(format!(
            "{number} cannot be edited as text"
        ))),
        Value::Tuple(items) | Value::List(items) => items.iter().try_for_each(reject_non_finite),
        Value::Record(record) => record
            .iter()
            .try_for_each(|(_, item)| reject_non_finite(item)),
        _ => Ok(()),
    }
}

/// Downcast a shared control to its concrete type.
///
/// ```
/// use horizon_dataform::prelude::*;
/// use horizon_dataform::widget::{downcast, factory::type_to_widget};
///
/// let widget = type_to_widget(&FieldType::Str).unwrap();
/// assert!(downcast::<StrLineEdit>(&widget).is_some());
/// assert!(downcast::<BoolCheckBox>(&widget).is_none());
/// ```
pub fn downcast<T: DataWidget>(widget: &Arc<dyn DataWidget>) -> Option<&T> {
    widget.as_any().downcast_ref::<T>()
}
