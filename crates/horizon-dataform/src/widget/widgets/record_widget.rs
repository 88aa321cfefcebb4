//! Record widget: one control per field of a record type.
//!
//! A [`RecordWidget`] is built from a [`RecordSchema`], normally the one a
//! `#[derive(Record)]` struct provides. It reads the controls back into a
//! record, pushes records into the controls, and re-emits every single
//! control change as a freshly assembled record.
//!
//! # Example
//!
//! ```
//! use horizon_dataform::prelude::*;
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Flags {
//!     flag: bool,
//!     count: i32,
//! }
//!
//! let widget = RecordWidget::from_record::<Flags>().unwrap();
//! widget.set_value(&Flags { flag: true, count: 5 }).unwrap();
//! assert_eq!(widget.value::<Flags>().unwrap(), Flags { flag: true, count: 5 });
//! ```

use std::any::Any;
use std::sync::{Arc, Weak};

use horizon_dataform_core::logging::targets;
use horizon_dataform_core::{
    FieldSchema, Property, Record, RecordSchema, RecordValue, Signal, Value, ValueError,
};

use crate::error::{DataformError, Result};
use crate::widget::{DataWidget, check_editable};
use crate::widget::factory::{DefaultWidgetFactory, WidgetFactory};

/// A form editing one record, with one control per field in declared order.
///
/// The set of controls is fixed at construction.
///
/// # Signals
///
/// - `data_value_changed()`: Emitted with the whole record when a single
///   control's value changes. Nothing is emitted if the record cannot be
///   assembled (another field holds incomplete input).
pub struct RecordWidget {
    /// The record schema the controls were built from.
    schema: RecordSchema,

    /// The group title, also the data name.
    title: Property<String>,

    /// One control per field, in declared order.
    widgets: Vec<(String, Arc<dyn DataWidget>)>,

    /// Change notification carrying the record.
    record_changed: Signal<RecordValue>,

    /// The same notification as a dynamic value, for nesting.
    value_changed: Signal<Value>,
}

impl RecordWidget {
    /// Build a record widget with the default factory.
    pub fn from_schema(schema: RecordSchema) -> Result<Arc<Self>> {
        Self::from_schema_with(schema, &DefaultWidgetFactory::default())
    }

    /// Build a record widget for a `Record` type with the default factory.
    pub fn from_record<T: Record>() -> Result<Arc<Self>> {
        Self::from_schema(T::schema())
    }

    /// Build a record widget, creating each field's control with `factory`.
    ///
    /// Fails with [`DataformError::UnsupportedFieldType`] if any field has no
    /// control.
    pub fn from_schema_with<F>(schema: RecordSchema, factory: &F) -> Result<Arc<Self>>
    where
        F: WidgetFactory + ?Sized,
    {
        let widgets = schema
            .fields()
            .iter()
            .map(|field| Ok((field.name().to_string(), factory.create_field_widget(field)?)))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            target: targets::RECORD,
            type_name = schema.type_name(),
            fields = widgets.len(),
            "record widget created"
        );

        Ok(Arc::new_cyclic(|this: &Weak<Self>| {
            for (name, widget) in &widgets {
                let this = this.clone();
                let name = name.clone();
                widget.data_value_changed().connect(move |_| {
                    if let Some(record) = this.upgrade() {
                        record.on_field_changed(&name);
                    }
                });
            }

            Self {
                schema,
                title: Property::new(String::new()),
                widgets,
                record_changed: Signal::new(),
                value_changed: Signal::new(),
            }
        }))
    }

    /// The record schema.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// The record type name.
    pub fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    /// Get the control for a field.
    pub fn widget(&self, name: &str) -> Option<&Arc<dyn DataWidget>> {
        self.widgets
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, widget)| widget)
    }

    /// Iterate over `(field name, control)` pairs in declared order.
    pub fn widgets(&self) -> impl Iterator<Item = (&str, &Arc<dyn DataWidget>)> {
        self.widgets
            .iter()
            .map(|(name, widget)| (name.as_str(), widget))
    }

    /// Get the title.
    pub fn title(&self) -> String {
        self.title.get()
    }

    /// Set the title.
    pub fn set_title(&self, title: impl Into<String>) {
        self.title.set(title.into());
    }

    /// Signal emitted with the whole record when one control changes.
    pub fn data_value_changed(&self) -> &Signal<RecordValue> {
        &self.record_changed
    }

    /// Read every control and assemble a record.
    ///
    /// Each control value passes through the field's `from_display`
    /// converter and is checked against the field type.
    pub fn data_value(&self) -> Result<RecordValue> {
        let mut record = RecordValue::new(self.schema.type_name());
        for (field, (name, widget)) in self.schema.fields().iter().zip(&self.widgets) {
            let display = widget.data_value().map_err(|err| err.or_field(name))?;
            let value = field
                .from_display(display)
                .and_then(|value| field.field_type().check(&value).map(|()| value))
                .map_err(|err| DataformError::invalid_value(name.as_str(), err))?;
            record.set(name.as_str(), value);
        }
        Ok(record)
    }

    /// Read the controls into a `Record` instance.
    pub fn value<T: Record>(&self) -> Result<T> {
        T::from_record_value(self.data_value()?)
            .map_err(|err| DataformError::invalid_value(self.schema.type_name(), err))
    }

    /// Push a record into the controls.
    ///
    /// Every field is converted and checked against its control first;
    /// controls are only touched once the whole record has been accepted. If
    /// a control still refuses its value, the controls already written are
    /// restored. No change notification is emitted. Fields missing from
    /// `value` keep their current control state.
    pub fn set_data_value(&self, value: &RecordValue) -> Result<()> {
        if value.type_name() != self.schema.type_name() {
            return Err(DataformError::invalid_value(
                self.schema.type_name(),
                ValueError::RecordMismatch {
                    expected: self.schema.type_name().to_string(),
                    got: value.type_name().to_string(),
                },
            ));
        }

        let updates = value
            .iter()
            .map(|(name, field_value)| {
                let field = self
                    .schema
                    .field(name)
                    .ok_or_else(|| DataformError::UnknownField(name.to_string()))?;
                let display = Self::to_display(field, field_value.clone())?;
                Ok((name, display))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            target: targets::RECORD,
            type_name = self.schema.type_name(),
            fields = updates.len(),
            "pushing record into controls"
        );

        let mut written = Vec::with_capacity(updates.len());
        for (name, display) in &updates {
            let previous = self.widget(name).and_then(|widget| widget.data_value().ok());
            written.push((*name, previous));
            if let Err(err) = self.push(name, display) {
                self.restore(written);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Push a `Record` instance into the controls.
    pub fn set_value<T: Record>(&self, value: &T) -> Result<()> {
        self.set_data_value(&value.to_record_value())
    }

    /// Push a single field value into its control, without notification.
    pub fn set_field_value(&self, name: &str, value: Value) -> Result<()> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| DataformError::UnknownField(name.to_string()))?;
        let display = Self::to_display(field, value)?;
        self.push(name, &display)
    }

    fn to_display(field: &FieldSchema, value: Value) -> Result<Value> {
        field
            .field_type()
            .check(&value)
            .and_then(|()| field.to_display(value))
            .and_then(|display| check_editable(field.effective_type(), &display).map(|()| display))
            .map_err(|err| DataformError::invalid_value(field.name(), err))
    }

    fn restore(&self, written: Vec<(&str, Option<Value>)>) {
        for (name, previous) in written.into_iter().rev() {
            let restored = match previous {
                Some(previous) => self.push(name, &previous),
                None => Ok(()),
            };
            if let Err(err) = restored {
                tracing::trace!(target: targets::RECORD, field = name, %err, "control not restored");
            }
        }
    }

    fn push(&self, name: &str, display: &Value) -> Result<()> {
        let widget = self
            .widget(name)
            .ok_or_else(|| DataformError::UnknownField(name.to_string()))?;
        let _blocker = widget.data_value_changed().block();
        widget
            .set_data_value(display)
            .map_err(|err| err.or_field(name))
    }

    fn on_field_changed(&self, name: &str) {
        match self.data_value() {
            Ok(record) => {
                tracing::trace!(target: targets::RECORD, field = name, %record, "record changed");
                self.record_changed.emit(record.clone());
                self.value_changed.emit(Value::Record(record));
            }
            Err(err) => tracing::warn!(
                target: targets::RECORD,
                type_name = self.schema.type_name(),
                field = name,
                %err,
                "field changed but record cannot be assembled"
            ),
        }
    }
}

impl DataWidget for RecordWidget {
    fn data_name(&self) -> String {
        self.title()
    }

    fn set_data_name(&self, name: &str) {
        self.set_title(name);
    }

    fn data_value(&self) -> Result<Value> {
        RecordWidget::data_value(self).map(Value::Record)
    }

    fn set_data_value(&self, value: &Value) -> Result<()> {
        match value {
            Value::Record(record) => RecordWidget::set_data_value(self, record),
            other => Err(DataformError::invalid_value(
                self.title(),
                ValueError::type_mismatch(self.schema.type_name(), other.kind_name()),
            )),
        }
    }

    fn data_value_changed(&self) -> &Signal<Value> {
        &self.value_changed
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(RecordWidget: Send, Sync);
