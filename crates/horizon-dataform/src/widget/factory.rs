//! The type-to-widget dispatcher.
//!
//! A [`WidgetFactory`] turns a [`FieldType`] into a control:
//!
//! | field type | control |
//! |---|---|
//! | `Choice` | [`EnumComboBox`] |
//! | `Bool` | [`BoolCheckBox`] (tri-state when optional) |
//! | `Int` | [`IntLineEdit`] over the integer's range |
//! | `Float` | [`FloatLineEdit`] |
//! | `Str` | [`StrLineEdit`] |
//! | `Tuple` | [`TupleGroupBox`] of recursively built children |
//! | `Record` | nested [`RecordWidget`] |
//!
//! The scalar kinds may be wrapped in one `Optional`. Anything else fails with
//! [`DataformError::UnsupportedFieldType`].
//!
//! Implement [`WidgetFactory`] to replace the mapping for some types; the
//! default methods call back into the factory for tuple elements and record
//! fields, so overrides apply at any depth.

use std::sync::Arc;

use horizon_dataform_core::logging::targets;
use horizon_dataform_core::{FieldSchema, FieldType};

use crate::config::FormConfig;
use crate::error::{DataformError, Result};
use crate::widget::DataWidget;
use crate::widget::widgets::{
    BoolCheckBox, CheckState, EnumComboBox, FloatLineEdit, IntLineEdit, RecordWidget,
    StrLineEdit, TupleGroupBox,
};

/// Builds controls for field types.
pub trait WidgetFactory: Send + Sync {
    /// The configuration applied to built controls.
    fn config(&self) -> &FormConfig;

    /// Build a control for a field type.
    fn create_widget(&self, field_type: &FieldType) -> Result<Arc<dyn DataWidget>> {
        default_create_widget(self, field_type)
    }

    /// Build the control for a record field.
    ///
    /// Dispatches on the field's display type, names the control after the
    /// field and pushes the field default into it.
    fn create_field_widget(&self, field: &FieldSchema) -> Result<Arc<dyn DataWidget>> {
        default_create_field_widget(self, field)
    }
}

/// The factory used unless another is given.
#[derive(Debug, Clone, Default)]
pub struct DefaultWidgetFactory {
    config: FormConfig,
}

impl DefaultWidgetFactory {
    /// Create a factory with the given configuration.
    pub fn new(config: FormConfig) -> Self {
        Self { config }
    }
}

impl WidgetFactory for DefaultWidgetFactory {
    fn config(&self) -> &FormConfig {
        &self.config
    }
}

/// Build a control for `field_type` with the default factory.
pub fn type_to_widget(field_type: &FieldType) -> Result<Arc<dyn DataWidget>> {
    DefaultWidgetFactory::default().create_widget(field_type)
}

/// The standard type-to-control mapping, used by [`WidgetFactory::create_widget`].
pub fn default_create_widget<F>(factory: &F, field_type: &FieldType) -> Result<Arc<dyn DataWidget>>
where
    F: WidgetFactory + ?Sized,
{
    let config = factory.config();
    let (inner, nullable) = match field_type {
        FieldType::Optional(inner) => (inner.as_ref(), true),
        other => (other, false),
    };

    let widget: Arc<dyn DataWidget> = match inner {
        FieldType::Choice(spec) if !spec.variants.is_empty() => {
            Arc::new(EnumComboBox::new(spec.clone()).with_nullable(nullable))
        }
        FieldType::Bool => {
            // An optional flag starts out unset
            let initial = if nullable {
                CheckState::PartiallyChecked
            } else {
                CheckState::Unchecked
            };
            Arc::new(
                BoolCheckBox::new("")
                    .with_tri_state(nullable)
                    .with_check_state(initial),
            )
        }
        FieldType::Int(range) => Arc::new(
            IntLineEdit::new(*range)
                .with_nullable(nullable)
                .with_empty_value(config.empty_int_default),
        ),
        FieldType::Float => Arc::new(
            FloatLineEdit::new(config.float_decimals, config.float_notation)
                .with_nullable(nullable)
                .with_empty_value(config.empty_float_default),
        ),
        FieldType::Str => Arc::new(StrLineEdit::new().with_nullable(nullable)),
        FieldType::Tuple(elements) if !nullable && !elements.is_empty() => {
            let children = elements
                .iter()
                .map(|element| factory.create_widget(element))
                .collect::<Result<Vec<_>>>()?;
            TupleGroupBox::new(elements.clone(), children)
        }
        FieldType::Record(schema) if !nullable => {
            RecordWidget::from_schema_with(schema.clone(), factory)?
        }
        _ => {
            tracing::debug!(target: targets::FACTORY, %field_type, "no control for field type");
            return Err(DataformError::unsupported(field_type));
        }
    };

    tracing::trace!(target: targets::FACTORY, %field_type, "control created");
    Ok(widget)
}

/// The standard record field setup, used by [`WidgetFactory::create_field_widget`].
pub fn default_create_field_widget<F>(
    factory: &F,
    field: &FieldSchema,
) -> Result<Arc<dyn DataWidget>>
where
    F: WidgetFactory + ?Sized,
{
    let widget = factory.create_widget(field.effective_type())?;

    if factory.config().label_fields {
        widget.set_data_name(field.name());
    }

    if let Some(default) = field.default() {
        let display = field
            .to_display(default.clone())
            .map_err(|err| DataformError::invalid_value(field.name(), err))?;

        // A field default also stands in for empty numeric text
        if let Some(edit) = widget.as_any().downcast_ref::<IntLineEdit>()
            && let Some(value) = display.as_int()
        {
            edit.set_empty_value(Some(value));
        }
        if let Some(edit) = widget.as_any().downcast_ref::<FloatLineEdit>()
            && let Some(value) = display.as_float()
        {
            edit.set_empty_value(Some(value));
        }

        let _blocker = widget.data_value_changed().block();
        widget
            .set_data_value(&display)
            .map_err(|err| err.or_field(field.name()))?;
    }

    tracing::debug!(
        target: targets::FACTORY,
        field = field.name(),
        field_type = %field.field_type(),
        display_type = %field.effective_type(),
        "field control created"
    );
    Ok(widget)
}
