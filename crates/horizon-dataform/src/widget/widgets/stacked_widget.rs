//! StackedRecordWidget container implementation.
//!
//! This module provides [`StackedRecordWidget`], a container holding one
//! [`RecordWidget`] per record type and showing one of them at a time.
//!
//! # Example
//!
//! ```
//! use horizon_dataform::prelude::*;
//!
//! #[derive(Record)]
//! struct Circle {
//!     radius: f64,
//! }
//!
//! #[derive(Record)]
//! struct Square {
//!     side: f64,
//! }
//!
//! let stack = StackedRecordWidget::new();
//! stack.add_record::<Circle>().unwrap();
//! stack.add_record::<Square>().unwrap();
//!
//! assert_eq!(stack.index_of("Square"), 1);
//! assert_eq!(stack.index_of("Triangle"), -1);
//!
//! stack.current_changed().connect(|&index| {
//!     println!("Switched to page: {}", index);
//! });
//! stack.set_current_record::<Square>();
//! ```

use std::sync::Arc;

use horizon_dataform_core::{Record, RecordSchema, RecordValue, Signal};

use crate::config::FormConfig;
use crate::error::Result;
use crate::widget::factory::{DefaultWidgetFactory, WidgetFactory};

use super::RecordWidget;
use super::record_pages::RecordPages;

/// A container of record widgets that shows one page at a time.
///
/// Each record type may be added once. Pages are titled with the record type
/// name unless a name is given.
///
/// # Signals
///
/// - `data_value_changed(RecordValue)`: Forwards the current page's record
///   notification. Changes on other pages are not forwarded.
/// - `current_changed(i32)`: Emitted when the current page changes
pub struct StackedRecordWidget {
    pages: Arc<RecordPages>,
}

impl Default for StackedRecordWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl StackedRecordWidget {
    /// Create an empty stack using the default widget factory.
    pub fn new() -> Self {
        Self::with_factory(DefaultWidgetFactory::default())
    }

    /// Create an empty stack whose pages are built with the given configuration.
    pub fn with_config(config: FormConfig) -> Self {
        Self::with_factory(DefaultWidgetFactory::new(config))
    }

    /// Create an empty stack whose pages are built by `factory`.
    pub fn with_factory(factory: impl WidgetFactory + 'static) -> Self {
        Self {
            pages: RecordPages::new(Box::new(factory)),
        }
    }

    // =========================================================================
    // Page Management
    // =========================================================================

    /// Build and add a record widget for `schema`, titled with its type name.
    pub fn add_record_widget(&self, schema: RecordSchema) -> Result<Arc<RecordWidget>> {
        let name = schema.type_name().to_string();
        self.add_record_widget_named(schema, name)
    }

    /// Build and add a record widget for `schema` with the given title.
    ///
    /// Fails with [`DuplicateRecordType`](crate::DataformError::DuplicateRecordType)
    /// if the stack already holds this record type.
    pub fn add_record_widget_named(
        &self,
        schema: RecordSchema,
        name: impl Into<String>,
    ) -> Result<Arc<RecordWidget>> {
        let widget = RecordWidget::from_schema_with(schema, self.pages.factory())?;
        widget.set_title(name);
        self.add_widget(widget.clone())?;
        Ok(widget)
    }

    /// Build and add a record widget for a `Record` type.
    pub fn add_record<T: Record>(&self) -> Result<Arc<RecordWidget>> {
        self.add_record_widget(T::schema())
    }

    /// Add an existing record widget.
    ///
    /// Returns the index of the new page.
    pub fn add_widget(&self, widget: Arc<RecordWidget>) -> Result<i32> {
        let title = widget.title();
        self.pages.add(widget, title)
    }

    /// Get the number of pages.
    pub fn count(&self) -> i32 {
        self.pages.count()
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Find the page index of a record type.
    ///
    /// Returns -1 if the type is not in the stack.
    pub fn index_of(&self, type_name: &str) -> i32 {
        self.pages.index_of(type_name)
    }

    /// Find the page index of a `Record` type.
    pub fn index_of_record<T: Record>(&self) -> i32 {
        self.index_of(T::schema().type_name())
    }

    /// Find the index of a record widget.
    ///
    /// Returns -1 if the widget is not in the stack.
    pub fn index_of_widget(&self, widget: &Arc<RecordWidget>) -> i32 {
        self.pages.index_of_widget(widget)
    }

    /// Get the record widget at a specific index.
    pub fn widget(&self, index: i32) -> Option<Arc<RecordWidget>> {
        self.pages.widget(index)
    }

    /// Get the record widget for a record type.
    pub fn record_widget(&self, type_name: &str) -> Option<Arc<RecordWidget>> {
        self.widget(self.index_of(type_name))
    }

    // =========================================================================
    // Current Page
    // =========================================================================

    /// Get the current page index.
    ///
    /// Returns -1 if there are no pages.
    pub fn current_index(&self) -> i32 {
        self.pages.current_index()
    }

    /// Set the current page index.
    ///
    /// Returns `true` if the index changed.
    pub fn set_current_index(&self, index: i32) -> bool {
        self.pages.set_current_index(index)
    }

    /// Get the record widget of the current page.
    pub fn current_widget(&self) -> Option<Arc<RecordWidget>> {
        self.widget(self.current_index())
    }

    /// Make the page of a `Record` type current.
    ///
    /// Returns `true` if the index changed.
    pub fn set_current_record<T: Record>(&self) -> bool {
        self.set_current_index(self.index_of_record::<T>())
    }

    /// Read the current page's record.
    pub fn current_value(&self) -> Option<Result<RecordValue>> {
        self.current_widget().map(|widget| widget.data_value())
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Signal forwarding the current page's record notifications.
    pub fn data_value_changed(&self) -> &Signal<RecordValue> {
        &self.pages.data_value_changed
    }

    /// Signal emitted when the current page changes.
    pub fn current_changed(&self) -> &Signal<i32> {
        &self.pages.current_changed
    }
}

static_assertions::assert_impl_all!(StackedRecordWidget: Send, Sync);
