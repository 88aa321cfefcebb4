//! TabRecordWidget container implementation.
//!
//! This module provides [`TabRecordWidget`], a container holding one labelled
//! tab per record type.
//!
//! # Example
//!
//! ```
//! use horizon_dataform::prelude::*;
//!
//! #[derive(Record)]
//! struct General {
//!     name: String,
//! }
//!
//! #[derive(Record)]
//! struct Advanced {
//!     #[field(default = 4)]
//!     threads: u8,
//! }
//!
//! let tabs = TabRecordWidget::new();
//! tabs.add_record::<General>("General").unwrap();
//! tabs.add_record::<Advanced>("Advanced").unwrap();
//!
//! assert_eq!(tabs.tab_text(1).as_deref(), Some("Advanced"));
//! assert_eq!(tabs.index_of_record::<Advanced>(), 1);
//! ```

use std::sync::Arc;

use horizon_dataform_core::{Record, RecordSchema, RecordValue, Signal};

use crate::config::FormConfig;
use crate::error::Result;
use crate::widget::factory::{DefaultWidgetFactory, WidgetFactory};

use super::RecordWidget;
use super::record_pages::RecordPages;

/// A container of record widgets, one labelled tab per record type.
///
/// # Signals
///
/// - `data_value_changed(RecordValue)`: Forwards the current tab's record
///   notification. Changes on other tabs are not forwarded.
/// - `current_changed(i32)`: Emitted when the current tab changes
pub struct TabRecordWidget {
    pages: Arc<RecordPages>,
}

impl Default for TabRecordWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRecordWidget {
    /// Create an empty tab widget using the default widget factory.
    pub fn new() -> Self {
        Self::with_factory(DefaultWidgetFactory::default())
    }

    /// Create an empty tab widget whose tabs are built with the given configuration.
    pub fn with_config(config: FormConfig) -> Self {
        Self::with_factory(DefaultWidgetFactory::new(config))
    }

    /// Create an empty tab widget whose tabs are built by `factory`.
    pub fn with_factory(factory: impl WidgetFactory + 'static) -> Self {
        Self {
            pages: RecordPages::new(Box::new(factory)),
        }
    }

    // =========================================================================
    // Tab Management
    // =========================================================================

    /// Build and add a record widget for `schema` under the tab `label`.
    ///
    /// Fails with [`DuplicateRecordType`](crate::DataformError::DuplicateRecordType)
    /// if a tab already holds this record type.
    pub fn add_record_widget(
        &self,
        schema: RecordSchema,
        label: impl Into<String>,
    ) -> Result<Arc<RecordWidget>> {
        let widget = RecordWidget::from_schema_with(schema, self.pages.factory())?;
        self.add_tab(widget.clone(), label)?;
        Ok(widget)
    }

    /// Build and add a record widget for a `Record` type.
    pub fn add_record<T: Record>(&self, label: impl Into<String>) -> Result<Arc<RecordWidget>> {
        self.add_record_widget(T::schema(), label)
    }

    /// Add an existing record widget as a tab.
    ///
    /// Returns the index of the new tab.
    pub fn add_tab(&self, widget: Arc<RecordWidget>, label: impl Into<String>) -> Result<i32> {
        self.pages.add(widget, label.into())
    }

    /// Get the number of tabs.
    pub fn count(&self) -> i32 {
        self.pages.count()
    }

    /// Find the tab index of a record type.
    ///
    /// Returns -1 if the type has no tab.
    pub fn index_of(&self, type_name: &str) -> i32 {
        self.pages.index_of(type_name)
    }

    /// Find the tab index of a `Record` type.
    pub fn index_of_record<T: Record>(&self) -> i32 {
        self.index_of(T::schema().type_name())
    }

    /// Find the index of a record widget.
    ///
    /// Returns -1 if the widget is not in a tab.
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
    // Current Tab
    // =========================================================================

    /// Get the current tab index (-1 if there are no tabs).
    pub fn current_index(&self) -> i32 {
        self.pages.current_index()
    }

    /// Set the current tab index.
    ///
    /// Returns `true` if the index changed.
    pub fn set_current_index(&self, index: i32) -> bool {
        self.pages.set_current_index(index)
    }

    /// Get the record widget of the current tab.
    pub fn current_widget(&self) -> Option<Arc<RecordWidget>> {
        self.widget(self.current_index())
    }

    /// Make the tab of a `Record` type current.
    pub fn set_current_record<T: Record>(&self) -> bool {
        self.set_current_index(self.index_of_record::<T>())
    }

    /// Read the current tab's record.
    pub fn current_value(&self) -> Option<Result<RecordValue>> {
        self.current_widget().map(|widget| widget.data_value())
    }

    // =========================================================================
    // Tab Properties
    // =========================================================================

    /// Get the label of a tab.
    pub fn tab_text(&self, index: i32) -> Option<String> {
        self.pages.label(index)
    }

    /// Set the label of a tab. Returns `false` if there is no such tab.
    pub fn set_tab_text(&self, index: i32, text: impl Into<String>) -> bool {
        self.pages.set_label(index, text.into())
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Signal forwarding the current tab's record notifications.
    pub fn data_value_changed(&self) -> &Signal<RecordValue> {
        &self.pages.data_value_changed
    }

    /// Signal emitted when the current tab changes.
    pub fn current_changed(&self) -> &Signal<i32> {
        &self.pages.current_changed
    }
}

static_assertions::assert_impl_all!(TabRecordWidget: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataformError;
    use horizon_dataform_core::{FieldSchema, FieldType, IntRange, Value};
    use parking_lot::Mutex;

    fn schema(type_name: &str) -> RecordSchema {
        RecordSchema::new(type_name).with_field(
            FieldSchema::new("level", FieldType::Int(IntRange::I64)).with_default(Value::Int(1)),
        )
    }

    #[test]
    fn test_tab_labels() {
        let tabs = TabRecordWidget::new();
        tabs.add_record_widget(schema("A"), "First").unwrap();
        tabs.add_record_widget(schema("B"), "Second").unwrap();

        assert_eq!(tabs.tab_text(0).as_deref(), Some("First"));
        assert!(tabs.set_tab_text(1, "Renamed"));
        assert_eq!(tabs.tab_text(1).as_deref(), Some("Renamed"));
        assert!(!tabs.set_tab_text(2, "Missing"));
        assert_eq!(tabs.tab_text(-1), None);
    }

    #[test]
    fn test_index_of_and_duplicates() {
        let tabs = TabRecordWidget::new();
        tabs.add_record_widget(schema("A"), "A").unwrap();
        assert_eq!(tabs.index_of("A"), 0);
        assert_eq!(tabs.index_of("B"), -1);
        assert!(matches!(
            tabs.add_record_widget(schema("A"), "Again"),
            Err(DataformError::DuplicateRecordType(_))
        ));
    }

    #[test]
    fn test_switching_tabs_does_not_emit_value() {
        let tabs = TabRecordWidget::new();
        tabs.add_record_widget(schema("A"), "A").unwrap();
        tabs.add_record_widget(schema("B"), "B").unwrap();

        let values = Arc::new(Mutex::new(0));
        let values_clone = values.clone();
        tabs.data_value_changed().connect(move |_| *values_clone.lock() += 1);
        let switches = Arc::new(Mutex::new(Vec::new()));
        let switches_clone = switches.clone();
        tabs.current_changed().connect(move |&i| switches_clone.lock().push(i));

        tabs.set_current_index(1);
        tabs.set_current_index(0);

        assert_eq!(*values.lock(), 0);
        assert_eq!(*switches.lock(), vec![1, 0]);
        assert_eq!(
            tabs.current_value().unwrap().unwrap().get("level"),
            Some(&Value::Int(1))
        );
    }
}
