//! Page bookkeeping shared by the stacked and tabbed record containers.

use std::sync::{Arc, Weak};

use horizon_dataform_core::logging::targets;
use horizon_dataform_core::{Property, RecordValue, Signal};
use parking_lot::RwLock;

use crate::error::{DataformError, Result};
use crate::widget::factory::WidgetFactory;

use super::RecordWidget;

/// One record widget and its label.
struct Page {
    type_name: String,
    label: String,
    widget: Arc<RecordWidget>,
}

/// An ordered set of record widgets, at most one per record type, with one
/// of them current.
pub(crate) struct RecordPages {
    /// Factory used to build the record widgets.
    factory: Box<dyn WidgetFactory>,

    /// Pages in insertion order.
    pages: RwLock<Vec<Page>>,

    /// Index of the current page (-1 when empty).
    current: Property<i32>,

    /// Forwards the current page's record notifications.
    pub(crate) data_value_changed: Signal<RecordValue>,

    /// Emitted when the current page changes.
    pub(crate) current_changed: Signal<i32>,
}

impl RecordPages {
    pub(crate) fn new(factory: Box<dyn WidgetFactory>) -> Arc<Self> {
        Arc::new(Self {
            factory,
            pages: RwLock::new(Vec::new()),
            current: Property::new(-1),
            data_value_changed: Signal::new(),
            current_changed: Signal::new(),
        })
    }

    pub(crate) fn factory(&self) -> &dyn WidgetFactory {
        self.factory.as_ref()
    }

    /// Append a record widget under `label`, returning its index.
    ///
    /// The first page added becomes current.
    pub(crate) fn add(self: &Arc<Self>, widget: Arc<RecordWidget>, label: String) -> Result<i32> {
        let type_name = widget.type_name().to_string();
        let index = {
            let mut pages = self.pages.write();
            if pages.iter().any(|page| page.type_name == type_name) {
                return Err(DataformError::DuplicateRecordType(type_name));
            }
            pages.push(Page {
                type_name: type_name.clone(),
                label,
                widget: widget.clone(),
            });
            (pages.len() - 1) as i32
        };

        let this: Weak<Self> = Arc::downgrade(self);
        widget.data_value_changed().connect(move |record| {
            if let Some(pages) = this.upgrade() {
                pages.on_page_changed(index, record);
            }
        });

        tracing::debug!(target: targets::CONTAINER, %type_name, index, "record page added");

        if self.current.get() < 0 {
            self.set_current_index(index);
        }
        Ok(index)
    }

    pub(crate) fn count(&self) -> i32 {
        self.pages.read().len() as i32
    }

    pub(crate) fn index_of(&self, type_name: &str) -> i32 {
        self.pages
            .read()
            .iter()
            .position(|page| page.type_name == type_name)
            .map_or(-1, |i| i as i32)
    }

    pub(crate) fn index_of_widget(&self, widget: &Arc<RecordWidget>) -> i32 {
        self.pages
            .read()
            .iter()
            .position(|page| Arc::ptr_eq(&page.widget, widget))
            .map_or(-1, |i| i as i32)
    }

    pub(crate) fn widget(&self, index: i32) -> Option<Arc<RecordWidget>> {
        let index = usize::try_from(index).ok()?;
        self.pages.read().get(index).map(|page| page.widget.clone())
    }

    pub(crate) fn label(&self, index: i32) -> Option<String> {
        let index = usize::try_from(index).ok()?;
        self.pages.read().get(index).map(|page| page.label.clone())
    }

    /// Replace a page label. Returns `false` if there is no such page.
    pub(crate) fn set_label(&self, index: i32, label: String) -> bool {
        let Ok(index) = usize::try_from(index) else {
            return false;
        };
        match self.pages.write().get_mut(index) {
            Some(page) => {
                page.label = label;
                true
            }
            None => false,
        }
    }

    pub(crate) fn current_index(&self) -> i32 {
        self.current.get()
    }

    /// Make the page at `index` current.
    ///
    /// Returns `true` if the current page changed. Out-of-range indices are
    /// ignored.
    pub(crate) fn set_current_index(&self, index: i32) -> bool {
        if index < 0 || index >= self.count() {
            return false;
        }
        if self.current.set(index) {
            tracing::trace!(target: targets::CONTAINER, index, "current page changed");
            self.current_changed.emit(index);
            true
        } else {
            false
        }
    }

    fn on_page_changed(&self, index: i32, record: &RecordValue) {
        if index == self.current.get() {
            self.data_value_changed.emit(record.clone());
        } else {
            tracing::trace!(
                target: targets::CONTAINER,
                index,
                type_name = record.type_name(),
                "inactive page changed, not forwarded"
            );
        }
    }
}
