//! Standard form controls for Horizon Dataform.
//!
//! This module provides the controls the widget factory builds:
//!
//! - [`BoolCheckBox`]: Check box for boolean fields, tri-state when optional
//! - [`IntLineEdit`], [`FloatLineEdit`], [`StrLineEdit`]: Validated text entries
//! - [`EnumComboBox`]: Combo box over the variants of a choice
//! - [`TupleGroupBox`]: Group of child controls for a fixed-size tuple
//! - [`RecordWidget`]: One control per field of a record
//! - [`StackedRecordWidget`], [`TabRecordWidget`]: Containers of record widgets

mod checkbox;
mod combo_box;
mod group_box;
mod line_edit;
mod record_pages;
mod record_widget;
mod stacked_widget;
mod tab_widget;

pub use checkbox::{BoolCheckBox, CheckState};
pub use combo_box::EnumComboBox;
pub use group_box::TupleGroupBox;
pub use line_edit::{FloatLineEdit, IntLineEdit, LineEdit, StrLineEdit};
pub use record_widget::RecordWidget;
pub use stacked_widget::StackedRecordWidget;
pub use tab_widget::TabRecordWidget;
