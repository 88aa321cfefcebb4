//! Horizon Dataform - form widgets generated from record types.
//!
//! This is the main crate that re-exports all public APIs. A struct deriving
//! [`Record`](macro@Record) describes its fields; the widget factory maps
//! each field type to an editable control and a [`RecordWidget`] composes one
//! control per field.
//!
//! # Example
//!
//! ```
//! use horizon_dataform::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Choice)]
//! enum Shape {
//!     Circle,
//!     Square,
//! }
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Settings {
//!     shape: Shape,
//!     #[field(default = 5)]
//!     count: i32,
//!     visible: bool,
//! }
//!
//! fn main() -> horizon_dataform::Result<()> {
//!     let form = RecordWidget::from_record::<Settings>()?;
//!     form.data_value_changed().connect(|record| {
//!         println!("settings changed: {}", record);
//!     });
//!
//!     form.set_value(&Settings { shape: Shape::Square, count: 3, visible: true })?;
//!     assert_eq!(form.value::<Settings>()?.count, 3);
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! Every component logs through `tracing` under the targets in
//! [`logging::targets`]. Install a subscriber such as `tracing-subscriber` to
//! see them.

pub use horizon_dataform_core::*;
pub use horizon_dataform_macros::*;

pub mod config;
mod error;
pub mod prelude;
pub mod widget;

pub use config::FormConfig;
pub use error::{DataformError, Result};
pub use widget::DataWidget;
pub use widget::factory::{DefaultWidgetFactory, WidgetFactory, type_to_widget};
pub use widget::validator::FloatNotation;
pub use widget::widgets::{RecordWidget, StackedRecordWidget, TabRecordWidget};
