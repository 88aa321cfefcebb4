//! Core systems for Horizon Dataform.
//!
//! This crate provides the foundational components of the Horizon Dataform
//! form builder:
//!
//! - **Signal/Slot System**: Type-safe change notification between controls
//! - **Property System**: Change-detecting state cells for controls
//! - **Values**: Dynamic field values and record values
//! - **Schemas**: Record schemas with field types, defaults and display metadata
//! - **Records**: The `Record`, `Choice` and `FieldKind` traits
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_dataform_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Record Example
//!
//! ```
//! use horizon_dataform_core::{FieldKind, FieldType, Value};
//!
//! // Tuples map to fixed-size tuple fields
//! let ty = <(bool, i32)>::field_type();
//! assert!(matches!(ty, FieldType::Tuple(ref items) if items.len() == 2));
//! assert_eq!((true, 5i32).to_value(), Value::Tuple(vec![Value::Bool(true), Value::Int(5)]));
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod record;
pub mod schema;
pub mod signal;
pub mod value;

pub use error::{ValueError, ValueResult};
pub use property::Property;
pub use record::{Choice, FieldKind, Record, choice_from_value, converter, expect_record_type, take_field};
pub use schema::{ChoiceSpec, ChoiceVariant, Converter, FieldSchema, FieldType, IntRange, RecordSchema};
pub use signal::{ConnectionId, Signal, SignalBlocker};
pub use value::{RecordValue, Value};
