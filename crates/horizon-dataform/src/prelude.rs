//! Prelude module for Horizon Dataform.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use horizon_dataform::prelude::*;
//! ```
//!
//! This provides access to:
//! - Record definitions (`Record`, `Choice` derives and traits, `RecordSchema`)
//! - Dynamic values (`Value`, `RecordValue`, `FieldType`)
//! - Signal/slot system (`Signal`)
//! - Controls, the record widget and its containers

// ============================================================================
// Records and Values
// ============================================================================

pub use crate::{Choice, FieldKind, Record};
pub use crate::{ChoiceSpec, FieldSchema, FieldType, IntRange, RecordSchema};
pub use crate::{RecordValue, Value};

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::{ConnectionId, Property, Signal};

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::DataWidget;
pub use crate::widget::factory::{DefaultWidgetFactory, WidgetFactory};

// ============================================================================
// Controls
// ============================================================================

pub use crate::widget::widgets::{
    BoolCheckBox, CheckState, EnumComboBox, FloatLineEdit, IntLineEdit, StrLineEdit,
    TupleGroupBox,
};

// ============================================================================
// Record Widgets
// ============================================================================

pub use crate::widget::widgets::{RecordWidget, StackedRecordWidget, TabRecordWidget};

// ============================================================================
// Errors and Configuration
// ============================================================================

pub use crate::{DataformError, FormConfig};
