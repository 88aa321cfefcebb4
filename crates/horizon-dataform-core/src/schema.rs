//! Record schemas: field names, field types and display metadata.
//!
//! A [`RecordSchema`] is what a record widget is built from. It is normally
//! produced by `#[derive(Record)]`, but can be assembled by hand for records
//! that only exist at runtime:
//!
//! ```
//! use horizon_dataform_core::{FieldSchema, FieldType, IntRange, RecordSchema, Value};
//!
//! let schema = RecordSchema::new("Point")
//!     .with_field(FieldSchema::new("x", FieldType::Int(IntRange::I64)))
//!     .with_field(FieldSchema::new("y", FieldType::Int(IntRange::I64)).with_default(Value::Int(0)));
//!
//! assert_eq!(schema.fields().len(), 2);
//! assert_eq!(schema.field("y").and_then(|f| f.default()), Some(&Value::Int(0)));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{ValueError, ValueResult};
use crate::value::{RecordValue, Value};

/// Inclusive bounds of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    /// Smallest accepted value.
    pub min: i64,
    /// Largest accepted value.
    pub max: i64,
}

impl IntRange {
    /// The full `i64` range.
    pub const I64: IntRange = IntRange::new(i64::MIN, i64::MAX);

    /// Create a range; the bounds are swapped if given in the wrong order.
    pub const fn new(min: i64, max: i64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Returns `true` if `value` lies within the range.
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One variant of an enumerated choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChoiceVariant {
    /// The variant name, which is what [`Value::Choice`] carries.
    pub name: String,
    /// The text shown in the selectable list.
    pub label: String,
}

/// The set of variants of an enumerated choice type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChoiceSpec {
    /// The enum type name.
    pub type_name: String,
    /// Variants in declaration order.
    pub variants: Vec<ChoiceVariant>,
}

impl ChoiceSpec {
    /// Create a choice spec whose labels equal the variant names.
    pub fn new<I, S>(type_name: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_name: type_name.into(),
            variants: names
                .into_iter()
                .map(|name| {
                    let name = name.into();
                    ChoiceVariant {
                        label: name.clone(),
                        name,
                    }
                })
                .collect(),
        }
    }

    /// Position of the variant with the given name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }

    /// Name of the variant at `index`.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.variants.get(index).map(|v| v.name.as_str())
    }
}

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// `bool`.
    Bool,
    /// Any supported integer type, with its bounds.
    Int(IntRange),
    /// `f32` or `f64`.
    Float,
    /// `String`.
    Str,
    /// A fieldless enum.
    Choice(ChoiceSpec),
    /// `Option<T>`.
    Optional(Box<FieldType>),
    /// A fixed-size heterogeneous tuple.
    Tuple(Vec<FieldType>),
    /// A nested record.
    Record(RecordSchema),
    /// A variable-length sequence such as `Vec<T>`.
    Sequence(Box<FieldType>),
    /// A type with no value mapping, identified by name.
    Opaque(String),
}

impl FieldType {
    /// Wrap this type in [`FieldType::Optional`].
    pub fn optional(self) -> Self {
        FieldType::Optional(Box::new(self))
    }

    /// Returns `true` for [`FieldType::Optional`].
    pub fn is_optional(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }

    /// Check that `value` conforms to this type.
    pub fn check(&self, value: &Value) -> ValueResult<()> {
        match (self, value) {
            (FieldType::Bool, Value::Bool(_)) => Ok(()),
            (FieldType::Int(range), Value::Int(i)) => {
                if range.contains(*i) {
                    Ok(())
                } else {
                    Err(ValueError::OutOfRange {
                        value: *i,
                        min: range.min,
                        max: range.max,
                    })
                }
            }
            (FieldType::Float, Value::Float(_) | Value::Int(_)) => Ok(()),
            (FieldType::Str, Value::Str(_)) => Ok(()),
            (FieldType::Choice(spec), Value::Choice(name)) => {
                if spec.index_of(name).is_some() {
                    Ok(())
                } else {
                    Err(ValueError::UnknownChoice {
                        type_name: spec.type_name.clone(),
                        name: name.clone(),
                    })
                }
            }
            (FieldType::Optional(_), Value::None) => Ok(()),
            (FieldType::Optional(inner), other) => inner.check(other),
            (FieldType::Tuple(types), Value::Tuple(items)) => {
                if types.len() != items.len() {
                    return Err(ValueError::LengthMismatch {
                        expected: types.len(),
                        got: items.len(),
                    });
                }
                types
                    .iter()
                    .zip(items)
                    .try_for_each(|(ty, item)| ty.check(item))
            }
            (FieldType::Record(schema), Value::Record(record)) => schema.validate(record),
            (FieldType::Sequence(inner), Value::List(items)) => {
                items.iter().try_for_each(|item| inner.check(item))
            }
            (FieldType::Opaque(_), _) => Ok(()),
            (expected, got) => Err(ValueError::type_mismatch(expected.to_string(), got.kind_name())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Bool => write!(f, "bool"),
            FieldType::Int(_) => write!(f, "int"),
            FieldType::Float => write!(f, "float"),
            FieldType::Str => write!(f, "str"),
            FieldType::Choice(spec) => write!(f, "{}", spec.type_name),
            FieldType::Optional(inner) => write!(f, "Option<{inner}>"),
            FieldType::Tuple(types) => {
                write!(f, "(")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                write!(f, ")")
            }
            FieldType::Record(schema) => write!(f, "{}", schema.type_name()),
            FieldType::Sequence(inner) => write!(f, "[{inner}]"),
            FieldType::Opaque(name) => write!(f, "{name}"),
        }
    }
}

/// A one-directional value conversion between a control and a field.
#[derive(Clone)]
pub struct Converter(Arc<dyn Fn(Value) -> ValueResult<Value> + Send + Sync>);

impl Converter {
    /// Wrap a conversion function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> ValueResult<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Apply the conversion.
    pub fn convert(&self, value: Value) -> ValueResult<Value> {
        (self.0)(value)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Converter(..)")
    }
}

/// A single field of a record schema.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: String,
    field_type: FieldType,
    default: Option<Value>,
    display: Option<FieldType>,
    from_display: Option<Converter>,
    to_display: Option<Converter>,
}

impl FieldSchema {
    /// Create a field with no default and no display metadata.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            default: None,
            display: None,
            from_display: None,
            to_display: None,
        }
    }

    /// Set the default value (in field representation).
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Override the type used to pick the field's control.
    pub fn with_display(mut self, display: FieldType) -> Self {
        self.display = Some(display);
        self
    }

    /// Set the control-to-field converter.
    pub fn with_from_display(mut self, converter: Converter) -> Self {
        self.from_display = Some(converter);
        self
    }

    /// Set the field-to-control converter.
    pub fn with_to_display(mut self, converter: Converter) -> Self {
        self.to_display = Some(converter);
        self
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared field type.
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// The default value, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The display override, if any.
    pub fn display(&self) -> Option<&FieldType> {
        self.display.as_ref()
    }

    /// The type the control is built for: the override, else the field type.
    pub fn effective_type(&self) -> &FieldType {
        self.display.as_ref().unwrap_or(&self.field_type)
    }

    /// Convert a control value into the stored field value.
    pub fn from_display(&self, value: Value) -> ValueResult<Value> {
        match &self.from_display {
            Some(converter) => converter.convert(value),
            None => Ok(value),
        }
    }

    /// Convert a stored field value into the control value.
    pub fn to_display(&self, value: Value) -> ValueResult<Value> {
        match &self.to_display {
            Some(converter) => converter.convert(value),
            None => Ok(value),
        }
    }
}

impl PartialEq for FieldSchema {
    // Converters are opaque closures and take no part in equality.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.field_type == other.field_type
            && self.default == other.default
            && self.display == other.display
    }
}

/// The schema of a record type: its name and its fields in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    type_name: String,
    fields: Vec<FieldSchema>,
}

impl RecordSchema {
    /// Create a schema with no fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field using builder pattern.
    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// The record type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Fields in declared order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check that `record` is an instance of this schema.
    pub fn validate(&self, record: &RecordValue) -> ValueResult<()> {
        if record.type_name() != self.type_name {
            return Err(ValueError::RecordMismatch {
                expected: self.type_name.clone(),
                got: record.type_name().to_string(),
            });
        }
        for field in &self.fields {
            let value = record
                .get(&field.name)
                .ok_or_else(|| ValueError::MissingField(field.name.clone()))?;
            field.field_type.check(value)?;
        }
        Ok(())
    }
}
