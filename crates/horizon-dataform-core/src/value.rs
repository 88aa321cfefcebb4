//! Dynamic field values.
//!
//! Controls and record widgets exchange data as [`Value`]s, independent of the
//! concrete Rust record type. [`crate::Record`] converts between a typed struct
//! and a [`RecordValue`].

use std::fmt;

/// A dynamically typed field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// An absent optional value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// An integer (every supported integer type widens to `i64`).
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// The name of an enumerated choice variant.
    Choice(String),
    /// A fixed-size heterogeneous tuple.
    Tuple(Vec<Value>),
    /// A variable-length sequence.
    List(Vec<Value>),
    /// A nested record.
    Record(RecordValue),
}

impl Value {
    /// A short name for the kind of value, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Choice(_) => "choice",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Returns `true` for [`Value::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns the boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float. Integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string slice of a [`Value::Str`] or [`Value::Choice`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements of a [`Value::Tuple`].
    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested record of a [`Value::Record`].
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<RecordValue> for Value {
    fn from(value: RecordValue) -> Self {
        Value::Record(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Choice(name) => write!(f, "{name}"),
            Value::Tuple(items) | Value::List(items) => {
                let open = if matches!(self, Value::Tuple(_)) { '(' } else { '[' };
                let close = if open == '(' { ')' } else { ']' };
                write!(f, "{open}")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "{close}")
            }
            Value::Record(record) => write!(f, "{record}"),
        }
    }
}

/// The dynamic form of a record instance.
///
/// Fields keep the order in which they were added, which for values produced
/// by a record widget is the schema's declared order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordValue {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl RecordValue {
    /// Create an empty record value for the named record type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field using builder pattern.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// The record type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Set a field value, replacing an existing field of the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Remove a field, returning its value.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let index = self.fields.iter().position(|(field, _)| field == name)?;
        Some(self.fields.remove(index).1)
    }

    /// Iterate over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the fields whose values differ between `self` and `other`.
    pub fn changed_fields<'a>(&'a self, other: &'a RecordValue) -> Vec<&'a str> {
        let mut changed: Vec<&str> = self
            .iter()
            .filter(|(name, value)| other.get(name) != Some(*value))
            .map(|(name, _)| name)
            .collect();
        changed.extend(
            other
                .iter()
                .filter(|(name, _)| self.get(name).is_none())
                .map(|(name, _)| name),
        );
        changed
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_value_set_replaces() {
        let mut record = RecordValue::new("Point").with_field("x", 1i64).with_field("y", 2i64);
        record.set("x", 5i64);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("x"), Some(&Value::Int(5)));
        assert_eq!(record.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_changed_fields() {
        let a = RecordValue::new("R").with_field("flag", true).with_field("count", 5i64);
        let b = RecordValue::new("R").with_field("flag", false).with_field("count", 5i64);
        assert_eq!(a.changed_fields(&b), vec!["flag"]);
        assert!(a.changed_fields(&a).is_empty());
    }

    #[test]
    fn test_display() {
        let record = RecordValue::new("R")
            .with_field("a", Value::Tuple(vec![Value::Int(1), Value::Bool(true)]))
            .with_field("b", "x");
        assert_eq!(record.to_string(), "R(a=(1, true), b=\"x\")");
    }

    #[test]
    fn test_as_float_widens_int() {
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Str("3".into()).as_float(), None);
    }
}
