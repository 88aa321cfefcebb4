//! Typed records and the mapping from Rust types to field types.
//!
//! - [`FieldKind`] maps a Rust type to a [`FieldType`] and to/from [`Value`].
//! - [`Record`] is implemented by structs whose fields form a form.
//! - [`Choice`] is implemented by fieldless enums shown as selectable lists.
//!
//! `Record` and `Choice` are normally derived:
//!
//! ```ignore
//! use horizon_dataform_macros::{Choice, Record};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Choice)]
//! enum Shape { Circle, Square }
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Settings {
//!     shape: Shape,
//!     #[field(default = 5)]
//!     count: i32,
//!     scale: Option<f64>,
//! }
//! ```

use crate::error::{ValueError, ValueResult};
use crate::schema::{ChoiceSpec, Converter, FieldType, IntRange, RecordSchema};
use crate::value::{RecordValue, Value};

/// A Rust type that can be stored in a record field.
pub trait FieldKind: Sized {
    /// The field type this Rust type maps to.
    fn field_type() -> FieldType;

    /// Convert to a dynamic value.
    fn to_value(&self) -> Value;

    /// Convert from a dynamic value.
    fn from_value(value: Value) -> ValueResult<Self>;
}

/// A struct whose named fields are edited together by a record widget.
pub trait Record: Sized + 'static {
    /// The record schema: type name and fields in declared order.
    fn schema() -> RecordSchema;

    /// Convert this instance into its dynamic form.
    fn to_record_value(&self) -> RecordValue;

    /// Build an instance from its dynamic form.
    fn from_record_value(value: RecordValue) -> ValueResult<Self>;
}

/// A fieldless enum whose variants are offered as a selectable list.
pub trait Choice: Sized + 'static {
    /// The variants, in declaration order.
    fn choice_spec() -> ChoiceSpec;

    /// The variant name of this value.
    fn name(&self) -> &'static str;

    /// Look up a variant by name.
    fn from_name(name: &str) -> Option<Self>;
}

/// Check that `record` carries the expected record type name.
pub fn expect_record_type(record: &RecordValue, type_name: &str) -> ValueResult<()> {
    if record.type_name() == type_name {
        Ok(())
    } else {
        Err(ValueError::RecordMismatch {
            expected: type_name.to_string(),
            got: record.type_name().to_string(),
        })
    }
}

/// Remove a field from `record` and convert it to `T`.
pub fn take_field<T: FieldKind>(record: &mut RecordValue, name: &str) -> ValueResult<T> {
    let value = record
        .take(name)
        .ok_or_else(|| ValueError::MissingField(name.to_string()))?;
    T::from_value(value)
}

/// Build a [`Converter`] from a typed conversion function.
///
/// The input is decoded as `In`, passed through `f`, and re-encoded as `Out`.
pub fn converter<In, Out, F>(f: F) -> Converter
where
    In: FieldKind,
    Out: FieldKind,
    F: Fn(In) -> Out + Send + Sync + 'static,
{
    Converter::new(move |value| In::from_value(value).map(|input| f(input).to_value()))
}

/// Convert a [`Value::Choice`] back into a [`Choice`] enum.
pub fn choice_from_value<C: Choice>(value: Value) -> ValueResult<C> {
    match value {
        Value::Choice(name) => C::from_name(&name).ok_or_else(|| ValueError::UnknownChoice {
            type_name: C::choice_spec().type_name,
            name,
        }),
        other => Err(ValueError::type_mismatch(
            C::choice_spec().type_name,
            other.kind_name(),
        )),
    }
}

impl FieldKind for bool {
    fn field_type() -> FieldType {
        FieldType::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ValueError::type_mismatch("bool", other.kind_name())),
        }
    }
}

macro_rules! impl_int_field {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldKind for $ty {
            fn field_type() -> FieldType {
                FieldType::Int(IntRange::new(<$ty>::MIN as i64, <$ty>::MAX as i64))
            }

            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }

            fn from_value(value: Value) -> ValueResult<Self> {
                match value {
                    Value::Int(i) => <$ty>::try_from(i).map_err(|_| ValueError::OutOfRange {
                        value: i,
                        min: <$ty>::MIN as i64,
                        max: <$ty>::MAX as i64,
                    }),
                    other => Err(ValueError::type_mismatch("int", other.kind_name())),
                }
            }
        }
    )*};
}

impl_int_field!(i8, i16, i32, i64, u8, u16, u32);

impl FieldKind for f64 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        value
            .as_float()
            .ok_or_else(|| ValueError::type_mismatch("float", value.kind_name()))
    }
}

impl FieldKind for f32 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl FieldKind for String {
    fn field_type() -> FieldType {
        FieldType::Str
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(ValueError::type_mismatch("str", other.kind_name())),
        }
    }
}

impl<T: FieldKind> FieldKind for Option<T> {
    fn field_type() -> FieldType {
        T::field_type().optional()
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::None,
        }
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::None => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FieldKind> FieldKind for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::Sequence(Box::new(T::field_type()))
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldKind::to_value).collect())
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(ValueError::type_mismatch("list", other.kind_name())),
        }
    }
}

macro_rules! impl_tuple_field {
    ($len:expr => $($name:ident . $idx:tt),+) => {
        impl<$($name: FieldKind),+> FieldKind for ($($name,)+) {
            fn field_type() -> FieldType {
                FieldType::Tuple(vec![$($name::field_type()),+])
            }

            fn to_value(&self) -> Value {
                Value::Tuple(vec![$(self.$idx.to_value()),+])
            }

            fn from_value(value: Value) -> ValueResult<Self> {
                match value {
                    Value::Tuple(items) => {
                        if items.len() != $len {
                            return Err(ValueError::LengthMismatch {
                                expected: $len,
                                got: items.len(),
                            });
                        }
                        let mut items = items.into_iter();
                        Ok(($($name::from_value(items.next().unwrap_or_default())?,)+))
                    }
                    other => Err(ValueError::type_mismatch("tuple", other.kind_name())),
                }
            }
        }
    };
}

impl_tuple_field!(1 => A.0);
impl_tuple_field!(2 => A.0, B.1);
impl_tuple_field!(3 => A.0, B.1, C.2);
impl_tuple_field!(4 => A.0, B.1, C.2, D.3);
impl_tuple_field!(5 => A.0, B.1, C.2, D.3, E.4);
impl_tuple_field!(6 => A.0, B.1, C.2, D.3, E.4, F.5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_bounds() {
        assert_eq!(u8::field_type(), FieldType::Int(IntRange::new(0, 255)));
        assert_eq!(u8::from_value(Value::Int(255)), Ok(255));
        assert_eq!(
            u8::from_value(Value::Int(256)),
            Err(ValueError::OutOfRange { value: 256, min: 0, max: 255 })
        );
        assert_eq!(i32::from_value(Value::Int(-7)), Ok(-7));
    }

    #[test]
    fn test_option_maps_none() {
        assert_eq!(Option::<bool>::field_type(), FieldType::Bool.optional());
        assert_eq!(Option::<bool>::from_value(Value::None), Ok(None));
        assert_eq!(Some(3i64).to_value(), Value::Int(3));
    }

    #[test]
    fn test_nested_tuple() {
        type Nested = (i64, (bool, i64));
        assert_eq!(
            Nested::field_type(),
            FieldType::Tuple(vec![
                FieldType::Int(IntRange::I64),
                FieldType::Tuple(vec![FieldType::Bool, FieldType::Int(IntRange::I64)]),
            ])
        );

        let value = (1i64, (true, 2i64)).to_value();
        assert_eq!(Nested::from_value(value), Ok((1, (true, 2))));
        assert!(matches!(
            Nested::from_value(Value::Tuple(vec![Value::Int(1)])),
            Err(ValueError::LengthMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_float_accepts_int() {
        assert_eq!(f64::from_value(Value::Int(2)), Ok(2.0));
        assert!(f32::from_value(Value::Str("2".into())).is_err());
    }

    #[test]
    fn test_vec_is_sequence() {
        assert_eq!(
            Vec::<String>::field_type(),
            FieldType::Sequence(Box::new(FieldType::Str))
        );
    }

    #[test]
    fn test_typed_converter() {
        let to_percent = converter::<f64, i64, _>(|f| (f * 100.0).round() as i64);
        assert_eq!(to_percent.convert(Value::Float(0.25)), Ok(Value::Int(25)));
        assert!(to_percent.convert(Value::Bool(true)).is_err());
    }

    #[test]
    fn test_take_field() {
        let mut record = RecordValue::new("R").with_field("n", 4i64);
        assert_eq!(take_field::<i32>(&mut record, "n"), Ok(4));
        assert_eq!(
            take_field::<i32>(&mut record, "n"),
            Err(ValueError::MissingField("n".into()))
        );
        assert!(expect_record_type(&record, "R").is_ok());
        assert!(expect_record_type(&record, "S").is_err());
    }
}
