use crate::{Error, Result, Value};
use anyhow::Context;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::{any, str::FromStr};
use time::{Date, PrimitiveDateTime, Time, macros::format_description};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// This is what the entity field accessors use to read a row into a struct
/// and to render a struct back into values.
///
/// # Conversion contract
/// - `try_from_value` accepts the canonical variant for the type, integer
///   targets also accept any other integer variant when it fits in range.
/// - Text columns are parsed for decimals, temporal types and uuids, backends
///   like SQLite store those as text.
/// - Errors name both the offending value and the target type.
///
/// # Examples
/// ```rust
/// use hull_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The `None` form of the canonical variant, used as a type prototype.
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn conversion_error<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {:?} into {}",
        value,
        any::type_name::<T>()
    ))
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                let wide = match &value {
                    $destination(Some(v)) => return Ok(*v),
                    Value::Boolean(Some(v)) => *v as i128,
                    v => v
                        .as_integer()
                        .ok_or_else(|| conversion_error::<Self>(&value))?,
                };
                <$source>::try_from(wide).map_err(|_| {
                    Error::msg(format!(
                        "Value {} is out of range for {}",
                        wide,
                        any::type_name::<Self>()
                    ))
                })
            }
        }
    };
}

impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(u8, Value::UInt8);
impl_as_value_integer!(u16, Value::UInt16);
impl_as_value_integer!(u32, Value::UInt32);
impl_as_value_integer!(u64, Value::UInt64);

impl AsValue for bool {
    fn as_empty_value() -> Value {
        Value::Boolean(None)
    }
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Boolean(Some(v)) => Ok(*v),
            v => v
                .as_integer()
                .map(|v| v != 0)
                .ok_or_else(|| conversion_error::<Self>(&value)),
        }
    }
}

macro_rules! impl_as_value_float {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match &value {
                    $destination(Some(v)) => Ok(*v),
                    #[allow(unreachable_patterns)]
                    Value::Float32(Some(v)) => Ok(*v as _),
                    #[allow(unreachable_patterns)]
                    Value::Float64(Some(v)) => Ok(*v as _),
                    Value::Decimal(Some(v)) => v
                        .to_f64()
                        .map(|v| v as _)
                        .ok_or_else(|| conversion_error::<Self>(&value)),
                    v => v
                        .as_integer()
                        .map(|v| v as _)
                        .ok_or_else(|| conversion_error::<Self>(&value)),
                }
            }
        }
    };
}

impl_as_value_float!(f32, Value::Float32);
impl_as_value_float!(f64, Value::Float64);

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Decimal(Some(v)) => Ok(*v),
            Value::Float32(Some(v)) => {
                Decimal::from_f32(*v).ok_or_else(|| conversion_error::<Self>(&value))
            }
            Value::Float64(Some(v)) => {
                Decimal::from_f64(*v).ok_or_else(|| conversion_error::<Self>(&value))
            }
            Value::Varchar(Some(v)) => Decimal::from_str(v)
                .with_context(|| format!("Cannot parse '{}' as rust_decimal::Decimal", v)),
            v => v
                .as_integer()
                .and_then(Decimal::from_i128)
                .ok_or_else(|| conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(Some(v)) => Ok(v),
            v => Err(conversion_error::<Self>(&v)),
        }
    }
}

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into_boxed_slice()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(Some(v)) => Ok(v.into_vec()),
            Value::Varchar(Some(v)) => Ok(v.into_bytes()),
            v => Err(conversion_error::<Self>(&v)),
        }
    }
}

impl AsValue for Date {
    fn as_empty_value() -> Value {
        Value::Date(None)
    }
    fn as_value(self) -> Value {
        Value::Date(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Date(Some(v)) => Ok(*v),
            Value::Timestamp(Some(v)) => Ok(v.date()),
            Value::Varchar(Some(v)) => Date::parse(v, format_description!("[year]-[month]-[day]"))
                .with_context(|| format!("Cannot parse '{}' as time::Date", v)),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for Time {
    fn as_empty_value() -> Value {
        Value::Time(None)
    }
    fn as_value(self) -> Value {
        Value::Time(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Time(Some(v)) => Ok(*v),
            Value::Timestamp(Some(v)) => Ok(v.time()),
            Value::Varchar(Some(v)) => Time::parse(
                v,
                format_description!("[hour]:[minute]:[second].[subsecond]"),
            )
            .or_else(|_| Time::parse(v, format_description!("[hour]:[minute]:[second]")))
            .with_context(|| format!("Cannot parse '{}' as time::Time", v)),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for PrimitiveDateTime {
    fn as_empty_value() -> Value {
        Value::Timestamp(None)
    }
    fn as_value(self) -> Value {
        Value::Timestamp(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Timestamp(Some(v)) => Ok(*v),
            Value::Varchar(Some(v)) => {
                // The separator is 'T' when written by hull, a space when written by hand
                let normalized = v.replacen(' ', "T", 1);
                PrimitiveDateTime::parse(
                    &normalized,
                    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
                )
                .or_else(|_| {
                    PrimitiveDateTime::parse(
                        &normalized,
                        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
                    )
                })
                .with_context(|| format!("Cannot parse '{}' as time::PrimitiveDateTime", v))
            }
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for Uuid {
    fn as_empty_value() -> Value {
        Value::Uuid(None)
    }
    fn as_value(self) -> Value {
        Value::Uuid(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Uuid(Some(v)) => Ok(*v),
            Value::Varchar(Some(v)) => {
                Uuid::parse_str(v).with_context(|| format!("Cannot parse '{}' as uuid::Uuid", v))
            }
            Value::Blob(Some(v)) => {
                Uuid::from_slice(v).with_context(|| format!("Cannot read {:?} as uuid::Uuid", v))
            }
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::try_from_value(value).map(Some)
        }
    }
}
