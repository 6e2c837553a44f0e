//! Input values accepted by the encoder.
//!
//! [`Value`] is the closed set of shapes the load format can represent. Anything
//! else reaches it through [`ToLoadValue`], which is implemented here for the
//! usual primitives, strings, byte buffers, JSON documents and chrono types, and
//! which callers implement for their own types.
//!
//! For heterogeneous, type-erased rows, [`Value::from_any`] downcasts a
//! `&dyn Any` against the supported types and reports
//! [`ConvertError::Unsupported`] for the rest.

use crate::error::ConvertError;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::any::Any;
use std::borrow::Cow;

/// A single field value before conversion to text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// SQL `NULL`; encoded as `\N`.
    Null,
    Bool(bool),
    /// Any signed integer, widened.
    Int(i128),
    /// Any unsigned integer, widened.
    UInt(u128),
    Text(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
    /// A JSON document, written as its compact serialization.
    Json(Cow<'a, serde_json::Value>),
    /// An instant with an offset; subject to [`EncoderOptions::time_zone`](crate::EncoderOptions).
    DateTime(DateTime<FixedOffset>),
    /// A wall-clock timestamp, printed as-is.
    NaiveDateTime(NaiveDateTime),
    /// A calendar date, printed as `YYYY-MM-DD`.
    Date(NaiveDate),
}

impl<'a> Value<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Reborrow without cloning owned buffers.
    pub fn as_borrowed(&self) -> Value<'_> {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(i) => Value::Int(*i),
            Value::UInt(u) => Value::UInt(*u),
            Value::Text(s) => Value::Text(Cow::Borrowed(s.as_ref())),
            Value::Bytes(b) => Value::Bytes(Cow::Borrowed(b.as_ref())),
            Value::Json(j) => Value::Json(Cow::Borrowed(j.as_ref())),
            Value::DateTime(dt) => Value::DateTime(*dt),
            Value::NaiveDateTime(dt) => Value::NaiveDateTime(*dt),
            Value::Date(d) => Value::Date(*d),
        }
    }

    /// Convert a type-erased value.
    ///
    /// Boxed `dyn Any` values are unwrapped first. `Option<T>` is recognized
    /// for the scalar types, with `None` mapping to [`Value::Null`], as is `()`.
    ///
    /// # Errors
    /// [`ConvertError::Unsupported`] if the concrete type is not one of the
    /// types listed on [`ToLoadValue`]. Custom `ToLoadValue` implementations
    /// cannot be discovered through `Any`; convert those before erasing them.
    pub fn from_any(v: &'a dyn Any) -> Result<Value<'a>, ConvertError> {
        if let Some(inner) = v.downcast_ref::<Box<dyn Any>>() {
            return Value::from_any(inner.as_ref());
        }
        if let Some(inner) = v.downcast_ref::<Box<dyn Any + Send + Sync>>() {
            return Value::from_any(inner.as_ref());
        }
        if v.is::<()>() {
            return Ok(Value::Null);
        }
        if let Some(inner) = v.downcast_ref::<Value<'static>>() {
            return Ok(inner.as_borrowed());
        }

        macro_rules! downcast {
            ($($t:ty),* $(,)?) => {
                $(
                    if let Some(x) = v.downcast_ref::<$t>() {
                        return x.to_load_value();
                    }
                    if let Some(x) = v.downcast_ref::<Option<$t>>() {
                        return x.to_load_value();
                    }
                )*
            };
        }

        downcast!(
            bool,
            i8, i16, i32, i64, i128, isize,
            u8, u16, u32, u64, u128, usize,
            String, &'static str, Vec<u8>, &'static [u8],
            serde_json::Value,
            DateTime<Utc>, DateTime<FixedOffset>, DateTime<Local>, DateTime<chrono_tz::Tz>,
            NaiveDateTime, NaiveDate,
        );

        Err(ConvertError::Unsupported {
            type_name: "<type-erased value>",
        })
    }
}

/// Capability to produce a storable [`Value`].
///
/// Implement this for your own types to make them appendable. The returned
/// value is converted with the ordinary rules; since [`Value`] is terminal,
/// there is exactly one producer hop per field.
///
/// ```
/// use loadtsv::{ConvertError, ToLoadValue, Value};
///
/// struct Cents(i64);
///
/// impl ToLoadValue for Cents {
///     fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
///         if self.0 < 0 {
///             return Err(ConvertError::producer::<Self>("negative amount"));
///         }
///         Ok(Value::Text(format!("{}.{:02}", self.0 / 100, self.0 % 100).into()))
///     }
/// }
///
/// assert_eq!(Cents(1234).to_load_value().unwrap(), Value::Text("12.34".into()));
/// ```
pub trait ToLoadValue {
    /// Produce the value to encode.
    ///
    /// # Errors
    /// Implementations report their own failures via [`ConvertError::producer`].
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError>;
}

impl<T: ToLoadValue + ?Sized> ToLoadValue for &T {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        (**self).to_load_value()
    }
}

impl<T: ToLoadValue + ?Sized> ToLoadValue for Box<T> {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        (**self).to_load_value()
    }
}

impl<T: ToLoadValue> ToLoadValue for Option<T> {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        match self {
            Some(v) => v.to_load_value(),
            None => Ok(Value::Null),
        }
    }
}

impl ToLoadValue for Value<'_> {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(self.as_borrowed())
    }
}

impl ToLoadValue for bool {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::Bool(*self))
    }
}

macro_rules! impl_integers {
    ($variant:ident, $wide:ty: $($t:ty),*) => {
        $(
            impl ToLoadValue for $t {
                fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
                    Ok(Value::$variant(*self as $wide))
                }
            }

            impl From<$t> for Value<'static> {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $wide)
                }
            }
        )*
    };
}

impl_integers!(Int, i128: i8, i16, i32, i64, i128, isize);
impl_integers!(UInt, u128: u8, u16, u32, u64, u128, usize);

impl ToLoadValue for str {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::Text(Cow::Borrowed(self)))
    }
}

impl ToLoadValue for String {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::Text(Cow::Borrowed(self.as_str())))
    }
}

impl ToLoadValue for Cow<'_, str> {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::Text(Cow::Borrowed(self.as_ref())))
    }
}

impl ToLoadValue for [u8] {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::Bytes(Cow::Borrowed(self)))
    }
}

impl ToLoadValue for Vec<u8> {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::Bytes(Cow::Borrowed(self.as_slice())))
    }
}

impl ToLoadValue for Cow<'_, [u8]> {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::Bytes(Cow::Borrowed(self.as_ref())))
    }
}

impl ToLoadValue for serde_json::Value {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::Json(Cow::Borrowed(self)))
    }
}

impl<Tz: TimeZone> ToLoadValue for DateTime<Tz> {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::DateTime(self.fixed_offset()))
    }
}

impl ToLoadValue for NaiveDateTime {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::NaiveDateTime(*self))
    }
}

impl ToLoadValue for NaiveDate {
    fn to_load_value(&self) -> Result<Value<'_>, ConvertError> {
        Ok(Value::Date(*self))
    }
}

impl From<bool> for Value<'static> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Text(Cow::Borrowed(v))
    }
}

impl From<String> for Value<'static> {
    fn from(v: String) -> Self {
        Value::Text(Cow::Owned(v))
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(v: &'a [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for Value<'static> {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(Cow::Owned(v))
    }
}

impl From<serde_json::Value> for Value<'static> {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(Cow::Owned(v))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value<'static> {
    fn from(v: DateTime<Tz>) -> Self {
        Value::DateTime(v.fixed_offset())
    }
}

impl From<NaiveDateTime> for Value<'static> {
    fn from(v: NaiveDateTime) -> Self {
        Value::NaiveDateTime(v)
    }
}

impl From<NaiveDate> for Value<'static> {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
