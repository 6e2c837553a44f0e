//! Value to canonical text conversion.
//!
//! The output is the *unescaped* form of a field; [`escape`](crate::escape)
//! quotes it for the wire. `None` means the value is absent and must be
//! written as `\N`.
//!
//! | input | canonical form |
//! |---|---|
//! | `Null` | absent |
//! | `Bool` | `1` / `0` |
//! | integers | base-10 digits, leading `-` when negative |
//! | text, bytes | unchanged |
//! | JSON | compact serialization |
//! | timestamps, dates | `YYYY-MM-DD[ HH:MM:SS[.fffffffff]]` |

use crate::error::ConvertError;
use crate::options::EncoderOptions;
use crate::value::{ToLoadValue, Value};
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use std::borrow::Cow;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Convert any [`ToLoadValue`] into its canonical bytes.
///
/// # Errors
/// Returns the producer's error when `v` fails to produce a value.
pub fn to_canonical<'v, V>(
    v: &'v V,
    options: &EncoderOptions,
) -> Result<Option<Cow<'v, [u8]>>, ConvertError>
where
    V: ToLoadValue + ?Sized,
{
    let value = v.to_load_value()?;
    Ok(value_to_bytes(value, options))
}

/// Convert a [`Value`] into its canonical bytes. Infallible: every variant has
/// a textual form.
pub fn value_to_bytes<'a>(value: Value<'a>, options: &EncoderOptions) -> Option<Cow<'a, [u8]>> {
    let bytes = match value {
        Value::Null => return None,
        Value::Bool(true) => Cow::Borrowed(&b"1"[..]),
        Value::Bool(false) => Cow::Borrowed(&b"0"[..]),
        Value::Int(i) => Cow::Owned(i.to_string().into_bytes()),
        Value::UInt(u) => Cow::Owned(u.to_string().into_bytes()),
        Value::Text(Cow::Borrowed(s)) => Cow::Borrowed(s.as_bytes()),
        Value::Text(Cow::Owned(s)) => Cow::Owned(s.into_bytes()),
        Value::Bytes(b) => b,
        Value::Json(j) => Cow::Owned(j.to_string().into_bytes()),
        Value::DateTime(dt) => {
            let wall = match options.time_zone {
                Some(tz) => dt.with_timezone(&tz).naive_local(),
                None => dt.naive_local(),
            };
            Cow::Owned(format_wall_clock(wall).into_bytes())
        }
        Value::NaiveDateTime(dt) => Cow::Owned(format_wall_clock(dt).into_bytes()),
        Value::Date(d) => Cow::Owned(format_wall_clock(d.and_time(NaiveTime::MIN)).into_bytes()),
    };
    Some(bytes)
}

/// Format a wall-clock timestamp with the shortest layout that loses nothing.
///
/// Midnight prints as a bare date, whole seconds omit the fraction, and a
/// fraction is printed to nanosecond precision with trailing zeros removed.
pub fn format_wall_clock(dt: NaiveDateTime) -> String {
    // Leap seconds are reported as nanos >= 1s; fold them back into range.
    let nanos = dt.nanosecond() % NANOS_PER_SEC;
    let dt = dt.with_nanosecond(nanos).unwrap_or(dt);
    if dt.hour() == 0 && dt.minute() == 0 && dt.second() == 0 && nanos == 0 {
        return dt.format("%Y-%m-%d").to_string();
    }
    let base = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    if nanos == 0 {
        return base;
    }
    let frac = format!("{nanos:09}");
    format!("{base}.{}", frac.trim_end_matches('0'))
}
