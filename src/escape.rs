//! Field escaping for the `LOAD DATA` text format.
//!
//! Every present field is wrapped in double quotes and the bytes below are
//! replaced by a backslash sequence. All other bytes, including non-ASCII and
//! invalid UTF-8, are copied through. An absent field is the bare `\N`.
//!
//! | byte | written as |
//! |---|---|
//! | `0x00` | `\0` |
//! | `0x08` | `\b` |
//! | `0x0A` | `\n` |
//! | `0x0D` | `\r` |
//! | `0x09` | `\t` |
//! | `0x1A` | `\Z` |
//! | `\` | `\\` |
//! | `"` | `\"` |
//!
//! This table must agree with [`ESCAPING`](crate::ESCAPING), the clause the
//! import statement is given.

use crate::convert::to_canonical;
use crate::error::ConvertError;
use crate::options::EncoderOptions;
use crate::value::ToLoadValue;

/// The NULL marker.
pub const NULL_FIELD: &[u8] = b"\\N";

/// Escape `data` and append it to `out`. `None` appends [`NULL_FIELD`].
pub fn escape_into(out: &mut Vec<u8>, data: Option<&[u8]>) {
    let Some(data) = data else {
        out.extend_from_slice(NULL_FIELD);
        return;
    };
    out.reserve(data.len() + 2);
    out.push(b'"');
    for &c in data {
        match escape_byte(c) {
            Some(e) => out.extend_from_slice(&[b'\\', e]),
            None => out.push(c),
        }
    }
    out.push(b'"');
}

/// Escape `data` into a fresh buffer.
pub fn escape_field(data: Option<&[u8]>) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.map_or(NULL_FIELD.len(), |d| d.len() + 5));
    escape_into(&mut out, data);
    out
}

/// Convert and escape a single value, ready to be placed in a field slot.
///
/// Useful outside a full row stream, for example when splicing a value into a
/// hand-built line.
///
/// ```
/// use loadtsv::{escape_value, EncoderOptions};
///
/// let opts = EncoderOptions::default();
/// assert_eq!(escape_value(&"a\tb", &opts).unwrap(), b"\"a\\tb\"");
/// assert_eq!(escape_value(&None::<i32>, &opts).unwrap(), b"\\N");
/// ```
///
/// # Errors
/// Returns the conversion error if `v` cannot be rendered.
pub fn escape_value<V>(v: &V, options: &EncoderOptions) -> Result<Vec<u8>, ConvertError>
where
    V: ToLoadValue + ?Sized,
{
    let bytes = to_canonical(v, options)?;
    Ok(escape_field(bytes.as_deref()))
}

/// The character following the backslash for bytes that need escaping.
#[inline]
fn escape_byte(c: u8) -> Option<u8> {
    match c {
        0 => Some(b'0'),
        0x08 => Some(b'b'),
        b'\n' => Some(b'n'),
        b'\r' => Some(b'r'),
        b'\t' => Some(b't'),
        0x1A => Some(b'Z'),
        b'\\' => Some(b'\\'),
        b'"' => Some(b'"'),
        _ => None,
    }
}
