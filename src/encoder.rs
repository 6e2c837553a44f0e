//! Streaming row encoder.
//!
//! An [`Encoder`] writes a fixed number of fields per row. It inserts the tab
//! between fields and the newline after the last field of each row on its
//! own, so callers only append values in order.
//!
//! # Error handling
//! The first failure, whether a conversion error or a sink write error, is
//! latched. Every append after that is a no-op and nothing more reaches the
//! sink. [`Encoder::finish`] returns the latched error; [`Encoder::last_error`]
//! lets callers check earlier. Output written before the failure should be
//! discarded and the load not attempted.
//!
//! Once an error is latched, bytes still held in the internal buffer are
//! discarded rather than flushed, whether the encoder is finished or just
//! dropped.
//!
//! # Example
//! ```
//! use loadtsv::Encoder;
//!
//! let mut enc = Encoder::new(Vec::new(), 2, None)?;
//! enc.append_value(&0);
//! enc.append_bytes(Some(&[0xDE, 0xAD]));
//! enc.append_value(&1);
//! enc.append_str("hi\tthere");
//! let out = enc.finish()?;
//! assert_eq!(out, b"\"0\"\t\"\xDE\xAD\"\n\"1\"\t\"hi\\tthere\"\n");
//! # Ok::<(), loadtsv::EncodeError>(())
//! ```

use crate::convert::{to_canonical, value_to_bytes};
use crate::error::{EncodeError, Result};
use crate::escape::escape_into;
use crate::options::EncoderOptions;
use crate::row::EncodeRow;
use crate::value::{ToLoadValue, Value};
use std::any::Any;
use std::io::{self, BufWriter, Write};

const FIELD_TERMINATOR: &[u8] = b"\t";
const LINE_TERMINATOR: &[u8] = b"\n";

/// Encodes values into `LOAD DATA INFILE` input, see the [module docs](self).
pub struct Encoder<W: Write> {
    /// `None` only once `finish` or `drop` has taken it.
    w: Option<BufWriter<W>>,
    columns: usize,
    cols_left: usize,
    rows: u64,
    err: Option<EncodeError>,
    options: EncoderOptions,
    scratch: Vec<u8>,
}

impl<W: Write> Encoder<W> {
    /// Start encoding into `sink` with `columns` fields per row.
    ///
    /// The sink is buffered internally and handed back by [`finish`](Self::finish).
    /// On failure the owned sink is dropped along with the encoder, so pass
    /// `&mut W` when the sink must outlive a failed stream.
    ///
    /// # Errors
    /// [`EncodeError::InvalidColumnCount`] when `columns` is zero.
    pub fn new(sink: W, columns: usize, options: Option<EncoderOptions>) -> Result<Self> {
        if columns == 0 {
            return Err(EncodeError::InvalidColumnCount(columns));
        }
        Ok(Self {
            w: Some(BufWriter::new(sink)),
            columns,
            cols_left: columns,
            rows: 0,
            err: None,
            options: options.unwrap_or_default(),
            scratch: Vec::new(),
        })
    }

    /// Fields per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Fields still to be appended before the current row is complete.
    pub fn columns_remaining(&self) -> usize {
        self.cols_left
    }

    /// `true` when no field of the next row has been written yet.
    pub fn is_row_boundary(&self) -> bool {
        self.cols_left == self.columns
    }

    /// Number of complete rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// The latched error, if any append has failed.
    pub fn last_error(&self) -> Option<&EncodeError> {
        self.err.as_ref()
    }

    /// Append raw bytes as the next field. `None` is written as NULL; an empty
    /// slice is an empty string, not NULL.
    pub fn append_bytes(&mut self, data: Option<&[u8]>) {
        if self.err.is_some() {
            return;
        }
        self.write_field(data);
    }

    /// Append a string as the next field.
    pub fn append_str(&mut self, s: &str) {
        self.append_bytes(Some(s.as_bytes()));
    }

    /// Append NULL as the next field.
    pub fn append_null(&mut self) {
        self.append_bytes(None);
    }

    /// Convert `v` and append it as the next field.
    ///
    /// A conversion failure is latched and nothing is written.
    pub fn append_value<V: ToLoadValue + ?Sized>(&mut self, v: &V) {
        if self.err.is_some() {
            return;
        }
        match to_canonical(v, &self.options) {
            Ok(bytes) => self.write_field(bytes.as_deref()),
            Err(e) => self.latch(e.into()),
        }
    }

    /// Append a type-erased value, see [`Value::from_any`].
    pub fn append_any(&mut self, v: &dyn Any) {
        if self.err.is_some() {
            return;
        }
        match Value::from_any(v) {
            Ok(value) => {
                let bytes = value_to_bytes(value, &self.options);
                self.write_field(bytes.as_deref());
            }
            Err(e) => self.latch(e.into()),
        }
    }

    /// Append every field of `row`.
    ///
    /// The row's width is not checked against [`columns`](Self::columns); a
    /// mismatched row shifts all following rows.
    pub fn append_row<R: EncodeRow + ?Sized>(&mut self, row: &R) {
        if self.err.is_some() {
            return;
        }
        row.append_to(self);
    }

    /// Flush and return the sink, or the first error that occurred.
    ///
    /// When an error was latched the sink is not touched again: bytes still
    /// sitting in the internal buffer are dropped, not flushed, and so is the
    /// sink itself; construct with `&mut W` to keep it. A trailing partial row
    /// is written as-is.
    ///
    /// # Errors
    /// The latched error, or the flush failure.
    pub fn finish(mut self) -> Result<W> {
        let Some(mut w) = self.w.take() else {
            return Err(io::Error::other("load stream already closed").into());
        };
        if let Some(err) = self.err.take() {
            let _ = w.into_parts();
            return Err(err);
        }
        if !self.is_row_boundary() {
            tracing::warn!(
                missing = self.cols_left,
                columns = self.columns,
                "finishing load stream in the middle of a row"
            );
        }
        if let Err(e) = w.flush() {
            let _ = w.into_parts();
            return Err(e.into());
        }
        tracing::debug!(rows = self.rows, "load stream finished");
        w.into_inner().map_err(|e| e.into_error().into())
    }

    fn write_field(&mut self, data: Option<&[u8]>) {
        let Some(w) = self.w.as_mut() else {
            return;
        };
        self.scratch.clear();
        escape_into(&mut self.scratch, data);
        if let Err(e) = w.write_all(&self.scratch) {
            self.latch(e.into());
            return;
        }
        self.cols_left -= 1;
        let terminator = if self.cols_left == 0 {
            self.cols_left = self.columns;
            self.rows += 1;
            LINE_TERMINATOR
        } else {
            FIELD_TERMINATOR
        };
        if let Err(e) = w.write_all(terminator) {
            self.latch(e.into());
        }
    }

    fn latch(&mut self, err: EncodeError) {
        if self.err.is_none() {
            tracing::warn!(error = %err, rows = self.rows, "load stream failed; ignoring further values");
            self.err = Some(err);
        }
    }
}

impl<W: Write> Drop for Encoder<W> {
    fn drop(&mut self) {
        // BufWriter flushes on drop; after a failure the buffer must go unwritten.
        if self.err.is_some()
            && let Some(w) = self.w.take()
        {
            let _ = w.into_parts();
        }
    }
}

impl<W: Write> std::fmt::Debug for Encoder<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("columns", &self.columns)
            .field("cols_left", &self.cols_left)
            .field("rows", &self.rows)
            .field("err", &self.err)
            .finish_non_exhaustive()
    }
}
