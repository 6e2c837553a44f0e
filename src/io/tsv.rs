//! File-level helpers for writing load files.
//!
//! This module provides:
//! - **Typed slice output**: [`write_tsv_vec`] encodes a slice of [`EncodeRow`]
//!   records into a file, compressing by extension.
//! - **In-memory encoding**: [`encode_to_vec`] for callers that hand a buffer
//!   to their database driver directly.
//! - **Deterministic parallel writer**: [`write_tsv_par`] (feature `parallel-io`).
//!
//! # Design notes
//! - Every row's [`EncodeRow::column_count`] is checked against the declared
//!   column count before it is appended, so a short or long record fails the
//!   write instead of shifting every following row.
//! - The parallel writer gives each shard its own encoder and concatenates the
//!   shard buffers in index order, so its output is byte-identical to
//!   [`write_tsv_vec`].

use crate::encoder::Encoder;
use crate::io::compression::{FinishWrite, auto_detect_writer};
use crate::options::EncoderOptions;
use crate::row::EncodeRow;
use anyhow::{Context, Result, bail};
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::Path;

/// Append `rows` to `enc`, numbering rows from `first_row` in error messages.
fn encode_rows<W: Write, R: EncodeRow>(
    enc: &mut Encoder<W>,
    rows: &[R],
    first_row: usize,
) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        if row.column_count() != enc.columns() {
            bail!(
                "row #{} has {} columns, expected {}",
                first_row + i + 1,
                row.column_count(),
                enc.columns()
            );
        }
        enc.append_row(row);
        if let Some(err) = enc.last_error() {
            bail!("encode row #{}: {err}", first_row + i + 1);
        }
    }
    Ok(())
}

/// Encode `rows` into an in-memory buffer.
///
/// # Errors
/// Returns an error on a column count mismatch or a conversion failure.
pub fn encode_to_vec<R: EncodeRow>(
    columns: usize,
    options: Option<EncoderOptions>,
    rows: &[R],
) -> Result<Vec<u8>> {
    encode_shard(columns, options, rows, 0)
}

fn encode_shard<R: EncodeRow>(
    columns: usize,
    options: Option<EncoderOptions>,
    rows: &[R],
    first_row: usize,
) -> Result<Vec<u8>> {
    let buf = Vec::with_capacity(rows.len().saturating_mul(columns.saturating_mul(16)));
    let mut enc = Encoder::new(buf, columns, options)?;
    encode_rows(&mut enc, rows, first_row)?;
    Ok(enc.finish()?)
}

/// Write `rows` to a load file at `path`.
///
/// * Creates parent directories if they don't exist.
/// * Compresses the output when the extension names a registered codec
///   (see [`compression`](crate::io::compression)).
///
/// # Returns
/// The number of rows written (i.e., `rows.len()`).
///
/// # Errors
/// Returns an error if the file or its directories cannot be created, a row
/// has the wrong width, a value fails to convert, or writing fails. That
/// includes the compression trailer written when the file is closed.
pub fn write_tsv_vec<R: EncodeRow>(
    path: impl AsRef<Path>,
    columns: usize,
    options: Option<EncoderOptions>,
    rows: &[R],
) -> Result<usize> {
    let path = path.as_ref();
    let w = create_output(path)?;
    let mut enc = Encoder::new(w, columns, options)?;
    encode_rows(&mut enc, rows, 0).with_context(|| format!("encode {}", path.display()))?;
    let w = enc
        .finish()
        .with_context(|| format!("finish {}", path.display()))?;
    w.finish()
        .with_context(|| format!("close {}", path.display()))?;
    tracing::trace!(rows = rows.len(), path = %path.display(), "wrote load file");
    Ok(rows.len())
}

/// Parallel load-file writer with **deterministic final order**.
///
/// Each shard (a contiguous sub-slice of `rows`) is encoded into an in-memory
/// buffer **in parallel**, then the buffers are written to `path` in shard
/// order.
///
/// * `shards`: optional shard count. If `None`, defaults to `2 * num_cpus()`,
///   clamped to `[1, rows.len()]`.
///
/// # Returns
/// The number of rows written (i.e., `rows.len()`).
///
/// # Errors
/// Same as [`write_tsv_vec`]. When several shards fail, the error of the
/// lowest-numbered failing row is not guaranteed to be the one reported.
///
/// # Feature
/// Requires the `parallel-io` feature.
#[cfg(feature = "parallel-io")]
pub fn write_tsv_par<R: EncodeRow + Sync>(
    path: impl AsRef<Path>,
    columns: usize,
    options: Option<EncoderOptions>,
    rows: &[R],
    shards: Option<usize>,
) -> Result<usize> {
    use rayon::iter::{IntoParallelIterator, ParallelIterator};

    let n = rows.len();
    let path = path.as_ref();
    if columns == 0 {
        bail!("column count must be positive, got 0");
    }

    // Empty case: create/truncate file, nothing to do.
    if n == 0 {
        create_output(path)?
            .finish()
            .with_context(|| format!("close {}", path.display()))?;
        return Ok(0);
    }

    let shard_count = shards
        .unwrap_or_else(|| 2 * num_cpus::get().max(2))
        .clamp(1, n);
    let ranges = split_ranges(n, shard_count);

    let mut buffers: Vec<(usize, Vec<u8>)> = ranges
        .into_par_iter()
        .map(|(idx, start, end)| {
            let buf = encode_shard(columns, options, &rows[start..end], start)?;
            Ok::<_, anyhow::Error>((idx, buf))
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("encode {}", path.display()))?;

    buffers.sort_by_key(|(idx, _)| *idx);

    let mut w = create_output(path)?;
    for (idx, buf) in buffers {
        tracing::trace!(shard = idx, bytes = buf.len(), "merging shard");
        w.write_all(&buf)
            .with_context(|| format!("write {}", path.display()))?;
    }
    w.finish()
        .with_context(|| format!("close {}", path.display()))?;
    Ok(n)
}

fn create_output(path: &Path) -> Result<Box<dyn FinishWrite>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    auto_detect_writer(f, path).with_context(|| format!("setup compression for {}", path.display()))
}

/// Split `[0, len)` into `parts` contiguous ranges as `(chunk_idx, start, end)`.
///
/// Ensures `parts` in `[1, len]` (when `len > 0`) and distributes the remainder
/// over the leading chunks. Ranges are non-empty and cover the entire domain.
#[cfg(feature = "parallel-io")]
fn split_ranges(len: usize, parts: usize) -> Vec<(usize, usize, usize)> {
    let parts = parts.max(1).min(len.max(1));
    let base = len / parts;
    let rem = len % parts;

    let mut out = Vec::with_capacity(parts);
    let mut start = 0usize;
    for idx in 0..parts {
        let extra = usize::from(idx < rem);
        let end = start + base + extra;
        if start < end {
            out.push((idx, start, end));
        }
        start = end;
    }
    out
}
