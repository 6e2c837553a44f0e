//! Compressing writers selected by file extension.
//!
//! Staged load files are often shipped to the database host before the import
//! runs. Writing them compressed is transparent: [`auto_detect_writer`] wraps
//! the file in the codec whose extension matches the path, or in a plain
//! buffered writer when none does.
//!
//! ## Built-in Codecs
//! - **Gzip** (`.gz`) - via `flate2` (feature: `compression-gzip`)
//! - **Zstd** (`.zst`) - via `zstd` (feature: `compression-zstd`)
//!
//! Every writer handed out here is a [`FinishWrite`]: the stream is complete
//! only after [`FinishWrite::finish`] has returned `Ok`. Dropping the writer
//! instead leaves the file truncated or without its trailer.
//!
//! Custom codecs implement [`CompressionCodec`] and are added with
//! [`register_codec`]:
//!
//! ```
//! use loadtsv::io::compression::{register_codec, CompressionCodec, FinishWrite};
//! use std::io::{self, BufWriter, Write};
//! use std::sync::Arc;
//!
//! struct Passthrough;
//!
//! impl CompressionCodec for Passthrough {
//!     fn name(&self) -> &str { "passthrough" }
//!     fn extensions(&self) -> &[&str] { &[".raw"] }
//!     fn wrap_writer_dyn(&self, w: Box<dyn Write>) -> std::io::Result<Box<dyn FinishWrite>> {
//!         Ok(Box::new(BufWriter::new(w)))
//!     }
//! }
//!
//! register_codec(Arc::new(Passthrough));
//! ```
//!
//! The crate writes the load format only, so codecs are write-side only.

use anyhow::{Context, Result};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Global codec registry.
static CODEC_REGISTRY: RwLock<Option<Vec<Arc<dyn CompressionCodec>>>> = RwLock::new(None);

fn init_registry() -> Vec<Arc<dyn CompressionCodec>> {
    vec![
        #[cfg(feature = "compression-gzip")]
        Arc::new(GzipCodec),
        #[cfg(feature = "compression-zstd")]
        Arc::new(ZstdCodec),
    ]
}

fn get_registry() -> Vec<Arc<dyn CompressionCodec>> {
    let mut lock = CODEC_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    lock.get_or_insert_with(init_registry).clone()
}

/// Register a custom compression codec globally.
///
/// Later registrations are consulted after the built-ins.
pub fn register_codec(codec: Arc<dyn CompressionCodec>) {
    let mut lock = CODEC_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    lock.get_or_insert_with(init_registry).push(codec);
}

/// A writer that must be finished explicitly to complete its output.
pub trait FinishWrite: Write {
    /// Write any trailer and flush everything through to the underlying sink.
    ///
    /// # Errors
    /// Any write or flush failure on the way down.
    fn finish(self: Box<Self>) -> io::Result<()>;
}

impl<W: Write> FinishWrite for BufWriter<W> {
    fn finish(mut self: Box<Self>) -> io::Result<()> {
        self.flush()?;
        let mut inner = (*self).into_inner().map_err(io::IntoInnerError::into_error)?;
        inner.flush()
    }
}

/// A pluggable compression algorithm.
///
/// Implementations live in a global registry and must be `Send + Sync`.
pub trait CompressionCodec: Send + Sync {
    /// Human-readable codec name (e.g., "gzip").
    fn name(&self) -> &str;

    /// Lowercase file extensions including the leading dot (e.g., `&[".gz"]`).
    fn extensions(&self) -> &[&str];

    /// Wrap a writer so that everything written to it is compressed.
    ///
    /// The compressed stream must be complete, and flushed to `writer`, once
    /// [`FinishWrite::finish`] returns `Ok`.
    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn FinishWrite>>;
}

/// Find the codec for `path`, matching extensions case-insensitively.
pub fn detect_from_extension(path: impl AsRef<Path>) -> Option<Arc<dyn CompressionCodec>> {
    let path_str = path.as_ref().to_string_lossy().to_lowercase();
    get_registry()
        .into_iter()
        .find(|codec| codec.extensions().iter().any(|ext| path_str.ends_with(ext)))
}

/// Wrap `writer` with the codec matching `path_hint`, or buffer it unchanged.
///
/// Call [`FinishWrite::finish`] on the result once everything is written.
///
/// # Errors
/// Returns an error if the codec fails to initialize.
pub fn auto_detect_writer<W: Write + 'static>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> Result<Box<dyn FinishWrite>> {
    if let Some(codec) = detect_from_extension(&path_hint) {
        tracing::trace!(codec = codec.name(), path = %path_hint.as_ref().display(), "compressing output");
        return codec
            .wrap_writer_dyn(Box::new(writer))
            .with_context(|| format!("wrap writer with {} codec", codec.name()));
    }
    Ok(Box::new(BufWriter::new(writer)))
}

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz", ".gzip"]
    }

    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn FinishWrite>> {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        Ok(Box::new(GzEncoder::new(writer, Compression::default())))
    }
}

#[cfg(feature = "compression-gzip")]
impl<W: Write> FinishWrite for flate2::write::GzEncoder<W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        let mut inner = flate2::write::GzEncoder::finish(*self)?;
        inner.flush()
    }
}

#[cfg(feature = "compression-zstd")]
struct ZstdCodec;

#[cfg(feature = "compression-zstd")]
impl CompressionCodec for ZstdCodec {
    fn name(&self) -> &str {
        "zstd"
    }

    fn extensions(&self) -> &[&str] {
        &[".zst", ".zstd"]
    }

    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn FinishWrite>> {
        zstd::stream::write::Encoder::new(writer, 3).map(|e| Box::new(e) as Box<dyn FinishWrite>)
    }
}

#[cfg(feature = "compression-zstd")]
impl<W: Write> FinishWrite for zstd::stream::write::Encoder<'static, W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        let mut inner = zstd::stream::write::Encoder::finish(*self)?;
        inner.flush()
    }
}
