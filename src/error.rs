//! Error types for value conversion and stream encoding.
//!
//! Two failure classes exist:
//! - [`ConvertError`]: a value has no textual mapping, or a custom producer
//!   ([`ToLoadValue`](crate::ToLoadValue)) failed. Always a caller bug.
//! - I/O failures from the sink, wrapped in [`EncodeError::Io`].
//!
//! Neither is retried. The [`Encoder`](crate::Encoder) latches the first one it
//! sees and reports it from [`finish`](crate::Encoder::finish).

use std::io;
use thiserror::Error;

/// Boxed error returned by custom value producers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A value could not be turned into its canonical text form.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The value's type has no mapping to the load format.
    #[error("unsupported type for encoding: {type_name}")]
    Unsupported {
        /// Best-effort name of the rejected type.
        type_name: &'static str,
    },

    /// A [`ToLoadValue`](crate::ToLoadValue) implementation failed.
    #[error("value producer for {type_name} failed: {source}")]
    Producer {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },
}

impl ConvertError {
    /// Wrap a failure raised while producing a value for `T`.
    pub fn producer<T: ?Sized>(source: impl Into<BoxError>) -> Self {
        Self::Producer {
            type_name: std::any::type_name::<T>(),
            source: source.into(),
        }
    }
}

/// Errors surfaced by the [`Encoder`](crate::Encoder).
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// The sink rejected a write or flush.
    #[error("write to load stream failed: {0}")]
    Io(#[from] io::Error),

    /// Rows need at least one column.
    #[error("column count must be positive, got {0}")]
    InvalidColumnCount(usize),
}

impl EncodeError {
    /// `true` when the failure came from value conversion rather than the sink.
    pub fn is_conversion(&self) -> bool {
        matches!(self, EncodeError::Convert(_))
    }
}

/// Result alias used throughout the encoder.
pub type Result<T, E = EncodeError> = std::result::Result<T, E>;
