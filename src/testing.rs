//! Testing utilities for code that produces load files.
//!
//! - **Temporary paths**: [`TempFilePath`] and [`TempDirPath`] clean up on drop
//! - **Fixture files**: [`mock_tsv_file`] encodes rows into a temporary file
//! - **Inspectable sinks**: [`SharedBuffer`] stays readable after the encoder
//!   takes ownership of it, and [`FailingWriter`] injects write and flush
//!   failures
//!
//! # Quick Start
//!
//! ```
//! use loadtsv::Encoder;
//! use loadtsv::testing::FailingWriter;
//!
//! let sink = FailingWriter::new(0).fail_on_flush();
//! let received = sink.received();
//! let mut enc = Encoder::new(sink, 1, None).unwrap();
//! enc.append_str("x");
//! assert!(enc.finish().is_err());
//! assert!(received.contents().is_empty());
//! ```

pub mod mock_io;
pub mod sinks;

pub use mock_io::*;
pub use sinks::*;
