//! # loadtsv
//!
//! A **streaming encoder** for the tab-separated input of MySQL's
//! `LOAD DATA [LOCAL] INFILE`. Values are appended one field at a time and
//! written in a single pass, with quoting and backslash escaping that
//! round-trips arbitrary binary data.
//!
//! ## Key Features
//!
//! - **Binary safe** - every byte sequence survives the load unchanged, and
//!   NULL (`\N`) is never confused with an empty string
//! - **Row framing** - fixed column count; tabs and newlines are inserted for you
//! - **Value conversion** - booleans, every integer width, text, bytes, JSON and
//!   chrono timestamps, plus [`ToLoadValue`] for your own types
//! - **Latched errors** - the first failure stops all output and is reported once
//! - **Statement builder** - [`LoadDataStatement`] renders the matching import
//!   statement with the [`ESCAPING`] clause
//! - **File helpers** - sequential and deterministic parallel writers with
//!   optional gzip/zstd compression
//!
//! ## Quick Start
//!
//! ```
//! use loadtsv::{Encoder, LoadDataStatement};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut enc = Encoder::new(Vec::new(), 3, None)?;
//! for (id, name, active) in [(1, "ada", true), (2, "grace", false)] {
//!     enc.append_value(&id);
//!     enc.append_value(name);
//!     enc.append_value(&active);
//! }
//! let data = enc.finish()?;
//! assert_eq!(data, b"\"1\"\t\"ada\"\t\"1\"\n\"2\"\t\"grace\"\t\"0\"\n");
//!
//! // Hand `data` to the driver's reader registry and run:
//! let sql = LoadDataStatement::new("users")
//!     .reader("users")
//!     .columns(["id", "name", "active"])
//!     .to_sql();
//! # let _ = sql;
//! # Ok(())
//! # }
//! ```
//!
//! ## Output format
//!
//! - Fields are separated by a tab, rows end with a newline. There is no
//!   header and no trailing tab.
//! - A field is either `\N` or a double-quoted, backslash-escaped byte string;
//!   see [`escape`] for the table.
//! - Timestamps print as `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, or with a
//!   fractional part, whichever is the shortest exact form; see [`convert`].
//!
//! ## Feature Flags
//!
//! - `parallel-io` - [`write_tsv_par`] using rayon
//! - `compression-gzip`, `compression-zstd` - compressed output by extension
//!
//! All are enabled by default.

pub mod convert;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod io;
pub mod options;
pub mod row;
pub mod statement;
pub mod testing;
pub mod value;

/// The dialect clause for the import statement that matches the encoder's
/// output. Append it after `INTO TABLE ...`.
pub const ESCAPING: &str = r#"CHARACTER SET binary FIELDS TERMINATED BY '\t' OPTIONALLY ENCLOSED BY '"' ESCAPED BY '\\' LINES TERMINATED BY '\n' STARTING BY ''"#;

// Re-exports
pub use convert::{format_wall_clock, to_canonical, value_to_bytes};
pub use encoder::Encoder;
pub use error::{BoxError, ConvertError, EncodeError};
pub use escape::{NULL_FIELD, escape_field, escape_into, escape_value};
pub use options::EncoderOptions;
pub use row::EncodeRow;
pub use statement::{DuplicateHandling, LoadDataStatement, LoadSource};
pub use value::{ToLoadValue, Value};

pub use io::tsv::{encode_to_vec, write_tsv_vec};

#[cfg(feature = "parallel-io")]
pub use io::tsv::write_tsv_par;
