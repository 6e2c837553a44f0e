//! Rendering of the companion `LOAD DATA` statement.
//!
//! The statement text is built here so that the dialect clause always matches
//! what [`Encoder`](crate::Encoder) produces. Executing it is up to the
//! caller's database client.

use crate::ESCAPING;
use std::fmt;

/// Where the server reads the data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// A file path, local to the client or the server depending on `LOCAL`.
    File(String),
    /// A reader registered with the client driver, rendered as `Reader::<name>`.
    Reader(String),
}

/// What to do with input rows that duplicate an existing unique key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateHandling {
    /// Server default: error for non-`LOCAL`, skip for `LOCAL`.
    #[default]
    Default,
    Replace,
    Ignore,
}

/// Builder for a `LOAD DATA [LOCAL] INFILE` statement.
///
/// ```
/// use loadtsv::LoadDataStatement;
///
/// let sql = LoadDataStatement::new("events")
///     .reader("buf")
///     .columns(["id", "payload"])
///     .to_sql();
/// assert!(sql.starts_with("LOAD DATA LOCAL INFILE 'Reader::buf' INTO TABLE `events` CHARACTER SET binary"));
/// assert!(sql.ends_with("(`id`, `payload`)"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDataStatement {
    table: String,
    source: LoadSource,
    local: bool,
    duplicates: DuplicateHandling,
    columns: Vec<String>,
}

impl LoadDataStatement {
    /// Load into `table`. Defaults to `LOCAL` with an empty file name; set the
    /// source with [`file`](Self::file) or [`reader`](Self::reader).
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            source: LoadSource::File(String::new()),
            local: true,
            duplicates: DuplicateHandling::Default,
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn file(mut self, path: impl Into<String>) -> Self {
        self.source = LoadSource::File(path.into());
        self
    }

    #[must_use]
    pub fn reader(mut self, name: impl Into<String>) -> Self {
        self.source = LoadSource::Reader(name.into());
        self
    }

    /// Toggle the `LOCAL` keyword.
    #[must_use]
    pub fn local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    #[must_use]
    pub fn replace(mut self) -> Self {
        self.duplicates = DuplicateHandling::Replace;
        self
    }

    #[must_use]
    pub fn ignore(mut self) -> Self {
        self.duplicates = DuplicateHandling::Ignore;
        self
    }

    /// Target columns, in the order the encoder writes them.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LoadDataStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LOAD DATA ")?;
        if self.local {
            f.write_str("LOCAL ")?;
        }
        let file = match &self.source {
            LoadSource::File(path) => path.clone(),
            LoadSource::Reader(name) => format!("Reader::{name}"),
        };
        write!(f, "INFILE {}", quote_string(&file))?;
        match self.duplicates {
            DuplicateHandling::Default => {}
            DuplicateHandling::Replace => f.write_str(" REPLACE")?,
            DuplicateHandling::Ignore => f.write_str(" IGNORE")?,
        }
        write!(f, " INTO TABLE {} {}", quote_ident(&self.table), ESCAPING)?;
        if !self.columns.is_empty() {
            let cols: Vec<String> = self.columns.iter().map(|c| quote_ident(c)).collect();
            write!(f, " ({})", cols.join(", "))?;
        }
        Ok(())
    }
}

/// Backtick-quote an identifier, doubling embedded backticks.
fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Single-quote a string literal, escaping backslashes and quotes.
fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}
