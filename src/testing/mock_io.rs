//! Temporary files for I/O tests.

use crate::io::tsv::write_tsv_vec;
use crate::options::EncoderOptions;
use crate::row::EncodeRow;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// A temporary file that is deleted when dropped.
pub struct TempFilePath {
    #[allow(dead_code)]
    temp_file: NamedTempFile,
    path: PathBuf,
}

impl TempFilePath {
    /// Create a new temporary file.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let temp_file = NamedTempFile::new()?;
        let path = temp_file.path().to_path_buf();
        Ok(Self { temp_file, path })
    }

    /// Create a new temporary file whose name ends in `.{extension}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn with_extension(extension: &str) -> std::io::Result<Self> {
        let temp_file = tempfile::Builder::new()
            .suffix(&format!(".{extension}"))
            .tempfile()?;
        let path = temp_file.path().to_path_buf();
        Ok(Self { temp_file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A temporary directory that is deleted, with its contents, when dropped.
pub struct TempDirPath {
    #[allow(dead_code)]
    temp_dir: TempDir,
    path: PathBuf,
}

impl TempDirPath {
    /// Create a new temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self { temp_dir, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path for `filename` inside this directory. The file is not created.
    #[must_use]
    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }
}

/// Encode `rows` into a temporary `.tsv` file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row fails to encode.
///
/// # Example
///
/// ```
/// use loadtsv::testing::mock_tsv_file;
///
/// let rows = vec![(1, "alice"), (2, "bob")];
/// let file = mock_tsv_file(2, &rows).unwrap();
/// let text = std::fs::read_to_string(file.path()).unwrap();
/// assert_eq!(text, "\"1\"\t\"alice\"\n\"2\"\t\"bob\"\n");
/// ```
pub fn mock_tsv_file<R: EncodeRow>(columns: usize, rows: &[R]) -> anyhow::Result<TempFilePath> {
    let temp = TempFilePath::with_extension("tsv")?;
    write_tsv_vec(temp.path(), columns, Some(EncoderOptions::default()), rows)?;
    Ok(temp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_path_with_extension() {
        let temp = TempFilePath::with_extension("tsv").unwrap();
        assert_eq!(temp.path().extension().unwrap(), "tsv");
        assert!(temp.path().exists());
    }

    #[test]
    fn temp_dir_file_path() {
        let temp_dir = TempDirPath::new().unwrap();
        let file_path = temp_dir.file_path("load.tsv");
        assert!(file_path.starts_with(temp_dir.path()));
        assert!(!file_path.exists());
    }
}
