use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A source document discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file as found by the walker
    pub absolute_path: PathBuf,

    /// Path relative to the source root
    pub relative_path: PathBuf,
}

impl FileEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(absolute_path: PathBuf, relative_path: PathBuf) -> Self {
        Self {
            absolute_path,
            relative_path,
        }
    }

    /// Re-roots the relative path under `dest_root` and swaps its extension.
    #[must_use]
    pub fn destination_in(&self, dest_root: &Path, extension: &str) -> PathBuf {
        dest_root.join(&self.relative_path).with_extension(extension)
    }
}

/// Reads a source document fully into memory.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and
/// [`Error::InvalidUtf8`] if its bytes are not UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| Error::invalid_utf8(path))
}

/// Checks whether `path` carries exactly the given extension.
#[must_use]
pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_read_source_text_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("intro.md");
        file.write_str("# Intro\n").unwrap();

        assert_eq!(read_source(file.path()).unwrap(), "# Intro\n");
    }

    #[test]
    fn test_read_source_invalid_utf8() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("broken.md");
        file.write_binary(&[0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = read_source(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_read_source_missing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = read_source(&temp.path().join("missing.md")).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_destination_in() {
        let entry = FileEntry::new(
            PathBuf::from("/docs/guides/setup.md"),
            PathBuf::from("guides/setup.md"),
        );

        assert_eq!(
            entry.destination_in(Path::new("/fern/pages"), "mdx"),
            PathBuf::from("/fern/pages/guides/setup.mdx")
        );
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("README.md"), "md"));
        assert!(!has_extension(Path::new("page.mdx"), "md"));
        assert!(!has_extension(Path::new("no_extension"), "md"));
    }
}
