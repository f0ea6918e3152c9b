use crate::{
    config::Config,
    error::{Error, Result},
    file::has_extension,
};
use std::{
    ffi::OsString,
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Persists converted documents.
pub(crate) struct Writer {
    source_extension: String,
    target_extension: String,
    dry_run: bool,
}

impl Writer {
    /// Creates a new writer from configuration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            source_extension: config.source_extension.clone(),
            target_extension: config.target_extension.clone(),
            dry_run: config.dry_run,
        }
    }

    /// Maps a requested destination to the path actually written.
    ///
    /// `page.md` becomes `page.mdx`; every other path is kept as given.
    pub(crate) fn output_path(&self, requested: &Path) -> PathBuf {
        if has_extension(requested, &self.source_extension) {
            requested.with_extension(&self.target_extension)
        } else {
            requested.to_path_buf()
        }
    }

    /// Writes `content` to the normalised destination and returns that path.
    ///
    /// Parent directories are created as needed and an existing file is
    /// overwritten. In dry run mode nothing touches the disk.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or the file cannot
    /// be written.
    pub(crate) fn write(&self, requested: &Path, content: &str) -> Result<PathBuf> {
        let path = self.output_path(requested);

        if self.dry_run {
            debug!("Dry run: would write {} bytes to {}", content.len(), path.display());
            return Ok(path);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        Self::write_file_atomic(&path, content)?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());

        Ok(path)
    }

    /// Writes a file atomically.
    ///
    /// # Process
    ///
    /// 1. Writes content to a sibling temporary file
    /// 2. Syncs the temporary file to disk
    /// 3. Renames the temporary file over the target path
    fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
        let temp_path = Self::temp_path(path);
        let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .sync_all()
            .map_err(|e| Error::io(&temp_path, e))?;

        drop(temp_file);

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            Error::io(path, e)
        })?;

        Ok(())
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map_or_else(|| OsString::from("output"), OsString::from);
        name.push(".tmp");
        path.with_file_name(name)
    }
}
