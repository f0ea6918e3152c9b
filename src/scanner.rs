use crate::{
    config::Config,
    error::Error,
    file::{has_extension, FileEntry},
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Statistics collected during scanning.
#[derive(Debug, Default, Clone)]
pub(crate) struct ScanStats {
    /// Regular files visited
    pub visited_files: usize,

    /// Files kept for conversion
    pub matched_files: usize,

    /// Entries the walker could not read
    pub errors: usize,
}

/// Finds every source document below a root directory.
pub(crate) struct Scanner {
    root_dir: PathBuf,
    extension: String,
}

impl Scanner {
    /// Creates a new scanner from configuration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            root_dir: config.source.clone(),
            extension: config.source_extension.clone(),
        }
    }

    /// Walks the root directory sequentially, in traversal order.
    ///
    /// Unreadable entries are logged and skipped; they never stop the walk.
    /// A root that is missing or not a directory yields no files.
    pub(crate) fn scan(&self) -> Vec<FileEntry> {
        let mut files = Vec::new();
        let mut stats = ScanStats::default();

        if !self.root_dir.is_dir() {
            warn!("Source directory not found: {}", self.root_dir.display());
            return files;
        }

        debug!("Starting scan of {}", self.root_dir.display());

        for result in WalkDir::new(&self.root_dir).follow_links(false) {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    let err = Error::from(e);
                    warn!("Walk error: {}", err);
                    stats.errors += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            stats.visited_files += 1;

            let path = entry.path();
            if !has_extension(path, &self.extension) {
                trace!("Skipping {}", path.display());
                continue;
            }

            files.push(Self::entry_for(path, &self.root_dir));
            stats.matched_files += 1;
        }

        debug!(
            "Scan complete: {} visited, {} matched, {} errors",
            stats.visited_files, stats.matched_files, stats.errors
        );

        files
    }

    fn entry_for(path: &Path, root: &Path) -> FileEntry {
        let relative_path = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
        FileEntry::new(path.to_path_buf(), relative_path)
    }
}
