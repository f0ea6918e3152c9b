use crate::{
    config::{Config, Mode},
    error::Result,
    file::{read_source, FileEntry},
    scanner::Scanner,
    transform::Transformer,
    writer::Writer,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Result of converting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Source path as reported to the user (relative to the root in batch mode)
    pub source: PathBuf,

    /// Path the output was (or, in dry run mode, would have been) written to
    pub destination: PathBuf,

    /// Whether the conversion succeeded
    pub success: bool,

    /// Failure message, if any
    pub error: Option<String>,
}

impl FileOutcome {
    fn succeeded(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
            success: true,
            error: None,
        }
    }

    fn failed(source: PathBuf, destination: PathBuf, message: String) -> Self {
        Self {
            source,
            destination,
            success: false,
            error: Some(message),
        }
    }
}

/// Statistics collected during a run.
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    /// Files converted and written
    pub succeeded: usize,

    /// Files that failed to convert
    pub failed: usize,

    /// Per-file results, in processing order
    pub outcomes: Vec<FileOutcome>,

    /// Total execution time
    pub duration: Duration,
}

impl BatchStats {
    fn record(&mut self, outcome: FileOutcome) {
        if outcome.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Number of files attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Returns true when no file failed.
    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// One-line summary, e.g. `Converted 3 files, 1 failures`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!("Converted {} files, {} failures", self.succeeded, self.failed)
    }
}

/// Converts one file from `src` to `dest` and never propagates the failure.
///
/// Read, conversion and write errors are logged with the source path and
/// folded into the returned outcome. A `dest` ending in `.md` is written as
/// `.mdx`.
pub fn convert_file(config: &Config, src: &Path, dest: &Path) -> FileOutcome {
    let transformer = Transformer::new(config);
    let writer = Writer::new(config);
    convert_one(&transformer, &writer, src, src.to_path_buf(), dest)
}

fn convert_one(
    transformer: &Transformer,
    writer: &Writer,
    src: &Path,
    display: PathBuf,
    dest: &Path,
) -> FileOutcome {
    let attempt = || -> Result<PathBuf> {
        let source = read_source(src)?;
        let converted = transformer.transform(&source);
        writer.write(dest, &converted)
    };

    match attempt() {
        Ok(written) => {
            debug!("Converted {} -> {}", src.display(), written.display());
            FileOutcome::succeeded(display, written)
        }
        Err(e) => {
            error!("Error converting {}: {}", src.display(), e);
            FileOutcome::failed(display, writer.output_path(dest), e.to_string())
        }
    }
}

/// Drives a migration run in either mode.
pub struct Pipeline {
    config: Config,
    transformer: Transformer,
    writer: Writer,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let transformer = Transformer::new(&config);
        let writer = Writer::new(&config);

        Ok(Self {
            config,
            transformer,
            writer,
        })
    }

    /// Executes the run and returns statistics.
    ///
    /// Per-file failures are recorded in the stats and never abort the run.
    /// A batch root that is missing or not a directory converts zero files.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mdx_migrate::{Config, Pipeline};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder()
    ///     .source("docs")
    ///     .destination("fern/pages")
    ///     .batch(true)
    ///     .build()?;
    ///
    /// let stats = Pipeline::new(config)?.run();
    /// println!("{}", stats.summary_line());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn run(&self) -> BatchStats {
        self.run_with(|_| {})
    }

    /// Same as [`Pipeline::run`], calling `on_outcome` as soon as each file
    /// has been converted.
    #[instrument(skip(self, on_outcome), fields(source = %self.config.source.display(), mode = ?self.config.mode))]
    pub fn run_with(&self, mut on_outcome: impl FnMut(&FileOutcome)) -> BatchStats {
        let start_time = Instant::now();

        if self.config.dry_run {
            warn!("Dry run mode enabled - skipping file writes");
        }

        let mut stats = match self.config.mode {
            Mode::Single => self.run_single(&mut on_outcome),
            Mode::Batch => self.run_batch(&mut on_outcome),
        };
        stats.duration = start_time.elapsed();

        info!(
            "{} in {:.2}s",
            stats.summary_line(),
            stats.duration.as_secs_f64()
        );

        stats
    }

    fn run_single(&self, on_outcome: &mut impl FnMut(&FileOutcome)) -> BatchStats {
        let outcome = convert_one(
            &self.transformer,
            &self.writer,
            &self.config.source,
            self.config.source.clone(),
            &self.config.destination,
        );
        on_outcome(&outcome);

        let mut stats = BatchStats::default();
        stats.record(outcome);
        stats
    }

    fn run_batch(&self, on_outcome: &mut impl FnMut(&FileOutcome)) -> BatchStats {
        let files = Scanner::new(&self.config).scan();
        info!("Found {} source files", files.len());

        let mut stats = BatchStats::default();
        for entry in files {
            let outcome = self.convert_entry(&entry);
            on_outcome(&outcome);
            stats.record(outcome);
        }
        stats
    }

    fn convert_entry(&self, entry: &FileEntry) -> FileOutcome {
        let dest = entry.destination_in(&self.config.destination, &self.config.target_extension);
        convert_one(
            &self.transformer,
            &self.writer,
            &entry.absolute_path,
            entry.relative_path.clone(),
            &dest,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn batch_config(src: &Path, dest: &Path) -> Config {
        Config::builder()
            .source(src)
            .destination(dest)
            .batch(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_batch_converts_tree() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("docs");
        src.child("intro.md").write_str("# Intro\n\nHello\n").unwrap();
        src.child("guides/setup.md")
            .write_str(":::tip\nRun it.\n:::\n")
            .unwrap();
        src.child("img/logo.png").write_binary(&[0x89, 0x50]).unwrap();
        let dest = temp.child("pages");

        let stats = Pipeline::new(batch_config(src.path(), dest.path()))
            .unwrap()
            .run();

        assert_eq!(stats.succeeded, 2);
        assert_eq!(stats.failed, 0);
        assert!(stats.all_succeeded());
        dest.child("intro.mdx")
            .assert(predicates::str::contains("title: \"Intro\""));
        dest.child("guides/setup.mdx")
            .assert(predicates::str::contains("<Callout intent=\"success\">"));
        dest.child("img/logo.png").assert(predicates::path::missing());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("docs");
        src.child("good.md").write_str("Fine\n").unwrap();
        src.child("bad.md").write_binary(&[0xff, 0xfe, 0xfd]).unwrap();
        let dest = temp.child("pages");

        let stats = Pipeline::new(batch_config(src.path(), dest.path()))
            .unwrap()
            .run();

        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.summary_line(), "Converted 1 files, 1 failures");

        let failure = stats.outcomes.iter().find(|o| !o.success).unwrap();
        assert_eq!(failure.source, PathBuf::from("bad.md"));
        assert!(failure.error.as_deref().unwrap().contains("UTF-8"));

        dest.child("good.mdx").assert(predicates::path::exists());
        dest.child("bad.mdx").assert(predicates::path::missing());
    }

    #[test]
    fn test_batch_empty_source() {
        let temp = assert_fs::TempDir::new().unwrap();
        let stats = Pipeline::new(batch_config(temp.path(), &temp.path().join("out")))
            .unwrap()
            .run();

        assert_eq!(stats.total(), 0);
        assert_eq!(stats.summary_line(), "Converted 0 files, 0 failures");
    }

    #[test]
    fn test_single_md_destination_becomes_mdx() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("page.md");
        src.write_str("# Page\n").unwrap();

        let config = Config::builder()
            .source(src.path())
            .destination(temp.path().join("out/page.md"))
            .build()
            .unwrap();

        let stats = Pipeline::new(config).unwrap().run();

        assert!(stats.all_succeeded());
        assert_eq!(stats.outcomes[0].destination, temp.path().join("out/page.mdx"));
        temp.child("out/page.mdx").assert(predicates::path::exists());
        temp.child("out/page.md").assert(predicates::path::missing());
    }

    #[test]
    fn test_single_missing_source_fails() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder()
            .source(temp.path().join("missing.md"))
            .destination(temp.path().join("out.mdx"))
            .build()
            .unwrap();

        let stats = Pipeline::new(config).unwrap().run();

        assert_eq!(stats.failed, 1);
        assert!(stats.outcomes[0].error.is_some());
    }

    #[test]
    fn test_dry_run_reports_without_writing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("docs");
        src.child("a.md").write_str("A\n").unwrap();
        let dest = temp.child("pages");

        let config = Config::builder()
            .source(src.path())
            .destination(dest.path())
            .batch(true)
            .dry_run(true)
            .build()
            .unwrap();

        let stats = Pipeline::new(config).unwrap().run();

        assert_eq!(stats.succeeded, 1);
        assert!(!dest.exists());
    }

    #[test]
    fn test_convert_file_overwrites_existing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("page.md");
        src.write_str("New body\n").unwrap();
        let dest = temp.child("page.mdx");
        dest.write_str("stale").unwrap();

        let outcome = convert_file(&Config::default(), src.path(), dest.path());

        assert!(outcome.success);
        dest.assert(predicates::str::ends_with("New body\n"));
    }

    #[test]
    fn test_batch_missing_source_converts_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let stats = Pipeline::new(batch_config(
            &temp.path().join("missing"),
            &temp.path().join("out"),
        ))
        .unwrap()
        .run();

        assert_eq!(stats.total(), 0);
        assert_eq!(stats.summary_line(), "Converted 0 files, 0 failures");
        temp.child("out").assert(predicates::path::missing());
    }

    #[test]
    fn test_run_with_reports_each_file_as_it_completes() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("docs");
        src.child("a.md").write_str("A\n").unwrap();
        src.child("b.md").write_binary(&[0xff, 0xfe]).unwrap();
        src.child("nested/c.md").write_str("C\n").unwrap();
        let dest = temp.child("pages");

        let mut seen = Vec::new();
        let stats = Pipeline::new(batch_config(src.path(), dest.path()))
            .unwrap()
            .run_with(|outcome| seen.push((outcome.source.clone(), outcome.success)));

        let recorded: Vec<_> = stats
            .outcomes
            .iter()
            .map(|o| (o.source.clone(), o.success))
            .collect();
        assert_eq!(seen, recorded);
        assert_eq!(seen.len(), 3);
        assert_eq!(seen.iter().filter(|(_, ok)| !ok).count(), stats.failed);
    }
}
