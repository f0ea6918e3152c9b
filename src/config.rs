use crate::error::{Error, Result};
use std::path::PathBuf;

const DEFAULT_SOURCE_EXTENSION: &str = "md";
const DEFAULT_TARGET_EXTENSION: &str = "mdx";

/// Relative prefix that root-relative `/img/` links are rewritten to.
///
/// Only correct for destination files sitting two directories below the
/// folder that holds `assets/`. The prefix is not derived from the actual
/// destination depth.
pub const DEFAULT_IMAGE_PREFIX: &str = "../../assets/img/";

/// SPDX notice inserted after the frontmatter of every converted document.
///
/// Written as an MDX expression comment, since MDX rejects HTML comments.
pub const DEFAULT_NOTICE: &str = "{/*
  SPDX-FileCopyrightText: Copyright (c) 2025-2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
  SPDX-License-Identifier: Apache-2.0
*/}

";

/// How the source and destination paths are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Source and destination are single files
    Single,
    /// Source and destination are directory roots
    Batch,
}

/// Configuration for a migration run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Source file (single mode) or source root (batch mode)
    pub source: PathBuf,

    /// Destination file (single mode) or destination root (batch mode)
    pub destination: PathBuf,

    /// Single-file or batch conversion
    pub mode: Mode,

    /// Extension of files picked up in batch mode, without the dot
    pub source_extension: String,

    /// Extension given to every written file, without the dot
    pub target_extension: String,

    /// Replacement for the `/img/` prefix in image links
    pub image_prefix: String,

    /// Notice block inserted after the frontmatter
    pub notice: String,

    /// Dry run mode (no file writes)
    pub dry_run: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdx_migrate::{Config, Mode};
    ///
    /// let config = Config::builder()
    ///     .source("docs/intro.md")
    ///     .destination("fern/pages/intro.mdx")
    ///     .build()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.mode, Mode::Single);
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an extension is empty or starts with a dot.
    ///
    /// Source paths are not checked here. A missing single-file source is a
    /// per-file failure, and a missing batch root converts zero files.
    pub fn validate(&self) -> Result<()> {
        for (name, ext) in [
            ("source_extension", &self.source_extension),
            ("target_extension", &self.target_extension),
        ] {
            if ext.is_empty() {
                return Err(Error::config(format!("{name} must not be empty")));
            }
            if ext.starts_with('.') {
                return Err(Error::config(format!(
                    "{name} '{ext}' must be given without the leading dot"
                )));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            destination: PathBuf::from("out"),
            mode: Mode::Single,
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            target_extension: DEFAULT_TARGET_EXTENSION.to_string(),
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            notice: DEFAULT_NOTICE.to_string(),
            dry_run: false,
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
    mode: Option<Mode>,
    source_extension: Option<String>,
    target_extension: Option<String>,
    image_prefix: Option<String>,
    notice: Option<String>,
    dry_run: bool,
}

impl ConfigBuilder {
    /// Sets the source file or directory.
    #[must_use]
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Sets the destination file or directory.
    #[must_use]
    pub fn destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination = Some(path.into());
        self
    }

    /// Sets the conversion mode.
    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Shorthand for `mode(Mode::Batch)` when `enabled`.
    #[must_use]
    pub fn batch(self, enabled: bool) -> Self {
        self.mode(if enabled { Mode::Batch } else { Mode::Single })
    }

    /// Sets the extension of files discovered in batch mode.
    #[must_use]
    pub fn source_extension(mut self, ext: impl Into<String>) -> Self {
        self.source_extension = Some(ext.into());
        self
    }

    /// Sets the extension of written files.
    #[must_use]
    pub fn target_extension(mut self, ext: impl Into<String>) -> Self {
        self.target_extension = Some(ext.into());
        self
    }

    /// Overrides the replacement prefix for `/img/` image links.
    #[must_use]
    pub fn image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_prefix = Some(prefix.into());
        self
    }

    /// Overrides the notice block.
    #[must_use]
    pub fn notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// Enables dry run mode (no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            source: self.source.unwrap_or_else(|| PathBuf::from(".")),
            destination: self.destination.unwrap_or_else(|| PathBuf::from("out")),
            mode: self.mode.unwrap_or(Mode::Single),
            source_extension: self
                .source_extension
                .unwrap_or_else(|| DEFAULT_SOURCE_EXTENSION.to_string()),
            target_extension: self
                .target_extension
                .unwrap_or_else(|| DEFAULT_TARGET_EXTENSION.to_string()),
            image_prefix: self
                .image_prefix
                .unwrap_or_else(|| DEFAULT_IMAGE_PREFIX.to_string()),
            notice: self.notice.unwrap_or_else(|| DEFAULT_NOTICE.to_string()),
            dry_run: self.dry_run,
        };

        config.validate()?;
        Ok(config)
    }
}
