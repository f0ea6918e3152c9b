//! # mdx-migrate
//!
//! Converts Docusaurus-flavoured Markdown pages into Fern-compatible MDX.
//!
//! ## Features
//!
//! - Drops Docusaurus frontmatter and legacy `<!-- -->` header comments
//! - Promotes the leading `# Heading` to a `title` frontmatter field
//! - Rewrites `:::tip` and `> [!NOTE]` admonitions into `<Callout>` components
//! - Rewrites `/img/` image links to the shared assets folder
//! - Adds an SPDX notice as an MDX comment
//! - Single-file and recursive batch conversion with per-file failure isolation
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdx_migrate::{Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .source("docs")
//!     .destination("fern/pages")
//!     .batch(true)
//!     .build()?;
//!
//! let stats = Pipeline::new(config)?.run();
//! assert!(stats.all_succeeded());
//! # Ok(())
//! # }
//! ```
//!
//! For in-memory conversion use [`convert_text`] or a [`Transformer`].

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;
mod file;
mod pipeline;
mod scanner;
mod writer;

pub mod transform;

pub use config::{Config, ConfigBuilder, Mode, DEFAULT_IMAGE_PREFIX, DEFAULT_NOTICE};
pub use error::{Error, Result};
pub use file::{read_source, FileEntry};
pub use pipeline::{convert_file, BatchStats, FileOutcome, Pipeline};
pub use transform::{convert_text, Intent, Transformer};

/// Runs a conversion with the given configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid. Individual file
/// failures are reported in the returned [`BatchStats`] instead.
pub fn run(config: Config) -> Result<BatchStats> {
    Ok(Pipeline::new(config)?.run())
}
