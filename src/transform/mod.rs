//! Docusaurus Markdown → Fern MDX text conversion.
//!
//! ## Step Order
//!
//! 1. Strip legacy `<!-- -->` comment blocks
//! 2. Drop the Docusaurus frontmatter
//! 3. Promote a leading `# Heading` to a `title` frontmatter block
//! 4. Rewrite admonitions into `<Callout>` components
//! 5. Rewrite `/img/` image paths
//!
//! and finally insert the SPDX notice after the frontmatter.
//!
//! The order matters. Comments go first so that a header comment does not
//! hide the frontmatter from step 2, and the frontmatter goes before step 3
//! so the heading is at the top when the title is looked for.

mod admonition;
mod assets;
mod comments;
mod frontmatter;

pub use admonition::{convert_admonitions, Intent, QUOTED_KINDS};
pub use assets::rewrite_image_paths;
pub use comments::strip_legacy_comments;
pub use frontmatter::{drop_frontmatter, insert_notice, promote_title};

use crate::config::{Config, DEFAULT_IMAGE_PREFIX, DEFAULT_NOTICE};
use tracing::trace;

/// Applies the conversion steps to whole documents.
///
/// Holds no state between calls; one instance can convert any number of
/// documents.
#[derive(Debug, Clone)]
pub struct Transformer {
    image_prefix: String,
    notice: String,
}

impl Transformer {
    /// Creates a transformer from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            image_prefix: config.image_prefix.clone(),
            notice: config.notice.clone(),
        }
    }

    /// Converts one source document into its MDX counterpart.
    #[must_use]
    pub fn transform(&self, source: &str) -> String {
        let s = strip_legacy_comments(source);
        let s = drop_frontmatter(&s);
        let s = promote_title(&s);
        let s = convert_admonitions(&s);
        let s = rewrite_image_paths(&s, &self.image_prefix);
        trace!("Body converted, inserting notice");
        insert_notice(&s, &self.notice)
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self {
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            notice: DEFAULT_NOTICE.to_string(),
        }
    }
}

/// Converts `source` with the default image prefix and notice.
///
/// # Examples
///
/// ```
/// let out = mdx_migrate::convert_text("# Hello\n\n:::tip\nUse it.\n:::\n");
///
/// assert!(out.starts_with("---\ntitle: \"Hello\"\n---\n"));
/// assert!(out.contains("<Callout intent=\"success\">\nUse it.\n</Callout>"));
/// ```
#[must_use]
pub fn convert_text(source: &str) -> String {
    Transformer::default().transform(source)
}
