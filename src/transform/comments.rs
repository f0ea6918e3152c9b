//! Step 1: drop legacy HTML comment blocks.
//!
//! MDX refuses `<!-- ... -->`, so the SPDX headers Docusaurus pages carry in
//! that form have to go before anything else looks at the text. The notice
//! is re-added later in MDX comment syntax.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_LEADING_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A\s*<!--.*?-->\s*").unwrap());

static RE_EMBEDDED_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\n\s*<!--.*?-->\s*\n").unwrap());

/// Removes a comment block at the very start of the text, then collapses
/// every comment block that sits on its own between line breaks (the usual
/// spot right after a closing `---`) into a single newline.
pub fn strip_legacy_comments(input: &str) -> String {
    let s = RE_LEADING_COMMENT.replace(input, "");
    RE_EMBEDDED_COMMENT.replace_all(&s, "\n").into_owned()
}
