//! Steps 2 and 3 plus the final notice insertion.
//!
//! Docusaurus frontmatter (`slug`, `sidebar_position`, ...) has no meaning
//! for Fern, whose navigation lives in `docs.yml`. The only metadata that
//! survives is a `title` taken from the page's leading `# Heading`.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_FRONTMATTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\A---\n.*?\n---\n").unwrap());

static RE_TITLE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A# ([^\n\r]+)[\n\r]+").unwrap());

/// Removes a leading `---` block, delimiters included.
pub fn drop_frontmatter(input: &str) -> String {
    RE_FRONTMATTER.replace(input, "").into_owned()
}

/// Turns a leading `# Heading` line into a `title`-only frontmatter block.
///
/// Leading whitespace is ignored when looking for the heading. Without a
/// heading the input comes back untouched; no frontmatter is synthesised.
pub fn promote_title(input: &str) -> String {
    let trimmed = input.trim_start();

    let Some(caps) = RE_TITLE_LINE.captures(trimmed) else {
        return input.to_string();
    };

    let title = caps[1].trim();
    if title.is_empty() {
        return input.to_string();
    }

    let rest = &trimmed[caps[0].len()..];
    format!("---\ntitle: \"{}\"\n---\n\n{rest}", escape_title(title))
}

fn escape_title(title: &str) -> String {
    title.replace('"', "\\\"")
}

/// Inserts `notice` right after the frontmatter, or at the top when there is
/// none.
///
/// Text that already holds an MDX comment mentioning SPDX is returned as is,
/// so converting converted output never stacks a second notice.
pub fn insert_notice(input: &str, notice: &str) -> String {
    if input.contains("{/*") && input.contains("SPDX") {
        return input.to_string();
    }

    match RE_FRONTMATTER.find(input) {
        Some(m) => {
            let rest = input[m.end()..].trim_start_matches('\n');
            format!("{}\n{notice}{rest}", m.as_str())
        }
        None => format!("{notice}{input}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTICE: &str = "{/* SPDX-License-Identifier: Apache-2.0 */}\n\n";

    #[test]
    fn test_drop_frontmatter() {
        let input = "---\nslug: /intro\nsidebar_position: 2\n---\n# Intro\n";
        assert_eq!(drop_frontmatter(input), "# Intro\n");
    }

    #[test]
    fn test_drop_frontmatter_only_at_start() {
        let input = "Intro\n\n---\nnot: frontmatter\n---\n";
        assert_eq!(drop_frontmatter(input), input);
    }

    #[test]
    fn test_drop_frontmatter_unterminated() {
        let input = "---\nslug: /intro\n# Intro\n";
        assert_eq!(drop_frontmatter(input), input);
    }

    #[test]
    fn test_promote_title() {
        let input = "# Getting Started\n\nInstall it.\n";
        assert_eq!(
            promote_title(input),
            "---\ntitle: \"Getting Started\"\n---\n\nInstall it.\n"
        );
    }

    #[test]
    fn test_promote_title_escapes_quotes() {
        let input = "# The \"fast\" path\nBody\n";
        assert_eq!(
            promote_title(input),
            "---\ntitle: \"The \\\"fast\\\" path\"\n---\n\nBody\n"
        );
    }

    #[test]
    fn test_promote_title_skips_leading_whitespace() {
        let input = "\n\n  # Title\nBody\n";
        assert_eq!(promote_title(input), "---\ntitle: \"Title\"\n---\n\nBody\n");
    }

    #[test]
    fn test_promote_title_ignores_deeper_headings() {
        let input = "## Section\nBody\n";
        assert_eq!(promote_title(input), input);
    }

    #[test]
    fn test_promote_title_requires_line_break() {
        let input = "# Lonely heading";
        assert_eq!(promote_title(input), input);
    }

    #[test]
    fn test_promote_title_without_heading_keeps_whitespace() {
        let input = "\n\nPlain text\n";
        assert_eq!(promote_title(input), input);
    }

    #[test]
    fn test_insert_notice_after_frontmatter() {
        let input = "---\ntitle: \"Intro\"\n---\n\nBody\n";
        assert_eq!(
            insert_notice(input, NOTICE),
            format!("---\ntitle: \"Intro\"\n---\n\n{NOTICE}Body\n")
        );
    }

    #[test]
    fn test_insert_notice_at_top() {
        assert_eq!(insert_notice("Body\n", NOTICE), format!("{NOTICE}Body\n"));
    }

    #[test]
    fn test_insert_notice_is_idempotent() {
        let once = insert_notice("Body\n", NOTICE);
        assert_eq!(insert_notice(&once, NOTICE), once);
    }

    #[test]
    fn test_insert_notice_needs_both_markers() {
        let input = "SPDX mentioned in prose\n";
        assert!(insert_notice(input, NOTICE).starts_with(NOTICE));
    }
}
