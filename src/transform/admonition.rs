//! Step 4: admonitions to `<Callout>` components.
//!
//! Two source syntaxes are recognised:
//!
//! ```text
//! :::warning Optional title        > [!WARNING]
//! body                              > body
//! :::                               > more body
//! ```
//!
//! A first pass pairs fenced openers with closers the way brackets pair, so
//! blocks nest and an outer block ends at its own closer. An opener that is
//! never closed is left as written. A second pass emits the text, keeping a
//! stack of open fenced blocks whose bodies collect converted output, so
//! neither pass recurses.

use std::fmt;

/// Fern callout intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Green
    Success,
    /// Blue
    Info,
    /// Amber
    Warning,
    /// Red
    Danger,
}

impl Intent {
    /// Intent for a fenced `:::kind` block. Unknown kinds map to `Info`.
    #[must_use]
    pub fn for_fenced(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "tip" => Self::Success,
            "warning" | "caution" | "important" => Self::Warning,
            "danger" => Self::Danger,
            _ => Self::Info,
        }
    }

    /// Intent for a quoted `> [!KIND]` block, or `None` for unknown kinds.
    ///
    /// Kinds are compared case-insensitively in [`QUOTED_KINDS`] order.
    #[must_use]
    pub fn for_quoted(kind: &str) -> Option<Self> {
        QUOTED_KINDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(kind))
            .map(|&(_, intent)| intent)
    }

    /// Attribute value as written into the markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quoted admonition kinds, in resolution order.
///
/// `caution` is a warning in fenced syntax but a danger in quoted syntax.
pub const QUOTED_KINDS: [(&str, Intent); 5] = [
    ("note", Intent::Info),
    ("tip", Intent::Success),
    ("important", Intent::Warning),
    ("warning", Intent::Warning),
    ("caution", Intent::Danger),
];

struct FencedBlock<'a> {
    kind: &'a str,
    title: Option<&'a str>,
    body: String,
}

impl FencedBlock<'_> {
    fn render_into(&self, out: &mut String) {
        let intent = Intent::for_fenced(self.kind);
        out.push_str("<Callout intent=\"");
        out.push_str(intent.as_str());
        out.push_str("\">\n");
        if let Some(title) = self.title {
            out.push_str("**");
            out.push_str(title);
            out.push_str("**\n\n");
        }
        out.push_str(self.body.trim());
        out.push_str("\n</Callout>");
    }
}

struct QuotedBlock<'a> {
    intent: Intent,
    lines: Vec<&'a str>,
}

impl<'a> QuotedBlock<'a> {
    fn push(&mut self, content: &'a str) {
        let stripped = content.strip_prefix('>').unwrap_or(content);
        let stripped = stripped.strip_prefix(' ').unwrap_or(stripped).trim_end();
        if !stripped.is_empty() {
            self.lines.push(stripped);
        }
    }

    fn render(&self) -> String {
        format!(
            "<Callout intent=\"{}\">\n{}\n</Callout>\n",
            self.intent,
            self.lines.join("\n")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Plain,
    Open,
    Close,
}

/// Pairs fenced openers with closers, innermost first.
///
/// Openers left without a closer, and closers without an opener, stay
/// `Plain`.
fn pair_fences(lines: &[&str]) -> Vec<Role> {
    let mut roles = vec![Role::Plain; lines.len()];
    let mut open = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let (content, _) = split_terminator(line);
        if is_fence_close(content) {
            if let Some(opener) = open.pop() {
                roles[opener] = Role::Open;
                roles[i] = Role::Close;
            }
        } else if fenced_opener(content).is_some() {
            open.push(i);
        }
    }

    roles
}

/// Rewrites every fenced and quoted admonition into callout markup.
pub fn convert_admonitions(input: &str) -> String {
    let lines: Vec<&str> = input.split_inclusive('\n').collect();
    let roles = pair_fences(&lines);

    let mut out = String::with_capacity(input.len() + 64);
    let mut open: Vec<FencedBlock<'_>> = Vec::new();
    let mut quoted: Option<QuotedBlock<'_>> = None;

    for (&line, role) in lines.iter().zip(roles) {
        let (content, terminator) = split_terminator(line);

        if let Some(block) = &mut quoted {
            if content.starts_with('>') && quoted_opener(content).is_none() {
                block.push(content);
                continue;
            }
            let rendered = block.render();
            open.last_mut().map_or(&mut out, |b| &mut b.body).push_str(&rendered);
            quoted = None;
        }

        match role {
            Role::Open => {
                if let Some((kind, title)) = fenced_opener(content) {
                    open.push(FencedBlock {
                        kind,
                        title,
                        body: String::new(),
                    });
                }
            }
            Role::Close => {
                if let Some(block) = open.pop() {
                    let target = open.last_mut().map_or(&mut out, |b| &mut b.body);
                    block.render_into(target);
                    target.push_str(terminator);
                }
            }
            Role::Plain => {
                if let Some(intent) = quoted_opener(content) {
                    quoted = Some(QuotedBlock {
                        intent,
                        lines: Vec::new(),
                    });
                } else {
                    open.last_mut().map_or(&mut out, |b| &mut b.body).push_str(line);
                }
            }
        }
    }

    if let Some(block) = quoted {
        out.push_str(&block.render());
    }

    out
}

fn split_terminator(line: &str) -> (&str, &str) {
    let content = line.trim_end_matches(['\n', '\r']);
    (content, &line[content.len()..])
}

/// `:::kind` or `:::kind Title`, possibly indented.
fn fenced_opener(content: &str) -> Option<(&str, Option<&str>)> {
    let rest = content.trim_start().strip_prefix(":::")?;
    let kind_len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if kind_len == 0 {
        return None;
    }

    let (kind, tail) = rest.split_at(kind_len);
    if !tail.is_empty() && !tail.starts_with(char::is_whitespace) {
        return None;
    }

    let title = Some(tail.trim()).filter(|t| !t.is_empty());
    Some((kind, title))
}

fn is_fence_close(content: &str) -> bool {
    content.trim() == ":::"
}

/// `> [!KIND]` with a recognised kind and nothing after the bracket.
fn quoted_opener(content: &str) -> Option<Intent> {
    let kind = content
        .trim_end()
        .strip_prefix("> [!")?
        .strip_suffix(']')?;
    Intent::for_quoted(kind)
}
