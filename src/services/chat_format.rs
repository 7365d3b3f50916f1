//! Chat Content Formatting
//!
//! Renders the limited markdown found in transcript entries: `**bold**`
//! spans and line breaks.

use regex::Regex;
use std::sync::OnceLock;

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

/// Output target for formatted chat content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownStyle {
    /// `<strong>` and `<br />`, with HTML special characters escaped
    Html,
    /// ANSI bold; newlines kept as-is
    Terminal,
    /// Markers stripped
    Plain,
}

fn bold_pattern() -> Option<&'static Regex> {
    static BOLD: OnceLock<Option<Regex>> = OnceLock::new();
    // Non-greedy so that two bold spans on one line stay separate.
    BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").ok()).as_ref()
}

fn replace_bold(content: &str, replacement: &str) -> String {
    match bold_pattern() {
        Some(pattern) => pattern.replace_all(content, replacement).into_owned(),
        None => content.to_string(),
    }
}

fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render transcript content for the given target.
pub fn render_markdown(content: &str, style: MarkdownStyle) -> String {
    match style {
        MarkdownStyle::Html => {
            replace_bold(&escape_html(content), "<strong>$1</strong>").replace('\n', "<br />")
        }
        MarkdownStyle::Terminal => {
            replace_bold(content, &format!("{}$1{}", ANSI_BOLD, ANSI_RESET))
        }
        MarkdownStyle::Plain => replace_bold(content, "$1"),
    }
}
