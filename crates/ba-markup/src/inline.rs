//! Inline formatting: bold, italic and code spans.
//!
//! Substitutions run in a fixed order (bold, italic, code) over text that is
//! already escaped. Code spans come last and do not shield their content from
//! the bold and italic passes: `` `a_b_c` `` renders as
//! `<code>a<em>b</em>c</code>`.

use std::sync::LazyLock;

use regex::Regex;

use crate::link::{LinkPolicy, extract_links};
use crate::markup::Markup;

/// `**text**` on a single line, shortest match.
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// `_text_` with no underscore inside.
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());

/// `` `text` `` with no backtick inside.
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Apply bold, italic and code substitutions to escaped text.
pub(crate) fn format_inline(text: &Markup) -> Markup {
    let html = BOLD_RE.replace_all(text.as_str(), "<strong>${1}</strong>");
    let html = ITALIC_RE.replace_all(&html, "<em>${1}</em>");
    let html = CODE_RE.replace_all(&html, "<code>${1}</code>");
    Markup::trusted(html.into_owned())
}

/// Render a run of source text: links first, then inline formatting.
///
/// Links are swapped for placeholders before anything else runs so that
/// brackets, underscores or asterisks inside a URL are never read as
/// formatting markers.
pub(crate) fn render_inline(raw: &str, policy: &LinkPolicy) -> Markup {
    let (text, queue) = extract_links(raw, policy);
    let formatted = format_inline(&Markup::escape(&text));
    queue.restore(&formatted)
}
