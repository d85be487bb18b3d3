//! Heading grammar used by block classification.
//!
//! `## Title {#anchor}` is the only heading form that carries an anchor and
//! shows up in the table of contents. `### Title` renders as a plain level-3
//! heading.

use std::sync::LazyLock;

use regex::Regex;

static ANCHORED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^## (.*?)\{#(.*?)\}").unwrap());

/// An `## Title {#anchor}` heading found at the start of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct AnchoredHeading<'a> {
    /// Title text, untrimmed.
    pub title: &'a str,
    /// Anchor id, untrimmed.
    pub id: &'a str,
    /// Byte offset just past the closing `}`.
    pub end: usize,
}

/// Match the anchored level-2 heading at the start of `line`.
pub(crate) fn parse_anchored(line: &str) -> Option<AnchoredHeading<'_>> {
    let caps = ANCHORED_RE.captures(line)?;
    let whole = caps.get(0)?;
    Some(AnchoredHeading {
        title: caps.get(1)?.as_str(),
        id: caps.get(2)?.as_str(),
        end: whole.end(),
    })
}

/// Match a `### Title` line and return the title.
pub(crate) fn parse_h3(line: &str) -> Option<&str> {
    line.strip_prefix("### ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_anchored_heading() {
        let heading = parse_anchored("## Getting Started {#start}").unwrap();
        assert_eq!(heading.title, "Getting Started ");
        assert_eq!(heading.id, "start");
        assert_eq!(heading.end, "## Getting Started {#start}".len());
    }

    #[test]
    fn test_anchored_heading_with_trailing_text() {
        let line = "## Fees {#fees} and more";
        let heading = parse_anchored(line).unwrap();
        assert_eq!(&line[heading.end..], " and more");
    }

    #[test]
    fn test_anchored_heading_requires_anchor() {
        assert_eq!(parse_anchored("## No anchor"), None);
    }

    #[test]
    fn test_anchored_heading_requires_line_start() {
        assert_eq!(parse_anchored("text ## Title {#x}"), None);
    }

    #[test]
    fn test_h3_is_not_anchored() {
        assert_eq!(parse_anchored("### Title {#x}"), None);
        assert_eq!(parse_h3("### Title {#x}"), Some("Title {#x}"));
    }

    #[test]
    fn test_h3_requires_space() {
        assert_eq!(parse_h3("###Title"), None);
    }
}
