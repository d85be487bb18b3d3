//! Block splitting and classification.
//!
//! A block is a run of source text bounded by blank lines. Each block is
//! classified by the first rule that matches, in this order:
//!
//! 1. `## Title {#anchor}` on the first line
//! 2. `### Title` on the first line
//! 3. any line starting with `|` that contains another `|`
//! 4. first line starting with `* `
//! 5. anything else is a paragraph
//!
//! Lines following a heading line are classified again as a block of their
//! own.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::heading::{parse_anchored, parse_h3};

/// One or more blank lines. Lines holding only spaces or tabs count as blank.
static BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap());

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\|.*\|").unwrap());

const LIST_MARKER: &str = "* ";

/// A classified block of source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block<'a> {
    /// `## Title {#anchor}`: a navigation target and TOC entry.
    Heading2WithAnchor { title: &'a str, anchor_id: &'a str },
    /// `### Title`.
    Heading3 { title: &'a str },
    /// Pipe table. The separator row is already dropped.
    Table {
        header: Vec<&'a str>,
        rows: Vec<Vec<&'a str>>,
    },
    /// `* item` lines.
    UnorderedList { items: Vec<Cow<'a, str>> },
    /// Fallback for anything else.
    Paragraph { text: &'a str },
}

impl<'a> Block<'a> {
    /// Classify one trimmed, non-empty raw block.
    ///
    /// Returns the block and, for headings, whatever followed the heading
    /// line so the caller can classify it in turn.
    #[must_use]
    pub fn classify(raw: &'a str) -> (Self, Option<&'a str>) {
        let first_line = raw.lines().next().unwrap_or_default();

        if let Some(heading) = parse_anchored(first_line) {
            let block = Block::Heading2WithAnchor {
                title: heading.title.trim(),
                anchor_id: heading.id.trim(),
            };
            return (block, non_empty(&raw[heading.end..]));
        }

        if let Some(title) = parse_h3(first_line) {
            let block = Block::Heading3 {
                title: title.trim(),
            };
            return (block, non_empty(&raw[first_line.len()..]));
        }

        if TABLE_RE.is_match(raw) {
            return (parse_table(raw), None);
        }

        if raw.starts_with(LIST_MARKER) {
            return (parse_list(raw), None);
        }

        (Block::Paragraph { text: raw }, None)
    }
}

/// Split source text into trimmed, non-empty raw blocks.
#[must_use]
pub fn split_blocks(source: &str) -> Vec<&str> {
    BOUNDARY_RE
        .split(source)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Split and classify source text.
#[must_use]
pub fn parse_blocks(source: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    for raw in split_blocks(source) {
        let mut next = Some(raw);
        while let Some(raw) = next {
            let (block, rest) = Block::classify(raw);
            blocks.push(block);
            next = rest;
        }
    }
    blocks
}

fn non_empty(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

/// Row 0 is the header, row 1 the separator (dropped unchecked), the rest body.
fn parse_table(raw: &str) -> Block<'_> {
    let mut lines = raw.lines();
    let header = lines.next().map(split_cells).unwrap_or_default();
    lines.next();
    let rows = lines.map(split_cells).collect();
    Block::Table { header, rows }
}

/// Split a table row on `|`, dropping the empty outer cells produced by a
/// leading or trailing delimiter. Inner empty cells are kept.
fn split_cells(row: &str) -> Vec<&str> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    if row.is_empty() {
        return Vec::new();
    }
    row.split('|').map(str::trim).collect()
}

/// Lines starting with the marker open an item; other lines continue the
/// previous one.
fn parse_list(raw: &str) -> Block<'_> {
    let mut items: Vec<Cow<'_, str>> = Vec::new();
    for line in raw.lines() {
        if let Some(item) = line.strip_prefix(LIST_MARKER) {
            items.push(Cow::Borrowed(item.trim()));
        } else if let Some(last) = items.last_mut() {
            let line = line.trim();
            if !line.is_empty() {
                let item = last.to_mut();
                item.push(' ');
                item.push_str(line);
            }
        }
    }
    Block::UnorderedList { items }
}
