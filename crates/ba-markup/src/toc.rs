//! Table of contents extraction.

use crate::block::{Block, parse_blocks};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Anchor id (the `{#id}` part).
    pub id: String,
    /// Heading title as written, trimmed.
    pub title: String,
}

/// Collect anchored level-2 headings from raw source, in document order.
///
/// Uses the same block classification as the renderer, so every entry has a
/// rendered `<h2 id>` to link to. Headings inside table cells render without
/// an anchor and are not collected.
#[must_use]
pub fn extract_toc(source: &str) -> Vec<TocEntry> {
    parse_blocks(source)
        .into_iter()
        .filter_map(|block| match block {
            Block::Heading2WithAnchor { title, anchor_id } => Some(TocEntry {
                id: anchor_id.to_owned(),
                title: title.to_owned(),
            }),
            _ => None,
        })
        .collect()
}
