//! Article renderer.

use std::fmt::Write;

use crate::block::{Block, parse_blocks};
use crate::faq::{FaqEntry, extract_faqs};
use crate::inline::render_inline;
use crate::link::LinkPolicy;
use crate::markup::{Markup, escape_html};
use crate::segment::{DEFAULT_SHORTCODES, Part, Segment, split_shortcodes};
use crate::table::render_table;
use crate::toc::{TocEntry, extract_toc};

/// Result of rendering an article.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Anchored level-2 headings, in document order.
    pub toc: Vec<TocEntry>,
    /// Question/answer pairs for structured data.
    pub faqs: Vec<FaqEntry>,
    /// Warnings generated during rendering (e.g., table cell nesting limit).
    pub warnings: Vec<String>,
}

/// Result of rendering an article in pieces cut at shortcodes.
#[derive(Clone, Debug)]
pub struct SegmentsResult {
    /// Rendered pieces, in document order.
    pub segments: Vec<Segment>,
    /// Warnings generated during rendering.
    pub warnings: Vec<String>,
}

/// Renders article markup to HTML.
///
/// The renderer holds configuration only. Every call to [`render`](Self::render)
/// starts from scratch, so one renderer can be shared between threads and the
/// output depends on nothing but the source text.
#[derive(Clone, Debug)]
pub struct ArticleRenderer {
    links: LinkPolicy,
    max_depth: usize,
    shortcodes: Vec<String>,
}

impl ArticleRenderer {
    /// Default limit on table cells nested inside table cells.
    pub const DEFAULT_MAX_DEPTH: usize = 8;

    /// Create a renderer with the default link policy and shortcodes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            links: LinkPolicy::default(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
            shortcodes: DEFAULT_SHORTCODES.iter().map(|&s| s.to_owned()).collect(),
        }
    }

    /// Set how links are classified and rendered.
    #[must_use]
    pub fn with_link_policy(mut self, policy: LinkPolicy) -> Self {
        self.links = policy;
        self
    }

    /// Limit how deep table cells are fed back through the block pipeline.
    ///
    /// Cells past the limit render as escaped literal text. Zero renders every
    /// cell as literal text.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Replace the shortcode names recognized by
    /// [`render_segments`](Self::render_segments).
    #[must_use]
    pub fn with_shortcodes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shortcodes = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn link_policy(&self) -> &LinkPolicy {
        &self.links
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub fn shortcodes(&self) -> &[String] {
        &self.shortcodes
    }

    /// Render HTML and extract the table of contents and FAQ entries.
    pub fn render(&self, source: &str) -> RenderResult {
        let mut pass = Pass::new(self);
        let html = pass.render_source(source, 0).into_string();
        let toc = extract_toc(source);
        let faqs = extract_faqs(source);

        tracing::debug!(
            bytes = source.len(),
            toc = toc.len(),
            faqs = faqs.len(),
            warnings = pass.warnings.len(),
            "Rendered article"
        );

        RenderResult {
            html,
            toc,
            faqs,
            warnings: pass.warnings,
        }
    }

    /// Render HTML only.
    pub fn render_html(&self, source: &str) -> String {
        Pass::new(self).render_source(source, 0).into_string()
    }

    /// Render the source in pieces cut at shortcodes.
    ///
    /// Parts that render to nothing are dropped.
    pub fn render_segments(&self, source: &str) -> SegmentsResult {
        let mut pass = Pass::new(self);
        let mut segments = Vec::new();
        for part in split_shortcodes(source, &self.shortcodes) {
            match part {
                Part::Text(text) => {
                    let markup = pass.render_source(text, 0);
                    if !markup.is_empty() {
                        segments.push(Segment::Markup(markup));
                    }
                }
                Part::Shortcode(name) => segments.push(Segment::Shortcode(name.to_owned())),
            }
        }
        SegmentsResult {
            segments,
            warnings: pass.warnings,
        }
    }
}

impl Default for ArticleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// State for a single render call.
struct Pass<'r> {
    renderer: &'r ArticleRenderer,
    warnings: Vec<String>,
}

impl<'r> Pass<'r> {
    fn new(renderer: &'r ArticleRenderer) -> Self {
        Self {
            renderer,
            warnings: Vec::new(),
        }
    }

    fn render_source(&mut self, source: &str, depth: usize) -> Markup {
        let mut out = Markup::new();
        for block in parse_blocks(source) {
            let html = self.render_block(&block, depth);
            out.push(&html);
        }
        out
    }

    fn render_block(&mut self, block: &Block<'_>, depth: usize) -> Markup {
        let renderer = self.renderer;
        let links = &renderer.links;
        match block {
            // Anchors are only emitted at the top level, where the TOC finds them.
            Block::Heading2WithAnchor { title, .. } if depth > 0 => {
                wrap("h2", &render_inline(title, links))
            }
            Block::Heading2WithAnchor { title, anchor_id } => {
                let mut html = String::new();
                write!(
                    html,
                    r#"<h2 id="{}">{}</h2>"#,
                    escape_html(anchor_id),
                    render_inline(title, links)
                )
                .unwrap();
                Markup::trusted(html)
            }
            Block::Heading3 { title } => wrap("h3", &render_inline(title, links)),
            Block::Table { header, rows } => {
                render_table(header, rows, |cell| self.render_cell(cell, depth))
            }
            Block::UnorderedList { items } => {
                let mut list = Markup::new();
                for item in items {
                    list.push(&wrap("li", &render_inline(item, links)));
                }
                wrap("ul", &list)
            }
            Block::Paragraph { text } => wrap("p", &render_inline(text, links)),
        }
    }

    /// Feed a table cell back through the block pipeline, one level deeper.
    fn render_cell(&mut self, cell: &str, depth: usize) -> Markup {
        let depth = depth + 1;
        if depth > self.renderer.max_depth {
            let warning = format!(
                "Table cell nesting exceeds {} levels; rendered as text",
                self.renderer.max_depth
            );
            if !self.warnings.contains(&warning) {
                tracing::warn!(max_depth = self.renderer.max_depth, "{warning}");
                self.warnings.push(warning);
            }
            return Markup::escape(cell);
        }
        self.render_source(cell, depth)
    }
}

fn wrap(tag: &str, content: &Markup) -> Markup {
    let mut out = Markup::new();
    out.push_tag(&format!("<{tag}>"));
    out.push(content);
    out.push_tag(&format!("</{tag}>"));
    out
}
