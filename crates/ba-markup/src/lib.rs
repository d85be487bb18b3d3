//! Article markup renderer.
//!
//! Turns the restricted markup dialect used for site articles into HTML, and
//! extracts the table of contents and FAQ entries from the same source.
//!
//! # Pipeline
//!
//! - Source is split into blocks on blank lines.
//! - Each block has its links swapped for placeholders, its literal text
//!   escaped and formatted (bold, italic, code), and its links restored.
//! - The block is wrapped according to its type: anchored `<h2>`, `<h3>`,
//!   table, list or paragraph. Table cells go through the whole pipeline
//!   again, up to a depth limit.
//!
//! [`extract_toc`] reads the same classified blocks, so every entry matches a
//! rendered anchor. [`extract_faqs`] scans the raw source directly.
//!
//! # Example
//!
//! ```
//! use ba_markup::ArticleRenderer;
//!
//! let source = "## Fees {#fees}\n\nLow **spreads**.\n\n**Q: Regulated?**\nA: Yes.";
//! let result = ArticleRenderer::new().render(source);
//!
//! assert!(result.html.starts_with(r#"<h2 id="fees">Fees</h2>"#));
//! assert!(result.html.contains("<strong>spreads</strong>"));
//! assert_eq!(result.toc[0].id, "fees");
//! assert_eq!(result.faqs[0].question, "Regulated?");
//! ```

mod block;
mod faq;
mod heading;
mod inline;
mod link;
mod markup;
mod renderer;
mod segment;
mod table;
mod toc;

pub use block::{Block, parse_blocks, split_blocks};
#[cfg(feature = "serde")]
pub use faq::FaqPage;
pub use faq::{FaqEntry, extract_faqs};
pub use link::{Link, LinkPolicy};
pub use markup::{Markup, escape_html};
pub use renderer::{ArticleRenderer, RenderResult, SegmentsResult};
pub use segment::{DEFAULT_SHORTCODES, Segment};
pub use toc::{TocEntry, extract_toc};

/// Render source text with the default renderer settings.
///
/// ```
/// assert_eq!(ba_markup::render_html("Hello"), "<p>Hello</p>");
/// ```
#[must_use]
pub fn render_html(source: &str) -> String {
    ArticleRenderer::new().render_html(source)
}
