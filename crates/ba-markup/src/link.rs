//! Markdown link extraction and placeholder restoration.
//!
//! Each block gets its own [`LinkQueue`]. Every `[label](url)` match is
//! rendered to an anchor up front, queued, and replaced in the text by a
//! placeholder token. After inline formatting has run over the rest of the
//! text, [`LinkQueue::restore`] puts the anchors back in the order they were
//! queued.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::inline::format_inline;
use crate::markup::{Markup, escape_html};

/// Opens a placeholder token. Private-use codepoint, stripped from input.
const PLACEHOLDER_OPEN: char = '\u{E000}';
/// Closes a placeholder token.
const PLACEHOLDER_CLOSE: char = '\u{E001}';

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").unwrap());

/// Schemes that run code or inline a document when followed.
const SCRIPT_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// How link targets are classified and rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkPolicy {
    external_prefixes: Vec<String>,
    hash_routes: bool,
    external_marker: String,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            external_prefixes: vec![
                "http://".to_owned(),
                "https://".to_owned(),
                "www.".to_owned(),
            ],
            hash_routes: true,
            external_marker: "↗".to_owned(),
        }
    }
}

impl LinkPolicy {
    /// Create the default policy: `http://`, `https://` and `www.` targets are
    /// external, everything else is a site route, hash routing on.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the prefixes that mark a link target as external.
    #[must_use]
    pub fn with_external_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable hash-router hrefs (`/brokers` → `#/brokers`).
    #[must_use]
    pub fn with_hash_routes(mut self, enabled: bool) -> Self {
        self.hash_routes = enabled;
        self
    }

    /// Set the text shown after external links. Empty disables the marker.
    #[must_use]
    pub fn with_external_marker(mut self, marker: impl Into<String>) -> Self {
        self.external_marker = marker.into();
        self
    }

    /// Whether `href` starts with one of the external prefixes.
    #[must_use]
    pub fn is_external(&self, href: &str) -> bool {
        self.external_prefixes
            .iter()
            .any(|prefix| href.starts_with(prefix.as_str()))
    }

    /// Href written for an internal route. Same-page `#fragment` links are
    /// left alone.
    fn route<'a>(&self, href: &'a str) -> Cow<'a, str> {
        if !self.hash_routes || href.starts_with('#') {
            Cow::Borrowed(href)
        } else if href.starts_with('/') {
            Cow::Owned(format!("#{href}"))
        } else {
            Cow::Owned(format!("#/{href}"))
        }
    }
}

/// A link found in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Visible text, before formatting.
    pub label: String,
    /// Target as written in the source.
    pub href: String,
    /// Opens in a new tab with no referrer.
    pub is_external: bool,
}

impl Link {
    /// Classify a link against `policy`.
    #[must_use]
    pub fn new(label: &str, href: &str, policy: &LinkPolicy) -> Self {
        Self {
            label: label.to_owned(),
            href: href.to_owned(),
            is_external: policy.is_external(href),
        }
    }

    /// Whether the target uses a scheme that runs script or inlines content.
    #[must_use]
    pub fn is_script(&self) -> bool {
        has_script_scheme(&self.href)
    }

    /// Render the anchor element. The label gets inline formatting.
    ///
    /// A link with a script-bearing target renders as its label alone.
    #[must_use]
    pub fn render(&self, policy: &LinkPolicy) -> Markup {
        let label = format_inline(&Markup::escape(&self.label));
        if self.is_script() {
            tracing::warn!(href = %self.href, "Dropped link with script target");
            return label;
        }
        let mut html = String::new();
        if self.is_external {
            write!(
                html,
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{label}"#,
                escape_html(&self.href)
            )
            .unwrap();
            if !policy.external_marker.is_empty() {
                write!(
                    html,
                    r#" <span class="external-link" aria-hidden="true">{}</span>"#,
                    escape_html(&policy.external_marker)
                )
                .unwrap();
            }
            html.push_str("</a>");
        } else {
            write!(
                html,
                r#"<a href="{}">{label}</a>"#,
                escape_html(&policy.route(&self.href))
            )
            .unwrap();
        }
        Markup::trusted(html)
    }
}

/// Browsers skip ASCII whitespace and control characters inside a scheme,
/// so they are skipped here too before comparing.
fn has_script_scheme(href: &str) -> bool {
    let scheme: String = href
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take(16)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    SCRIPT_SCHEMES
        .iter()
        .any(|prefix| scheme.starts_with(prefix))
}

/// Rendered anchors waiting to replace their placeholders, oldest first.
#[derive(Debug, Default)]
pub(crate) struct LinkQueue {
    fragments: VecDeque<Markup>,
}

impl LinkQueue {
    /// Queue an anchor and return the placeholder that stands in for it.
    fn push(&mut self, fragment: Markup) -> String {
        let index = self.fragments.len();
        self.fragments.push_back(fragment);
        format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
    }

    pub(crate) fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Replace placeholders left to right, dequeuing one anchor each.
    pub(crate) fn restore(mut self, text: &Markup) -> Markup {
        if self.fragments.is_empty() {
            return text.clone();
        }
        let mut expected = 0usize;
        let html = PLACEHOLDER_RE.replace_all(text.as_str(), |caps: &Captures<'_>| {
            debug_assert_eq!(caps[1].parse::<usize>().ok(), Some(expected));
            expected += 1;
            self.fragments
                .pop_front()
                .map(Markup::into_string)
                .unwrap_or_default()
        });
        debug_assert!(self.fragments.is_empty(), "unrestored link placeholders");
        Markup::trusted(html.into_owned())
    }
}

/// Swap every `[label](url)` in `raw` for a placeholder.
///
/// Returns the rewritten text (still raw, unescaped) and the queue of
/// rendered anchors. Placeholder characters already present in the input are
/// dropped so that placeholders and queue entries always pair up.
pub(crate) fn extract_links(raw: &str, policy: &LinkPolicy) -> (String, LinkQueue) {
    let markers = [PLACEHOLDER_OPEN, PLACEHOLDER_CLOSE];
    let cleaned: Cow<'_, str> = if raw.contains(markers) {
        Cow::Owned(raw.replace(markers, ""))
    } else {
        Cow::Borrowed(raw)
    };

    let mut queue = LinkQueue::default();
    let text = LINK_RE.replace_all(&cleaned, |caps: &Captures<'_>| {
        let link = Link::new(&caps[1], &caps[2], policy);
        queue.push(link.render(policy))
    });
    (text.into_owned(), queue)
}
