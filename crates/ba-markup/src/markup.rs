//! Trusted HTML fragments and escaping of literal text.
//!
//! Source text reaches the output only through [`Markup::escape`]. Tags the
//! renderer generates itself are appended with [`Markup::push_tag`] and are
//! never escaped, so nothing is escaped twice.

use std::fmt;

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// HTML produced by the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
    /// Create an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn literal source text into markup by escaping it.
    #[must_use]
    pub fn escape(raw: &str) -> Self {
        Self(escape_html(raw))
    }

    /// Wrap HTML the renderer generated itself.
    pub(crate) fn trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Append a generated tag or attribute run.
    pub(crate) fn push_tag(&mut self, tag: &str) {
        self.0.push_str(tag);
    }

    /// Append another fragment.
    pub fn push(&mut self, other: &Markup) {
        self.0.push_str(&other.0);
    }

    /// Borrow the HTML.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the fragment and return the HTML.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
