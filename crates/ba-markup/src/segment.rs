//! Shortcode segmentation.
//!
//! Articles embed interactive components with bare shortcodes such as
//! `[INTERACTIVE_QUIZ]`. The page swaps those for components, so the source
//! is cut at each shortcode and the parts between are rendered separately.

use crate::markup::Markup;

/// Shortcodes understood by the article pages.
pub const DEFAULT_SHORTCODES: &[&str] = &[
    "DOWNLOAD_RESOURCE",
    "INTERACTIVE_QUIZ",
    "BEGINNER_QUIZ",
    "AUTOMATED_TRADING_QUIZ",
    "LEVERAGE_QUIZ",
    "PLATFORM_QUIZ",
    "COPY_TRADING_QUIZ",
    "DEMO_VS_LIVE_QUIZ",
    "TRADING_RISKS_QUIZ",
    "TRADING_TOOLS_QUIZ",
    "AI_TUTOR_CTA",
];

/// A rendered piece of an article.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// HTML rendered from the source between shortcodes.
    Markup(Markup),
    /// A shortcode name, without brackets.
    Shortcode(String),
}

/// Raw piece of source produced by [`split_shortcodes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Part<'a> {
    Text(&'a str),
    Shortcode(&'a str),
}

/// Cut `source` at every `[NAME]` whose name is in `names`.
///
/// Text parts may be empty or whitespace only; callers skip what renders to
/// nothing.
pub(crate) fn split_shortcodes<'a>(source: &'a str, names: &[String]) -> Vec<Part<'a>> {
    let mut parts = Vec::new();
    let mut rest = source;

    while let Some((start, name)) = next_shortcode(rest, names) {
        parts.push(Part::Text(&rest[..start]));
        parts.push(Part::Shortcode(&rest[start + 1..start + 1 + name.len()]));
        rest = &rest[start + name.len() + 2..];
    }
    parts.push(Part::Text(rest));
    parts
}

/// Earliest `[NAME]` in `text` and the name that matched.
fn next_shortcode<'n>(text: &str, names: &'n [String]) -> Option<(usize, &'n str)> {
    names
        .iter()
        .filter(|name| !name.is_empty())
        .filter_map(|name| find_bracketed(text, name).map(|start| (start, name.as_str())))
        .min_by_key(|(start, _)| *start)
}

fn find_bracketed(text: &str, name: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(offset) = text[from..].find(name) {
        let start = from + offset;
        let end = start + name.len();
        if start > 0 && text[..start].ends_with('[') && text[end..].starts_with(']') {
            return Some(start - 1);
        }
        from = end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_no_shortcodes() {
        assert_eq!(
            split_shortcodes("plain", &names(DEFAULT_SHORTCODES)),
            vec![Part::Text("plain")]
        );
    }

    #[test]
    fn test_split_around_shortcode() {
        assert_eq!(
            split_shortcodes("before\n\n[LEVERAGE_QUIZ]\n\nafter", &names(DEFAULT_SHORTCODES)),
            vec![
                Part::Text("before\n\n"),
                Part::Shortcode("LEVERAGE_QUIZ"),
                Part::Text("\n\nafter"),
            ]
        );
    }

    #[test]
    fn test_adjacent_shortcodes() {
        assert_eq!(
            split_shortcodes("[A][B]", &names(&["A", "B"])),
            vec![
                Part::Text(""),
                Part::Shortcode("A"),
                Part::Text(""),
                Part::Shortcode("B"),
                Part::Text(""),
            ]
        );
    }

    #[test]
    fn test_unknown_bracket_text_is_kept() {
        assert_eq!(
            split_shortcodes("[NOT_A_CODE] text", &names(DEFAULT_SHORTCODES)),
            vec![Part::Text("[NOT_A_CODE] text")]
        );
    }

    #[test]
    fn test_name_must_be_bracketed() {
        assert_eq!(
            split_shortcodes("AI_TUTOR_CTA [AI_TUTOR_CTA]", &names(DEFAULT_SHORTCODES)),
            vec![
                Part::Text("AI_TUTOR_CTA "),
                Part::Shortcode("AI_TUTOR_CTA"),
                Part::Text(""),
            ]
        );
    }

    #[test]
    fn test_earliest_shortcode_first() {
        let parts = split_shortcodes("x [B] y [A] z", &names(&["A", "B"]));
        assert_eq!(parts[1], Part::Shortcode("B"));
        assert_eq!(parts[3], Part::Shortcode("A"));
    }
}
