//! FAQ extraction and `FAQPage` structured data.
//!
//! Questions are written as `**Q: question**`, followed somewhere after by
//! `A: ` and the answer. An answer runs across lines until the next question
//! marker, a `### FAQ` heading line, or the end of the document.

use std::sync::LazyLock;

use regex::Regex;

/// `**Q: question**` on a single line.
static QUESTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Q: (.*?)\*\*").unwrap());

const ANSWER_MARKER: &str = "A: ";

/// Ends an answer early when the FAQ section is followed by its own heading.
const FAQ_HEADING: &str = "\n### FAQ";

/// A question and its answer, both trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Collect question/answer pairs from raw source, in document order.
///
/// Returns an empty list when the source has no question marker. A marker
/// with no `A: ` anywhere after it ends the scan.
#[must_use]
pub fn extract_faqs(source: &str) -> Vec<FaqEntry> {
    let mut faqs = Vec::new();
    let mut pos = 0;

    while let Some(caps) = QUESTION_RE.captures_at(source, pos) {
        let (Some(marker), Some(question)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let Some(offset) = source[marker.end()..].find(ANSWER_MARKER) else {
            break;
        };
        let answer_start = marker.end() + offset + ANSWER_MARKER.len();
        let tail = &source[answer_start..];
        let answer_len = [
            QUESTION_RE.find(tail).map(|m| m.start()),
            tail.find(FAQ_HEADING),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(tail.len());

        faqs.push(FaqEntry {
            question: question.as_str().trim().to_owned(),
            answer: tail[..answer_len].trim().to_owned(),
        });
        pos = answer_start + answer_len;
    }

    faqs
}

#[cfg(feature = "serde")]
pub use structured_data::FaqPage;

#[cfg(feature = "serde")]
mod structured_data {
    use serde::Serialize;

    use super::FaqEntry;

    /// schema.org `FAQPage` object for a JSON-LD script tag.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize)]
    pub struct FaqPage {
        #[serde(rename = "@context")]
        context: &'static str,
        #[serde(rename = "@type")]
        kind: &'static str,
        #[serde(rename = "mainEntity")]
        main_entity: Vec<Question>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize)]
    struct Question {
        #[serde(rename = "@type")]
        kind: &'static str,
        name: String,
        #[serde(rename = "acceptedAnswer")]
        accepted_answer: Answer,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize)]
    struct Answer {
        #[serde(rename = "@type")]
        kind: &'static str,
        text: String,
    }

    impl FaqPage {
        /// Build the object, or `None` when there are no entries.
        #[must_use]
        pub fn from_entries(entries: &[FaqEntry]) -> Option<Self> {
            if entries.is_empty() {
                return None;
            }
            let main_entity = entries
                .iter()
                .map(|entry| Question {
                    kind: "Question",
                    name: entry.question.clone(),
                    accepted_answer: Answer {
                        kind: "Answer",
                        text: entry.answer.clone(),
                    },
                })
                .collect();
            Some(Self {
                context: "https://schema.org",
                kind: "FAQPage",
                main_entity,
            })
        }

        /// Number of questions.
        #[must_use]
        pub fn len(&self) -> usize {
            self.main_entity.len()
        }

        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.main_entity.is_empty()
        }

        /// Serialize as pretty-printed JSON.
        pub fn to_json(&self) -> Result<String, serde_json::Error> {
            serde_json::to_string_pretty(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(question: &str, answer: &str) -> FaqEntry {
        FaqEntry {
            question: question.to_owned(),
            answer: answer.to_owned(),
        }
    }

    #[test]
    fn test_no_marker_is_empty() {
        assert!(extract_faqs("## Intro {#intro}\n\nNo questions here.").is_empty());
    }

    #[test]
    fn test_two_pairs_in_order() {
        let source = "### FAQ\n\n**Q: Is it regulated?**\nA: Yes, by the FCA.\n\n**Q: Minimum deposit?**\nA: $100.\n";
        assert_eq!(
            extract_faqs(source),
            vec![
                entry("Is it regulated?", "Yes, by the FCA."),
                entry("Minimum deposit?", "$100."),
            ]
        );
    }

    #[test]
    fn test_answer_spans_lines() {
        let source = "**Q: Why?**\nA: First line.\nSecond line.\n\nThird paragraph.";
        assert_eq!(
            extract_faqs(source),
            vec![entry(
                "Why?",
                "First line.\nSecond line.\n\nThird paragraph."
            )]
        );
    }

    #[test]
    fn test_answer_ends_at_next_marker_without_blank_line() {
        let source = "**Q: One?**\nA: 1\n**Q: Two?**\nA: 2";
        assert_eq!(
            extract_faqs(source),
            vec![entry("One?", "1"), entry("Two?", "2")]
        );
    }

    #[test]
    fn test_answer_ends_at_faq_heading() {
        let source = "**Q: One?**\nA: 1\n### FAQ\nTrailing.";
        assert_eq!(extract_faqs(source), vec![entry("One?", "1")]);
    }

    #[test]
    fn test_marker_without_answer_stops() {
        assert!(extract_faqs("**Q: Lonely question?**\nNo answer marker.").is_empty());
    }

    #[test]
    fn test_question_is_trimmed() {
        let source = "**Q:   Spaced?  ** A:  yes  ";
        assert_eq!(extract_faqs(source), vec![entry("Spaced?", "yes")]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_faq_page_json_ld() {
        let page = FaqPage::from_entries(&[entry("Q1?", "A1")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&page.to_json().unwrap()).unwrap();
        assert_eq!(value["@context"], "https://schema.org");
        assert_eq!(value["@type"], "FAQPage");
        assert_eq!(value["mainEntity"][0]["@type"], "Question");
        assert_eq!(value["mainEntity"][0]["name"], "Q1?");
        assert_eq!(value["mainEntity"][0]["acceptedAnswer"]["@type"], "Answer");
        assert_eq!(value["mainEntity"][0]["acceptedAnswer"]["text"], "A1");
        assert_eq!(page.len(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_faq_page_empty_is_none() {
        assert_eq!(FaqPage::from_entries(&[]), None);
    }
}
