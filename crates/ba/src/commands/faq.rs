//! `ba faq` command implementation.

use std::path::PathBuf;

use ba_markup::{FaqEntry, FaqPage, extract_faqs};
use clap::Args;

use super::read_source;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the faq command.
#[derive(Args)]
pub(crate) struct FaqArgs {
    /// Path to the article source (`-` reads stdin).
    input: PathBuf,

    /// Print the schema.org `FAQPage` JSON-LD object.
    #[arg(long)]
    json_ld: bool,
}

impl FaqArgs {
    /// Execute the faq command.
    ///
    /// Prints nothing when the article has no FAQ entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let source = read_source(&self.input)?;
        let faqs = extract_faqs(&source);
        tracing::info!(entries = faqs.len(), "Extracted FAQ entries");

        if faqs.is_empty() {
            output.info("No FAQ entries found.");
            return Ok(());
        }

        if self.json_ld {
            if let Some(page) = FaqPage::from_entries(&faqs) {
                output.data(&page.to_json()?)?;
            }
        } else {
            output.data(&format_faqs(&faqs))?;
        }
        Ok(())
    }
}

/// `Q:` and `A:` lines per entry, entries separated by a blank line.
fn format_faqs(faqs: &[FaqEntry]) -> String {
    faqs.iter()
        .map(|faq| format!("Q: {}\nA: {}", faq.question, faq.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}
