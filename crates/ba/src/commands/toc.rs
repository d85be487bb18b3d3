//! `ba toc` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use ba_markup::{TocEntry, extract_toc};
use clap::Args;

use super::read_source;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Path to the article source (`-` reads stdin).
    input: PathBuf,

    /// Print entries as a JSON array.
    #[arg(long)]
    json: bool,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let source = read_source(&self.input)?;
        let toc = extract_toc(&source);
        tracing::info!(entries = toc.len(), "Extracted table of contents");

        if self.json {
            output.data(&serde_json::to_string_pretty(&toc)?)?;
        } else if toc.is_empty() {
            output.info("No anchored headings found.");
        } else {
            output.data(&format_toc(&toc))?;
        }
        Ok(())
    }
}

/// One `id<TAB>title` line per entry.
fn format_toc(toc: &[TocEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in toc.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write!(out, "{}\t{}", entry.id, entry.title).unwrap();
    }
    out
}
