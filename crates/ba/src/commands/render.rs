//! `ba render` command implementation.

use std::path::{Path, PathBuf};

use ba_config::{CliSettings, Config};
use ba_markup::{Segment, escape_html};
use clap::Args;

use super::{build_renderer, read_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the article source (`-` reads stdin).
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Table cell nesting limit (overrides config).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Write internal links as plain paths instead of hash routes.
    #[arg(long)]
    no_hash_routes: bool,

    /// Path to configuration file (default: auto-discover ba.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or a file cannot be read or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if let Some(path) = &self.output
            && self.input != Path::new("-")
            && *path == self.input
        {
            return Err(CliError::Validation(format!(
                "output file would overwrite the input: {}",
                path.display()
            )));
        }

        let cli_settings = CliSettings {
            max_depth: self.max_depth,
            hash_routes: self.no_hash_routes.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded config");
        }

        let source = read_source(&self.input)?;
        let renderer = build_renderer(&config);

        let result = renderer.render_segments(&source);
        let html = segments_to_html(&result.segments);

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{html}\n"))?;
                output.success(&format!("Rendered {}", path.display()));
            }
            None => output.data(&html)?,
        }

        Ok(())
    }
}

/// Join rendered segments, turning shortcodes into component slots.
fn segments_to_html(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Markup(markup) => markup.as_str().to_owned(),
            Segment::Shortcode(name) => {
                format!(r#"<div data-shortcode="{}"></div>"#, escape_html(name))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
