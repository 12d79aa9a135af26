//! Show command
//!
//! Render a problem's discussion in one of the export formats.

use anyhow::{bail, Context as _, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

use super::Context;
use pb_core::export::{ExportRegistry, MarkdownExporter};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// JSON format
    Json,
    /// Compact JSON on a single line
    JsonCompact,
    /// Markdown format
    Markdown,
}

impl ShowFormat {
    fn name(self) -> &'static str {
        match self {
            ShowFormat::Json => "json",
            ShowFormat::JsonCompact => "json-compact",
            ShowFormat::Markdown => "markdown",
        }
    }
}

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Problem ID
    pub problem: String,

    /// Output format, defaults to the configured one
    #[arg(long, short, value_enum)]
    pub format: Option<ShowFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Reply nesting shown before collapsing
    #[arg(long)]
    pub depth: Option<usize>,
}

/// Execute the show command
pub async fn execute(ctx: &Context, args: ShowArgs) -> Result<()> {
    let format = resolve_format(args.format, &ctx.config.export.default_format)?;

    let mut thread_config = ctx.config.thread.clone();
    if let Some(depth) = args.depth {
        thread_config.max_depth = depth;
    }
    let controller = ctx.open_thread_with(&args.problem, &thread_config).await?;
    let view = controller.view();

    eprintln!(
        "Problem {}: {} comments",
        args.problem.cyan(),
        controller.state().forest().len().to_string().yellow()
    );

    // Replace the default markdown exporter to honor the timestamp setting
    let mut registry = ExportRegistry::new();
    registry.register(Box::new(
        MarkdownExporter::new().with_timestamps(ctx.config.export.show_timestamps),
    ));

    if let Some(output_path) = args.output {
        let written = registry.write(&view, &format, &output_path)?;
        eprintln!("{} Exported to {}", "✓".green(), written.display());
    } else {
        let output = registry.render(&view, &format)?;
        std::io::stdout()
            .write_all(output.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn resolve_format(flag: Option<ShowFormat>, configured: &str) -> Result<String> {
    if let Some(format) = flag {
        return Ok(format.name().to_string());
    }
    match ShowFormat::from_str(configured, true) {
        Ok(format) => Ok(format.name().to_string()),
        Err(_) => bail!("Unknown export format in configuration: {}", configured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_config() {
        assert_eq!(resolve_format(Some(ShowFormat::Json), "markdown").unwrap(), "json");
    }

    #[test]
    fn test_configured_format() {
        assert_eq!(resolve_format(None, "json-compact").unwrap(), "json-compact");
        assert_eq!(resolve_format(None, "Markdown").unwrap(), "markdown");
        assert!(resolve_format(None, "yaml").is_err());
    }
}
