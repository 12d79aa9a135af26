//! Config command
//!
//! Manage probboard configuration.

use anyhow::{Context as _, Result};
use clap::Subcommand;
use colored::Colorize;
use std::fs;
use std::path::Path;

use super::Context;
use pb_core::config::Config;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the configuration file path
    Path,

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command
pub fn execute(ctx: &Context, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(ctx, json),
        ConfigCommand::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
        ConfigCommand::Reset { force } => reset_config(&ctx.config_path, force),
    }
}

fn show_config(ctx: &Context, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    if ctx.config_path.exists() {
        println!("{}", ctx.config_path.display().to_string().dimmed());
    } else {
        println!(
            "{} {} (not found, using defaults)",
            "⚠".yellow(),
            ctx.config_path.display().to_string().dimmed()
        );
    }
    println!();
    println!("{}", toml::to_string_pretty(&ctx.config)?);

    Ok(())
}

fn reset_config(config_path: &Path, force: bool) -> Result<()> {
    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    // Backup existing
    if let Some(backup_path) = backup(config_path)? {
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    Config::default()
        .save(config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{} Configuration reset to defaults.", "✓".green());

    Ok(())
}

fn backup(config_path: &Path) -> Result<Option<String>> {
    if !config_path.exists() {
        return Ok(None);
    }
    let backup_path = format!(
        "{}.backup-{}",
        config_path.display(),
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    );
    fs::copy(config_path, &backup_path)?;
    Ok(Some(backup_path))
}
