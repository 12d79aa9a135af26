//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod edit;
pub mod math;
pub mod post;
pub mod show;

use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};
use pb_client::{CommentBackend, Credential, HttpBackend, ThreadController};
use pb_core::config::{Config, ThreadConfig};
use pb_core::{ProblemId, UserId};
use std::path::PathBuf;
use std::sync::Arc;

/// probboard - discussion threads for math problems
#[derive(Debug, Parser)]
#[command(name = "probboard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overrides the configuration
    #[arg(long, global = true, env = "PROBBOARD_URL")]
    pub base_url: Option<String>,

    /// Bearer token, overrides the configured token variable
    #[arg(long, global = true, env = "PROBBOARD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Author id stamped on new comments
    #[arg(long, global = true, env = "PROBBOARD_USER")]
    pub user: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a problem's discussion
    Show(show::ShowArgs),

    /// Post a top-level comment
    Post(post::PostArgs),

    /// Reply to a comment
    Reply(post::ReplyArgs),

    /// Edit a comment
    Edit(edit::EditArgs),

    /// Delete a comment and its replies
    Delete(edit::DeleteArgs),

    /// Mark or unmark a comment as the solution
    Solve(edit::SolveArgs),

    /// LaTeX symbol palettes
    #[command(subcommand)]
    Math(math::MathCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Settings shared by every command
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    credential: Option<Credential>,
    user: UserId,
}

impl Context {
    /// Resolve configuration and overrides from the command line
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = cli.config.clone().unwrap_or_else(default_config_path);
        let mut config = Config::load_or_default(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;

        if let Some(base_url) = &cli.base_url {
            config.backend.base_url = base_url.clone();
        }

        let credential = cli
            .token
            .as_deref()
            .map(Credential::new)
            .or_else(|| Credential::from_env(&config.backend.token_env));

        Ok(Self {
            config,
            config_path,
            credential,
            user: cli.user.as_deref().map(UserId::from).unwrap_or_default(),
        })
    }

    fn backend(&self) -> Result<Arc<dyn CommentBackend>> {
        let backend = HttpBackend::from_config(&self.config.backend)
            .context("Failed to set up HTTP client")?
            .with_credential(self.credential.clone());
        Ok(Arc::new(backend))
    }

    /// Open a problem's thread and load it
    pub async fn open_thread(&self, problem: &str) -> Result<ThreadController> {
        self.open_thread_with(problem, &self.config.thread).await
    }

    /// Open a problem's thread with custom thread settings
    pub async fn open_thread_with(
        &self,
        problem: &str,
        thread: &ThreadConfig,
    ) -> Result<ThreadController> {
        let mut controller = ThreadController::from_config(
            ProblemId::from(problem),
            self.backend()?,
            self.user.clone(),
            thread,
        );
        let loaded = controller.reload().await;
        finish(&mut controller, loaded)?;
        Ok(controller)
    }
}

/// Turn a controller outcome into a command result
pub fn finish(controller: &mut ThreadController, ok: bool) -> Result<()> {
    if let Some(notice) = controller.take_notice() {
        bail!("{}", notice);
    }
    if !ok {
        bail!("Nothing changed");
    }
    Ok(())
}

/// Configuration file in the platform config directory
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("org", "probboard", "probboard")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".probboard/config.toml"))
}

/// Run the CLI application
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let ctx = Context::from_cli(&cli)?;

    // Dispatch to command handler
    match cli.command {
        Commands::Show(args) => show::execute(&ctx, args).await,
        Commands::Post(args) => post::execute(&ctx, args).await,
        Commands::Reply(args) => post::execute_reply(&ctx, args).await,
        Commands::Edit(args) => edit::execute(&ctx, args).await,
        Commands::Delete(args) => edit::execute_delete(&ctx, args).await,
        Commands::Solve(args) => edit::execute_solve(&ctx, args).await,
        Commands::Math(cmd) => math::execute(cmd),
        Commands::Config(cmd) => config::execute(&ctx, cmd),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
