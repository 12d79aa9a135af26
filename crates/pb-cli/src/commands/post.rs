//! Post and reply commands

use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use std::io::Read;

use super::{finish, Context};
use pb_core::CommentId;

/// Arguments for the post command
#[derive(Debug, Args)]
pub struct PostArgs {
    /// Problem ID
    pub problem: String,

    /// Comment text (read from stdin if omitted)
    pub text: Option<String>,
}

/// Arguments for the reply command
#[derive(Debug, Args)]
pub struct ReplyArgs {
    /// Problem ID
    pub problem: String,

    /// Comment being replied to
    pub parent: String,

    /// Reply text (read from stdin if omitted)
    pub text: Option<String>,
}

/// Comment text from the argument or stdin
pub fn read_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read comment from stdin")?;
            Ok(buf)
        }
    }
}

/// Execute the post command
pub async fn execute(ctx: &Context, args: PostArgs) -> Result<()> {
    let text = read_text(args.text)?;
    let mut controller = ctx.open_thread(&args.problem).await?;

    let posted = controller.post_comment(&text).await;
    finish(&mut controller, posted.is_some())?;

    if let Some(id) = posted {
        println!("{} Posted comment {}", "✓".green(), id.to_string().cyan());
    }
    Ok(())
}

/// Execute the reply command
pub async fn execute_reply(ctx: &Context, args: ReplyArgs) -> Result<()> {
    let text = read_text(args.text)?;
    let mut controller = ctx.open_thread(&args.problem).await?;
    let parent = CommentId::from(args.parent.as_str());

    let posted = controller.reply(&parent, &text).await;
    finish(&mut controller, posted.is_some())?;

    if let Some(id) = posted {
        println!(
            "{} Posted reply {} to {}",
            "✓".green(),
            id.to_string().cyan(),
            parent.to_string().cyan()
        );
    }
    Ok(())
}
