//! Edit, delete and solve commands

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use super::post::read_text;
use super::{finish, Context};
use pb_core::CommentId;

/// Arguments for the edit command
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Problem ID
    pub problem: String,

    /// Comment to edit
    pub comment: String,

    /// New text (read from stdin if omitted)
    pub text: Option<String>,
}

/// Arguments for the delete command
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Problem ID
    pub problem: String,

    /// Comment to delete
    pub comment: String,

    /// Delete without confirmation
    #[arg(long, short)]
    pub yes: bool,
}

/// Arguments for the solve command
#[derive(Debug, Args)]
pub struct SolveArgs {
    /// Problem ID
    pub problem: String,

    /// Comment whose solution flag is flipped
    pub comment: String,
}

fn require(controller: &pb_client::ThreadController, id: &CommentId) -> Result<()> {
    if !controller.state().forest().contains(id) {
        bail!("Comment {} not found on problem {}", id, controller.problem());
    }
    Ok(())
}

/// Execute the edit command
pub async fn execute(ctx: &Context, args: EditArgs) -> Result<()> {
    let text = read_text(args.text)?;
    if text.trim().is_empty() {
        bail!("Comment text cannot be empty");
    }

    let mut controller = ctx.open_thread(&args.problem).await?;
    let id = CommentId::from(args.comment.as_str());
    require(&controller, &id)?;

    let edited = controller.edit(&id, &text).await;
    finish(&mut controller, edited)?;

    println!("{} Updated comment {}", "✓".green(), id.to_string().cyan());
    Ok(())
}

/// Execute the delete command
pub async fn execute_delete(ctx: &Context, args: DeleteArgs) -> Result<()> {
    let mut controller = ctx.open_thread(&args.problem).await?;
    let id = CommentId::from(args.comment.as_str());
    require(&controller, &id)?;

    let replies = controller.state().forest().descendant_count(&id);

    if !args.yes {
        use dialoguer::Confirm;

        let prompt = match replies {
            0 => format!("Delete comment {}?", id),
            1 => format!("Delete comment {} and its reply?", id),
            n => format!("Delete comment {} and its {} replies?", id, n),
        };
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    let deleted = controller.delete(&id).await;
    finish(&mut controller, deleted)?;

    println!(
        "{} Deleted comment {} ({} replies)",
        "✓".green(),
        id.to_string().cyan(),
        replies
    );
    Ok(())
}

/// Execute the solve command
pub async fn execute_solve(ctx: &Context, args: SolveArgs) -> Result<()> {
    let mut controller = ctx.open_thread(&args.problem).await?;
    let id = CommentId::from(args.comment.as_str());
    require(&controller, &id)?;

    let toggled = controller.toggle_solution(&id).await;
    finish(&mut controller, toggled)?;

    let is_solution = controller
        .state()
        .forest()
        .get(&id)
        .map(|c| c.is_solution)
        .unwrap_or(false);
    if is_solution {
        println!("{} Comment {} marked as solution", "✓".green(), id.to_string().cyan());
    } else {
        println!("{} Comment {} is no longer the solution", "✓".green(), id.to_string().cyan());
    }
    Ok(())
}
