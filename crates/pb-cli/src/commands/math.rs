//! Math command
//!
//! Browse the LaTeX symbol palettes and compose snippets from them.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use pb_core::math::{lookup, MathBuffer, SymbolCategory};

/// Key that stands for the Tab key in `math insert`
const TAB_KEY: &str = "tab";

/// Math subcommands
#[derive(Debug, Subcommand)]
pub enum MathCommand {
    /// List palette tabs, or the symbols on one tab
    Symbols {
        /// Tab name (basic, fractions, greek, ...)
        category: Option<String>,
    },

    /// Compose a snippet by inserting symbols one after another
    Insert {
        /// Symbols by glyph or LaTeX; anything else is typed as-is, `tab` indents
        #[arg(required = true)]
        keys: Vec<String>,

        /// Starting text
        #[arg(long, default_value = "")]
        text: String,

        /// Starting cursor byte offset (end of text if omitted)
        #[arg(long)]
        cursor: Option<usize>,
    },
}

/// Execute the math command
pub fn execute(cmd: MathCommand) -> Result<()> {
    match cmd {
        MathCommand::Symbols { category } => list_symbols(category.as_deref()),
        MathCommand::Insert { keys, text, cursor } => {
            let buffer = compose(&text, cursor, &keys);
            println!("{}", buffer.text());
            eprintln!("{}", format!("cursor at {}", buffer.cursor()).dimmed());
            Ok(())
        }
    }
}

fn list_symbols(category: Option<&str>) -> Result<()> {
    match category {
        None => {
            println!("{}", "Symbol tabs:".bold().underline());
            for category in SymbolCategory::ALL {
                println!(
                    "  {:<12} {} symbols",
                    category.name().cyan(),
                    category.symbols().len()
                );
            }
        }
        Some(name) => {
            let category: SymbolCategory = name.parse()?;
            println!("{}", category.name().bold().underline());
            for symbol in category.symbols() {
                let marker = if symbol.template { " (template)".dimmed().to_string() } else { String::new() };
                println!("  {:<10} {}{}", symbol.glyph, symbol.latex.cyan(), marker);
            }
        }
    }
    Ok(())
}

/// Apply a sequence of palette keys to a buffer
fn compose(text: &str, cursor: Option<usize>, keys: &[String]) -> MathBuffer {
    let mut buffer = MathBuffer::with_text(text);
    if let Some(cursor) = cursor {
        buffer.set_cursor(cursor);
    }

    for key in keys {
        if key.eq_ignore_ascii_case(TAB_KEY) {
            buffer.indent();
        } else if let Some(symbol) = lookup(key) {
            buffer.insert(symbol);
        } else {
            buffer.insert_str(key);
        }
    }
    buffer
}
