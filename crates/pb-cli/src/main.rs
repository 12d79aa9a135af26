//! probboard - discussion threads for math problems
//!
//! ## Quick Start
//!
//! ```bash
//! # Show the discussion of problem 12
//! probboard show 12
//!
//! # Reply to comment 40
//! probboard reply 12 40 "Try induction on n"
//!
//! # Accept comment 41 as the solution
//! probboard solve 12 41
//!
//! # Build a LaTeX snippet from palette symbols
//! probboard math insert "\\frac{}{}" 1
//! ```

mod commands;

#[tokio::main]
async fn main() {
    if let Err(err) = commands::run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
