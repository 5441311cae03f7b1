//! pomflat CLI entry point
//!
//! Parses arguments, runs the command and prints failures with their
//! suggestions.
//!
//! - `generate-pom` - write a self-contained effective `pom.xml`
//! - `list-dependencies` - write a delimited dependency report

use anyhow::Result;
use clap::Parser;
use pomflat_cli::cli;
use pomflat_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
