mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::{run_fetch, run_show, run_summarize};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize(args) => {
            run_summarize(args)?;
        }
        Commands::Fetch(args) => {
            run_fetch(args)?;
        }
        Commands::Show(args) => {
            run_show(args)?;
        }
    }

    Ok(())
}
