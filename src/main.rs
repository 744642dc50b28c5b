use anyhow::Result;
use clap::Parser;
use locmap::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
