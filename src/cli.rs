use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::theme::Theme;

const DEFAULT_REPO_URL: &str = "https://github.com";

#[derive(Parser)]
#[command(name = "locmap")]
#[command(about = "Commit-history visualization for per-line LOC extracts")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, default_value = "loc.csv", help = "Path to the per-line LOC extract")]
    pub input: PathBuf,

    #[arg(long, help = "Base repository URL used to build commit links")]
    pub repo_url: Option<String>,

    #[arg(long, help = "Start at this date (RFC3339, YYYY-MM-DD, or a duration back like '90d')")]
    pub since: Option<String>,

    #[arg(long, help = "End at this date (RFC3339, YYYY-MM-DD, or a duration back like '90d')")]
    pub until: Option<String>,

    #[arg(long, value_enum, help = "Color scheme; overrides and persists the saved preference")]
    pub theme: Option<Theme>,

    #[arg(long, help = "Path to the preferences file")]
    pub prefs: Option<PathBuf>,
}

impl CommonArgs {
    pub fn repo_url(&self) -> &str {
        self.repo_url.as_deref().unwrap_or(DEFAULT_REPO_URL)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics over the loaded log
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Interactive commit scatterplot with brush, slider, and narration
    Explore,
    /// Dump aggregated commit records
    Export {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Project gallery: list, filter, and per-year rollup
    Projects {
        #[arg(long, default_value = "projects.json", help = "Path to the project list JSON")]
        file: PathBuf,

        #[arg(long, help = "Filter projects by a case-insensitive substring")]
        query: Option<String>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats { json, ndjson } => crate::stats::exec(self.common, json, ndjson),
            Commands::Explore => crate::tui::run(&self.common).map_err(|e| anyhow::anyhow!(e)),
            Commands::Export { json, ndjson } => crate::export::exec(self.common, json, ndjson),
            Commands::Projects { file, query, json } => {
                crate::projects::exec(&file, query.as_deref(), json)
            }
        }
    }
}
