use crate::aggregate::aggregate_commits;
use crate::cli::CommonArgs;
use crate::loader::{load_lines, resolve_range};
use crate::model::{CommitRecord, ExportOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use std::collections::HashSet;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let all_lines = load_lines(&common.input)
        .with_context(|| format!("Failed to load {}", common.input.display()))?;

    let range = resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;
    let lines: Vec<_> = all_lines
        .into_iter()
        .filter(|l| range.contains(&l.datetime))
        .collect();

    let commits = aggregate_commits(&lines, common.repo_url());

    if json {
        output_json(&commits, &common)?;
    } else if ndjson {
        output_ndjson(&commits)?;
    } else {
        output_summary(&commits, lines.len());
    }

    Ok(())
}

fn output_json(commits: &[CommitRecord], common: &CommonArgs) -> anyhow::Result<()> {
    let output = ExportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: common.input.display().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        entries: commits.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(commits: &[CommitRecord]) -> anyhow::Result<()> {
    for commit in commits {
        println!("{}", serde_json::to_string(commit)?);
    }
    Ok(())
}

fn output_summary(commits: &[CommitRecord], total_loc: usize) {
    use console::style;

    println!("{}", style("Export Summary").bold());
    println!("{}", "─".repeat(50));

    let unique_authors: HashSet<_> = commits.iter().map(|c| &c.author).collect();

    println!("Total commits: {}", style(commits.len()).cyan());
    println!("Total LOC: {}", style(total_loc).green());
    println!("Unique authors: {}", style(unique_authors.len()).yellow());

    if let (Some(first), Some(last)) = (commits.first(), commits.last()) {
        println!(
            "Date range: {} to {}",
            style(first.datetime.format("%Y-%m-%d")).dim(),
            style(last.datetime.format("%Y-%m-%d")).dim()
        );
    }

    println!("\nUse --json or --ndjson flags to export the raw data.");
}
