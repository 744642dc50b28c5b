use crate::aggregate::aggregate_commits;
use crate::cli::CommonArgs;
use crate::loader::{load_lines, resolve_range};
use crate::model::{FileLines, LangShare, LineRecord, LogSummary, StatsOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use std::collections::HashMap;

/// Aggregate figures over a line subset. `commit_count` is the matching
/// commit subset's length; the caller passes matching subsets in practice
/// but nothing here requires it.
pub fn summarize(lines: &[LineRecord], subset: &[usize], commit_count: usize) -> LogSummary {
    let mut file_max_line: HashMap<&str, u32> = HashMap::new();
    let mut max_depth: Option<u32> = None;
    let mut max_line: Option<u32> = None;

    for &idx in subset {
        let rec = &lines[idx];
        let entry = file_max_line.entry(rec.file.as_str()).or_insert(0);
        *entry = (*entry).max(rec.line);
        max_depth = Some(max_depth.map_or(rec.depth, |d| d.max(rec.depth)));
        max_line = Some(max_line.map_or(rec.line, |l| l.max(rec.line)));
    }

    let avg_file_length = if file_max_line.is_empty() {
        None
    } else {
        let sum: u64 = file_max_line.values().map(|&v| v as u64).sum();
        Some((sum as f64 / file_max_line.len() as f64).round() as u32)
    };

    LogSummary {
        commits: commit_count,
        files: file_max_line.len(),
        total_loc: subset.len(),
        max_depth,
        avg_file_length,
        max_line,
    }
}

/// Per-language line counts and percentage shares over a line subset,
/// sorted descending by count (language name as tiebreaker).
pub fn language_breakdown(lines: &[LineRecord], subset: &[usize]) -> Vec<LangShare> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &idx in subset {
        *counts.entry(lines[idx].kind.as_str()).or_insert(0) += 1;
    }

    let total = subset.len();
    let mut shares: Vec<LangShare> = counts
        .into_iter()
        .map(|(kind, n)| LangShare {
            kind: kind.to_string(),
            lines: n,
            pct: if total == 0 { 0.0 } else { n as f64 / total as f64 * 100.0 },
        })
        .collect();
    shares.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.kind.cmp(&b.kind)));
    shares
}

/// Group a line subset by file, sorted descending by per-file line count
/// (file name as tiebreaker).
pub fn file_breakdown(lines: &[LineRecord], subset: &[usize]) -> Vec<FileLines> {
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for &idx in subset {
        groups.entry(lines[idx].file.as_str()).or_default().push(idx);
    }

    let mut out: Vec<FileLines> = groups
        .into_iter()
        .map(|(file, line_idx)| FileLines { file: file.to_string(), line_idx })
        .collect();
    out.sort_by(|a, b| {
        b.line_idx
            .len()
            .cmp(&a.line_idx.len())
            .then_with(|| a.file.cmp(&b.file))
    });
    out
}

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
    let subset: Vec<usize> = (0..lines.len()).collect();
    let summary = summarize(&lines, &subset, commits.len());
    let languages = language_breakdown(&lines, &subset);

    if json {
        let output = StatsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: common.input.display().to_string(),
            since: common.since.clone(),
            until: common.until.clone(),
            summary,
            languages,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        // First line is the summary record, then one line per language,
        // so the stream carries everything --json does.
        println!("{}", serde_json::to_string(&summary)?);
        for share in &languages {
            println!("{}", serde_json::to_string(share)?);
        }
    } else {
        output_summary(&summary, &languages);
    }

    Ok(())
}

fn output_summary(summary: &LogSummary, languages: &[LangShare]) {
    use console::style;

    println!("{}", style("Codebase Summary").bold());
    println!("{}", "─".repeat(50));

    println!("Commits: {}", style(summary.commits).cyan());
    println!("Files: {}", style(summary.files).cyan());
    println!("Total LOC: {}", style(summary.total_loc).green());
    match summary.max_depth {
        Some(d) => println!("Max depth: {}", style(d).yellow()),
        None => println!("Max depth: {}", style("n/a").dim()),
    }
    match summary.avg_file_length {
        Some(a) => println!("Avg lines per file: {}", style(a).yellow()),
        None => println!("Avg lines per file: {}", style("n/a").dim()),
    }
    match summary.max_line {
        Some(m) => println!("Max lines: {}", style(m).yellow()),
        None => println!("Max lines: {}", style("n/a").dim()),
    }

    if !languages.is_empty() {
        println!();
        println!("{}", style("Languages").bold());
        for share in languages {
            println!(
                "  {:<12} {:>6} lines  {:>5.1}%",
                share.kind,
                style(share.lines).cyan(),
                share.pct
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_commits;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn line(commit: &str, file: &str, kind: &str, line_no: u32, depth: u32) -> LineRecord {
        let dt = DateTime::parse_from_rfc3339("2024-01-01T09:30:00+00:00").unwrap();
        LineRecord {
            commit: commit.to_string(),
            file: file.to_string(),
            kind: kind.to_string(),
            line: line_no,
            depth,
            length: 40,
            author: "ada".to_string(),
            date: dt,
            time: "09:30".to_string(),
            timezone: "+00:00".to_string(),
            datetime: dt,
        }
    }

    #[test]
    fn loc_files_and_max_line_identities() {
        let lines = vec![
            line("abc", "a.js", "js", 10, 1),
            line("abc", "a.js", "js", 42, 3),
            line("def", "b.css", "css", 7, 0),
        ];
        let subset: Vec<usize> = (0..lines.len()).collect();
        let summary = summarize(&lines, &subset, 2);
        assert_eq!(summary.total_loc, 3);
        assert_eq!(summary.files, 2);
        assert_eq!(summary.max_line, Some(42));
        assert_eq!(summary.max_depth, Some(3));
    }

    #[test]
    fn avg_file_length_is_rounded_mean_of_per_file_maxima() {
        let lines = vec![
            line("abc", "a.js", "js", 10, 0),
            line("abc", "a.js", "js", 20, 0),
            line("abc", "b.js", "js", 5, 0),
        ];
        let subset: Vec<usize> = (0..lines.len()).collect();
        let summary = summarize(&lines, &subset, 1);
        // Per-file maxima 20 and 5, mean 12.5, rounds to 13.
        assert_eq!(summary.avg_file_length, Some(13));
    }

    #[test]
    fn empty_subset_has_absent_maxima() {
        let lines = vec![line("abc", "a.js", "js", 10, 1)];
        let summary = summarize(&lines, &[], 0);
        assert_eq!(summary.total_loc, 0);
        assert_eq!(summary.files, 0);
        assert_eq!(summary.max_depth, None);
        assert_eq!(summary.avg_file_length, None);
        assert_eq!(summary.max_line, None);
    }

    #[test]
    fn end_to_end_three_lines_one_commit() {
        let lines = vec![
            line("abc", "a.js", "js", 1, 0),
            line("abc", "a.js", "js", 2, 0),
            line("abc", "a.js", "js", 3, 0),
        ];
        let commits = aggregate_commits(&lines, "https://example.com/repo");
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].id, "abc");
        assert_eq!(commits[0].total_lines, 3);

        let subset: Vec<usize> = (0..lines.len()).collect();
        let summary = summarize(&lines, &subset, commits.len());
        assert_eq!(summary.commits, 1);
        assert_eq!(summary.files, 1);
        assert_eq!(summary.total_loc, 3);
        assert_eq!(summary.max_line, Some(3));
    }

    #[test]
    fn language_shares_sum_to_one_hundred() {
        let lines = vec![
            line("abc", "a.js", "js", 1, 0),
            line("abc", "a.js", "js", 2, 0),
            line("abc", "s.css", "css", 1, 0),
            line("def", "i.html", "html", 1, 0),
            line("def", "i.html", "html", 2, 0),
            line("def", "m.js", "js", 4, 0),
        ];
        let subset: Vec<usize> = (0..lines.len()).collect();
        let shares = language_breakdown(&lines, &subset);
        let total_pct: f64 = shares.iter().map(|s| s.pct).sum();
        assert!((total_pct - 100.0).abs() < 0.1);
        assert_eq!(shares[0].kind, "js");
        assert_eq!(shares[0].lines, 3);
        assert_eq!(shares[1].kind, "html");
        assert_eq!(shares[1].lines, 2);
    }

    #[test]
    fn tied_language_counts_order_by_kind() {
        let lines = vec![
            line("abc", "a.js", "js", 1, 0),
            line("def", "i.html", "html", 1, 0),
        ];
        let subset: Vec<usize> = (0..lines.len()).collect();
        let shares = language_breakdown(&lines, &subset);
        assert_eq!(shares[0].kind, "html");
        assert_eq!(shares[1].kind, "js");
    }

    #[test]
    fn file_breakdown_sorts_descending_by_line_count() {
        let lines = vec![
            line("abc", "small.css", "css", 1, 0),
            line("abc", "big.js", "js", 1, 0),
            line("abc", "big.js", "js", 2, 0),
            line("abc", "big.js", "js", 3, 0),
        ];
        let subset: Vec<usize> = (0..lines.len()).collect();
        let files = file_breakdown(&lines, &subset);
        assert_eq!(files[0].file, "big.js");
        assert_eq!(files[0].line_idx.len(), 3);
        assert_eq!(files[1].file, "small.css");
    }
}
