use crate::error::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One entry of the project gallery's JSON source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub image: String,
    pub description: String,
    pub year: Year,
}

/// Gallery sources write the year either as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{n}"),
            Year::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct YearShare {
    pub year: String,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsOutput {
    pub version: u32,
    pub generated_at: chrono::DateTime<Utc>,
    pub source: String,
    pub query: Option<String>,
    pub total: usize,
    pub years: Vec<YearShare>,
    pub projects: Vec<ProjectEntry>,
}

pub fn load_projects<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectEntry>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

/// Case-insensitive substring match across every field value, the same
/// any-field search the gallery page offers.
pub fn search(projects: &[ProjectEntry], query: &str) -> Vec<ProjectEntry> {
    let query = query.to_lowercase();
    projects
        .iter()
        .filter(|p| {
            let haystack = format!("{}\n{}\n{}\n{}", p.title, p.image, p.description, p.year)
                .to_lowercase();
            haystack.contains(&query)
        })
        .cloned()
        .collect()
}

/// Count projects per year, newest label first.
pub fn year_rollup(projects: &[ProjectEntry]) -> Vec<YearShare> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for project in projects {
        let label = project.year.to_string();
        match counts.iter_mut().find(|(year, _)| *year == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }
    counts.sort_by(|a, b| b.0.cmp(&a.0));

    let total = projects.len();
    counts
        .into_iter()
        .map(|(year, count)| YearShare {
            year,
            count,
            share_pct: if total == 0 { 0.0 } else { count as f64 / total as f64 * 100.0 },
        })
        .collect()
}

pub fn exec(file: &Path, query: Option<&str>, json: bool) -> anyhow::Result<()> {
    use anyhow::Context;

    let all = load_projects(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let projects = match query {
        Some(q) => search(&all, q),
        None => all,
    };
    let years = year_rollup(&projects);

    if json {
        let output = ProjectsOutput {
            version: crate::model::SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: file.display().to_string(),
            query: query.map(str::to_string),
            total: projects.len(),
            years,
            projects,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output_gallery(&projects, &years);
    Ok(())
}

fn output_gallery(projects: &[ProjectEntry], years: &[YearShare]) {
    use console::style;

    println!("{} ({})", style("Projects").bold(), projects.len());
    println!("{}", "─".repeat(50));
    for project in projects {
        println!(
            "{} ({})",
            style(&project.title).cyan(),
            style(&project.year).dim()
        );
        if !project.description.is_empty() {
            println!("  {}", project.description);
        }
    }

    if !years.is_empty() {
        // The legend stands in for the gallery's pie slices; swatch
        // colors cycle ordinally per year label.
        let swatches = [
            style("■").blue(),
            style("■").red(),
            style("■").green(),
            style("■").yellow(),
            style("■").magenta(),
            style("■").cyan(),
        ];
        println!();
        println!("{}", style("By year").bold());
        for (idx, share) in years.iter().enumerate() {
            println!(
                "  {} {} ({})  {:>5.1}%",
                swatches[idx % swatches.len()],
                style(&share.year).cyan(),
                share.count,
                share.share_pct
            );
        }
    }
}
