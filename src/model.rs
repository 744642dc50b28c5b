use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One changed line of source code from the per-line LOC extract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub commit: String,
    pub file: String,
    /// Language/category tag the extract assigns to the line.
    pub kind: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub author: String,
    /// Calendar date at midnight in the recorded timezone.
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    /// Full commit instant; all time math below uses this field.
    pub datetime: DateTime<FixedOffset>,
}

/// Aggregated summary of all line records sharing one commit id.
#[derive(Debug, Clone, Serialize)]
pub struct CommitRecord {
    pub id: String,
    pub url: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    /// Hour of day plus minute/60, the scatterplot's vertical value.
    pub hour_frac: f64,
    pub total_lines: usize,
    /// Indices into the loaded line slice. Internal bookkeeping, kept out
    /// of exports and any field-enumerating output.
    #[serde(skip)]
    pub lines: Vec<usize>,
}

impl CommitRecord {
    pub fn line_records<'a>(&'a self, lines: &'a [LineRecord]) -> impl Iterator<Item = &'a LineRecord> + 'a {
        self.lines.iter().map(move |&i| &lines[i])
    }
}

/// Aggregate figures over a line/commit subset, recomputed from scratch
/// on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogSummary {
    pub commits: usize,
    pub files: usize,
    pub total_loc: usize,
    pub max_depth: Option<u32>,
    /// Mean over distinct files of each file's maximum line number,
    /// rounded to the nearest integer.
    pub avg_file_length: Option<u32>,
    pub max_line: Option<u32>,
}

/// One language's slice of a line subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LangShare {
    pub kind: String,
    pub lines: usize,
    pub pct: f64,
}

/// One file's lines within a subset, for the per-line mark display.
#[derive(Debug, Clone)]
pub struct FileLines {
    pub file: String,
    pub line_idx: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub entries: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub summary: LogSummary,
    pub languages: Vec<LangShare>,
}

#[derive(Debug, Clone, Default)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        let ts = timestamp.with_timezone(&Utc);
        if let Some(since) = self.since {
            if ts < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if ts > until {
                return false;
            }
        }
        true
    }
}
