use crate::error::{LocmapError, Result};
use crate::model::{DateRange, LineRecord};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use std::path::Path;
use std::time::SystemTime;

/// Raw CSV row as the extract writes it; numbers are already typed by
/// the reader, both timestamp columns stay textual until `parse_row`.
#[derive(Debug, Deserialize)]
struct RawRow {
    commit: String,
    file: String,
    #[serde(rename = "type")]
    kind: String,
    line: u32,
    depth: u32,
    length: u32,
    date: String,
    time: String,
    timezone: String,
    datetime: String,
    author: String,
}

/// Load the per-line LOC extract. Any unreadable source or malformed row
/// fails the whole load; nothing downstream runs on partial data.
pub fn load_lines<P: AsRef<Path>>(path: P) -> Result<Vec<LineRecord>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let raw: RawRow = row?;
        records.push(parse_row(raw)?);
    }
    Ok(records)
}

fn parse_row(raw: RawRow) -> Result<LineRecord> {
    let date = parse_offset_datetime(&format!("{}T00:00{}", raw.date, raw.timezone))?;
    let datetime = parse_offset_datetime(&raw.datetime)?;

    Ok(LineRecord {
        commit: raw.commit,
        file: raw.file,
        kind: raw.kind,
        line: raw.line,
        depth: raw.depth,
        length: raw.length,
        author: raw.author,
        date,
        time: raw.time,
        timezone: raw.timezone,
        datetime,
    })
}

/// Accepts RFC3339 as well as the extract's second-less and
/// colon-less-offset variants.
fn parse_offset_datetime(input: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(input)
        .or_else(|_| DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M%:z"))
        .or_else(|_| DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M%z"))
        .map_err(|e| LocmapError::InvalidDate(format!("'{input}': {e}")))
}

/// Resolve `--since`/`--until` into a closed date range.
pub fn resolve_range(since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
    let mut range = DateRange::new();

    let since_dt = since.map(parse_date_arg).transpose()?;
    let until_dt = until.map(parse_date_arg).transpose()?;

    if let (Some(s), Some(u)) = (since_dt, until_dt) {
        if s > u {
            return Err(LocmapError::InvalidDate(format!(
                "Invalid range: since ({}) is after until ({})",
                s, u
            )));
        }
    }

    if let Some(s) = since_dt {
        range = range.with_since(s);
    }
    if let Some(u) = until_dt {
        range = range.with_until(u);
    }

    Ok(range)
}

/// Parse a CLI date argument: RFC3339, `YYYY-MM-DD`, or a humantime
/// duration back from now (`90d`, `2 weeks`).
fn parse_date_arg(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    let trimmed = input.trim_start_matches('-').trim_end_matches(" ago").trim();
    if let Ok(duration) = humantime::parse_duration(trimmed) {
        let target = SystemTime::now()
            .checked_sub(duration)
            .ok_or_else(|| LocmapError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(DateTime::<Utc>::from(target));
    }

    Err(LocmapError::Parse(format!("Invalid date '{input}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    const HEADER: &str = "commit,file,type,line,depth,length,date,time,timezone,datetime,author\n";

    #[test]
    fn loads_typed_rows_with_both_timestamps() {
        let f = write_csv(&format!(
            "{HEADER}abc,a.js,js,1,0,42,2024-02-04,14:23,-08:00,2024-02-04T14:23:12-08:00,ada\n"
        ));
        let lines = load_lines(f.path()).unwrap();
        assert_eq!(lines.len(), 1);
        let rec = &lines[0];
        assert_eq!(rec.line, 1);
        assert_eq!(rec.length, 42);
        assert_eq!(rec.kind, "js");
        // `date` is midnight in the recorded offset, `datetime` the full instant.
        assert_eq!(rec.date.hour(), 0);
        assert_eq!(rec.datetime.hour(), 14);
        assert_eq!(rec.datetime.minute(), 23);
    }

    #[test]
    fn malformed_number_fails_the_whole_load() {
        let f = write_csv(&format!(
            "{HEADER}abc,a.js,js,one,0,42,2024-02-04,14:23,-08:00,2024-02-04T14:23:12-08:00,ada\n"
        ));
        assert!(load_lines(f.path()).is_err());
    }

    #[test]
    fn malformed_date_fails_the_whole_load() {
        let f = write_csv(&format!(
            "{HEADER}abc,a.js,js,1,0,42,not-a-date,14:23,-08:00,2024-02-04T14:23:12-08:00,ada\n"
        ));
        assert!(load_lines(f.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_lines("definitely/not/here.csv").is_err());
    }

    #[test]
    fn range_args_parse_plain_dates() {
        let range = resolve_range(Some("2024-01-01"), Some("2024-12-31")).unwrap();
        assert!(range.since.is_some());
        assert!(range.until.is_some());
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(resolve_range(Some("2024-12-31"), Some("2024-01-01")).is_err());
    }
}
