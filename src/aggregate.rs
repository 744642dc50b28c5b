use crate::model::{CommitRecord, LineRecord};
use chrono::Timelike;
use std::collections::HashMap;

/// Build the browsable URL for a commit under `repo_url`.
pub fn commit_url(repo_url: &str, id: &str) -> String {
    format!("{}/commit/{}", repo_url.trim_end_matches('/'), id)
}

/// Group line records by commit id into one record per distinct commit,
/// sorted ascending by commit instant (id as tiebreaker). Shared fields
/// come from the group's first member; every member carries them
/// identically by construction of the extract. Deterministic and
/// idempotent for a given input slice.
pub fn aggregate_commits(lines: &[LineRecord], repo_url: &str) -> Vec<CommitRecord> {
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, line) in lines.iter().enumerate() {
        groups.entry(line.commit.as_str()).or_default().push(idx);
    }

    let mut commits: Vec<CommitRecord> = groups
        .into_iter()
        .map(|(id, members)| {
            let first = &lines[members[0]];
            let hour_frac =
                first.datetime.hour() as f64 + first.datetime.minute() as f64 / 60.0;
            CommitRecord {
                id: id.to_string(),
                url: commit_url(repo_url, id),
                author: first.author.clone(),
                date: first.date,
                time: first.time.clone(),
                timezone: first.timezone.clone(),
                datetime: first.datetime,
                hour_frac,
                total_lines: members.len(),
                lines: members,
            }
        })
        .collect();

    commits.sort_by(|a, b| a.datetime.cmp(&b.datetime).then_with(|| a.id.cmp(&b.id)));
    commits
}
