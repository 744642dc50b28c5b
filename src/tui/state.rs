use crate::model::{CommitRecord, LineRecord};
use crate::scale::{nice_day_domain, OrdinalColors, TimeScale};
use crate::theme::{Palette, Theme};
use chrono::{DateTime, FixedOffset};
use ratatui::layout::Rect;
use std::collections::HashSet;

#[derive(Clone, Copy, PartialEq)]
pub enum Pane {
    Chart,
    Story,
}

/// Brush rectangle in chart-local cell coordinates, y growing downward.
/// Bounds are inclusive on all four edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl SelRect {
    pub fn normalized(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }
}

/// All interactive state of the explore view. The event handlers are the
/// only writers; the draw functions read it and record nothing beyond
/// the current plot geometry.
pub struct ExploreState {
    pub lines: Vec<LineRecord>,
    pub commits: Vec<CommitRecord>,

    /// Transient subset views, recomputed on every filter interaction.
    pub filtered_lines: Vec<usize>,
    pub filtered_commits: Vec<usize>,

    /// x domain, re-fit to the filtered extent on every filter change.
    pub x_domain: (DateTime<FixedOffset>, DateTime<FixedOffset>),
    /// Full observed commit-time range; the slider maps 0..=100 onto it.
    pub full_extent: (DateTime<FixedOffset>, DateTime<FixedOffset>),
    /// Radius domain, fixed from the full data set at startup.
    pub r_domain: (f64, f64),

    pub progress: u8,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub story_index: usize,

    pub focus: Pane,
    pub selection: Option<SelRect>,
    pub brushing: bool,
    pub brush_anchor: (f64, f64),
    pub selected_commits: Vec<usize>,

    pub hover: Option<usize>,
    pub hover_pos: (u16, u16),
    /// Inner plot area from the last draw; mouse handlers read it.
    pub chart_area: Rect,

    pub theme: Theme,
    pub colors: OrdinalColors,
    pub show_help: bool,
    pub status_message: Option<(String, std::time::Instant)>,
}

impl ExploreState {
    pub fn new(lines: Vec<LineRecord>, commits: Vec<CommitRecord>, theme: Theme) -> Self {
        let full_extent = match (commits.first(), commits.last()) {
            (Some(first), Some(last)) => (first.datetime, last.datetime),
            _ => {
                let now = chrono::Utc::now().fixed_offset();
                (now, now)
            }
        };
        let r_domain = {
            let mut min = f64::INFINITY;
            let mut max = 0.0f64;
            for c in &commits {
                min = min.min(c.total_lines as f64);
                max = max.max(c.total_lines as f64);
            }
            if min.is_finite() { (min, max) } else { (0.0, 1.0) }
        };

        // Seed the ordinal assignment in load order so every view sees
        // the same type-to-color mapping.
        let mut colors = OrdinalColors::new();
        for line in &lines {
            colors.color(&line.kind);
        }

        let filtered_lines: Vec<usize> = (0..lines.len()).collect();
        let filtered_commits: Vec<usize> = (0..commits.len()).collect();

        Self {
            x_domain: nice_day_domain(full_extent),
            full_extent,
            r_domain,
            filtered_lines,
            filtered_commits,
            lines,
            commits,
            progress: 100,
            cutoff: None,
            story_index: 0,
            focus: Pane::Chart,
            selection: None,
            brushing: false,
            brush_anchor: (0.0, 0.0),
            selected_commits: Vec::new(),
            hover: None,
            hover_pos: (0, 0),
            chart_area: Rect::default(),
            theme,
            colors,
            show_help: false,
            status_message: None,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    /// Restrict the visible subsets to records at-or-before `cutoff`
    /// (boundary inclusive) and re-fit the x domain to the new extent.
    pub fn apply_cutoff(&mut self, cutoff: DateTime<FixedOffset>) {
        self.cutoff = Some(cutoff);
        self.refilter();
    }

    fn refilter(&mut self) {
        match self.cutoff {
            Some(cut) => {
                self.filtered_commits = self
                    .commits
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.datetime <= cut)
                    .map(|(i, _)| i)
                    .collect();
                self.filtered_lines = self
                    .lines
                    .iter()
                    .enumerate()
                    .filter(|(_, l)| l.datetime <= cut)
                    .map(|(i, _)| i)
                    .collect();
            }
            None => {
                self.filtered_commits = (0..self.commits.len()).collect();
                self.filtered_lines = (0..self.lines.len()).collect();
            }
        }

        if let (Some(&first), Some(&last)) =
            (self.filtered_commits.first(), self.filtered_commits.last())
        {
            self.x_domain =
                nice_day_domain((self.commits[first].datetime, self.commits[last].datetime));
        }
        self.hover = None;
    }

    /// Slider driver: map progress 0..=100 linearly onto the full
    /// observed commit-time range and filter at the derived cutoff.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
        let slider = TimeScale::new(self.full_extent, (0.0, 100.0));
        let cutoff = slider.invert(self.progress as f64).fixed_offset();
        self.apply_cutoff(cutoff);
    }

    /// Narration driver: the active step's own commit timestamp becomes
    /// the cutoff.
    pub fn step_story(&mut self, index: usize) {
        if self.commits.is_empty() {
            return;
        }
        self.story_index = index.min(self.commits.len() - 1);
        let cutoff = self.commits[self.story_index].datetime;
        self.apply_cutoff(cutoff);
    }

    /// Distinct files touched by one commit.
    pub fn commit_file_count(&self, commit_idx: usize) -> usize {
        let commit = &self.commits[commit_idx];
        let files: HashSet<&str> = commit
            .line_records(&self.lines)
            .map(|l| l.file.as_str())
            .collect();
        files.len()
    }

    /// Line indices behind the current breakdowns: the selection when it
    /// holds commits, otherwise every visible commit. The fallback on an
    /// empty selection mirrors the original page, even though the count
    /// label still reads "No commits selected".
    pub fn breakdown_lines(&self) -> Vec<usize> {
        let source: &[usize] = if self.selected_commits.is_empty() {
            &self.filtered_commits
        } else {
            &self.selected_commits
        };
        let mut out = Vec::new();
        for &ci in source {
            out.extend_from_slice(&self.commits[ci].lines);
        }
        out
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), std::time::Instant::now()));
    }

    pub fn expire_status(&mut self) {
        if let Some((_, at)) = &self.status_message {
            if at.elapsed().as_secs() >= 3 {
                self.status_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_commits;
    use crate::model::LineRecord;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn line(commit: &str, file: &str, kind: &str, line_no: u32, datetime: &str) -> LineRecord {
        let dt = DateTime::parse_from_rfc3339(datetime).unwrap();
        LineRecord {
            commit: commit.to_string(),
            file: file.to_string(),
            kind: kind.to_string(),
            line: line_no,
            depth: 0,
            length: 40,
            author: "ada".to_string(),
            date: dt,
            time: "12:00".to_string(),
            timezone: "+00:00".to_string(),
            datetime: dt,
        }
    }

    fn three_commit_state() -> ExploreState {
        let lines = vec![
            line("a", "a.js", "js", 1, "2024-01-01T09:30:00+00:00"),
            line("a", "a.js", "js", 2, "2024-01-01T09:30:00+00:00"),
            line("b", "b.css", "css", 1, "2024-01-05T12:00:00+00:00"),
            line("c", "c.html", "html", 1, "2024-01-09T22:00:00+00:00"),
        ];
        let commits = aggregate_commits(&lines, "https://example.com/repo");
        ExploreState::new(lines, commits, Theme::Auto)
    }

    #[test]
    fn cutoff_filter_is_boundary_inclusive() {
        let mut state = three_commit_state();
        let cutoff = DateTime::parse_from_rfc3339("2024-01-05T12:00:00+00:00").unwrap();
        state.apply_cutoff(cutoff);
        // Commit "b" sits exactly at the cutoff and stays visible.
        assert_eq!(state.filtered_commits.len(), 2);
        assert_eq!(state.filtered_lines.len(), 3);
    }

    #[test]
    fn slider_endpoints_cover_first_and_all() {
        let mut state = three_commit_state();
        state.set_progress(100);
        assert_eq!(state.filtered_commits.len(), 3);
        state.set_progress(0);
        // Progress 0 lands exactly on the first commit, which is included.
        assert_eq!(state.filtered_commits.len(), 1);
    }

    #[test]
    fn story_step_uses_that_commits_own_timestamp() {
        let mut state = three_commit_state();
        state.step_story(1);
        assert_eq!(state.filtered_commits.len(), 2);
        state.step_story(0);
        assert_eq!(state.filtered_commits.len(), 1);
        state.step_story(99);
        assert_eq!(state.story_index, 2);
        assert_eq!(state.filtered_commits.len(), 3);
    }

    #[test]
    fn x_domain_refits_to_filtered_extent() {
        let mut state = three_commit_state();
        let full = state.x_domain;
        let cutoff = DateTime::parse_from_rfc3339("2024-01-05T12:00:00+00:00").unwrap();
        state.apply_cutoff(cutoff);
        assert!(state.x_domain.1 < full.1);
    }

    #[test]
    fn selection_rect_contains_is_inclusive() {
        let rect = SelRect::normalized((2.0, 10.0), (8.0, 3.0));
        assert!(rect.contains(2.0, 3.0));
        assert!(rect.contains(8.0, 10.0));
        assert!(rect.contains(5.0, 6.0));
        assert!(!rect.contains(1.9, 6.0));
        assert!(!rect.contains(5.0, 10.1));
    }

    #[test]
    fn breakdown_falls_back_to_all_visible_commits() {
        let mut state = three_commit_state();
        assert_eq!(state.breakdown_lines().len(), 4);
        state.selected_commits = vec![0];
        assert_eq!(state.breakdown_lines().len(), 2);
        state.selected_commits.clear();
        assert_eq!(state.breakdown_lines().len(), 4);
    }

    #[test]
    fn commit_file_count_is_distinct() {
        let state = three_commit_state();
        assert_eq!(state.commit_file_count(0), 1);
    }
}
