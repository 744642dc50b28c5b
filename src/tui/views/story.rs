use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::state::{ExploreState, Pane};

/// Narration paragraph for one commit, in ascending time order. Step 0
/// gets the "first commit" wording; every later step the generic one.
pub fn narration(state: &ExploreState, commit_idx: usize) -> String {
    let commit = &state.commits[commit_idx];
    let when = commit.datetime.format("%A, %B %-d, %Y %H:%M").to_string();
    let lines = commit.total_lines;
    let files = state.commit_file_count(commit_idx);
    if commit_idx == 0 {
        format!(
            "On {when}, I made my first commit, and it was glorious. \
             I edited {lines} lines across {files} files."
        )
    } else {
        format!(
            "On {when}, I made another commit. \
             I edited {lines} lines across {files} files."
        )
    }
}

/// Render the scrollable narration pane; the active step is highlighted
/// and its commit timestamp drives the timeline filter.
pub fn draw_story_view(f: &mut Frame, area: Rect, state: &ExploreState) {
    let palette = state.palette();
    let focused = state.focus == Pane::Story;

    let border_style = if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.dim)
    };
    let block = Block::default()
        .title(format!(
            "Story ({}/{})",
            state.story_index + 1,
            state.commits.len().max(1)
        ))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if state.commits.is_empty() {
        f.render_widget(Paragraph::new("No commits loaded"), inner);
        return;
    }

    // Rough rows-per-step estimate keeps the active step in view while
    // Paragraph handles the actual wrapping.
    let step_rows = 4usize;
    let visible_steps = (inner.height as usize / step_rows).max(1);
    let start = state
        .story_index
        .saturating_sub(visible_steps / 2)
        .min(state.commits.len().saturating_sub(visible_steps));
    let end = (start + visible_steps).min(state.commits.len());

    let mut text: Vec<Line> = Vec::new();
    for idx in start..end {
        let style = if idx == state.story_index {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.dim)
        };
        text.push(Line::styled(narration(state, idx), style));
        text.push(Line::from(""));
    }

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true });
    f.render_widget(paragraph, inner);
}
