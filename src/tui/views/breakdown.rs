use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::stats::{file_breakdown, language_breakdown};
use crate::tui::state::ExploreState;

/// Render the selection count, the per-language share of the selection
/// (or of all visible commits when nothing is selected), and the
/// per-file line marks.
pub fn draw_breakdown_view(f: &mut Frame, area: Rect, state: &ExploreState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_language_panel(f, chunks[0], state);
    draw_file_panel(f, chunks[1], state);
}

fn draw_language_panel(f: &mut Frame, area: Rect, state: &ExploreState) {
    let palette = state.palette();

    let count_line = if state.selected_commits.is_empty() {
        Line::from(Span::styled(
            "No commits selected",
            Style::default().fg(palette.dim),
        ))
    } else {
        Line::from(Span::styled(
            format!("{} commits selected", state.selected_commits.len()),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let subset = state.breakdown_lines();
    let shares = language_breakdown(&state.lines, &subset);

    let mut text = vec![count_line, Line::from("")];
    for share in &shares {
        let swatch = state.colors.peek(&share.kind).unwrap_or(Color::Gray);
        text.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(swatch)),
            Span::styled(format!("{:<10} ", share.kind), Style::default().fg(palette.fg)),
            Span::styled(
                format!("{:>6} lines ", share.lines),
                Style::default().fg(palette.accent),
            ),
            Span::styled(
                format!("({:.1}%)", share.pct),
                Style::default().fg(palette.dim),
            ),
        ]));
    }

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title("Languages")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim)),
    );
    f.render_widget(paragraph, area);
}

fn draw_file_panel(f: &mut Frame, area: Rect, state: &ExploreState) {
    let palette = state.palette();
    let files = file_breakdown(&state.lines, &state.filtered_lines);

    let mut text: Vec<Line> = Vec::with_capacity(files.len());
    for entry in &files {
        let mut spans = vec![
            Span::styled(entry.file.clone(), Style::default().fg(palette.fg)),
            Span::styled(
                format!(" {} lines ", entry.line_idx.len()),
                Style::default().fg(palette.dim),
            ),
        ];
        // One mark per line, color keyed by the shared type assignment;
        // runs of the same color collapse into one span.
        let mut run: Option<(Color, usize)> = None;
        for &idx in &entry.line_idx {
            let color = state
                .colors
                .peek(&state.lines[idx].kind)
                .unwrap_or(Color::Gray);
            run = match run {
                Some((prev, n)) if prev == color => Some((prev, n + 1)),
                Some((prev, n)) => {
                    spans.push(Span::styled("▪".repeat(n), Style::default().fg(prev)));
                    Some((color, 1))
                }
                None => Some((color, 1)),
            };
        }
        if let Some((color, n)) = run {
            spans.push(Span::styled("▪".repeat(n), Style::default().fg(color)));
        }
        text.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(format!("Files ({})", files.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim)),
    );
    f.render_widget(paragraph, area);
}
