use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::stats::summarize;
use crate::tui::state::ExploreState;

/// Render the aggregate figures panel over the currently visible subset,
/// recomputed from scratch every frame.
pub fn draw_summary_view(f: &mut Frame, area: Rect, state: &ExploreState) {
    let palette = state.palette();
    let summary = summarize(
        &state.lines,
        &state.filtered_lines,
        state.filtered_commits.len(),
    );

    let absent = "—".to_string();
    let rows = [
        ("COMMITS", summary.commits.to_string()),
        ("FILES", summary.files.to_string()),
        ("TOTAL LOC", summary.total_loc.to_string()),
        (
            "MAX DEPTH",
            summary.max_depth.map_or(absent.clone(), |d| d.to_string()),
        ),
        (
            "AVG LINES",
            summary
                .avg_file_length
                .map_or(absent.clone(), |a| a.to_string()),
        ),
        (
            "MAX LINES",
            summary.max_line.map_or(absent, |m| m.to_string()),
        ),
    ];

    let text: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:<10} "),
                    Style::default().fg(palette.dim).add_modifier(Modifier::BOLD),
                ),
                Span::styled(value, Style::default().fg(palette.accent)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title("Summary")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim)),
    );
    f.render_widget(paragraph, area);
}
