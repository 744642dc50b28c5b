use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::anchored_rect;
use crate::tui::state::ExploreState;

/// Pop the hover tooltip next to the pointer: commit link text, id, and
/// the long-form timestamp. Drawn last so it sits above the plot.
pub fn draw_tooltip(f: &mut Frame, state: &ExploreState) {
    let Some(idx) = state.hover else { return };
    let palette = state.palette();
    let commit = &state.commits[idx];

    let when = commit.datetime.format("%A, %B %-d, %Y %H:%M").to_string();
    let width = (commit.url.len().max(when.len()) as u16 + 4).min(f.size().width);
    let area = anchored_rect(state.hover_pos, width, 5, f.size());

    let text = vec![
        Line::from(Span::styled(
            commit.url.clone(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(Span::styled(
            commit.id.clone(),
            Style::default().fg(palette.fg),
        )),
        Line::from(Span::styled(when, Style::default().fg(palette.dim))),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        ),
        area,
    );
}
