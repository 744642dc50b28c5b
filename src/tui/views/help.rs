use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::centered_rect;

/// Draw the modal help overlay describing panes, filters, and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let section = |label: &str| {
        Line::from(vec![Span::styled(
            label.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "locmap - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Timeline:"),
        Line::from("  ←/→         Move the time slider by 1"),
        Line::from("  PgUp/PgDn   Move the time slider by 10"),
        Line::from("  j/k or ↑/↓  Step through the commit story"),
        Line::from("  g/G         Jump to first/last story step"),
        Line::from(""),
        section("Selection:"),
        Line::from("  Mouse drag  Brush a rectangle over the scatterplot"),
        Line::from("  Mouse move  Hover a commit for its tooltip"),
        Line::from("  Esc         Dismiss the selection rectangle"),
        Line::from(""),
        section("Actions:"),
        Line::from("  y           Copy the hovered/selected commit URL"),
        Line::from("  t           Cycle color scheme (auto/light/dark)"),
        Line::from(""),
        section("General:"),
        Line::from("  Tab         Switch focus (chart/story)"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
