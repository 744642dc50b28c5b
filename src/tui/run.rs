use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::{Frame, Terminal};

use crate::aggregate::aggregate_commits;
use crate::cli::CommonArgs;
use crate::loader::{load_lines, resolve_range};
use crate::theme::{load_prefs, save_prefs};
use crate::tui::events::{handle_key, handle_mouse, EventOutcome};
use crate::tui::state::ExploreState;
use crate::tui::views::{
    draw_breakdown_view, draw_help_overlay, draw_scatter_view, draw_story_view, draw_summary_view,
    draw_tooltip,
};

pub fn run(common: &CommonArgs) -> io::Result<()> {
    // Load and aggregate before touching the terminal; a failed load
    // leaves the screen untouched and nothing downstream runs.
    let all_lines = load_lines(&common.input).map_err(io::Error::other)?;
    let range = resolve_range(common.since.as_deref(), common.until.as_deref())
        .map_err(io::Error::other)?;
    let lines: Vec<_> = all_lines
        .into_iter()
        .filter(|l| range.contains(&l.datetime))
        .collect();
    let commits = aggregate_commits(&lines, common.repo_url());

    let mut prefs = load_prefs(common.prefs.as_deref()).map_err(io::Error::other)?;
    if let Some(theme) = common.theme {
        prefs.theme = theme;
        save_prefs(common.prefs.as_deref(), &prefs).map_err(io::Error::other)?;
    }

    let mut state = ExploreState::new(lines, commits, prefs.theme);

    enable_raw_mode()?;
    crossterm::execute!(io::stdout(), EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    loop {
        state.expire_status();

        let draw_result = terminal.draw(|f| draw(f, &mut state));
        if let Err(e) = draw_result {
            eprintln!("TUI draw error: {}", e);
        }

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key_event) => {
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key(&mut state, key_event, common.prefs.as_deref())
                        == EventOutcome::Quit
                    {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => handle_mouse(&mut state, mouse_event),
                _ => {}
            }
        }
    }

    terminal.clear()?;
    crossterm::execute!(io::stdout(), DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

fn draw(f: &mut Frame, state: &mut ExploreState) {
    let size = f.size();

    if let Some(bg) = state.palette().background {
        f.render_widget(Block::default().style(Style::default().bg(bg)), size);
    }

    if state.show_help {
        draw_help_overlay(f, size);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    draw_slider(f, rows[0], state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(rows[1]);
    let chart_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(columns[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(0)])
        .split(chart_column[1]);

    // Explicit renderer order after any filter change: summary first,
    // then the scatterplot, then the breakdowns.
    draw_summary_view(f, bottom[0], state);
    draw_scatter_view(f, chart_column[0], state);
    draw_breakdown_view(f, bottom[1], state);
    draw_story_view(f, columns[1], state);

    draw_status_line(f, rows[2], state);
    draw_tooltip(f, state);
}

fn draw_slider(f: &mut Frame, area: ratatui::layout::Rect, state: &ExploreState) {
    let palette = state.palette();
    let label = match state.cutoff {
        Some(cut) => cut.format("%A, %B %-d, %Y %H:%M").to_string(),
        None => "showing all commits".to_string(),
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("Timeline")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.dim)),
        )
        .gauge_style(Style::default().fg(palette.accent))
        .percent(state.progress as u16)
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_status_line(f: &mut Frame, area: ratatui::layout::Rect, state: &ExploreState) {
    let palette = state.palette();
    let text = match &state.status_message {
        Some((message, _)) => message.clone(),
        None => "←/→ slider  j/k story  drag to select  y copy  t theme  h help  q quit".to_string(),
    };
    f.render_widget(
        Paragraph::new(Line::from(text)).style(Style::default().fg(palette.dim)),
        area,
    );
}
