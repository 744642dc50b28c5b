use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::scale::{LinearScale, SqrtScale, TimeScale};
use crate::tui::state::ExploreState;

const Y_GUTTER: u16 = 6;
const RADIUS_RANGE: (f64, f64) = (0.4, 2.6);

/// Scales for the current plot area: x over the re-fit time domain,
/// y over [0,24] with an inverted range (later hours higher on screen),
/// radius through sqrt space over the fixed full-data domain.
pub fn scales(state: &ExploreState, area: Rect) -> (TimeScale, LinearScale, SqrtScale) {
    let w = area.width.max(2) as f64;
    let h = area.height.max(2) as f64;
    let x = TimeScale::new(state.x_domain, (0.0, w - 1.0));
    let y = LinearScale::new((0.0, 24.0), (h - 1.0, 0.0));
    let r = SqrtScale::new(state.r_domain, RADIUS_RANGE);
    (x, y, r)
}

/// Plotted position of a commit in chart-local cells, y growing downward.
pub fn plot_position(state: &ExploreState, area: Rect, commit_idx: usize) -> (f64, f64) {
    let (x, y, _) = scales(state, area);
    let commit = &state.commits[commit_idx];
    (x.map(commit.datetime), y.map(commit.hour_frac))
}

/// Recompute which visible commits fall inside the active brush
/// rectangle (inclusive bounds). No rectangle selects nothing.
pub fn recompute_selection(state: &mut ExploreState) {
    let Some(rect) = state.selection else {
        state.selected_commits.clear();
        return;
    };
    let area = state.chart_area;
    let selected: Vec<usize> = state
        .filtered_commits
        .iter()
        .copied()
        .filter(|&idx| {
            let (px, py) = plot_position(state, area, idx);
            rect.contains(px, py)
        })
        .collect();
    state.selected_commits = selected;
}

/// Nearest visible commit whose rendered circle (plus a little slack)
/// covers a chart-local position, preferring the smaller commit on a
/// near-tie since small points paint on top of large ones.
pub fn hit_test(state: &ExploreState, local: (f64, f64)) -> Option<usize> {
    const SLACK: f64 = 1.0;
    let area = state.chart_area;
    let (_, _, r_scale) = scales(state, area);
    let mut best: Option<(usize, f64)> = None;
    for &idx in &state.filtered_commits {
        let (px, py) = plot_position(state, area, idx);
        let dist = ((px - local.0).powi(2) + (py - local.1).powi(2)).sqrt();
        let reach = r_scale.map(state.commits[idx].total_lines as f64) + SLACK;
        if dist > reach {
            continue;
        }
        let better = match best {
            None => true,
            Some((prev, prev_dist)) => {
                dist < prev_dist - 1e-9
                    || ((dist - prev_dist).abs() <= 1e-9
                        && state.commits[idx].total_lines < state.commits[prev].total_lines)
            }
        };
        if better {
            best = Some((idx, dist));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Draw the commits-by-time-of-day scatterplot, recording the inner plot
/// area so the mouse handlers can map pointer positions back into it.
pub fn draw_scatter_view(f: &mut Frame, area: Rect, state: &mut ExploreState) {
    let palette = state.palette();

    let title = match state.cutoff {
        Some(cut) => format!(
            "Commits by time of day — up to {}",
            cut.format("%A, %B %-d, %Y %H:%M")
        ),
        None => "Commits by time of day".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.dim));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(Y_GUTTER), Constraint::Min(0)])
        .split(inner);
    let plot_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);
    let plot = plot_chunks[0];
    state.chart_area = plot;

    let (x_scale, y_scale, r_scale) = scales(state, plot);
    let w = plot.width.max(2) as f64;
    let h = plot.height.max(2) as f64;

    draw_y_labels(f, chunks[0], &y_scale, state);

    // Painted largest-first so small commits stay on top and hoverable.
    let mut order: Vec<usize> = state.filtered_commits.clone();
    order.sort_by(|&a, &b| state.commits[b].total_lines.cmp(&state.commits[a].total_lines));

    let selection = state.selection;
    let hover = state.hover;
    let canvas = Canvas::default()
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .marker(Marker::Braille)
        .paint(|ctx| {
            for hour in (0..=24).step_by(6) {
                let gy = h - y_scale.map(hour as f64);
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: gy,
                    x2: w,
                    y2: gy,
                    color: palette.grid,
                });
            }

            if let Some(rect) = selection {
                let (ry0, ry1) = (h - rect.y1, h - rect.y0);
                for (x1, y1, x2, y2) in [
                    (rect.x0, ry0, rect.x1, ry0),
                    (rect.x0, ry1, rect.x1, ry1),
                    (rect.x0, ry0, rect.x0, ry1),
                    (rect.x1, ry0, rect.x1, ry1),
                ] {
                    ctx.draw(&CanvasLine { x1, y1, x2, y2, color: palette.accent });
                }
            }

            for &idx in &order {
                let commit = &state.commits[idx];
                let px = x_scale.map(commit.datetime);
                let py = h - y_scale.map(commit.hour_frac);
                let color = if hover == Some(idx) {
                    palette.accent
                } else if state.selected_commits.contains(&idx) {
                    palette.selected
                } else {
                    palette.point
                };
                ctx.draw(&Circle {
                    x: px,
                    y: py,
                    radius: r_scale.map(commit.total_lines as f64),
                    color,
                });
            }
        });
    f.render_widget(canvas, plot);

    draw_x_labels(f, plot_chunks[1], state);
}

fn draw_y_labels(f: &mut Frame, gutter: Rect, y_scale: &LinearScale, state: &ExploreState) {
    let palette = state.palette();
    let height = gutter.height as usize;
    let mut rows = vec![String::new(); height.max(1)];
    for hour in (0..=24).step_by(6) {
        let row = y_scale.map(hour as f64).round() as usize;
        if row < rows.len() {
            rows[row] = format!("{hour:02}:00");
        }
    }
    let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
    f.render_widget(
        Paragraph::new(lines).style(Style::default().fg(palette.dim)),
        gutter,
    );
}

fn draw_x_labels(f: &mut Frame, row: Rect, state: &ExploreState) {
    let palette = state.palette();
    let left = state.x_domain.0.format("%b %-d, %Y").to_string();
    let right = state.x_domain.1.format("%b %-d, %Y").to_string();
    let width = row.width as usize;
    let pad = width.saturating_sub(left.len() + right.len());
    let label = format!("{left}{}{right}", " ".repeat(pad));
    f.render_widget(
        Paragraph::new(label).style(
            Style::default()
                .fg(palette.dim)
                .add_modifier(Modifier::ITALIC),
        ),
        row,
    );
}
