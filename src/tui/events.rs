use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::path::Path;

use crate::error::LocmapError;
use crate::theme::{save_prefs, Prefs};
use crate::tui::state::{ExploreState, Pane, SelRect};
use crate::tui::views::{hit_test, recompute_selection};

#[derive(Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Continue,
    Quit,
}

pub fn handle_key(
    state: &mut ExploreState,
    key: KeyEvent,
    prefs_path: Option<&Path>,
) -> EventOutcome {
    match key.code {
        KeyCode::Char('q') => return EventOutcome::Quit,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = !state.show_help,
        KeyCode::Esc => {
            if state.show_help {
                state.show_help = false;
            } else {
                // Dismissing the rectangle also empties the selection;
                // the breakdowns fall back to all visible commits.
                state.selection = None;
                state.selected_commits.clear();
            }
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.focus = match state.focus {
                Pane::Chart => Pane::Story,
                Pane::Story => Pane::Chart,
            };
        }
        KeyCode::Left => adjust_slider(state, -1),
        KeyCode::Right => adjust_slider(state, 1),
        KeyCode::PageUp => adjust_slider(state, -10),
        KeyCode::PageDown => adjust_slider(state, 10),
        KeyCode::Down | KeyCode::Char('j') => step_story_by(state, 1),
        KeyCode::Up | KeyCode::Char('k') => step_story_by(state, -1),
        KeyCode::Char('g') => {
            state.step_story(0);
            recompute_selection(state);
        }
        KeyCode::Char('G') => {
            state.step_story(state.commits.len().saturating_sub(1));
            recompute_selection(state);
        }
        KeyCode::Char('y') => copy_commit_url(state),
        KeyCode::Char('t') => cycle_theme(state, prefs_path),
        _ => {}
    }
    EventOutcome::Continue
}

/// Slider driver: move progress by `delta` and re-filter; the frame then
/// redraws summary, scatter, and breakdowns in order.
fn adjust_slider(state: &mut ExploreState, delta: i16) {
    let progress = (state.progress as i16 + delta).clamp(0, 100) as u8;
    state.set_progress(progress);
    recompute_selection(state);
}

fn step_story_by(state: &mut ExploreState, delta: i64) {
    if state.commits.is_empty() {
        return;
    }
    let max = state.commits.len() as i64 - 1;
    let index = (state.story_index as i64 + delta).clamp(0, max) as usize;
    state.step_story(index);
    recompute_selection(state);
}

fn copy_commit_url(state: &mut ExploreState) {
    let target = state
        .hover
        .or_else(|| state.selected_commits.first().copied())
        .or_else(|| state.filtered_commits.last().copied());
    let Some(idx) = target else {
        state.set_status("Nothing to copy");
        return;
    };
    let url = state.commits[idx].url.clone();
    match copy_to_clipboard(&url) {
        Ok(()) => state.set_status(format!("Copied: {url}")),
        Err(err) => state.set_status(format!("Clipboard error: {err}")),
    }
}

fn copy_to_clipboard(text: &str) -> crate::error::Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| LocmapError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| LocmapError::Clipboard(e.to_string()))
}

fn cycle_theme(state: &mut ExploreState, prefs_path: Option<&Path>) {
    state.theme = state.theme.cycle();
    let prefs = Prefs { theme: state.theme };
    match save_prefs(prefs_path, &prefs) {
        Ok(()) => state.set_status(format!("Theme: {}", state.theme.label())),
        Err(err) => state.set_status(format!("Prefs error: {err}")),
    }
}

pub fn handle_mouse(state: &mut ExploreState, mouse: MouseEvent) {
    let area = state.chart_area;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(local) = local_pos(area, mouse.column, mouse.row, false) {
                state.brushing = true;
                state.brush_anchor = local;
                state.selection = Some(SelRect::normalized(local, local));
                recompute_selection(state);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if state.brushing => {
            if let Some(local) = local_pos(area, mouse.column, mouse.row, true) {
                state.selection = Some(SelRect::normalized(state.brush_anchor, local));
                recompute_selection(state);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.brushing = false;
        }
        MouseEventKind::Moved => {
            match local_pos(area, mouse.column, mouse.row, false) {
                Some(local) => {
                    state.hover = hit_test(state, local);
                    state.hover_pos = (mouse.column, mouse.row);
                }
                None => state.hover = None,
            }
        }
        _ => {}
    }
}

/// Terminal cell to chart-local coordinates. With `clamp` the position
/// is pulled inside the plot, which keeps an in-flight brush usable when
/// the pointer leaves the chart.
fn local_pos(area: Rect, column: u16, row: u16, clamp: bool) -> Option<(f64, f64)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let (right, bottom) = (area.right().saturating_sub(1), area.bottom().saturating_sub(1));
    if clamp {
        let col = column.clamp(area.x, right);
        let row = row.clamp(area.y, bottom);
        Some(((col - area.x) as f64, (row - area.y) as f64))
    } else if column >= area.x && column <= right && row >= area.y && row <= bottom {
        Some(((column - area.x) as f64, (row - area.y) as f64))
    } else {
        None
    }
}
