use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A small popup anchored just below-right of `anchor`, flipped and
/// clamped to stay inside `bounds`.
pub fn anchored_rect(anchor: (u16, u16), width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let mut x = anchor.0.saturating_add(1);
    if x + width > bounds.right() {
        x = anchor.0.saturating_sub(width + 1).max(bounds.x);
    }
    let mut y = anchor.1.saturating_add(1);
    if y + height > bounds.bottom() {
        y = anchor.1.saturating_sub(height + 1).max(bounds.y);
    }

    Rect::new(
        x.min(bounds.right().saturating_sub(width)),
        y.min(bounds.bottom().saturating_sub(height)),
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centered_rect_stays_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(70, 80, parent);
        assert!(popup.x >= parent.x && popup.right() <= parent.right());
        assert!(popup.y >= parent.y && popup.bottom() <= parent.bottom());
    }

    #[test]
    fn anchored_rect_flips_near_the_edges() {
        let bounds = Rect::new(0, 0, 80, 24);
        let near_corner = anchored_rect((78, 22), 20, 5, bounds);
        assert!(near_corner.right() <= bounds.right());
        assert!(near_corner.bottom() <= bounds.bottom());

        let roomy = anchored_rect((10, 10), 20, 5, bounds);
        assert_eq!(roomy.x, 11);
        assert_eq!(roomy.y, 11);
    }
}
