use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen split shared by every view
pub struct AppLayout {
    pub header_area: Rect,
    pub search_area: Rect,
    pub main_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Header: top row (brand, category, history count)
    /// - Search bar: 3 rows (bordered input)
    /// - Main area: start screen or result view
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            search_area: chunks[1],
            main_area: chunks[2],
            status_area: chunks[3],
        }
    }
}

/// Result view: summary on the left (65%), sources on the right (35%)
pub fn split_result(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Start screen: suggestion chips (3 rows) above the category cards
pub fn split_home(area: Rect) -> (Rect, Vec<Rect>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    (rows[0], cards.to_vec())
}

/// History drawer docked to the right edge (40% width, at least 30 columns)
pub fn drawer_rect(area: Rect) -> Rect {
    let width = ((u32::from(area.width) * 40 / 100) as u16).max(30).min(area.width);
    Rect::new(area.x + area.width - width, area.y, width, area.height)
}

/// Rectangle centred in `area`, sized as a percentage of it
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.search_area.height, 3);
        assert_eq!(layout.search_area.y, 1);
        assert_eq!(layout.main_area.height, 25);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);
    }

    #[test]
    fn test_split_result_widths() {
        let (summary, sources) = split_result(Rect::new(0, 0, 100, 20));
        assert_eq!(summary.width, 65);
        assert_eq!(sources.width, 35);
    }

    #[test]
    fn test_split_home_has_three_cards() {
        let (chips, cards) = split_home(Rect::new(0, 0, 90, 20));
        assert_eq!(chips.height, 3);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards.iter().map(|c| c.width).sum::<u16>(), 90);
    }

    #[test]
    fn test_drawer_rect_right_aligned() {
        let area = Rect::new(0, 0, 100, 30);
        let drawer = drawer_rect(area);
        assert_eq!(drawer.width, 40);
        assert_eq!(drawer.x + drawer.width, 100);

        // Narrow terminals still get a usable drawer
        let narrow = drawer_rect(Rect::new(0, 0, 50, 10));
        assert_eq!(narrow.width, 30);

        let tiny = drawer_rect(Rect::new(0, 0, 20, 10));
        assert_eq!(tiny.width, 20);
        assert_eq!(tiny.x, 0);
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 10);
    }
}
