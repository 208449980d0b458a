use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Frame split shared by both sections
pub struct AppLayout {
    pub tabs_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Tabs: top row
    /// - Body: everything in between
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        Self { tabs_area: chunks[0], body_area: chunks[1], status_area: chunks[2] }
    }
}

/// History section:
/// - Query input: 3 rows
/// - Records list: 60% width (left)
/// - Detail / edit pane: 40% width (right)
pub struct HistoryLayout {
    pub query_area: Rect,
    pub list_area: Rect,
    pub detail_area: Rect,
}

impl HistoryLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical[1]);

        Self { query_area: vertical[0], list_area: horizontal[0], detail_area: horizontal[1] }
    }
}

/// Dashboard section: summary row, two rows of charts, tables at the bottom
pub struct DashboardLayout {
    pub banner_area: Rect,
    pub summary_area: Rect,
    pub chart_areas: [Rect; 4],
    pub popular_area: Rect,
    pub weekday_area: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Min(4),
            ])
            .split(area);

        let halves = |r: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(r)
        };
        let top = halves(rows[2]);
        let middle = halves(rows[3]);
        let bottom = halves(rows[4]);

        Self {
            banner_area: rows[0],
            summary_area: rows[1],
            chart_areas: [top[0], top[1], middle[0], middle[1]],
            popular_area: bottom[0],
            weekday_area: bottom[1],
        }
    }
}
