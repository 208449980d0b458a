//! Dashboard renderers. Pure functions of [`DashboardView`]: every draw rebuilds the
//! chart bars and table rows from the view model.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table};

use super::layout::DashboardLayout;
use crate::dashboard::{ChartSeries, DashboardView, DataSource, GrowthTone};
use crate::utils::escape_single_line;

const MUTED: Color = Color::Rgb(113, 113, 122);
const TEXT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const DANGER: Color = Color::Rgb(239, 68, 68);
const WARNING: Color = Color::Rgb(245, 158, 11);

/// Width in cells of the per-weekday bar at 100%
const WEEKDAY_BAR_CELLS: usize = 20;

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(format!(" {} ", title))
}

fn no_data(frame: &mut Frame, area: Rect, title: &str) {
    let paragraph = Paragraph::new("No data")
        .style(Style::default().fg(MUTED))
        .alignment(Alignment::Center)
        .block(panel(title));
    frame.render_widget(paragraph, area);
}

pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    view: Option<&DashboardView>,
    loading: bool,
) {
    let Some(view) = view else {
        let text = if loading { "Loading statistics..." } else { "No statistics loaded" };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center)
            .block(panel("Dashboard"));
        frame.render_widget(paragraph, area);
        return;
    };

    let layout = DashboardLayout::new(area);
    render_banner(frame, layout.banner_area, view.source, loading);
    render_summary(frame, layout.summary_area, view);

    let charts = [&view.commands_by_type, &view.last_7_days, &view.by_hour, &view.trend];
    for (series, chart_area) in charts.into_iter().zip(layout.chart_areas) {
        render_bar_chart(frame, chart_area, series);
    }

    render_popular_table(frame, layout.popular_area, view);
    render_weekday_table(frame, layout.weekday_area, view);
}

fn render_banner(frame: &mut Frame, area: Rect, source: DataSource, loading: bool) {
    let (text, style) = match source {
        DataSource::Sample => (
            " SAMPLE DATA: statistics server unavailable, showing built-in example ",
            Style::default().fg(Color::Black).bg(WARNING).add_modifier(Modifier::BOLD),
        ),
        DataSource::Live => (" Live data ", Style::default().fg(ACCENT)),
    };
    let text = if loading { format!("{}(refreshing...)", text) } else { text.to_string() };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_summary(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(area);

    let growth_color = match view.summary.growth.tone {
        GrowthTone::Positive => ACCENT,
        GrowthTone::Negative => DANGER,
    };
    let items = [
        ("Total commands", view.summary.total_commands.clone(), TEXT),
        ("Success rate", view.summary.success_rate.clone(), TEXT),
        ("Growth", view.summary.growth.text.clone(), growth_color),
        ("Last used", escape_single_line(&view.summary.last_used), TEXT),
        ("Top command", escape_single_line(&view.summary.top_command), TEXT),
        ("Peak hour", escape_single_line(&view.summary.peak_hour), TEXT),
    ];

    for ((title, value, color), card) in items.into_iter().zip(cards.iter()) {
        let paragraph = Paragraph::new(value)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(panel(title));
        frame.render_widget(paragraph, *card);
    }
}

pub fn render_bar_chart(frame: &mut Frame, area: Rect, series: &ChartSeries) {
    if series.is_empty() {
        no_data(frame, area, series.title);
        return;
    }

    let bars: Vec<Bar> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let label = series.labels.get(i).map(|l| escape_single_line(l)).unwrap_or_default();
            let color = series.colors.get(i).copied().unwrap_or(ACCENT);
            Bar::default()
                .value(*value)
                .label(Line::from(label))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    // Fit all bars in the panel: borders take two columns, one gap per bar
    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = (inner_width / bars.len().max(1)).saturating_sub(1).clamp(1, 9) as u16;

    let chart = BarChart::default()
        .block(panel(series.title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

fn render_popular_table(frame: &mut Frame, area: Rect, view: &DashboardView) {
    if view.popular_commands.is_empty() {
        no_data(frame, area, "Popular commands");
        return;
    }

    let rows: Vec<Row> = view
        .popular_commands
        .iter()
        .map(|row| Row::new(row.cells().into_iter().map(|c| Cell::from(escape_single_line(&c)))))
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Percentage(50), Constraint::Percentage(20), Constraint::Percentage(30)],
    )
    .header(header(["Command", "Count", "Share"]))
    .block(panel("Popular commands"));
    frame.render_widget(table, area);
}

fn render_weekday_table(frame: &mut Frame, area: Rect, view: &DashboardView) {
    if view.weekday_stats.is_empty() {
        no_data(frame, area, "By weekday");
        return;
    }

    let rows: Vec<Row> = view
        .weekday_stats
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.label),
                Cell::from(row.count.to_string()),
                Cell::from(progress_bar(row.bar_width, WEEKDAY_BAR_CELLS))
                    .style(Style::default().fg(ACCENT)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(WEEKDAY_BAR_CELLS as u16),
        ],
    )
    .header(header(["Day", "Count", "Activity"]))
    .block(panel("By weekday"));
    frame.render_widget(table, area);
}

fn header<const N: usize>(titles: [&'static str; N]) -> Row<'static> {
    Row::new(titles).style(Style::default().fg(MUTED).add_modifier(Modifier::BOLD))
}

/// Text bar `cells` wide at 100%
pub fn progress_bar(percent: f64, cells: usize) -> String {
    let filled = (percent.clamp(0.0, 100.0) / 100.0 * cells as f64).round() as usize;
    "█".repeat(filled)
}
