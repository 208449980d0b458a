//! Pure derivation from a statistics snapshot to presentation-ready view models.
//!
//! Nothing in here performs I/O or can fail: every malformed input has a defined
//! fallback (zero totals, unknown weekdays, unparseable dates).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use ratatui::style::Color;

use super::palette::category_colors;
use crate::models::{CategoryCount, DateCount, DayCount, HourCount, StatisticsSnapshot};

/// Weekday names indexed the way SQLite's `%w` numbers them (0 = Sunday)
pub const WEEKDAYS: [&str; 7] =
    ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

/// Where the snapshot behind a view came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    /// Built-in example data shown because the fetch failed
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthTone {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthDisplay {
    pub text: String,
    pub tone: GrowthTone,
}

/// Headline numbers shown above the charts
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCards {
    pub total_commands: String,
    pub success_rate: String,
    pub growth: GrowthDisplay,
    pub last_used: String,
    /// "reproduce (5)", or "-" when the server sent none
    pub top_command: String,
    /// "14:00 (7)", or "-" when the server sent none
    pub peak_hour: String,
}

/// Labels, values and colors for one chart; replaced as a whole on every update
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<Color>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Row of the popular-commands table
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub label: String,
    pub count: u64,
    pub share_percent: f64,
}

impl CategoryRow {
    pub fn cells(&self) -> Vec<String> {
        vec![self.label.clone(), self.count.to_string(), format!("{:.1}%", self.share_percent)]
    }
}

/// Row of the per-weekday table; `bar_width` is a percentage of the busiest day
#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayRow {
    pub label: &'static str,
    pub count: u64,
    pub bar_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub source: DataSource,
    pub summary: SummaryCards,
    pub commands_by_type: ChartSeries,
    pub last_7_days: ChartSeries,
    pub by_hour: ChartSeries,
    pub trend: ChartSeries,
    pub popular_commands: Vec<CategoryRow>,
    pub weekday_stats: Vec<WeekdayRow>,
}

/// How a date label is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "Mon"
    Weekday,
    /// "Jan 3"
    MonthDay,
}

/// Derive the complete dashboard view from a snapshot
pub fn derive_view(snapshot: &StatisticsSnapshot, source: DataSource) -> DashboardView {
    DashboardView {
        source,
        summary: summary_cards(snapshot),
        commands_by_type: category_series(&snapshot.commands_by_type),
        last_7_days: date_series("Last 7 days", &snapshot.last_7_days, DateStyle::Weekday),
        by_hour: hour_series(&snapshot.commands_by_hour),
        trend: date_series("Usage trend", &snapshot.trend_series, DateStyle::MonthDay),
        popular_commands: category_rows(&snapshot.commands_by_type, snapshot.total_commands),
        weekday_stats: weekday_rows(&snapshot.commands_by_day),
    }
}

/// `count / max(total, 1) * 100`, rounded to one decimal place
pub fn category_share(count: u64, total: u64) -> f64 {
    let share = count as f64 / total.max(1) as f64 * 100.0;
    (share * 10.0).round() / 10.0
}

/// Weekday name for a server day index; unknown or out-of-range indexes map to index 0
pub fn weekday_label(day_index: Option<i64>) -> &'static str {
    day_index
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| WEEKDAYS.get(i).copied())
        .unwrap_or(WEEKDAYS[0])
}

/// `count / max(max_count, 1) * 100`
pub fn bar_width(count: u64, max_count: u64) -> f64 {
    count as f64 / max_count.max(1) as f64 * 100.0
}

/// Signed growth text (`+12.5%` / `-3.0%`) with its tone
pub fn growth_display(growth_percent: f64) -> GrowthDisplay {
    let value = if growth_percent.is_finite() { growth_percent } else { 0.0 };
    if value >= 0.0 {
        // -0.0 also lands here; print it as zero
        GrowthDisplay { text: format!("+{:.1}%", value.abs()), tone: GrowthTone::Positive }
    } else {
        GrowthDisplay { text: format!("{:.1}%", value), tone: GrowthTone::Negative }
    }
}

/// Format a server date label; anything unparseable is returned verbatim
pub fn format_date_label(raw: &str, style: DateStyle) -> String {
    let Some(date) = parse_date(raw) else {
        return raw.to_string();
    };
    match style {
        DateStyle::Weekday => date.format("%a").to_string(),
        DateStyle::MonthDay => date.format("%b %-d").to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S").ok().map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
}

/// `HH:00` label for an hour bucket
pub fn hour_label(hour: &str) -> String {
    format!("{}:00", hour)
}

/// Integer with thousands separators: 1234567 -> "1,234,567"
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn summary_cards(snapshot: &StatisticsSnapshot) -> SummaryCards {
    let rate = if snapshot.success_rate.is_finite() { snapshot.success_rate } else { 0.0 };
    SummaryCards {
        total_commands: format_count(snapshot.total_commands),
        success_rate: format!("{:.1}%", rate),
        growth: growth_display(snapshot.growth_percent),
        last_used: snapshot
            .last_used
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Never".to_string()),
        top_command: snapshot
            .top_command
            .as_ref()
            .filter(|c| !c.label.trim().is_empty())
            .map(|c| format!("{} ({})", c.label, format_count(c.count)))
            .unwrap_or_else(|| "-".to_string()),
        peak_hour: snapshot
            .peak_hour
            .as_ref()
            .filter(|h| !h.hour.trim().is_empty())
            .map(|h| format!("{} ({})", hour_label(&h.hour), format_count(h.count)))
            .unwrap_or_else(|| "-".to_string()),
    }
}

fn category_series(items: &[CategoryCount]) -> ChartSeries {
    ChartSeries {
        title: "Commands by type",
        labels: items.iter().map(|c| c.label.clone()).collect(),
        values: items.iter().map(|c| c.count).collect(),
        colors: category_colors(items.len()),
    }
}

fn date_series(title: &'static str, items: &[DateCount], style: DateStyle) -> ChartSeries {
    ChartSeries {
        title,
        labels: items.iter().map(|d| format_date_label(&d.date, style)).collect(),
        values: items.iter().map(|d| d.count).collect(),
        colors: Vec::new(),
    }
}

fn hour_series(items: &[HourCount]) -> ChartSeries {
    ChartSeries {
        title: "Commands by hour",
        labels: items.iter().map(|h| hour_label(&h.hour)).collect(),
        values: items.iter().map(|h| h.count).collect(),
        colors: Vec::new(),
    }
}

fn category_rows(items: &[CategoryCount], total: u64) -> Vec<CategoryRow> {
    items
        .iter()
        .map(|c| CategoryRow {
            label: c.label.clone(),
            count: c.count,
            share_percent: category_share(c.count, total),
        })
        .collect()
}

fn weekday_rows(items: &[DayCount]) -> Vec<WeekdayRow> {
    let max_count = items.iter().map(|d| d.count).max().unwrap_or(0);
    items
        .iter()
        .map(|d| WeekdayRow {
            label: weekday_label(d.day_index),
            count: d.count,
            bar_width: bar_width(d.count, max_count),
        })
        .collect()
}
