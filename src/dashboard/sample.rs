use crate::models::{CategoryCount, DateCount, DayCount, HourCount, StatisticsSnapshot};

fn category(label: &str, count: u64) -> CategoryCount {
    CategoryCount { label: label.to_string(), count }
}

fn date(date: &str, count: u64) -> DateCount {
    DateCount { date: date.to_string(), count }
}

fn hour(hour: &str, count: u64) -> HourCount {
    HourCount { hour: hour.to_string(), count }
}

/// Example snapshot shown when the statistics endpoint cannot be reached
pub fn sample_snapshot() -> StatisticsSnapshot {
    let daily = vec![date("2024-01-01", 2), date("2024-01-02", 3), date("2024-01-03", 5)];

    StatisticsSnapshot {
        total_commands: 15,
        commands_by_type: vec![
            category("reproduce", 5),
            category("busca en", 4),
            category("hora", 3),
            category("dime", 3),
        ],
        commands_by_day: vec![
            DayCount { day_index: Some(1), count: 3 },
            DayCount { day_index: Some(2), count: 5 },
            DayCount { day_index: Some(3), count: 7 },
        ],
        commands_by_hour: vec![hour("09", 3), hour("14", 7), hour("20", 5)],
        last_7_days: daily.clone(),
        success_rate: 85.0,
        growth_percent: 12.5,
        trend_series: daily,
        last_used: Some("Hoy 15:30".to_string()),
        top_command: Some(category("reproduce", 5)),
        peak_hour: Some(hour("14", 7)),
    }
}
