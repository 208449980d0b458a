use serde::{Deserialize, Serialize};

/// Count of commands of one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    #[serde(
        rename = "comando",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_label"
    )]
    pub label: String,
    #[serde(
        rename = "cantidad",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_count"
    )]
    pub count: u64,
}

/// Count of commands on one weekday. `day_index` is `None` when the server sent
/// something that is not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCount {
    #[serde(
        rename = "dia",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_day_index"
    )]
    pub day_index: Option<i64>,
    #[serde(
        rename = "cantidad",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_count"
    )]
    pub count: u64,
}

/// Count of commands in one hour of the day (`hour` is the server label, e.g. "09")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourCount {
    #[serde(
        rename = "hora",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_label"
    )]
    pub hour: String,
    #[serde(
        rename = "cantidad",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_count"
    )]
    pub count: u64,
}

/// Count of commands on one calendar date (`date` is the raw server label)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateCount {
    #[serde(
        rename = "fecha",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_label"
    )]
    pub date: String,
    #[serde(
        rename = "cantidad",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_count"
    )]
    pub count: u64,
}

/// `estadisticas` half of `GET /dashboard/estadisticas`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatistics {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_count")]
    pub total_comandos: u64,
    #[serde(default)]
    pub comandos_por_tipo: Vec<CategoryCount>,
    #[serde(default)]
    pub comandos_por_dia: Vec<DayCount>,
    #[serde(default)]
    pub comandos_por_hora: Vec<HourCount>,
    #[serde(default)]
    pub comandos_ultimos_7_dias: Vec<DateCount>,
    #[serde(default)]
    pub ultimo_uso: Option<String>,
    #[serde(default)]
    pub comando_mas_usado: Option<CategoryCount>,
    #[serde(default)]
    pub hora_pico: Option<HourCount>,
}

/// `tendencias` half of `GET /dashboard/estadisticas`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrends {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_float")]
    pub tasa_exito: f64,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_float")]
    pub variacion_porcentaje: f64,
    #[serde(default)]
    pub tendencias_diarias: Vec<DateCount>,
}

/// Wire envelope of the statistics endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub estadisticas: RawStatistics,
    #[serde(default)]
    pub tendencias: RawTrends,
}

/// Point-in-time usage aggregation. Replaced wholesale on every fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsSnapshot {
    pub total_commands: u64,
    pub commands_by_type: Vec<CategoryCount>,
    pub commands_by_day: Vec<DayCount>,
    pub commands_by_hour: Vec<HourCount>,
    pub last_7_days: Vec<DateCount>,
    pub success_rate: f64,
    pub growth_percent: f64,
    pub trend_series: Vec<DateCount>,
    pub last_used: Option<String>,
    pub top_command: Option<CategoryCount>,
    pub peak_hour: Option<HourCount>,
}

impl From<StatsResponse> for StatisticsSnapshot {
    fn from(response: StatsResponse) -> Self {
        let StatsResponse { estadisticas: stats, tendencias: trends } = response;
        Self {
            total_commands: stats.total_comandos,
            commands_by_type: stats.comandos_por_tipo,
            commands_by_day: stats.comandos_por_dia,
            commands_by_hour: stats.comandos_por_hora,
            last_7_days: stats.comandos_ultimos_7_dias,
            success_rate: trends.tasa_exito,
            growth_percent: trends.variacion_porcentaje,
            trend_series: trends.tendencias_diarias,
            last_used: stats.ultimo_uso,
            top_command: stats.comando_mas_usado,
            peak_hour: stats.hora_pico,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_full_response() {
        let json = r#"{
            "estadisticas": {
                "total_comandos": 15,
                "comandos_por_tipo": [{"comando": "reproduce", "cantidad": 5}],
                "comandos_por_dia": [{"dia": "1", "cantidad": 3}],
                "comandos_por_hora": [{"hora": "09", "cantidad": 3}],
                "comandos_ultimos_7_dias": [{"fecha": "2024-01-01", "cantidad": 2}],
                "ultimo_uso": "Hoy 15:30",
                "comando_mas_usado": {"comando": "reproduce", "cantidad": 5},
                "hora_pico": {"hora": "14", "cantidad": 7}
            },
            "tendencias": {
                "tasa_exito": 85,
                "variacion_porcentaje": -12.5,
                "tendencias_diarias": [{"fecha": "2024-01-03", "cantidad": 5}]
            }
        }"#;

        let response: StatsResponse = serde_json::from_str(json).unwrap();
        let snapshot = StatisticsSnapshot::from(response);

        assert_eq!(snapshot.total_commands, 15);
        assert_eq!(snapshot.commands_by_type[0].label, "reproduce");
        assert_eq!(snapshot.commands_by_day[0].day_index, Some(1));
        assert_eq!(snapshot.commands_by_hour[0].hour, "09");
        assert_eq!(snapshot.last_7_days[0].date, "2024-01-01");
        assert_eq!(snapshot.success_rate, 85.0);
        assert_eq!(snapshot.growth_percent, -12.5);
        assert_eq!(snapshot.trend_series[0].count, 5);
        assert_eq!(snapshot.last_used.as_deref(), Some("Hoy 15:30"));
        assert_eq!(snapshot.peak_hour.unwrap().hour, "14");
    }

    #[test]
    fn test_snapshot_from_empty_object() {
        let response: StatsResponse = serde_json::from_str("{}").unwrap();
        let snapshot = StatisticsSnapshot::from(response);

        assert_eq!(snapshot, StatisticsSnapshot::default());
    }

    #[test]
    fn test_null_optionals() {
        let json = r#"{"estadisticas": {"comando_mas_usado": null, "hora_pico": null}}"#;
        let response: StatsResponse = serde_json::from_str(json).unwrap();

        assert!(response.estadisticas.comando_mas_usado.is_none());
        assert!(response.estadisticas.hora_pico.is_none());
    }
}
