use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializer for counts that accepts integers, floats and numeric strings.
/// Anything else (null, garbage, negatives) becomes 0.
pub fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match value {
        Value::Number(n) => {
            n.as_u64().or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.round() as u64))
        }
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().filter(|f| *f > 0.0).map(|f| f.round() as u64))
        }
        _ => None,
    };
    Ok(count.unwrap_or(0))
}

/// Deserializer for percentages and rates; non-numeric input becomes 0.0
pub fn deserialize_float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let float = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(float.filter(|f| f.is_finite()).unwrap_or(0.0))
}

/// Deserializer for weekday indexes. SQLite's `strftime('%w')` yields strings, so
/// both `"3"` and `3` are accepted. Non-numeric input is kept as `None` so the
/// dashboard can apply its own fallback.
pub fn deserialize_day_index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// Deserializer for free-form labels: strings pass through, numbers are printed,
/// null becomes an empty string.
pub fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use crate::models::{CategoryCount, DayCount, HourCount, RawTrends};

    #[test]
    fn test_count_accepts_strings_and_floats() {
        let a: CategoryCount = serde_json::from_str(r#"{"comando":"x","cantidad":"12"}"#).unwrap();
        assert_eq!(a.count, 12);

        let b: CategoryCount = serde_json::from_str(r#"{"comando":"x","cantidad":4.6}"#).unwrap();
        assert_eq!(b.count, 5);

        let c: CategoryCount = serde_json::from_str(r#"{"comando":"x","cantidad":null}"#).unwrap();
        assert_eq!(c.count, 0);

        let d: CategoryCount = serde_json::from_str(r#"{"comando":"x","cantidad":-3}"#).unwrap();
        assert_eq!(d.count, 0);
    }

    #[test]
    fn test_day_index_variants() {
        let numeric: DayCount = serde_json::from_str(r#"{"dia":"3","cantidad":1}"#).unwrap();
        assert_eq!(numeric.day_index, Some(3));

        let number: DayCount = serde_json::from_str(r#"{"dia":6,"cantidad":1}"#).unwrap();
        assert_eq!(number.day_index, Some(6));

        let garbage: DayCount = serde_json::from_str(r#"{"dia":"lunes","cantidad":1}"#).unwrap();
        assert_eq!(garbage.day_index, None);

        let missing: DayCount = serde_json::from_str(r#"{"cantidad":1}"#).unwrap();
        assert_eq!(missing.day_index, None);
    }

    #[test]
    fn test_label_from_number() {
        let hour: HourCount = serde_json::from_str(r#"{"hora":9,"cantidad":1}"#).unwrap();
        assert_eq!(hour.hour, "9");

        let label: CategoryCount = serde_json::from_str(r#"{"comando":null,"cantidad":1}"#).unwrap();
        assert_eq!(label.label, "");
    }

    #[test]
    fn test_float_from_string() {
        let trends: RawTrends =
            serde_json::from_str(r#"{"tasa_exito":"95.5","variacion_porcentaje":"abc"}"#).unwrap();
        assert_eq!(trends.tasa_exito, 95.5);
        assert_eq!(trends.variacion_porcentaje, 0.0);
    }
}
