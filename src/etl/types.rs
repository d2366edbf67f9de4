use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A `.ktr` file the backend knows how to run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transformation {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "ruta")]
    pub path: String,
    #[serde(
        default,
        alias = "mtime",
        alias = "fechaModificacion",
        deserialize_with = "deserialize_timestamp"
    )]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default, alias = "tamano", alias = "tamaño")]
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub ktr_path: String,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub output: Option<String>,
    pub error: Option<String>,
}

/// Accepts RFC 3339 strings or epoch milliseconds. Anything else is "unknown".
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    })
}
