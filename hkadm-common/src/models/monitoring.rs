//! Admin monitoring: system metrics and AI module logs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// GET /admin/monitoring/metrics response
///
/// The backend reports a free-form set of named values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SystemMetrics(pub Map<String, Value>);

impl SystemMetrics {
    /// Metrics as `(name, rendered value)` pairs, nested objects flattened
    /// with dotted names
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        flatten("", &self.0, &mut out);
        out
    }
}

fn flatten(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten(&name, inner, out),
            Value::String(s) => out.push((name, s.clone())),
            other => out.push((name, other.to_string())),
        }
    }
}

/// One AI module log entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringLog {
    #[serde(default)]
    pub id: Option<String>,
    /// SURVEILLANCE, SUGGESTION, ...
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub input: Option<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl MonitoringLog {
    /// User the entry is about, when the input names one
    pub fn user_id(&self) -> Option<&str> {
        self.input.as_ref()?.get("userId")?.as_str()
    }
}

/// GET /admin/monitoring/logs response
///
/// Paginated as `{data, meta}`; older backends answer `{logs}` or a bare list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MonitoringLogs {
    Page {
        data: Vec<MonitoringLog>,
        #[serde(default)]
        meta: Option<Value>,
    },
    Logs {
        logs: Vec<MonitoringLog>,
    },
    List(Vec<MonitoringLog>),
}

impl MonitoringLogs {
    pub fn into_vec(self) -> Vec<MonitoringLog> {
        match self {
            MonitoringLogs::Page { data, .. } => data,
            MonitoringLogs::Logs { logs } => logs,
            MonitoringLogs::List(list) => list,
        }
    }
}
