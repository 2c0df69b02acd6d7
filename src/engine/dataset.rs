use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cell row from the dataset provider. `workflow` is the typed category
/// the original exposes as `type`; both names resolve through `field()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub id: String,
    pub workflow: String,
    pub state: String,
    pub friction: f64,
    pub version: u64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// One audit/event row: a kind, an optional target cell and a structured
/// detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_id: Option<String>,
    pub timestamp_ms: i64,
    #[serde(default)]
    pub detail: Value,
}

impl EventRecord {
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.detail.get(key).and_then(Value::as_str)
    }

    pub fn detail_f64(&self, key: &str) -> Option<f64> {
        self.detail.get(key).and_then(Value::as_f64)
    }

    /// Friction attribute where present, preferring the transition-scoped key.
    pub fn friction(&self) -> Option<f64> {
        self.detail_f64("friction_at_transition")
            .or_else(|| self.detail_f64("friction"))
    }
}

/// Aggregate runtime counters; queried as a single-row scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_cells: u64,
    pub counts_by_state: IndexMap<String, u64>,
    pub avg_friction: f64,
    pub uptime_ms: i64,
    pub status: String,
    pub last_updated_ms: i64,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            total_cells: 0,
            counts_by_state: IndexMap::new(),
            avg_friction: 0.0,
            uptime_ms: 0,
            status: "online".to_string(),
            last_updated_ms: 0,
        }
    }
}

/// A scalar field value resolved out of a record for filtering/aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.parse::<f64>().ok(),
        }
    }

    /// String representation used for distribution keys and string compares.
    /// Whole numbers render without a trailing `.0`.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                format!("{}", *n as i64)
            }
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

/// Tagged row variant over the heterogeneous scopes. Field references resolve
/// through a typed accessor; an unknown field is a defined "absent", never a
/// dynamic lookup failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Cell(CellRecord),
    Event(EventRecord),
    Metrics(MetricsSnapshot),
}

impl Record {
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match self {
            Record::Cell(c) => match name {
                "id" => Some(FieldValue::Text(c.id.clone())),
                "workflow" | "type" => Some(FieldValue::Text(c.workflow.clone())),
                "state" => Some(FieldValue::Text(c.state.clone())),
                "friction" => Some(FieldValue::Number(c.friction)),
                "version" => Some(FieldValue::Number(c.version as f64)),
                "created_at_ms" => Some(FieldValue::Number(c.created_at_ms as f64)),
                "updated_at_ms" => Some(FieldValue::Number(c.updated_at_ms as f64)),
                _ => None,
            },
            Record::Event(e) => match name {
                "id" => Some(FieldValue::Text(e.id.clone())),
                "kind" | "type" => Some(FieldValue::Text(e.kind.clone())),
                "cell_id" => e.cell_id.clone().map(FieldValue::Text),
                "timestamp_ms" => Some(FieldValue::Number(e.timestamp_ms as f64)),
                // Known detail payload keys resolve as scalars; anything else
                // is absent.
                _ => match e.detail.get(name) {
                    Some(Value::String(s)) => Some(FieldValue::Text(s.clone())),
                    Some(Value::Number(n)) => n.as_f64().map(FieldValue::Number),
                    Some(Value::Bool(b)) => Some(FieldValue::Text(b.to_string())),
                    _ => None,
                },
            },
            Record::Metrics(m) => match name {
                "total_cells" => Some(FieldValue::Number(m.total_cells as f64)),
                "avg_friction" => Some(FieldValue::Number(m.avg_friction)),
                "uptime_ms" => Some(FieldValue::Number(m.uptime_ms as f64)),
                "status" => Some(FieldValue::Text(m.status.clone())),
                "last_updated_ms" => Some(FieldValue::Number(m.last_updated_ms as f64)),
                _ => None,
            },
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Point-in-time view of the read-only dataset the engine runs against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSnapshot {
    pub cells: Vec<CellRecord>,
    pub events: Vec<EventRecord>,
    pub metrics: MetricsSnapshot,
}

impl Default for CellRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            workflow: String::new(),
            state: "CANDIDATE".to_string(),
            friction: 0.0,
            version: 1,
            created_at_ms: 0,
            updated_at_ms: 0,
        }
    }
}
