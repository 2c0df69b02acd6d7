use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::time::now_ms;

/// Standardized event kinds emitted by producers after observable state
/// changes.
pub mod kinds {
    pub const GPP_INGESTED: &str = "gpp_ingested";
    pub const CELL_CREATED: &str = "cell_created";
    pub const STATE_CHANGED: &str = "state_changed";
    pub const FRICTION_RECORDED: &str = "friction_recorded";
    pub const RUNTIME_SNAPSHOT: &str = "runtime_snapshot";
}

/// Domain event carried on the bus: a kind, an optional subject cell and a
/// structured detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusEvent {
    pub kind: String,
    pub timestamp_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_id: Option<String>,
    #[serde(default)]
    pub detail: Value,
}

impl BusEvent {
    pub fn new(kind: impl Into<String>, cell_id: Option<String>, detail: Value) -> Self {
        Self {
            kind: kind.into(),
            timestamp_ms: now_ms(),
            cell_id,
            detail,
        }
    }

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

    /// Workflow name carried in the payload, under either historical key.
    pub fn workflow(&self) -> Option<&str> {
        self.detail_str("workflow").or_else(|| self.detail_str("type"))
    }

    /// State carried in the payload, preferring the transition target.
    pub fn state(&self) -> Option<&str> {
        self.detail_str("to_state").or_else(|| self.detail_str("state"))
    }
}
