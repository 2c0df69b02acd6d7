use serde::Serialize;
use serde_json::Value;

use crate::cql::types::InterpretMode;
use crate::engine::result::Layer;

/// One outbound update on a streaming session, shaped like the engine's
/// result envelope but window-scoped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamMessage {
    pub t: i64,
    pub mode: InterpretMode,
    pub scope: String,
    pub crm: StreamCrm,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamCrm {
    pub layers_used: Vec<Layer>,
    pub provenance: StreamProvenance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamProvenance {
    pub events: WindowSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSource {
    pub source: &'static str,
    pub count: usize,
    pub window: String,
}

pub const STREAM_SOURCE: &str = "/v1/stream/events";
