use serde::Serialize;
use serde_json::Value;

/// Pipeline stage recorded for caller transparency. `layers_used` on a result
/// always begins with `Raw` and is append-only: a stage appears exactly when
/// it executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Layer {
    Raw,
    Aggregate,
    Descriptive,
    Interpretive,
    Narrative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceCount {
    pub source: &'static str,
    pub count: usize,
}

/// Which upstream sources and row counts contributed to a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provenance {
    pub cells: SourceCount,
    pub events: SourceCount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub layers_used: Vec<Layer>,
    pub data: Value,
    pub text: String,
    pub provenance: Provenance,
}
