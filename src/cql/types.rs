use serde::{Deserialize, Serialize};

/// Dataset a query targets. `Other` carries a well-formed but unrecognized
/// scope word through to the engine, which rejects it at execution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Cells,
    Events,
    Metrics,
    Workflow(String),
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
}

/// Filter literal, coerced at parse time: numeric-looking text becomes a
/// number, anything else stays a string with surrounding quotes stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl FilterValue {
    pub fn coerce(raw: &str) -> Self {
        match raw.parse::<f64>() {
            // "nan"/"inf" parse as floats in Rust; keep them textual.
            Ok(n) if n.is_finite() => FilterValue::Number(n),
            _ => FilterValue::Text(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub op: CompareOp,
    pub value: FilterValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggSpec {
    Count,
    Avg { field: String },
    Min { field: String },
    Max { field: String },
    Distribution { field: String },
}

impl AggSpec {
    /// Key under which this aggregation is reported in the result map.
    pub fn key(&self) -> String {
        match self {
            AggSpec::Count => "count".to_string(),
            AggSpec::Avg { field } => format!("avg_{field}"),
            AggSpec::Min { field } => format!("min_{field}"),
            AggSpec::Max { field } => format!("max_{field}"),
            AggSpec::Distribution { field } => format!("distribution_{field}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterpretMode {
    Descriptive,
    Interpretive,
    Narrative,
}

impl InterpretMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpretMode::Descriptive => "DESCRIPTIVE",
            InterpretMode::Interpretive => "INTERPRETIVE",
            InterpretMode::Narrative => "NARRATIVE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "DESCRIPTIVE" => Some(InterpretMode::Descriptive),
            "INTERPRETIVE" => Some(InterpretMode::Interpretive),
            "NARRATIVE" => Some(InterpretMode::Narrative),
            _ => None,
        }
    }
}

/// Presentation hint recorded for the caller; never changes what the engine
/// computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    Json,
    Text,
    Timeline,
    Dashboard,
}

impl RenderFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(RenderFormat::Json),
            "text" => Some(RenderFormat::Text),
            "timeline" => Some(RenderFormat::Timeline),
            "dashboard" => Some(RenderFormat::Dashboard),
            _ => None,
        }
    }
}

/// Parsed CQL query. Clauses with no match in the input stay `None`; the
/// engine supplies defaults for `interpret` and `render`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CqlAst {
    pub from: Scope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<String>>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<Vec<AggSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpret: Option<InterpretMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderFormat>,
}
