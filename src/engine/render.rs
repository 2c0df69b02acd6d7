use indexmap::IndexMap;
use serde_json::Value;

use crate::cql::types::InterpretMode;

/// Builds the human-readable narrative for a one-shot result. The posture
/// depends on the interpretation mode; aggregation results are cited when
/// present but never recomputed here.
pub fn render_text(
    mode: InterpretMode,
    working_len: usize,
    aggs: Option<&IndexMap<String, Value>>,
) -> String {
    match mode {
        InterpretMode::Descriptive => {
            let mut base = format!("Observatory: {working_len} records identified.");
            if let Some(aggs) = aggs {
                if let Some(count) = aggs.get("count") {
                    base.push_str(&format!(" Total volume: {count}."));
                }
                if let Some(avg) = aggs.get("avg_friction") {
                    base.push_str(&format!(" Average friction: {avg}."));
                }
                if let Some(Value::Object(dist)) = aggs.get("distribution_state") {
                    let states = dist
                        .iter()
                        .map(|(k, v)| format!("{k}: {v}"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    base.push_str(&format!(" Distribution by state: [ {states} ]."));
                }
            }
            base
        }
        InterpretMode::Interpretive => {
            let avg_friction = aggs
                .and_then(|a| a.get("avg_friction"))
                .map(|v| v.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "Interpretive analysis: running cells show an average friction of {avg_friction} \
                 in this sample. The pattern suggests operational stability across {working_len} units."
            )
        }
        InterpretMode::Narrative => format!(
            "Technical narrative: the observed flow shows a progression started by ingestion \
             and auditable transitions. With {working_len} observation points, process \
             integrity is confirmed by the logs."
        ),
    }
}
