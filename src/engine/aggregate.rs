use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::cql::types::AggSpec;
use crate::engine::dataset::Record;

/// Computes the requested aggregations over the filtered working set.
/// Numeric aggregations coerce the field through the typed accessor; an
/// absent or non-numeric field contributes 0. Empty sets yield 0, never NaN.
pub fn apply(records: &[Record], specs: &[AggSpec]) -> IndexMap<String, Value> {
    let mut out = IndexMap::new();
    for spec in specs {
        let value = match spec {
            AggSpec::Count => json!(records.len()),
            AggSpec::Avg { field } => json!(avg(records, field)),
            AggSpec::Min { field } => json!(fold(records, field, f64::min)),
            AggSpec::Max { field } => json!(fold(records, field, f64::max)),
            AggSpec::Distribution { field } => json!(distribution(records, field)),
        };
        out.insert(spec.key(), value);
    }
    out
}

fn numeric(record: &Record, field: &str) -> f64 {
    record
        .field(field)
        .and_then(|v| v.as_number())
        .unwrap_or(0.0)
}

fn avg(records: &[Record], field: &str) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: f64 = records.iter().map(|r| numeric(r, field)).sum();
    round2(sum / records.len() as f64)
}

fn fold(records: &[Record], field: &str, pick: fn(f64, f64) -> f64) -> f64 {
    records
        .iter()
        .map(|r| numeric(r, field))
        .reduce(pick)
        .unwrap_or(0.0)
}

fn distribution(records: &[Record], field: &str) -> IndexMap<String, u64> {
    let mut dist: IndexMap<String, u64> = IndexMap::new();
    for record in records {
        let key = record
            .field(field)
            .map(|v| v.render())
            .unwrap_or_else(|| "null".to_string());
        *dist.entry(key).or_insert(0) += 1;
    }
    dist
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
