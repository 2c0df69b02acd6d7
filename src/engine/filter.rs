use crate::cql::types::{CompareOp, Filter, FilterValue};
use crate::engine::dataset::Record;

/// Conjunctive filter pass over a scoped working set. A record survives only
/// if every filter matches; no filters is a pass-through.
pub fn apply(records: Vec<Record>, filters: Option<&[Filter]>) -> Vec<Record> {
    let Some(filters) = filters else {
        return records;
    };
    if filters.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| filters.iter().all(|f| matches(record, f)))
        .collect()
}

fn matches(record: &Record, filter: &Filter) -> bool {
    // An absent field fails the term rather than comparing as undefined.
    let Some(actual) = record.field(&filter.field) else {
        return false;
    };
    match &filter.value {
        FilterValue::Number(expected) => match actual.as_number() {
            Some(n) => compare_f64(n, *expected, filter.op),
            None => false,
        },
        FilterValue::Text(expected) => compare_str(&actual.render(), expected, filter.op),
    }
}

fn compare_f64(lhs: f64, rhs: f64, op: CompareOp) -> bool {
    match op {
        CompareOp::Eq => lhs == rhs,
        CompareOp::Neq => lhs != rhs,
        CompareOp::Gt => lhs > rhs,
        CompareOp::Lt => lhs < rhs,
        CompareOp::Gte => lhs >= rhs,
        CompareOp::Lte => lhs <= rhs,
    }
}

fn compare_str(lhs: &str, rhs: &str, op: CompareOp) -> bool {
    match op {
        CompareOp::Eq => lhs == rhs,
        CompareOp::Neq => lhs != rhs,
        CompareOp::Gt => lhs > rhs,
        CompareOp::Lt => lhs < rhs,
        CompareOp::Gte => lhs >= rhs,
        CompareOp::Lte => lhs <= rhs,
    }
}
