use serde_json::Value;
use tracing::debug;

use crate::cql::types::{CqlAst, InterpretMode, Scope};
use crate::engine::dataset::{DatasetSnapshot, Record};
use crate::engine::limits::ExecutionLimits;
use crate::engine::result::{ExecutionResult, Layer, Provenance, SourceCount};
use crate::engine::{aggregate, filter, render};
use crate::shared::error::CogError;

/// Executes one AST against one dataset snapshot exactly once. Pure function
/// of (AST, dataset, limits); all failures are synchronous and leave no side
/// effect. Stage order is total and fixed: safety, scope, filter, aggregate,
/// interpret, render.
pub fn execute(
    ast: &CqlAst,
    data: &DatasetSnapshot,
    limits: &ExecutionLimits,
) -> Result<ExecutionResult, CogError> {
    // 1. Safety ceilings, checked before any data is touched.
    if data.cells.len() > limits.max_cells {
        return Err(CogError::LimitExceeded(format!(
            "max cells limit exceeded ({})",
            limits.max_cells
        )));
    }
    if data.events.len() > limits.max_events {
        return Err(CogError::LimitExceeded(format!(
            "max events limit exceeded ({})",
            limits.max_events
        )));
    }

    let mut layers_used = vec![Layer::Raw];

    // 2. Scope resolution.
    let scoped: Vec<Record> = match &ast.from {
        Scope::Cells => data.cells.iter().cloned().map(Record::Cell).collect(),
        Scope::Events => data.events.iter().cloned().map(Record::Event).collect(),
        Scope::Metrics => vec![Record::Metrics(data.metrics.clone())],
        Scope::Workflow(name) => data
            .cells
            .iter()
            .filter(|c| c.workflow.eq_ignore_ascii_case(name))
            .cloned()
            .map(Record::Cell)
            .collect(),
        Scope::Other(unknown) => return Err(CogError::InvalidScope(unknown.clone())),
    };

    // 3. Conjunctive filters over the scoped set.
    let working = filter::apply(scoped, ast.where_clause.as_deref());
    debug!(
        target: "cognidb::engine",
        scope = ?ast.from,
        working = working.len(),
        "Scope resolved and filtered"
    );

    // 4. Aggregation; when present, aggregates become the reported data.
    let aggs = match ast.aggregate.as_deref() {
        Some(specs) if !specs.is_empty() => {
            layers_used.push(Layer::Aggregate);
            Some(aggregate::apply(&working, specs))
        }
        _ => None,
    };
    let data_out = match &aggs {
        Some(map) => serde_json::to_value(map).unwrap_or(Value::Null),
        None => Value::Array(working.iter().map(Record::to_value).collect()),
    };

    // 5. Interpretation posture; narrating an empty set is an invalid
    //    reduction on the one-shot path.
    let mode = ast.interpret.unwrap_or(InterpretMode::Descriptive);
    match mode {
        InterpretMode::Narrative => {
            layers_used.push(Layer::Interpretive);
            layers_used.push(Layer::Narrative);
            if working.is_empty() {
                return Err(CogError::NonReducible);
            }
        }
        InterpretMode::Interpretive => layers_used.push(Layer::Interpretive),
        InterpretMode::Descriptive => layers_used.push(Layer::Descriptive),
    }

    // 6. Render.
    let text = render::render_text(mode, working.len(), aggs.as_ref());

    Ok(ExecutionResult {
        layers_used,
        data: data_out,
        text,
        provenance: Provenance {
            cells: SourceCount {
                source: "/v1/cells",
                count: data.cells.len(),
            },
            events: SourceCount {
                source: "/v1/log",
                count: data.events.len(),
            },
            window: (limits.time_range_days > 0)
                .then(|| format!("last_{}_days", limits.time_range_days)),
        },
    })
}
