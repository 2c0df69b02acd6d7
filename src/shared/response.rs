use serde_json::{Value, json};

use crate::cql::types::{CqlAst, RenderFormat};
use crate::engine::result::ExecutionResult;
use crate::shared::error::CogError;

pub const CQL_VERSION: &str = "1.0";

/// Success envelope for the one-shot query surface.
pub fn query_ok(ast: &CqlAst, result: &ExecutionResult) -> Value {
    json!({
        "ok": true,
        "cql": {
            "version": CQL_VERSION,
            "ast": ast,
        },
        "crm": {
            "layers_used": result.layers_used,
            "provenance": result.provenance,
        },
        "result": {
            "format": ast.render.unwrap_or(RenderFormat::Json),
            "data": result.data,
            "text": result.text,
        },
    })
}

/// Failure envelope for the one-shot query surface. Internal failures keep
/// their detail out of the client-visible message.
pub fn query_error(err: &CogError) -> Value {
    let message = match err {
        CogError::Internal(_) => {
            "an unexpected error occurred in the cognitive layer".to_string()
        }
        other => other.to_string(),
    };
    json!({
        "ok": false,
        "error": { "code": err.code(), "message": message },
    })
}

/// Rejection body used by the streaming surface before a session exists.
pub fn stream_error(err: &CogError) -> Value {
    json!({
        "error": { "code": err.code(), "message": err.to_string() },
    })
}
