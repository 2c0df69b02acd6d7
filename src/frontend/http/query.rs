use http_body_util::BodyExt;
use hyper::{Request, Response, StatusCode, body::Incoming};
use serde::Deserialize;
use std::{convert::Infallible, sync::Arc};
use tracing::{debug, info};

use crate::cql::parser::query::parse_query;
use crate::engine;
use crate::engine::limits::{ExecutionLimits, LimitsOverride};
use crate::frontend::context::FrontendContext;
use crate::shared::config::CONFIG;
use crate::shared::error::CogError;
use crate::shared::response::{query_error, query_ok};

use super::{BoxedBody, json_response};

#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub context: Option<QueryContext>,
    #[serde(default)]
    pub limits: Option<LimitsOverride>,
}

/// Caller hints recorded for observability; execution does not depend on
/// them yet.
#[derive(Debug, Default, Deserialize)]
pub struct QueryContext {
    pub timezone: Option<String>,
    pub locale: Option<String>,
}

pub async fn handle_query(
    req: Request<Incoming>,
    ctx: Arc<FrontendContext>,
) -> Result<Response<BoxedBody>, Infallible> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => {
            return Ok(error_response(&CogError::Parse(
                "failed to read request body".to_string(),
            )));
        }
    };

    let request: QueryRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => {
            return Ok(error_response(&CogError::Parse(
                "query must be a non-empty string".to_string(),
            )));
        }
    };

    if request.query.trim().is_empty() {
        return Ok(error_response(&CogError::Parse(
            "query must be a non-empty string".to_string(),
        )));
    }

    info!(target: "cognidb::http", query = %request.query, "CQL query received");
    if let Some(context) = &request.context {
        debug!(target: "cognidb::http", ?context, "Query context supplied");
    }

    let ast = match parse_query(&request.query) {
        Ok(ast) => ast,
        Err(err) => return Ok(error_response(&err)),
    };

    let limits = ExecutionLimits::resolve(request.limits, &CONFIG.cognitive.limits);
    let snapshot = ctx.provider.snapshot(Some(limits.time_range_days));

    match engine::execute(&ast, &snapshot, &limits) {
        Ok(result) => Ok(json_response(StatusCode::OK, &query_ok(&ast, &result))),
        Err(err) => Ok(error_response(&err)),
    }
}

fn error_response(err: &CogError) -> Response<BoxedBody> {
    let status =
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, &query_error(err))
}
