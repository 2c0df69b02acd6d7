use hyper::{Method, Request, Response, StatusCode, body::Incoming};
use serde_json::json;
use std::{convert::Infallible, sync::Arc};

use crate::frontend::context::FrontendContext;
use crate::shared::time::now_ms;

use super::{BoxedBody, full_body, json_response, query, stream};

struct HttpHandler {
    ctx: Arc<FrontendContext>,
}

impl HttpHandler {
    fn not_found() -> Response<BoxedBody> {
        json_response(
            StatusCode::NOT_FOUND,
            &json!({ "error": { "code": "NOT_FOUND", "message": "unknown route" } }),
        )
    }

    fn health(&self) -> Response<BoxedBody> {
        json_response(
            StatusCode::OK,
            &json!({
                "status": "ok",
                "uptime_ms": now_ms() - self.ctx.started_at_ms,
                "subscribers": self.ctx.bus.subscriber_count(),
            }),
        )
    }

    async fn handle(&self, req: Request<Incoming>) -> Result<Response<BoxedBody>, Infallible> {
        let path = req.uri().path().to_string();

        if self.ctx.server_state.is_shutting_down() {
            return Ok(Response::builder()
                .status(StatusCode::SERVICE_UNAVAILABLE)
                .header(hyper::header::CONTENT_TYPE, "text/plain")
                .body(full_body("Server is shutting down"))
                .unwrap());
        }

        let method = req.method().clone();
        match (method, path.as_str()) {
            (Method::POST, "/v1/cognitive/query") => {
                query::handle_query(req, Arc::clone(&self.ctx)).await
            }
            (Method::GET, "/v1/cognitive/stream") => {
                Ok(stream::handle_cognitive_stream(req, Arc::clone(&self.ctx)))
            }
            (Method::GET, "/v1/stream/events") => {
                Ok(stream::handle_live_tail(Arc::clone(&self.ctx)))
            }
            (Method::GET, "/v1/health") => Ok(self.health()),
            _ => Ok(Self::not_found()),
        }
    }
}

pub async fn handle_request(
    req: Request<Incoming>,
    ctx: Arc<FrontendContext>,
) -> Result<Response<BoxedBody>, Infallible> {
    let handler = HttpHandler { ctx };
    handler.handle(req).await
}
