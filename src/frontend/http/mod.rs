pub mod handler;
pub mod listener;
pub mod query;
pub mod stream;

use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::{Response, StatusCode};
use serde_json::Value;
use std::convert::Infallible;

/// Response body shared by plain JSON endpoints and the SSE streams.
pub type BoxedBody = BoxBody<Bytes, Infallible>;

pub fn full_body(body: impl Into<Bytes>) -> BoxedBody {
    Full::new(body.into()).boxed()
}

pub fn json_response(status: StatusCode, value: &Value) -> Response<BoxedBody> {
    Response::builder()
        .status(status)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(full_body(value.to_string()))
        .unwrap()
}
