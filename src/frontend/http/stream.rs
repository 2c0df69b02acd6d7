use bytes::Bytes;
use futures_util::StreamExt;
use http_body_util::{BodyExt, StreamBody};
use hyper::body::Frame;
use hyper::{Request, Response, StatusCode, body::Incoming};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::bus::hub::Delivery;
use crate::frontend::context::FrontendContext;
use crate::shared::config::CONFIG;
use crate::shared::error::CogError;
use crate::shared::response::stream_error;
use crate::stream::adapter;
use crate::stream::session::StreamConfig;

use super::{BoxedBody, json_response};

/// Outbound SSE chunk buffer per client. A slow live-tail client that fills
/// it is dropped from the bus rather than stalling producers.
const SSE_BUFFER: usize = 64;

/// GET /v1/cognitive/stream: validated session over the decaying window.
pub fn handle_cognitive_stream(
    req: Request<Incoming>,
    ctx: Arc<FrontendContext>,
) -> Response<BoxedBody> {
    let params = parse_query_params(req.uri().query());
    let mode = params.get("mode").map(String::as_str).unwrap_or("");
    let window_s = params
        .get("window_s")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let scope = params.get("scope").map(String::as_str).unwrap_or("global");
    let sample_ms = params
        .get("sample_ms")
        .and_then(|v| v.parse().ok())
        .unwrap_or(CONFIG.cognitive.default_sample_ms);

    let config = match StreamConfig::validate(mode, window_s, scope, sample_ms) {
        Ok(config) => config,
        Err(err) => return rejection(&err),
    };

    let (msg_tx, mut msg_rx) = mpsc::channel(SSE_BUFFER);
    let Some(session) = adapter::start(&ctx.bus, config, msg_tx) else {
        return at_capacity();
    };

    let (byte_tx, byte_rx) = mpsc::channel::<Bytes>(SSE_BUFFER);
    let _ = byte_tx.try_send(Bytes::from_static(b": connected\n\n"));

    tokio::spawn(async move {
        // A disconnect only surfaces as a failed send, so a dead client can
        // hold its bus slot for at most one heartbeat interval.
        let mut heartbeat =
            tokio::time::interval(Duration::from_secs(CONFIG.cognitive.heartbeat_s));
        heartbeat.tick().await;

        loop {
            tokio::select! {
                maybe_message = msg_rx.recv() => match maybe_message {
                    Some(message) => {
                        let payload = serde_json::to_value(&message).unwrap_or(Value::Null);
                        if byte_tx.send(sse_frame("COGNITIVE_UPDATE", &payload)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                },
                _ = heartbeat.tick() => {
                    if byte_tx.send(Bytes::from_static(b": heartbeat\n\n")).await.is_err() {
                        break;
                    }
                }
            }
        }
        // Client gone or session torn down; release the bus slot.
        session.stop();
        info!(target: "cognidb::stream", "Stream session closed");
    });

    sse_response(byte_rx)
}

/// GET /v1/stream/events: unfiltered live tail of the bus, one SSE frame per
/// event, named after the event kind.
pub fn handle_live_tail(ctx: Arc<FrontendContext>) -> Response<BoxedBody> {
    let (byte_tx, byte_rx) = mpsc::channel::<Bytes>(SSE_BUFFER);
    let _ = byte_tx.try_send(Bytes::from_static(b": connected\n\n"));

    let event_tx = byte_tx.clone();
    let Some(subscription) = ctx.bus.subscribe(move |event| {
        let payload = json!({
            "kind": event.kind,
            "cell_id": event.cell_id,
            "timestamp_ms": event.timestamp_ms,
            "detail": event.detail,
        });
        match event_tx.try_send(sse_frame(&event.kind.to_ascii_uppercase(), &payload)) {
            Ok(()) => Delivery::Delivered,
            Err(_) => Delivery::Failed,
        }
    }) else {
        // Headers are committed for SSE clients, so capacity is reported as
        // a final in-stream frame; dropping the sender ends the body.
        let frame = sse_frame(
            "ERROR",
            &json!({
                "code": "SERVER_AT_CAPACITY",
                "message": "max concurrent stream subscribers reached",
            }),
        );
        let _ = byte_tx.try_send(frame);
        drop(byte_tx);
        return sse_response(byte_rx);
    };

    info!(
        target: "cognidb::http",
        clients = ctx.bus.subscriber_count(),
        "Live tail client connected"
    );

    tokio::spawn(async move {
        // Same bound as the session stream: disconnect is noticed at the
        // next event or heartbeat send.
        let mut heartbeat =
            tokio::time::interval(Duration::from_secs(CONFIG.cognitive.heartbeat_s));
        heartbeat.tick().await;
        loop {
            heartbeat.tick().await;
            if byte_tx.send(Bytes::from_static(b": heartbeat\n\n")).await.is_err() {
                break;
            }
        }
        subscription.unsubscribe();
        info!(target: "cognidb::http", "Live tail client disconnected");
    });

    sse_response(byte_rx)
}

fn rejection(err: &CogError) -> Response<BoxedBody> {
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::UNPROCESSABLE_ENTITY);
    json_response(status, &stream_error(err))
}

fn at_capacity() -> Response<BoxedBody> {
    json_response(
        StatusCode::SERVICE_UNAVAILABLE,
        &json!({
            "error": {
                "code": "SERVER_AT_CAPACITY",
                "message": "max concurrent stream subscribers reached",
            }
        }),
    )
}

fn sse_frame(event: &str, payload: &Value) -> Bytes {
    Bytes::from(format!("event: {event}\ndata: {payload}\n\n"))
}

fn sse_response(mut rx: mpsc::Receiver<Bytes>) -> Response<BoxedBody> {
    let stream = futures_util::stream::poll_fn(move |cx| rx.poll_recv(cx))
        .map(|chunk| Ok::<_, Infallible>(Frame::data(chunk)));
    let body = BodyExt::boxed(StreamBody::new(stream));

    Response::builder()
        .status(StatusCode::OK)
        .header(hyper::header::CONTENT_TYPE, "text/event-stream")
        .header(hyper::header::CACHE_CONTROL, "no-cache")
        .header("X-Accel-Buffering", "no")
        .body(body)
        .unwrap()
}

/// Minimal query-string parser: splits on `&`/`=`, percent-decodes values,
/// treats `+` as space. Later duplicates win.
fn parse_query_params(query: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let Some(query) = query else {
        return params;
    };
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(percent_decode(key), percent_decode(value));
    }
    params
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match (hex_val(bytes.get(i + 1)), hex_val(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push(hi * 16 + lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(byte: Option<&u8>) -> Option<u8> {
    byte.and_then(|b| (*b as char).to_digit(16)).map(|d| d as u8)
}
