use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::bus::event::BusEvent;
use crate::cql::types::InterpretMode;
use crate::engine::aggregate::round2;
use crate::engine::result::Layer;
use crate::shared::error::CogError;
use crate::stream::message::{STREAM_SOURCE, StreamCrm, StreamMessage, StreamProvenance, WindowSource};
use crate::stream::scope::StreamScope;
use crate::stream::window::EventWindow;

/// Enumerated trailing windows a subscription may request.
pub const ALLOWED_WINDOWS: [u64; 4] = [30, 60, 120, 300];

/// Validated parameters of one streaming subscription. Construction fails
/// before any session or bus subscription exists.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    pub mode: InterpretMode,
    pub window_s: u64,
    pub scope: StreamScope,
    pub sample_ms: u64,
}

impl StreamConfig {
    pub fn validate(
        mode: &str,
        window_s: u64,
        scope: &str,
        sample_ms: u64,
    ) -> Result<Self, CogError> {
        let mode =
            InterpretMode::parse(mode).ok_or_else(|| CogError::InvalidMode(mode.to_string()))?;
        if !ALLOWED_WINDOWS.contains(&window_s) {
            return Err(CogError::InvalidWindow(window_s));
        }
        let scope = StreamScope::parse(scope)?;
        Ok(Self {
            mode,
            window_s,
            scope,
            sample_ms,
        })
    }
}

/// Aggregates recomputed over the live window on every tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowStats {
    pub event_count: usize,
    pub distribution: IndexMap<String, u64>,
    pub avg_friction: f64,
}

/// Synchronous heart of a streaming session: scope filtering, the decaying
/// window and message derivation. The async adapter drives it with event
/// arrivals and timer ticks; nothing here suspends.
pub struct SessionCore {
    config: StreamConfig,
    window: EventWindow,
}

impl SessionCore {
    pub fn new(config: StreamConfig) -> Self {
        let window = EventWindow::new(config.window_s);
        Self { config, window }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn window(&self) -> &EventWindow {
        &self.window
    }

    /// Handles one inbound bus event. Non-matching events are dropped without
    /// buffering. In DESCRIPTIVE mode every accepted event produces one
    /// passthrough message; in the other modes output happens on ticks only.
    pub fn accept(&mut self, event: BusEvent, now_ms: i64) -> Option<StreamMessage> {
        if !self.config.scope.matches(&event) {
            return None;
        }

        let message = (self.config.mode == InterpretMode::Descriptive)
            .then(|| self.passthrough_message(&event, now_ms));
        self.window.push(event, now_ms);
        message
    }

    /// Periodic tick, armed only for non-DESCRIPTIVE modes: prune, aggregate
    /// over the surviving window, render window-scoped prose. An empty window
    /// renders a low-activity narrative instead of erroring; live sessions
    /// must survive quiet periods.
    pub fn tick(&mut self, now_ms: i64) -> StreamMessage {
        self.window.prune(now_ms);
        let stats = self.aggregates();
        let text = self.render(&stats);
        debug!(
            target: "cognidb::stream",
            scope = %self.config.scope,
            events = stats.event_count,
            "Stream tick"
        );

        StreamMessage {
            t: now_ms,
            mode: self.config.mode,
            scope: self.config.scope.to_string(),
            crm: StreamCrm {
                layers_used: vec![Layer::Raw, Layer::Aggregate, mode_layer(self.config.mode)],
                provenance: StreamProvenance {
                    events: WindowSource {
                        source: STREAM_SOURCE,
                        count: self.window.len(),
                        window: format!("last_{}s", self.config.window_s),
                    },
                },
            },
            data: serde_json::to_value(&stats).unwrap_or(Value::Null),
            text,
        }
    }

    fn aggregates(&self) -> WindowStats {
        let mut distribution: IndexMap<String, u64> = IndexMap::new();
        let mut total_friction = 0.0;
        let mut friction_count = 0usize;

        for event in self.window.iter() {
            *distribution.entry(event.kind.clone()).or_insert(0) += 1;
            if let Some(friction) = event.friction() {
                total_friction += friction;
                friction_count += 1;
            }
        }

        WindowStats {
            event_count: self.window.len(),
            distribution,
            avg_friction: if friction_count > 0 {
                round2(total_friction / friction_count as f64)
            } else {
                0.0
            },
        }
    }

    fn render(&self, stats: &WindowStats) -> Option<String> {
        match self.config.mode {
            InterpretMode::Descriptive => None,
            InterpretMode::Interpretive => Some(format!(
                "Live interpretation: a {}s window observes {} events. Average friction {}. \
                 The pattern suggests steady operational activity.",
                self.config.window_s, stats.event_count, stats.avg_friction
            )),
            InterpretMode::Narrative => {
                if stats.event_count == 0 {
                    return Some("Window shows low density of observable events.".to_string());
                }
                let top_kind = stats
                    .distribution
                    .keys()
                    .next()
                    .map(String::as_str)
                    .unwrap_or("N/A");
                Some(format!(
                    "Streamed technical narrative: the flow captured over the last {}s reveals \
                     {} activity points, predominantly of kind {}. The process runs without \
                     critical anomalies.",
                    self.config.window_s, stats.event_count, top_kind
                ))
            }
        }
    }

    /// Per-event passthrough for DESCRIPTIVE sessions: raw layer only, window
    /// labelled "live".
    fn passthrough_message(&self, event: &BusEvent, now_ms: i64) -> StreamMessage {
        StreamMessage {
            t: now_ms,
            mode: InterpretMode::Descriptive,
            scope: self.config.scope.to_string(),
            crm: StreamCrm {
                layers_used: vec![Layer::Raw],
                provenance: StreamProvenance {
                    events: WindowSource {
                        source: STREAM_SOURCE,
                        count: 1,
                        window: "live".to_string(),
                    },
                },
            },
            data: json!({
                "kind": event.kind,
                "cell_id": event.cell_id,
                "workflow": event.workflow(),
                "state": event.state(),
                "friction": event.friction(),
                "timestamp": event.timestamp_ms,
            }),
            text: None,
        }
    }
}

fn mode_layer(mode: InterpretMode) -> Layer {
    match mode {
        InterpretMode::Descriptive => Layer::Descriptive,
        InterpretMode::Interpretive => Layer::Interpretive,
        InterpretMode::Narrative => Layer::Narrative,
    }
}
