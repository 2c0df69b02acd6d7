use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::bus::event::BusEvent;
use crate::bus::hub::{Delivery, EventBus};
use crate::cql::types::InterpretMode;
use crate::shared::time::now_ms;
use crate::stream::message::StreamMessage;
use crate::stream::session::{SessionCore, StreamConfig};

/// Inbound event buffer per session; a full buffer signals `Failed` back to
/// the bus, which drops the subscriber instead of blocking producers.
const SESSION_BUFFER: usize = 256;

/// Live handle of a started streaming session. Lifecycle is STARTING (inside
/// `start`) -> ACTIVE -> STOPPED; `stop` synchronously unsubscribes from the
/// bus and cancels the timer task, so no message is delivered afterwards.
pub struct StreamSession {
    subscription: crate::bus::hub::Subscription,
    task: JoinHandle<()>,
}

impl StreamSession {
    /// Idempotent teardown; also runs on drop.
    pub fn stop(&self) {
        self.subscription.unsubscribe();
        self.task.abort();
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Subscribes a session to the bus and spawns its driver task. Outbound
/// messages land on `out`. Returns `None` when the bus is at capacity; no
/// session exists in that case.
pub fn start(
    bus: &Arc<EventBus>,
    config: StreamConfig,
    out: mpsc::Sender<StreamMessage>,
) -> Option<StreamSession> {
    let (event_tx, mut event_rx) = mpsc::channel::<BusEvent>(SESSION_BUFFER);

    let subscription = bus.subscribe(move |event: &BusEvent| {
        match event_tx.try_send(event.clone()) {
            Ok(()) => Delivery::Delivered,
            Err(_) => Delivery::Failed,
        }
    })?;

    info!(
        target: "cognidb::stream",
        mode = config.mode.as_str(),
        scope = %config.scope,
        window_s = config.window_s,
        "Stream session started"
    );

    let aggregated = config.mode != InterpretMode::Descriptive;
    let sample_ms = config.sample_ms;
    let task = tokio::spawn(async move {
        let mut core = SessionCore::new(config);
        // First tick fires one full sample interval after start, not
        // immediately.
        let mut ticker = aggregated.then(|| {
            tokio::time::interval_at(
                tokio::time::Instant::now() + Duration::from_millis(sample_ms),
                Duration::from_millis(sample_ms),
            )
        });

        loop {
            tokio::select! {
                maybe_event = event_rx.recv() => match maybe_event {
                    Some(event) => {
                        if let Some(message) = core.accept(event, now_ms()) {
                            if out.send(message).await.is_err() {
                                break;
                            }
                        }
                    }
                    None => break,
                },
                _ = tick(&mut ticker), if aggregated => {
                    let message = core.tick(now_ms());
                    if out.send(message).await.is_err() {
                        break;
                    }
                }
            }
        }
        debug!(target: "cognidb::stream", "Stream session driver finished");
    });

    Some(StreamSession { subscription, task })
}

async fn tick(ticker: &mut Option<tokio::time::Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        // Branch is guarded off for descriptive sessions.
        None => std::future::pending::<()>().await,
    }
}
