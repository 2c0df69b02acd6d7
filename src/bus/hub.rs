use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::Weak;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::bus::event::BusEvent;

/// Backpressure signal returned by a subscriber callback. A `Failed` return
/// marks the subscriber dead; it is removed after the current emit pass and
/// never invoked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Failed,
}

type Callback = Arc<dyn Fn(&BusEvent) -> Delivery + Send + Sync>;

struct Entry {
    id: u64,
    callback: Callback,
}

/// In-process publish/subscribe hub with bounded fan-out.
///
/// Constructed once at startup and handed to every component that publishes
/// or subscribes; tests build a fresh bus each. Delivery is synchronous and
/// best-effort: no queuing, no retry, no per-event blocking beyond the
/// callback invocation itself.
pub struct EventBus {
    subscribers: Mutex<Vec<Entry>>,
    next_id: AtomicU64,
    max_subscribers: usize,
}

impl EventBus {
    pub fn new(max_subscribers: usize) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            max_subscribers,
        }
    }

    /// Registers a subscriber. Returns `None` once the subscriber ceiling is
    /// reached; no callback is registered in that case.
    pub fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn(&BusEvent) -> Delivery + Send + Sync + 'static,
    ) -> Option<Subscription> {
        let mut subscribers = self.subscribers.lock();
        if subscribers.len() >= self.max_subscribers {
            warn!(
                target: "cognidb::bus",
                max = self.max_subscribers,
                "Max subscribers reached, rejecting new subscription"
            );
            return None;
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        subscribers.push(Entry {
            id,
            callback: Arc::new(callback),
        });
        Some(Subscription {
            bus: Arc::downgrade(self),
            id,
            done: AtomicBool::new(false),
        })
    }

    /// Broadcasts an event synchronously to every live subscriber. Dead
    /// subscribers (a `Failed` return) are pruned in a single pass after the
    /// broadcast completes.
    pub fn emit(&self, event: &BusEvent) {
        let callbacks: Vec<(u64, Callback)> = {
            let subscribers = self.subscribers.lock();
            subscribers
                .iter()
                .map(|e| (e.id, Arc::clone(&e.callback)))
                .collect()
        };

        let mut dead = Vec::new();
        for (id, callback) in &callbacks {
            if callback(event) == Delivery::Failed {
                dead.push(*id);
            }
        }

        if !dead.is_empty() {
            let mut subscribers = self.subscribers.lock();
            subscribers.retain(|e| !dead.contains(&e.id));
            debug!(
                target: "cognidb::bus",
                removed = dead.len(),
                remaining = subscribers.len(),
                "Removed dead subscribers"
            );
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    fn remove(&self, id: u64) {
        self.subscribers.lock().retain(|e| e.id != id);
    }
}

/// Unsubscribe handle owned by the caller; the bus keeps no reference back.
/// Dropping the handle unsubscribes.
pub struct Subscription {
    bus: Weak<EventBus>,
    id: u64,
    done: AtomicBool,
}

impl Subscription {
    /// Idempotent; safe to call again after the bus pruned the subscriber.
    pub fn unsubscribe(&self) {
        if !self.done.swap(true, Ordering::AcqRel) {
            if let Some(bus) = self.bus.upgrade() {
                bus.remove(self.id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
