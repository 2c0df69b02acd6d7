use std::collections::VecDeque;

use crate::bus::event::BusEvent;

/// Time-decaying event buffer. Entries carry their local receipt timestamp;
/// pruning runs on every push and every tick so nothing older than the
/// window ever survives a prune point.
#[derive(Debug)]
pub struct EventWindow {
    window_ms: i64,
    entries: VecDeque<(i64, BusEvent)>,
}

impl EventWindow {
    pub fn new(window_s: u64) -> Self {
        Self {
            window_ms: window_s as i64 * 1000,
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: BusEvent, now_ms: i64) {
        self.entries.push_back((now_ms, event));
        self.prune(now_ms);
    }

    pub fn prune(&mut self, now_ms: i64) {
        let cutoff = now_ms - self.window_ms;
        while let Some((received, _)) = self.entries.front() {
            if *received < cutoff {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BusEvent> {
        self.entries.iter().map(|(_, e)| e)
    }

    /// Oldest receipt timestamp still buffered, for assertions and debugging.
    pub fn oldest_ts(&self) -> Option<i64> {
        self.entries.front().map(|(ts, _)| *ts)
    }
}
