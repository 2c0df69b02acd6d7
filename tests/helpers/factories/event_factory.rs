use crate::engine::dataset::EventRecord;
use serde_json::{Value, json};
use std::collections::HashMap;

#[derive(Clone)]
pub struct EventFactory {
    params: HashMap<String, Value>,
}

impl EventFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("id".into(), json!("evt-1"));
        params.insert("kind".into(), json!("state_changed"));
        params.insert("cell_id".into(), json!("cell-1"));
        params.insert("timestamp_ms".into(), json!(1_700_000_000_000i64));
        params.insert(
            "detail".into(),
            json!({ "from_state": "CANDIDATE", "to_state": "ACTIVE" }),
        );
        Self { params }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn create(self) -> EventRecord {
        EventRecord {
            id: self.params["id"].as_str().unwrap().to_string(),
            kind: self.params["kind"].as_str().unwrap().to_string(),
            cell_id: self.params["cell_id"].as_str().map(str::to_string),
            timestamp_ms: self.params["timestamp_ms"].as_i64().unwrap(),
            detail: self.params["detail"].clone(),
        }
    }

    pub fn create_list(self, count: usize) -> Vec<EventRecord> {
        (0..count)
            .map(|i| {
                let mut event = self.clone().create();
                event.id = format!("evt-{}", i + 1);
                event.timestamp_ms += i as i64 * 1000;
                event
            })
            .collect()
    }
}
