use crate::bus::event::BusEvent;
use serde_json::{Value, json};
use std::collections::HashMap;

#[derive(Clone)]
pub struct BusEventFactory {
    params: HashMap<String, Value>,
}

impl BusEventFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("kind".into(), json!("cell_created"));
        params.insert("timestamp_ms".into(), json!(1_700_000_000_000i64));
        params.insert("cell_id".into(), json!("cell-1"));
        params.insert(
            "detail".into(),
            json!({ "workflow": "deploy_service", "state": "CANDIDATE" }),
        );
        Self { params }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn create(self) -> BusEvent {
        BusEvent {
            kind: self.params["kind"].as_str().unwrap().to_string(),
            timestamp_ms: self.params["timestamp_ms"].as_i64().unwrap(),
            cell_id: self.params["cell_id"].as_str().map(str::to_string),
            detail: self.params["detail"].clone(),
        }
    }
}
