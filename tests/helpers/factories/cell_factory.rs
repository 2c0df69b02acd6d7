use crate::engine::dataset::CellRecord;
use serde_json::{Value, json};
use std::collections::HashMap;

#[derive(Clone)]
pub struct CellFactory {
    params: HashMap<String, Value>,
}

impl CellFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("id".into(), json!("cell-1"));
        params.insert("workflow".into(), json!("deploy_service"));
        params.insert("state".into(), json!("CANDIDATE"));
        params.insert("friction".into(), json!(0.0));
        params.insert("version".into(), json!(1));
        params.insert("created_at_ms".into(), json!(1_700_000_000_000i64));
        params.insert("updated_at_ms".into(), json!(1_700_000_000_000i64));
        Self { params }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn create(self) -> CellRecord {
        CellRecord {
            id: self.params["id"].as_str().unwrap().to_string(),
            workflow: self.params["workflow"].as_str().unwrap().to_string(),
            state: self.params["state"].as_str().unwrap().to_string(),
            friction: self.params["friction"].as_f64().unwrap(),
            version: self.params["version"].as_u64().unwrap(),
            created_at_ms: self.params["created_at_ms"].as_i64().unwrap(),
            updated_at_ms: self.params["updated_at_ms"].as_i64().unwrap(),
        }
    }

    pub fn create_list(self, count: usize) -> Vec<CellRecord> {
        (0..count)
            .map(|i| {
                let mut cell = self.clone().create();
                cell.id = format!("cell-{}", i + 1);
                cell
            })
            .collect()
    }
}
