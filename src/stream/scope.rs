use std::fmt;

use crate::bus::event::{BusEvent, kinds};
use crate::shared::error::CogError;

/// Event subset a streaming session observes. Non-matching events are dropped
/// without buffering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamScope {
    Global,
    Cells,
    Events,
    Metrics,
    Workflow(String),
}

impl StreamScope {
    pub fn parse(s: &str) -> Result<Self, CogError> {
        match s {
            "global" => Ok(StreamScope::Global),
            "cells" => Ok(StreamScope::Cells),
            "events" => Ok(StreamScope::Events),
            "metrics" => Ok(StreamScope::Metrics),
            _ => match s.strip_prefix("workflow:") {
                Some(name) if !name.is_empty() => Ok(StreamScope::Workflow(name.to_string())),
                _ => Err(CogError::InvalidStreamScope(s.to_string())),
            },
        }
    }

    pub fn matches(&self, event: &BusEvent) -> bool {
        match self {
            StreamScope::Global | StreamScope::Events => true,
            StreamScope::Cells => {
                event.kind == kinds::CELL_CREATED || event.kind == kinds::STATE_CHANGED
            }
            StreamScope::Metrics => event.kind == kinds::RUNTIME_SNAPSHOT,
            StreamScope::Workflow(name) => event.workflow() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for StreamScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamScope::Global => write!(f, "global"),
            StreamScope::Cells => write!(f, "cells"),
            StreamScope::Events => write!(f, "events"),
            StreamScope::Metrics => write!(f, "metrics"),
            StreamScope::Workflow(name) => write!(f, "workflow:{name}"),
        }
    }
}
