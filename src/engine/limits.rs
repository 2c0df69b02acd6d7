use serde::Deserialize;

/// Caller-supplied execution ceilings. The engine rejects a run before
/// touching data if the snapshot exceeds `max_cells`/`max_events`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExecutionLimits {
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,
    #[serde(default = "default_max_events")]
    pub max_events: usize,
    #[serde(default = "default_time_range_days")]
    pub time_range_days: u32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            max_cells: default_max_cells(),
            max_events: default_max_events(),
            time_range_days: default_time_range_days(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Per-field override shape accepted from callers; unset fields fall back to
/// the server defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitsOverride {
    pub max_cells: Option<usize>,
    pub max_events: Option<usize>,
    pub time_range_days: Option<u32>,
    pub max_tokens: Option<usize>,
}

impl ExecutionLimits {
    pub fn resolve(overrides: Option<LimitsOverride>, defaults: &ExecutionLimits) -> Self {
        let o = overrides.unwrap_or_default();
        Self {
            max_cells: o.max_cells.unwrap_or(defaults.max_cells),
            max_events: o.max_events.unwrap_or(defaults.max_events),
            time_range_days: o.time_range_days.unwrap_or(defaults.time_range_days),
            max_tokens: o.max_tokens.unwrap_or(defaults.max_tokens),
        }
    }
}

fn default_max_cells() -> usize {
    1000
}

fn default_max_events() -> usize {
    5000
}

fn default_time_range_days() -> u32 {
    30
}

fn default_max_tokens() -> usize {
    1000
}
