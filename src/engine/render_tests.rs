use crate::cql::types::InterpretMode;
use crate::engine::render::render_text;
use indexmap::IndexMap;
use serde_json::{Value, json};

#[cfg(test)]
mod render_tests {
    use super::*;

    fn aggs(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_descriptive_mentions_record_count() {
        let text = render_text(InterpretMode::Descriptive, 3, None);
        assert_eq!(text, "Observatory: 3 records identified.");
    }

    #[test]
    fn test_descriptive_cites_aggregates() {
        let aggs = aggs(&[
            ("count", json!(3)),
            ("avg_friction", json!(0.42)),
            ("distribution_state", json!({ "ACTIVE": 2, "DONE": 1 })),
        ]);
        let text = render_text(InterpretMode::Descriptive, 3, Some(&aggs));

        assert!(text.contains("Total volume: 3."));
        assert!(text.contains("Average friction: 0.42."));
        assert!(text.contains("Distribution by state: [ ACTIVE: 2, DONE: 1 ]."));
    }

    #[test]
    fn test_interpretive_cites_average_friction() {
        let aggs = aggs(&[("avg_friction", json!(0.3))]);
        let text = render_text(InterpretMode::Interpretive, 5, Some(&aggs));

        assert!(text.contains("average friction of 0.3"));
        assert!(text.contains("5 units"));
    }

    #[test]
    fn test_interpretive_without_average_is_na() {
        let text = render_text(InterpretMode::Interpretive, 2, None);
        assert!(text.contains("average friction of N/A"));
    }

    #[test]
    fn test_narrative_mentions_observation_points() {
        let text = render_text(InterpretMode::Narrative, 7, None);
        assert!(text.contains("7 observation points"));
        assert!(text.starts_with("Technical narrative"));
    }
}
