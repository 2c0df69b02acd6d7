use crate::bus::event::kinds;
use crate::shared::error::CogError;
use crate::stream::scope::StreamScope;
use crate::test_helpers::Factory;
use serde_json::json;

#[cfg(test)]
mod scope_tests {
    use super::*;

    #[test]
    fn test_parse_fixed_scopes() {
        assert_eq!(StreamScope::parse("global"), Ok(StreamScope::Global));
        assert_eq!(StreamScope::parse("cells"), Ok(StreamScope::Cells));
        assert_eq!(StreamScope::parse("events"), Ok(StreamScope::Events));
        assert_eq!(StreamScope::parse("metrics"), Ok(StreamScope::Metrics));
    }

    #[test]
    fn test_parse_workflow_scope() {
        assert_eq!(
            StreamScope::parse("workflow:deploy_service"),
            Ok(StreamScope::Workflow("deploy_service".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_empty_workflow_name() {
        assert_eq!(
            StreamScope::parse("workflow:"),
            Err(CogError::InvalidStreamScope("workflow:".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_scope() {
        let err = StreamScope::parse("galaxies").unwrap_err();
        assert_eq!(err.code(), "INVALID_SCOPE");
        assert_eq!(err.status(), 422);
    }

    #[test]
    fn test_global_and_events_match_everything() {
        let event = Factory::bus_event().with("kind", kinds::GPP_INGESTED).create();
        assert!(StreamScope::Global.matches(&event));
        assert!(StreamScope::Events.matches(&event));
    }

    #[test]
    fn test_cells_scope_matches_lifecycle_kinds_only() {
        let created = Factory::bus_event().with("kind", kinds::CELL_CREATED).create();
        let changed = Factory::bus_event().with("kind", kinds::STATE_CHANGED).create();
        let ingested = Factory::bus_event().with("kind", kinds::GPP_INGESTED).create();

        assert!(StreamScope::Cells.matches(&created));
        assert!(StreamScope::Cells.matches(&changed));
        assert!(!StreamScope::Cells.matches(&ingested));
    }

    #[test]
    fn test_metrics_scope_matches_runtime_snapshots_only() {
        let snapshot = Factory::bus_event()
            .with("kind", kinds::RUNTIME_SNAPSHOT)
            .create();
        let created = Factory::bus_event().with("kind", kinds::CELL_CREATED).create();

        assert!(StreamScope::Metrics.matches(&snapshot));
        assert!(!StreamScope::Metrics.matches(&created));
    }

    #[test]
    fn test_workflow_scope_matches_payload_workflow() {
        let scope = StreamScope::Workflow("deploy_service".to_string());

        let matching = Factory::bus_event()
            .with("detail", json!({ "workflow": "deploy_service" }))
            .create();
        let legacy_key = Factory::bus_event()
            .with("detail", json!({ "type": "deploy_service" }))
            .create();
        let other = Factory::bus_event()
            .with("detail", json!({ "workflow": "onboarding" }))
            .create();
        let missing = Factory::bus_event().with("detail", json!({})).create();

        assert!(scope.matches(&matching));
        assert!(scope.matches(&legacy_key));
        assert!(!scope.matches(&other));
        assert!(!scope.matches(&missing));
    }

    #[test]
    fn test_display_round_trips() {
        for raw in ["global", "cells", "events", "metrics", "workflow:x"] {
            let scope = StreamScope::parse(raw).unwrap();
            assert_eq!(scope.to_string(), raw);
        }
    }
}
