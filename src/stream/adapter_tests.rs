use crate::bus::event::kinds;
use crate::bus::hub::EventBus;
use crate::cql::types::InterpretMode;
use crate::engine::result::Layer;
use crate::stream::adapter;
use crate::stream::scope::StreamScope;
use crate::stream::session::StreamConfig;
use crate::test_helpers::Factory;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

fn config(mode: InterpretMode, scope: StreamScope, sample_ms: u64) -> StreamConfig {
    StreamConfig {
        mode,
        window_s: 30,
        scope,
        sample_ms,
    }
}

#[cfg(test)]
mod adapter_tests {
    use super::*;

    #[tokio::test]
    async fn test_descriptive_session_forwards_matching_events() {
        crate::logging::init_for_tests();
        let bus = Arc::new(EventBus::new(10));
        let (tx, mut rx) = mpsc::channel(8);

        let session = adapter::start(
            &bus,
            config(InterpretMode::Descriptive, StreamScope::Global, 5_000),
            tx,
        )
        .expect("Session should start");

        bus.emit(&Factory::bus_event().with("kind", kinds::CELL_CREATED).create());

        let message = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("Timed out waiting for stream message")
            .expect("Channel closed unexpectedly");

        assert_eq!(message.mode, InterpretMode::Descriptive);
        assert_eq!(message.crm.layers_used, vec![Layer::Raw]);
        assert_eq!(message.data["kind"], "cell_created");

        session.stop();
    }

    #[tokio::test]
    async fn test_non_matching_events_are_dropped() {
        let bus = Arc::new(EventBus::new(10));
        let (tx, mut rx) = mpsc::channel(8);

        let session = adapter::start(
            &bus,
            config(InterpretMode::Descriptive, StreamScope::Metrics, 5_000),
            tx,
        )
        .unwrap();

        bus.emit(&Factory::bus_event().with("kind", kinds::CELL_CREATED).create());

        assert!(
            timeout(Duration::from_millis(200), rx.recv()).await.is_err(),
            "Out-of-scope event must not produce a message"
        );

        session.stop();
    }

    #[tokio::test]
    async fn test_aggregated_session_emits_on_ticks() {
        crate::logging::init_for_tests();
        let bus = Arc::new(EventBus::new(10));
        let (tx, mut rx) = mpsc::channel(8);

        let session = adapter::start(
            &bus,
            config(InterpretMode::Interpretive, StreamScope::Global, 50),
            tx,
        )
        .unwrap();

        bus.emit(
            &Factory::bus_event()
                .with("detail", serde_json::json!({ "friction": 0.5 }))
                .create(),
        );

        let message = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("Timed out waiting for tick message")
            .expect("Channel closed unexpectedly");

        assert_eq!(message.mode, InterpretMode::Interpretive);
        assert_eq!(
            message.crm.layers_used,
            vec![Layer::Raw, Layer::Aggregate, Layer::Interpretive]
        );
        assert_eq!(message.data["event_count"], serde_json::json!(1));

        session.stop();
    }

    #[tokio::test]
    async fn test_start_rejected_when_bus_is_full() {
        let bus = Arc::new(EventBus::new(0));
        let (tx, _rx) = mpsc::channel(8);

        assert!(
            adapter::start(
                &bus,
                config(InterpretMode::Descriptive, StreamScope::Global, 5_000),
                tx,
            )
            .is_none()
        );
    }

    #[tokio::test]
    async fn test_stop_releases_the_bus_slot() {
        let bus = Arc::new(EventBus::new(10));
        let (tx, _rx) = mpsc::channel(8);

        let session = adapter::start(
            &bus,
            config(InterpretMode::Descriptive, StreamScope::Global, 5_000),
            tx,
        )
        .unwrap();
        assert_eq!(bus.subscriber_count(), 1);

        session.stop();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_dropping_session_releases_the_bus_slot() {
        let bus = Arc::new(EventBus::new(10));
        let (tx, _rx) = mpsc::channel(8);

        {
            let _session = adapter::start(
                &bus,
                config(InterpretMode::Descriptive, StreamScope::Global, 5_000),
                tx,
            )
            .unwrap();
            assert_eq!(bus.subscriber_count(), 1);
        }

        assert_eq!(bus.subscriber_count(), 0);
    }
}
