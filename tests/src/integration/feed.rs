//! # Change Feed Flows
//!
//! Subscribers see the snapshot taken at attach time, then every commit in
//! commit order: no duplicates, no gaps.

#[cfg(test)]
mod tests {
    use super::super::{container, rocket};
    use rf_02_rocket_lifecycle::{AddRocketCommand, RocketsApi};
    use rf_03_launch_control::LaunchApi;
    use service_runtime::{ServiceConfig, ServiceContainer};
    use shared_bus::{ChangeKind, EventFilter, StoreEvent};
    use shared_types::{Status, TargetCoordinates, Warhead};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    fn add_command(i: u32) -> AddRocketCommand {
        AddRocketCommand {
            warhead: Warhead::Nuclear,
            target: TargetCoordinates::new(f64::from(i % 90), 0.0),
        }
    }

    #[tokio::test]
    async fn test_subscriber_sees_each_commit_in_order() {
        let container = container();
        let mut stream = container.rockets.stream_changes();

        // Nothing before the first commit.
        assert!(timeout(Duration::from_millis(20), stream.next()).await.is_err());

        let created = container.rockets.create(add_command(1)).unwrap();
        let ready = container
            .rockets
            .patch_status(created.id, Status::Ready)
            .unwrap();
        let removed = container.rockets.remove(created.id).unwrap();

        let mut events = Vec::new();
        for _ in 0..3 {
            events.push(
                timeout(Duration::from_millis(100), stream.next())
                    .await
                    .expect("timeout")
                    .unwrap(),
            );
        }

        assert_eq!(
            events,
            vec![
                StoreEvent::Added(created),
                StoreEvent::Updated(ready),
                StoreEvent::Removed(removed),
            ]
        );
        assert!(timeout(Duration::from_millis(20), stream.next()).await.is_err());
    }

    #[tokio::test]
    async fn test_rejected_writes_publish_nothing() {
        let container = container();
        let launched = rocket(&container, Status::Launched);
        let mut stream = container.rockets.stream_changes();

        assert_eq!(
            timeout(Duration::from_millis(100), stream.next()).await.unwrap(),
            Some(StoreEvent::Existing(launched.clone()))
        );

        assert!(container.rockets.patch_status(launched.id, Status::Ready).is_err());
        assert!(container.launches.launch(launched.id).is_err());

        assert!(timeout(Duration::from_millis(20), stream.next()).await.is_err());
    }

    #[tokio::test]
    async fn test_launch_updates_rocket_feed_and_adds_record() {
        let container = container();
        let ready = rocket(&container, Status::Ready);

        let mut rockets = container
            .rocket_store
            .stream(EventFilter::commits_only());
        let mut launches = container.launches.stream_changes();

        let launch = container.launches.launch(ready.id).unwrap();

        assert_eq!(
            timeout(Duration::from_millis(100), rockets.next()).await.unwrap(),
            Some(StoreEvent::Updated(launch.rocket.clone()))
        );
        assert_eq!(
            timeout(Duration::from_millis(100), launches.next()).await.unwrap(),
            Some(StoreEvent::Added(launch))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_attach_during_writes_has_no_gaps_or_duplicates() {
        let container = Arc::new(container());
        for i in 0..50 {
            container.rockets.create(add_command(i)).unwrap();
        }

        let writers: Vec<_> = (0..4)
            .map(|w| {
                let container = container.clone();
                tokio::spawn(async move {
                    for i in 0..50 {
                        container.rockets.create(add_command(w * 100 + i)).unwrap();
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        tokio::task::yield_now().await;
        let mut stream = container.rockets.stream_changes();

        for writer in writers {
            writer.await.unwrap();
        }

        let expected: HashSet<_> = container.rockets.list().iter().map(|r| r.id).collect();
        let mut seen = HashSet::new();
        while seen.len() < expected.len() {
            let event = timeout(Duration::from_millis(500), stream.next())
                .await
                .expect("feed stalled before every rocket was seen")
                .expect("feed ended");
            assert!(matches!(event.kind(), ChangeKind::Existing | ChangeKind::Added));
            let id = event.value().unwrap().id;
            assert!(seen.insert(id), "rocket {id} delivered twice");
        }

        assert_eq!(seen, expected);
        assert!(timeout(Duration::from_millis(20), stream.next()).await.is_err());
    }

    #[tokio::test]
    async fn test_clear_all_is_one_event_per_store() {
        let container = container();
        rocket(&container, Status::Launched);

        let mut rockets = container.rocket_store.stream(EventFilter::commits_only());
        let mut launches = container.launch_store.stream(EventFilter::commits_only());

        container.clear_all();

        assert_eq!(
            timeout(Duration::from_millis(100), rockets.next()).await.unwrap(),
            Some(StoreEvent::Cleared)
        );
        assert_eq!(
            timeout(Duration::from_millis(100), launches.next()).await.unwrap(),
            Some(StoreEvent::Cleared)
        );
    }

    #[tokio::test]
    async fn test_lagging_subscriber_is_disconnected() {
        let mut config = ServiceConfig::default();
        config.store.feed_capacity = 2;
        let container = ServiceContainer::new(config);

        let mut stream = container.rockets.stream_changes();
        for i in 0..5 {
            container.rockets.create(add_command(i)).unwrap();
        }

        // The stream ends instead of skipping ahead.
        let next = timeout(Duration::from_millis(100), stream.next()).await.unwrap();
        assert_eq!(next, None);

        // A fresh subscriber starts from the full snapshot.
        let mut fresh = container.rockets.stream_changes();
        let mut existing = 0;
        while let Ok(Some(event)) = timeout(Duration::from_millis(20), fresh.next()).await {
            assert_eq!(event.kind(), ChangeKind::Existing);
            existing += 1;
        }
        assert_eq!(existing, 5);
    }
}
