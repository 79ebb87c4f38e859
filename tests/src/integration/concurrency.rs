//! # Contention Tests
//!
//! | Property | Test |
//! |----------|------|
//! | Concurrent creates get distinct ids | `test_concurrent_creates_are_unique` |
//! | One winner among concurrent launches | `test_exactly_one_launch_wins` |
//! | A patch never lands on a launched rocket | `test_patch_racing_launch_never_unfreezes` |
//! | An invalid patch never lands, launched or not | `test_invalid_patch_racing_launch_never_lands` |
//! | Launch records match launched rockets | `test_many_rockets_launched_concurrently` |

#[cfg(test)]
mod tests {
    use super::super::{container, rocket};
    use rf_02_rocket_lifecycle::{AddRocketCommand, RocketsApi};
    use rf_03_launch_control::LaunchApi;
    use shared_types::{ServiceError, Status, TargetCoordinates, Warhead};
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_creates_are_unique() {
        let container = Arc::new(container());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let container = container.clone();
                tokio::spawn(async move {
                    (0..100)
                        .map(|_| {
                            container
                                .rockets
                                .create(AddRocketCommand {
                                    warhead: Warhead::Conventional,
                                    target: TargetCoordinates::new(1.0, 1.0),
                                })
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            for id in task.await.unwrap() {
                assert!(ids.insert(id));
            }
        }

        assert_eq!(ids.len(), 800);
        assert_eq!(container.rockets.list().len(), 800);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_exactly_one_launch_wins() {
        for _ in 0..20 {
            let container = Arc::new(container());
            let id = rocket(&container, Status::Ready).id;

            let tasks: Vec<_> = (0..8)
                .map(|_| {
                    let container = container.clone();
                    tokio::spawn(async move { container.launches.launch(id) })
                })
                .collect();

            let mut winners = 0;
            for task in tasks {
                match task.await.unwrap() {
                    Ok(launch) => {
                        winners += 1;
                        assert_eq!(launch.rocket.id, id);
                    }
                    Err(err) => assert_eq!(err, ServiceError::AlreadyLaunched(id)),
                }
            }

            assert_eq!(winners, 1);
            assert_eq!(container.launches.list().len(), 1);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_patch_racing_launch_never_unfreezes() {
        for _ in 0..50 {
            let container = Arc::new(container());
            let id = rocket(&container, Status::Ready).id;

            let patcher = {
                let container = container.clone();
                tokio::spawn(async move {
                    // Stays READY so the launch can still win at any point.
                    container.rockets.patch_warhead(id, Warhead::Nuclear)
                })
            };
            let launcher = {
                let container = container.clone();
                tokio::spawn(async move { container.launches.launch(id) })
            };

            let patched = patcher.await.unwrap();
            let launch = launcher.await.unwrap().unwrap();
            let stored = container.rockets.get(id).unwrap();

            assert_eq!(stored.status, Status::Launched);
            // The record holds exactly what the store holds.
            assert_eq!(launch.rocket, stored);
            match patched {
                // Patch committed first: the launch snapshot includes it.
                Ok(_) => assert_eq!(stored.warhead, Warhead::Nuclear),
                // Launch committed first: the patch was refused.
                Err(err) => {
                    assert_eq!(err, ServiceError::AlreadyLaunched(id));
                    assert_eq!(stored.warhead, Warhead::Conventional);
                }
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_invalid_patch_racing_launch_never_lands() {
        for _ in 0..50 {
            let container = Arc::new(container());
            let ready = rocket(&container, Status::Ready);
            let id = ready.id;

            let patcher = {
                let container = container.clone();
                tokio::spawn(async move {
                    container
                        .rockets
                        .patch_target(id, TargetCoordinates::new(100.0, 0.0))
                })
            };
            let launcher = {
                let container = container.clone();
                tokio::spawn(async move { container.launches.launch(id) })
            };

            let patched = patcher.await.unwrap();
            launcher.await.unwrap().unwrap();

            match patched {
                Err(ServiceError::AlreadyLaunched(rejected)) => assert_eq!(rejected, id),
                Err(ServiceError::Validation(_)) => {}
                other => panic!("unexpected patch outcome: {other:?}"),
            }
            assert_eq!(container.rockets.get(id).unwrap().target, ready.target);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_many_rockets_launched_concurrently() {
        let container = Arc::new(container());
        let ids: Vec<_> = (0..64)
            .map(|_| rocket(&container, Status::Ready).id)
            .collect();

        let tasks: Vec<_> = ids
            .iter()
            .copied()
            .map(|id| {
                let container = container.clone();
                tokio::spawn(async move { container.launches.launch(id) })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let launched: HashSet<_> = container
            .launches
            .list()
            .into_iter()
            .map(|launch| launch.rocket.id)
            .collect();
        assert_eq!(launched, ids.into_iter().collect());
        assert!(container
            .rockets
            .list()
            .iter()
            .all(|rocket| rocket.status == Status::Launched));
    }
}
