//! # Rocket Lifecycle Flows
//!
//! End-to-end runs through the wired container:
//!
//! 1. create → `NOT_READY`
//! 2. patch status → `READY`, other fields untouched
//! 3. launch → `LAUNCHED` plus one launch record holding the launched snapshot
//! 4. relaunch → `AlreadyLaunched`
//! 5. remove → the `LAUNCHED` snapshot

#[cfg(test)]
mod tests {
    use super::super::{container, rocket};
    use rf_02_rocket_lifecycle::{
        AddRocketCommand, MergeRocketCommand, RocketsApi, UpdateRocketCommand,
    };
    use rf_03_launch_control::LaunchApi;
    use shared_types::{RocketId, ServiceError, Status, TargetCoordinates, Warhead};
    use uuid::Uuid;

    #[test]
    fn test_create_ready_launch_remove() {
        let container = container();

        let created = container
            .rockets
            .create(AddRocketCommand {
                warhead: Warhead::Conventional,
                target: TargetCoordinates::new(0.1, 0.1),
            })
            .unwrap();
        assert_eq!(created.status, Status::NotReady);

        let ready = container
            .rockets
            .patch_status(created.id, Status::Ready)
            .unwrap();
        assert_eq!(ready.status, Status::Ready);
        assert_eq!(ready.warhead, created.warhead);
        assert_eq!(ready.target, created.target);

        let launch = container.launches.launch(created.id).unwrap();
        let stored = container.rockets.get(created.id).unwrap();
        assert_eq!(stored.status, Status::Launched);
        assert_eq!(launch.rocket.status, Status::Launched);
        assert_eq!(launch.rocket.warhead, Warhead::Conventional);
        assert_eq!(launch.rocket.target, TargetCoordinates::new(0.1, 0.1));
        assert_eq!(container.launches.list(), vec![launch.clone()]);

        assert_eq!(
            container.launches.launch(created.id),
            Err(ServiceError::AlreadyLaunched(created.id))
        );
        assert_eq!(container.launches.list().len(), 1);

        let removed = container.rockets.remove(created.id).unwrap();
        assert_eq!(removed.status, Status::Launched);
        assert_eq!(removed, stored);

        // The audit trail outlives the rocket.
        assert_eq!(container.launches.get(launch.id), Ok(launch));
    }

    #[test]
    fn test_launched_rocket_is_frozen() {
        let container = container();
        let launched = rocket(&container, Status::Launched);
        let frozen = Err(ServiceError::AlreadyLaunched(launched.id));

        assert_eq!(
            container.rockets.patch_status(launched.id, Status::NotReady),
            frozen
        );
        assert_eq!(
            container.rockets.patch_warhead(launched.id, Warhead::Nuclear),
            frozen
        );
        assert_eq!(
            container.rockets.merge(
                launched.id,
                MergeRocketCommand {
                    target: Some(TargetCoordinates::new(5.0, 5.0)),
                    ..Default::default()
                }
            ),
            frozen
        );
        assert_eq!(container.rockets.get(launched.id), Ok(launched));
    }

    #[test]
    fn test_state_errors_take_precedence_over_payload_errors() {
        let container = container();
        let launched = rocket(&container, Status::Launched);
        let absent = RocketId(Uuid::new_v4());
        let out_of_range = TargetCoordinates::new(100.0, 0.0);

        assert_eq!(
            container.rockets.patch_target(launched.id, out_of_range),
            Err(ServiceError::AlreadyLaunched(launched.id))
        );
        assert_eq!(
            container.rockets.replace(
                launched.id,
                UpdateRocketCommand {
                    warhead: Warhead::Nuclear,
                    status: Status::Ready,
                    target: out_of_range,
                }
            ),
            Err(ServiceError::AlreadyLaunched(launched.id))
        );
        assert_eq!(
            container.rockets.replace(
                absent,
                UpdateRocketCommand {
                    warhead: Warhead::Nuclear,
                    status: Status::Ready,
                    target: TargetCoordinates::new(0.0, 500.0),
                }
            ),
            Err(ServiceError::rocket_not_found(absent))
        );
        assert_eq!(container.rockets.get(launched.id), Ok(launched));
    }

    #[test]
    fn test_launch_requires_ready() {
        let container = container();
        let idle = rocket(&container, Status::NotReady);

        assert_eq!(
            container.launches.launch(idle.id),
            Err(ServiceError::NotReady(idle.id))
        );
        assert!(container.launches.list().is_empty());

        // Back and forth between the two generic states is allowed.
        container.rockets.patch_status(idle.id, Status::Ready).unwrap();
        container
            .rockets
            .patch_status(idle.id, Status::NotReady)
            .unwrap();
        assert_eq!(
            container.launches.launch(idle.id),
            Err(ServiceError::NotReady(idle.id))
        );
    }

    #[test]
    fn test_clear_all_resets_both_stores() {
        let container = container();
        rocket(&container, Status::Launched);
        rocket(&container, Status::Ready);

        container.clear_all();

        assert!(container.rockets.list().is_empty());
        assert!(container.launches.list().is_empty());

        // The stores stay usable after a reset.
        let fresh = rocket(&container, Status::Launched);
        assert_eq!(container.launches.list().len(), 1);
        assert_eq!(container.launches.list()[0].rocket, fresh);
    }
}
