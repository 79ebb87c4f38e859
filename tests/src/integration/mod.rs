//! Integration tests across the store, lifecycle, launch and gateway crates.

pub mod concurrency;
pub mod feed;
pub mod flows;
pub mod http;

#[cfg(test)]
use rf_02_rocket_lifecycle::{AddRocketCommand, RocketsApi};
#[cfg(test)]
use service_runtime::{ServiceConfig, ServiceContainer};
#[cfg(test)]
use shared_types::{Rocket, Status, TargetCoordinates, Warhead};

/// A fully wired container with default configuration.
#[cfg(test)]
pub fn container() -> ServiceContainer {
    ServiceContainer::new(ServiceConfig::default())
}

/// Creates a conventional rocket aimed at (0.1, 0.1) and moves it to `status`
/// through the public API. `LAUNCHED` is reached through a launch.
#[cfg(test)]
pub fn rocket(container: &ServiceContainer, status: Status) -> Rocket {
    use rf_03_launch_control::LaunchApi;

    let created = container
        .rockets
        .create(AddRocketCommand {
            warhead: Warhead::Conventional,
            target: TargetCoordinates::new(0.1, 0.1),
        })
        .expect("create rocket");

    match status {
        Status::NotReady => created,
        Status::Ready => container
            .rockets
            .patch_status(created.id, Status::Ready)
            .expect("mark ready"),
        Status::Launched => {
            container
                .rockets
                .patch_status(created.id, Status::Ready)
                .expect("mark ready");
            container.launches.launch(created.id).expect("launch").rocket
        }
    }
}
