//! Write commands accepted by the rocket registry.
//!
//! Each command knows which status it requests (for the lifecycle guard) and
//! how to build the replacement from the *current* stored rocket.

use serde::Deserialize;
use shared_types::{NewRocket, Rocket, ServiceError, Status, TargetCoordinates, Warhead};

/// Create a rocket. Status always starts at `NOT_READY`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddRocketCommand {
    pub warhead: Warhead,
    pub target: TargetCoordinates,
}

impl AddRocketCommand {
    pub fn into_draft(self) -> NewRocket {
        NewRocket::new(self.warhead, self.target)
    }
}

/// Replace every mutable field of a rocket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateRocketCommand {
    pub warhead: Warhead,
    pub status: Status,
    pub target: TargetCoordinates,
}

/// Change exactly one field of a rocket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatchRocketCommand {
    SetStatus(Status),
    SetWarhead(Warhead),
    SetTarget(TargetCoordinates),
}

/// Change any subset of a rocket's fields. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MergeRocketCommand {
    pub warhead: Option<Warhead>,
    pub status: Option<Status>,
    pub target: Option<TargetCoordinates>,
}

/// Common shape of the generic update commands.
pub trait RocketChange {
    /// Status the command asks for, if it touches the status.
    fn requested_status(&self) -> Option<Status>;

    /// Target the command asks for, if it touches the target.
    fn requested_target(&self) -> Option<TargetCoordinates>;

    /// Builds the replacement from the current stored value.
    fn apply(&self, current: &Rocket) -> Rocket;

    /// Payload checks that do not depend on stored state.
    fn validate(&self) -> Result<(), ServiceError> {
        match self.requested_target() {
            Some(target) => target.validate(),
            None => Ok(()),
        }
    }
}

impl RocketChange for UpdateRocketCommand {
    fn requested_status(&self) -> Option<Status> {
        Some(self.status)
    }

    fn requested_target(&self) -> Option<TargetCoordinates> {
        Some(self.target)
    }

    fn apply(&self, current: &Rocket) -> Rocket {
        Rocket {
            id: current.id,
            warhead: self.warhead,
            status: self.status,
            target: self.target,
        }
    }
}

impl RocketChange for PatchRocketCommand {
    fn requested_status(&self) -> Option<Status> {
        match self {
            Self::SetStatus(status) => Some(*status),
            _ => None,
        }
    }

    fn requested_target(&self) -> Option<TargetCoordinates> {
        match self {
            Self::SetTarget(target) => Some(*target),
            _ => None,
        }
    }

    fn apply(&self, current: &Rocket) -> Rocket {
        match self {
            Self::SetStatus(status) => current.with_status(*status),
            Self::SetWarhead(warhead) => current.with_warhead(*warhead),
            Self::SetTarget(target) => current.with_target(*target),
        }
    }
}

impl RocketChange for MergeRocketCommand {
    fn requested_status(&self) -> Option<Status> {
        self.status
    }

    fn requested_target(&self) -> Option<TargetCoordinates> {
        self.target
    }

    fn apply(&self, current: &Rocket) -> Rocket {
        Rocket {
            id: current.id,
            warhead: self.warhead.unwrap_or(current.warhead),
            status: self.status.unwrap_or(current.status),
            target: self.target.unwrap_or(current.target),
        }
    }
}

impl MergeRocketCommand {
    pub fn is_empty(&self) -> bool {
        self.warhead.is_none() && self.status.is_none() && self.target.is_none()
    }
}
