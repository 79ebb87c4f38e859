//! # Domain Entities
//!
//! Every stored entity exists in two representations:
//!
//! | New (no identity) | Existing (stored) | Identifier |
//! |-------------------|-------------------|------------|
//! | [`NewRocket`]     | [`Rocket`]        | [`RocketId`] |
//! | [`NewLaunch`]     | [`Launch`]        | [`LaunchId`] |
//!
//! The [`Record`] trait ties the two together so a single generic store can
//! hold either kind.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identity of a rocket. Assigned once by the rocket store, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RocketId(pub Uuid);

/// Identity of a launch record. Distinct from the identity of the rocket it
/// refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchId(pub Uuid);

impl From<Uuid> for RocketId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Uuid> for LaunchId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for RocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl fmt::Display for LaunchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RocketId {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ServiceError::Validation(format!("'{s}' is not a valid rocket id")))
    }
}

impl FromStr for LaunchId {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ServiceError::Validation(format!("'{s}' is not a valid launch id")))
    }
}

// =============================================================================
// RECORD ABSTRACTION
// =============================================================================

/// The kind of resource a store holds, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Rocket,
    LaunchRecord,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rocket => write!(f, "Rocket"),
            Self::LaunchRecord => write!(f, "Launch record"),
        }
    }
}

/// A value with an identity that can live in a keyed store.
///
/// `Draft` is the identity-less representation accepted on creation; the
/// store assigns the id and calls [`Record::from_draft`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier type, unique per store.
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Creation input, without identity.
    type Draft: Send;

    /// Resource kind reported in errors.
    const KIND: ResourceKind;

    /// Identity of this record.
    fn id(&self) -> Self::Id;

    /// Builds the stored representation from a freshly assigned id.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;
}

// =============================================================================
// ROCKET
// =============================================================================

/// Payload category of a rocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Warhead {
    Conventional,
    Nuclear,
}

impl fmt::Display for Warhead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conventional => write!(f, "CONVENTIONAL"),
            Self::Nuclear => write!(f, "NUCLEAR"),
        }
    }
}

/// Lifecycle status of a rocket, ordered `NOT_READY < READY < LAUNCHED`.
///
/// `LAUNCHED` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    NotReady,
    Ready,
    Launched,
}

impl Status {
    /// All statuses in lifecycle order.
    pub const ALL: [Status; 3] = [Status::NotReady, Status::Ready, Status::Launched];

    /// Whether no further transition is possible out of this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Launched)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "NOT_READY"),
            Self::Ready => write!(f, "READY"),
            Self::Launched => write!(f, "LAUNCHED"),
        }
    }
}

/// Geographic target of a rocket, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl TargetCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Checks both coordinates are finite and within the geographic range.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ServiceError::Validation(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ServiceError::Validation(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// A rocket that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRocket {
    pub warhead: Warhead,
    pub target: TargetCoordinates,
    #[serde(default)]
    pub status: Status,
}

impl NewRocket {
    /// A new rocket in the initial `NOT_READY` status.
    pub fn new(warhead: Warhead, target: TargetCoordinates) -> Self {
        Self {
            warhead,
            target,
            status: Status::NotReady,
        }
    }
}

/// A stored rocket: identity plus current field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: RocketId,
    pub warhead: Warhead,
    pub status: Status,
    pub target: TargetCoordinates,
}

impl Rocket {
    /// Copy of this rocket with a different status.
    pub fn with_status(&self, status: Status) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Copy of this rocket with a different warhead.
    pub fn with_warhead(&self, warhead: Warhead) -> Self {
        Self {
            warhead,
            ..self.clone()
        }
    }

    /// Copy of this rocket with a different target.
    pub fn with_target(&self, target: TargetCoordinates) -> Self {
        Self {
            target,
            ..self.clone()
        }
    }
}

impl Record for Rocket {
    type Id = RocketId;
    type Draft = NewRocket;
    const KIND: ResourceKind = ResourceKind::Rocket;

    fn id(&self) -> RocketId {
        self.id
    }

    fn from_draft(id: RocketId, draft: NewRocket) -> Self {
        Self {
            id,
            warhead: draft.warhead,
            status: draft.status,
            target: draft.target,
        }
    }
}

// =============================================================================
// LAUNCH
// =============================================================================

/// A launch record that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLaunch {
    /// Snapshot of the rocket at the moment it was launched.
    pub rocket: Rocket,
    pub time: DateTime<Utc>,
}

/// Immutable audit record of one successful launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub id: LaunchId,
    /// Copy of the rocket taken when its status flipped to `LAUNCHED`.
    pub rocket: Rocket,
    pub time: DateTime<Utc>,
}

impl Record for Launch {
    type Id = LaunchId;
    type Draft = NewLaunch;
    const KIND: ResourceKind = ResourceKind::LaunchRecord;

    fn id(&self) -> LaunchId {
        self.id
    }

    fn from_draft(id: LaunchId, draft: NewLaunch) -> Self {
        Self {
            id,
            rocket: draft.rocket,
            time: draft.time,
        }
    }
}
