//! Outbound (Driven) ports for the Keyed Store.

#[cfg(any(test, feature = "test-utils"))]
use parking_lot::Mutex;
#[cfg(any(test, feature = "test-utils"))]
use std::collections::VecDeque;
use uuid::Uuid;

/// Source of identities for newly added records.
///
/// Implementations must never hand out the same id twice within a process.
pub trait IdentityGenerator<Id>: Send + Sync {
    /// Returns a fresh identifier.
    fn next_id(&self) -> Id;
}

/// Default generator: 128-bit random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl<Id: From<Uuid>> IdentityGenerator<Id> for UuidGenerator {
    fn next_id(&self) -> Id {
        Uuid::new_v4().into()
    }
}

/// Generator that replays a scripted sequence of ids before falling back to
/// random UUIDs. Used to force identity collisions in tests.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug)]
pub struct ScriptedIdGenerator<Id> {
    script: Mutex<VecDeque<Id>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl<Id> ScriptedIdGenerator<Id> {
    pub fn new(script: impl IntoIterator<Item = Id>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// Number of scripted ids not handed out yet.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl<Id: From<Uuid> + Send> IdentityGenerator<Id> for ScriptedIdGenerator<Id> {
    fn next_id(&self) -> Id {
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Uuid::new_v4().into())
    }
}
