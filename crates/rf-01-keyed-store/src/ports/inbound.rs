//! Inbound (Driving) ports for the Keyed Store.

use crate::domain::StoreError;
use shared_types::Record;

/// Primary store API used by the subsystems that own a store.
///
/// Every method is a single atomic call; no caller-side locking is needed.
pub trait StoreOperations<R: Record>: Send + Sync {
    /// Assigns a fresh identity to `draft` and inserts it.
    ///
    /// # Errors
    /// - `DuplicateKey`: the generated id is already present; the existing
    ///   entry is left untouched
    fn add(&self, draft: R::Draft) -> Result<R, StoreError>;

    /// Snapshot of the value stored under `id`, if any.
    fn get(&self, id: R::Id) -> Option<R>;

    /// Replaces the whole value stored under `value.id()`.
    ///
    /// # Errors
    /// - `NotFound`: no entry with that id; the store is unchanged
    fn update(&self, value: R) -> Result<R, StoreError>;

    /// Removes and returns the value stored under `id`, if any.
    fn remove(&self, id: R::Id) -> Option<R>;

    /// Point-in-time snapshot of every stored value, in no particular order.
    fn find_all(&self) -> Vec<R>;

    fn contains(&self, id: R::Id) -> bool;

    /// Removes every entry. Administrative reset only.
    fn clear(&self);
}
