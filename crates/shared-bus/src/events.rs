//! # Change Events
//!
//! What a change feed carries: one [`StoreEvent`] per committed store write,
//! plus the `Existing` events a new subscriber is seeded with.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a [`StoreEvent`], used for filtering and as the SSE event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Part of the snapshot taken when the subscriber attached.
    Existing,
    /// A value was added.
    Added,
    /// A value was replaced.
    Updated,
    /// A value was removed.
    Removed,
    /// The whole store was cleared.
    Cleared,
}

impl ChangeKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Existing => "existing",
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Removed => "removed",
            Self::Cleared => "cleared",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value snapshot emitted by a change feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StoreEvent<V> {
    Existing(V),
    Added(V),
    Updated(V),
    Removed(V),
    Cleared,
}

impl<V> StoreEvent<V> {
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Existing(_) => ChangeKind::Existing,
            Self::Added(_) => ChangeKind::Added,
            Self::Updated(_) => ChangeKind::Updated,
            Self::Removed(_) => ChangeKind::Removed,
            Self::Cleared => ChangeKind::Cleared,
        }
    }

    /// The carried snapshot, if any.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Existing(v) | Self::Added(v) | Self::Updated(v) | Self::Removed(v) => Some(v),
            Self::Cleared => None,
        }
    }
}

/// Filter for subscribing to specific change kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Kinds to include. Empty means all kinds.
    pub kinds: Vec<ChangeKind>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific kinds.
    #[must_use]
    pub fn kinds(kinds: Vec<ChangeKind>) -> Self {
        Self { kinds }
    }

    /// Only live commits, no attach snapshot.
    #[must_use]
    pub fn commits_only() -> Self {
        Self::kinds(vec![
            ChangeKind::Added,
            ChangeKind::Updated,
            ChangeKind::Removed,
            ChangeKind::Cleared,
        ])
    }

    #[must_use]
    pub fn accepts(&self, kind: ChangeKind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches<V>(&self, event: &StoreEvent<V>) -> bool {
        self.accepts(event.kind())
    }
}
