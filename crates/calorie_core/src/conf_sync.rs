//! Optimistic, versioned writes of the scalar settings.
//!
//! # Responsibility
//! - Version every local edit per settings key.
//! - Commit an acknowledged write only if no newer edit of the same key exists.
//!
//! # Invariants
//! - Versions start at 0 and increase by one per `set` call, per key.
//! - A failed write never touches the committed configuration.
//! - An older write acknowledged after a newer one never overwrites it.

use crate::channel::VersionMap;
use crate::model::day::{ConfKey, Configuration};
use serde::Serialize;

/// A settings write in flight, with the version captured at issue time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PendingWrite {
    pub key: ConfKey,
    pub version: u64,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ConfSync {
    versions: VersionMap<ConfKey>,
}

impl ConfSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a write of `value` for `key`; the caller issues it to the service.
    pub fn set(&mut self, key: ConfKey, value: f64) -> PendingWrite {
        PendingWrite {
            key,
            version: self.versions.bump(key),
            value,
        }
    }

    /// Whether `key` has been written during this session.
    pub fn is_touched(&self, key: ConfKey) -> bool {
        self.versions.current(key) > 0
    }

    pub fn is_latest(&self, write: &PendingWrite) -> bool {
        self.versions.is_latest(write.key, write.version)
    }

    /// Handles the service acknowledgement for `write`.
    ///
    /// Returns `true` when the value was committed into `conf`.
    pub fn acknowledge<E>(
        &self,
        write: &PendingWrite,
        outcome: &Result<(), E>,
        conf: &mut Configuration,
    ) -> bool {
        if outcome.is_err() || !self.is_latest(write) {
            return false;
        }
        conf.set(write.key, write.value);
        true
    }
}
