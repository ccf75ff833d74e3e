//! Monotonic counters that decide whether an asynchronous reply is current.
//!
//! # Responsibility
//! - Tag every issued request with the counter value at issue time.
//! - Answer "is this reply still the newest?" at completion time.
//!
//! # Invariants
//! - Counters only move forward.
//! - A reply is current only when its captured value equals the counter.

use std::collections::HashMap;
use std::hash::Hash;

/// Counter value captured when a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Single counter for a channel where only the latest request matters.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    latest: u64,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the counter and returns the ticket for the new request.
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// Makes every outstanding ticket stale without issuing a request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// One counter per key; keys never share versions.
#[derive(Debug, Clone)]
pub struct VersionMap<K> {
    versions: HashMap<K, u64>,
}

impl<K> Default for VersionMap<K> {
    fn default() -> Self {
        Self {
            versions: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> VersionMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter for `key` (starting from 0) and returns it.
    pub fn bump(&mut self, key: K) -> u64 {
        let version = self.versions.entry(key).or_insert(0);
        *version += 1;
        *version
    }

    /// Latest issued version for `key`, 0 when never bumped.
    pub fn current(&self, key: K) -> u64 {
        self.versions.get(&key).copied().unwrap_or(0)
    }

    pub fn is_latest(&self, key: K, version: u64) -> bool {
        self.current(key) == version
    }
}

#[cfg(test)]
mod tests {
    use super::{Sequence, VersionMap};

    #[test]
    fn only_last_ticket_is_current() {
        let mut sequence = Sequence::new();
        let first = sequence.issue();
        let second = sequence.issue();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
    }

    #[test]
    fn invalidate_makes_outstanding_ticket_stale() {
        let mut sequence = Sequence::new();
        let ticket = sequence.issue();
        sequence.invalidate();
        assert!(!sequence.is_current(ticket));
    }

    #[test]
    fn versions_are_tracked_per_key() {
        let mut versions = VersionMap::new();
        assert_eq!(versions.current("a"), 0);
        assert_eq!(versions.bump("a"), 1);
        assert_eq!(versions.bump("a"), 2);
        assert_eq!(versions.bump("b"), 1);
        assert!(versions.is_latest("a", 2));
        assert!(!versions.is_latest("a", 1));
        assert!(versions.is_latest("b", 1));
    }
}
