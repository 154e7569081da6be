//! Immutable snapshot of both response sources.

use std::time::{Duration, Instant};

use super::domain::DomainDefinition;
use super::response_table::ResponseTable;

/// Canned and domain tables from the same refresh cycle.
///
/// Snapshots are never mutated; a refresh builds a new one and swaps it in
/// whole, so both tables always come from the same cycle.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub canned: ResponseTable,
    pub domain: DomainDefinition,
    pub refreshed_at: Instant,
}

impl CacheSnapshot {
    pub fn new(canned: ResponseTable, domain: DomainDefinition, refreshed_at: Instant) -> Self {
        Self {
            canned,
            domain,
            refreshed_at,
        }
    }

    /// True when either table is empty or the snapshot is older than `ttl`.
    pub fn is_stale(&self, ttl: Duration, now: Instant) -> bool {
        self.canned.is_empty()
            || self.domain.is_empty()
            || now.saturating_duration_since(self.refreshed_at) > ttl
    }
}
