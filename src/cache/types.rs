// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Observable cache state and statistics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a single cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheState {
    /// No value stored; the next read fetches
    Empty,
    /// Value stored and inside its window; reads are served locally
    Fresh,
    /// Value stored but its window has elapsed; the next read fetches
    Stale,
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheState::Empty => "empty",
            CacheState::Fresh => "fresh",
            CacheState::Stale => "stale",
        };
        f.write_str(name)
    }
}

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Reads served from a fresh entry
    pub hits: u64,
    /// Reads of a key with no entry
    pub misses: u64,
    /// Reads of a key whose entry was stale
    pub expirations: u64,
    /// Forced transitions to empty (only counted when an entry was removed)
    pub invalidations: u64,
    /// Successful fetches stored in the cache
    pub fetches: u64,
    /// Current number of entries
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.expirations;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, expirations={}, invalidations={}, fetches={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.expirations,
            self.invalidations,
            self.fetches,
            self.entries,
            self.hit_rate()
        )
    }
}
