//! Per-player ordinal allocation: "this is player P's n-th worker"

use std::collections::HashMap;
use std::hash::Hash;


/// Identifies who an ordinal is being counted for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerKey {
    /// The stable profile handle of a resolved player
    Handle(String),
    /// The in-game player id -- for when no handle is known for it
    PlayerId(u32),
}

/// Independent counters, one per key, each starting at 1
#[derive(Debug)]
pub struct OrdinalCounters<Key: Eq + Hash> {
    counters: HashMap<Key, u32>,
}

impl<Key: Eq + Hash> OrdinalCounters<Key> {

    pub fn new() -> Self {
        Self { counters: HashMap::new() }
    }

    /// Returns the current ordinal for `key`, then advances it
    pub fn next(&mut self, key: Key) -> u32 {
        let counter = self.counters.entry(key).or_insert(1);
        let ordinal = *counter;
        *counter += 1;
        ordinal
    }

}

impl<Key: Eq + Hash> Default for OrdinalCounters<Key> {
    fn default() -> Self {
        Self::new()
    }
}
