//! Resting place for [PatchTable] & friends

use serde::Deserialize;


/// A game patch and the moment it went live
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatchEntry {
    /// Same time base as the match ids
    pub time: u64,
    pub patch: String,
}

/// Result of looking up the patch a match was played on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchLookup<'a> {
    Patch(&'a str),
    /// The match predates the earliest known patch
    BeforeRange,
}

/// Externally supplied list of patches, kept sorted by time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchTable {
    entries: Vec<PatchEntry>,
}

impl PatchTable {

    pub fn new(mut entries: Vec<PatchEntry>) -> Self {
        entries.sort_by_key(|entry| entry.time);
        Self { entries }
    }

    /// The latest patch whose time is not after `timestamp`
    pub fn lookup(&self, timestamp: u64) -> PatchLookup<'_> {
        let after_timestamp = self.entries.partition_point(|entry| entry.time <= timestamp);
        after_timestamp.checked_sub(1)
            .map_or(PatchLookup::BeforeRange,
                    |index| PatchLookup::Patch(&self.entries[index].patch))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}


/// Unit tests for the [patches](super) module
#[cfg(test)]
mod tests {
    use super::*;


    fn table() -> PatchTable {
        // deliberately out of order
        PatchTable::new(vec![
            PatchEntry { time: 300, patch: "1.3".to_string() },
            PatchEntry { time: 100, patch: "1.1".to_string() },
            PatchEntry { time: 200, patch: "1.2".to_string() },
        ])
    }

    #[test]
    fn before_range() {
        assert_eq!(table().lookup(99), PatchLookup::BeforeRange);
        assert_eq!(PatchTable::default().lookup(1_000), PatchLookup::BeforeRange);
    }

    #[test]
    fn boundaries_belong_to_the_new_patch() {
        assert_eq!(table().lookup(100), PatchLookup::Patch("1.1"));
        assert_eq!(table().lookup(199), PatchLookup::Patch("1.1"));
        assert_eq!(table().lookup(200), PatchLookup::Patch("1.2"));
    }

    #[test]
    fn after_the_last_patch() {
        assert_eq!(table().lookup(300), PatchLookup::Patch("1.3"));
        assert_eq!(table().lookup(u64::MAX), PatchLookup::Patch("1.3"));
    }

    #[test]
    fn deserialization() {
        let entries: Vec<PatchEntry> = serde_json::from_str(r#"[{"time": 100, "patch": "1.1"}, {"time": 200, "patch": "1.2"}]"#)
            .expect("patches couldn't be deserialized");
        assert_eq!(PatchTable::new(entries).lookup(150), PatchLookup::Patch("1.1"));
    }

}
