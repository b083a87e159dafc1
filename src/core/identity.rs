//! Item identifiers of the form `STN-0001`

use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Prefix used for generated item IDs
pub const ID_PREFIX: &str = "STN";

/// A unique item identifier.
///
/// Generated IDs are `STN-` followed by a zero-padded sequence number, but
/// any text read from the inventory file is accepted as-is so hand-edited
/// rows survive a load/save round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Build the ID for sequence number `n`
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("{}-{:04}", ID_PREFIX, n))
    }

    /// Numeric suffix after the last `-`, if it parses as an integer
    pub fn sequence(&self) -> Option<u64> {
        self.0.rsplit('-').next()?.trim().parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// Next free ID given the existing ones.
///
/// The new sequence number is one past the largest parseable suffix, so
/// numbers freed by deletions are never handed out again. IDs whose suffix
/// is not an integer are ignored; with none left the sequence starts at 1.
/// If the largest suffix is already `u64::MAX` the lowest unused number is
/// taken instead.
pub fn next_id<'a>(existing: impl IntoIterator<Item = &'a ItemId>) -> ItemId {
    let existing: Vec<&ItemId> = existing.into_iter().collect();
    let max = existing.iter().filter_map(|id| id.sequence()).max();

    match max.map(|max| max.checked_add(1)) {
        None => ItemId::from_sequence(1),
        Some(Some(next)) => ItemId::from_sequence(next),
        Some(None) => {
            warn!("item ID sequence exhausted, reusing the lowest free number");
            (1..=u64::MAX)
                .map(ItemId::from_sequence)
                .find(|candidate| !existing.contains(&candidate))
                .unwrap_or_else(|| ItemId::from_sequence(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<ItemId> {
        raw.iter().map(|s| ItemId::from(*s)).collect()
    }

    #[test]
    fn test_from_sequence_pads_to_four_digits() {
        assert_eq!(ItemId::from_sequence(1).as_str(), "STN-0001");
        assert_eq!(ItemId::from_sequence(42).as_str(), "STN-0042");
        assert_eq!(ItemId::from_sequence(12345).as_str(), "STN-12345");
    }

    #[test]
    fn test_sequence_uses_last_segment() {
        assert_eq!(ItemId::from("STN-0007").sequence(), Some(7));
        assert_eq!(ItemId::from("OLD-STN-0012").sequence(), Some(12));
        assert_eq!(ItemId::from("19").sequence(), Some(19));
        assert_eq!(ItemId::from("STN-ABC").sequence(), None);
        assert_eq!(ItemId::from("").sequence(), None);
    }

    #[test]
    fn test_next_id_for_empty_table() {
        assert_eq!(next_id(&ids(&[])).as_str(), "STN-0001");
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        let existing = ids(&["STN-0003", "STN-0010", "STN-0002"]);
        assert_eq!(next_id(&existing).as_str(), "STN-0011");
    }

    #[test]
    fn test_next_id_does_not_fill_gaps() {
        let existing = ids(&["STN-0001", "STN-0005"]);
        assert_eq!(next_id(&existing).as_str(), "STN-0006");
    }

    #[test]
    fn test_next_id_ignores_unparseable_ids() {
        let existing = ids(&["MISC", "STN-X1", "STN-0004"]);
        assert_eq!(next_id(&existing).as_str(), "STN-0005");

        let existing = ids(&["MISC", "STN-X1"]);
        assert_eq!(next_id(&existing).as_str(), "STN-0001");
    }

    #[test]
    fn test_next_id_after_largest_sequence() {
        let existing = ids(&["STN-18446744073709551615"]);
        let next = next_id(&existing);
        assert_ne!(next, existing[0]);
        assert_eq!(next.as_str(), "STN-0001");

        let existing = ids(&["STN-18446744073709551615", "STN-0001", "STN-0002"]);
        assert_eq!(next_id(&existing).as_str(), "STN-0003");
    }

    #[test]
    fn test_next_id_is_never_taken() {
        let existing = ids(&["STN-0001", "STN-0002", "X-9", "STN-0009", "junk"]);
        let next = next_id(&existing);
        assert!(!existing.contains(&next));
        assert_eq!(next.sequence(), Some(10));
    }
}
