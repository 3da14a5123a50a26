use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Ordered, duplicate-free list of item keys.
///
/// The position of a key in this list is its row (and column) in the
/// similarity matrix. The matrix is only ever addressed through these
/// positions, never by key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ItemIndex {
    keys: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl ItemIndex {
    /// Build an index from keys in matrix order.
    ///
    /// Fails with [`Error::DuplicateItem`] on the first repeated key.
    pub fn new(keys: Vec<String>) -> Result<Self> {
        let mut positions = AHashMap::with_capacity(keys.len());
        for (position, key) in keys.iter().enumerate() {
            if positions.insert(key.clone(), position).is_some() {
                return Err(Error::DuplicateItem(key.clone()));
            }
        }
        Ok(Self { keys, positions })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Position of `key`, if it is in the index
    #[inline]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    #[inline]
    pub fn key(&self, position: usize) -> Option<&str> {
        self.keys.get(position).map(String::as_str)
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Keys in alphabetical order, for selection lists
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.iter().collect();
        keys.sort_unstable();
        keys
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }
}

impl PartialEq for ItemIndex {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl TryFrom<Vec<String>> for ItemIndex {
    type Error = Error;

    fn try_from(keys: Vec<String>) -> Result<Self> {
        Self::new(keys)
    }
}

impl From<ItemIndex> for Vec<String> {
    fn from(index: ItemIndex) -> Self {
        index.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positions_follow_input_order() {
        let index = ItemIndex::new(keys(&["Pizza", "Pasta", "Burger"])).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.position("Pizza"), Some(0));
        assert_eq!(index.position("Burger"), Some(2));
        assert_eq!(index.key(1), Some("Pasta"));
        assert_eq!(index.position("Sushi"), None);
        assert_eq!(index.key(3), None);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = ItemIndex::new(keys(&["Pizza", "Pasta", "Pizza"])).unwrap_err();
        assert!(matches!(err, Error::DuplicateItem(ref k) if k == "Pizza"));
    }

    #[test]
    fn test_sorted_keys() {
        let index = ItemIndex::new(keys(&["Tacos", "Apple Pie", "Lasagna"])).unwrap();
        assert_eq!(index.sorted_keys(), vec!["Apple Pie", "Lasagna", "Tacos"]);
        // matrix order is untouched
        assert_eq!(index.key(0), Some("Tacos"));
    }

    #[test]
    fn test_serde_validates() {
        let index: ItemIndex = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(index.position("b"), Some(1));
        assert_eq!(serde_json::to_string(&index).unwrap(), r#"["a","b"]"#);

        let dup: std::result::Result<ItemIndex, _> = serde_json::from_str(r#"["a", "a"]"#);
        assert!(dup.is_err());
    }
}
