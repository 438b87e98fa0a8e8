use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts, kept in order of first appearance.
#[derive(Clone, Debug)]
pub struct Tally<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> Default for Tally<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> Tally<K> {
    pub fn new() -> Tally<K> {
        Tally {
            entries: vec![],
            index: HashMap::new(),
        }
    }

    pub fn feed(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get(&self, key: &K) -> u64 {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }
}

impl<K> Tally<K> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }
}

// The index is derived from the entries.
impl<K: PartialEq> PartialEq for Tally<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq> Eq for Tally<K> {}

impl<K: Clone + Eq + Hash> FromIterator<K> for Tally<K> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.feed(key);
        }
        tally
    }
}

impl<K: Serialize> Serialize for Tally<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, c) in &self.entries {
            map.serialize_entry(k, c)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn counts_in_first_seen_order() {
        let tally: Tally<&str> = ["short", "long", "short", "medium", "short"]
            .into_iter()
            .collect();
        assert_eq!(
            tally.iter().collect_vec(),
            [(&"short", 3), (&"long", 1), (&"medium", 1)]
        );
        assert_eq!(tally.len(), 3);
        assert_eq!(tally.total(), 5);
        assert_eq!(tally.get(&"long"), 1);
        assert_eq!(tally.get(&"huge"), 0);
    }

    #[test]
    fn empty() {
        let tally: Tally<u64> = Tally::new();
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn equality_follows_order() {
        let a: Tally<&str> = ["x", "y", "x"].into_iter().collect();
        let b: Tally<&str> = ["x", "x", "y"].into_iter().collect();
        let c: Tally<&str> = ["y", "x", "x"].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn serialize_as_map() {
        let tally: Tally<u64> = [2, 1, 1].into_iter().collect();
        assert_eq!(serde_json::to_string(&tally).unwrap(), r#"{"2":1,"1":2}"#);
    }
}
