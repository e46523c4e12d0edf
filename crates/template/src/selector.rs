//! Editable label selector.
//!
//! During editing a selector is an ordered list of key/value entries, so the
//! same key may appear more than once. Converting back to a map keeps, for
//! every key, the value of its last entry.
use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use snafu::Snafu;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SelectorEntry {
    pub key: String,

    pub value: String,
}

impl SelectorEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Parses `KEY=VALUE`, trimming whitespace around both; the value may be
/// empty, the key may not.
impl FromStr for SelectorEntry {
    type Err = ParseSelectorEntryError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.split_once('=').map(|(key, value)| (key.trim(), value.trim())) {
            Some((key, value)) if !key.is_empty() => Ok(Self::new(key, value)),
            _ => InvalidSelectorSnafu { input }.fail(),
        }
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum ParseSelectorEntryError {
    #[snafu(display("Invalid selector: expected 'KEY=VALUE', got '{input}'"))]
    InvalidSelector { input: String },
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelSelector {
    entries: Vec<SelectorEntry>,
}

impl LabelSelector {
    #[must_use]
    pub const fn new() -> Self { Self { entries: Vec::new() } }

    /// Builds the editable list from a selector map, one entry per key.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        map.iter().map(|(key, value)| SelectorEntry::new(key, value)).collect()
    }

    /// Collapses the entries into a selector map; the last entry of a
    /// repeated key wins.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries.iter().map(|entry| (entry.key.clone(), entry.value.clone())).collect()
    }

    /// Keys that appear in more than one entry, in sorted order.
    #[must_use]
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.key.as_str()) {
                let _newly_added = duplicates.insert(entry.key.as_str());
            }
        }
        duplicates.into_iter().collect()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(SelectorEntry::new(key, value));
    }

    /// Appends a blank entry and returns it for editing.
    pub fn push_blank(&mut self) -> &mut SelectorEntry {
        let index = self.entries.len();
        self.entries.push(SelectorEntry::default());
        &mut self.entries[index]
    }

    /// Removes the entry at `index`, or returns `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<SelectorEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    #[must_use]
    pub fn entries(&self) -> &[SelectorEntry] { &self.entries }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut SelectorEntry> {
        self.entries.get_mut(index)
    }

    #[must_use]
    pub const fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub const fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl<K, V> FromIterator<(K, V)> for LabelSelector
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().map(|(key, value)| SelectorEntry::new(key, value)).collect()
    }
}

impl FromIterator<SelectorEntry> for LabelSelector {
    fn from_iter<I: IntoIterator<Item = SelectorEntry>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_round_trip() {
        let map = BTreeMap::from([
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]);
        let selector = LabelSelector::from_map(&map);

        assert_eq!(selector.len(), 2);
        assert_eq!(selector.to_map(), map);
    }

    #[test]
    fn test_last_write_wins() {
        let selector: LabelSelector = [("a", "1"), ("a", "2")].into_iter().collect();

        assert_eq!(selector.to_map(), BTreeMap::from([("a".to_string(), "2".to_string())]));
        assert_eq!(selector.duplicate_keys(), vec!["a"]);
    }

    #[test]
    fn test_push_blank_and_edit() {
        let mut selector = LabelSelector::new();
        let entry = selector.push_blank();
        entry.key = "tier".to_string();
        entry.value = "web".to_string();

        assert_eq!(selector.entries(), &[SelectorEntry::new("tier", "web")]);
        assert!(selector.duplicate_keys().is_empty());
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!("tier=web".parse::<SelectorEntry>(), Ok(SelectorEntry::new("tier", "web")));
        assert_eq!("empty=".parse::<SelectorEntry>(), Ok(SelectorEntry::new("empty", "")));
        assert!(matches!(
            "=web".parse::<SelectorEntry>(),
            Err(ParseSelectorEntryError::InvalidSelector { .. })
        ));
        assert!("no-separator".parse::<SelectorEntry>().is_err());
        assert!(" =web".parse::<SelectorEntry>().is_err());
    }

    #[test]
    fn test_parse_entry_trims_key_and_value() {
        assert_eq!(" tier = web ".parse::<SelectorEntry>(), Ok(SelectorEntry::new("tier", "web")));
        assert_eq!("empty= ".parse::<SelectorEntry>(), Ok(SelectorEntry::new("empty", "")));
    }

    #[test]
    fn test_remove_is_positional() {
        let mut selector: LabelSelector = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();

        assert_eq!(selector.remove(1), Some(SelectorEntry::new("b", "2")));
        assert_eq!(selector.remove(5), None);
        assert_eq!(
            selector.entries(),
            &[SelectorEntry::new("a", "1"), SelectorEntry::new("c", "3")]
        );
    }
}
