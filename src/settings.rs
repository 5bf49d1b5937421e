//! Raw settings and consumption-tracked typed access.
//!
//! Every setting a test case declares has to be read by the test that runs
//! it. [`SettingsStore`] records which keys were read so that
//! [`SettingsStore::ensure_all_read`] can reject misspelled or stale settings.

use crate::errors::{ReaderError, ReaderResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::iter::FromIterator;
use tracing::trace;

/// Flat key to raw value map from a document's settings block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Insert a setting; a repeated key overwrites the earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        trace!(key = %key, value = %value, "setting");
        self.values.insert(key, value);
    }

    /// Raw value of `key`. Does not count as a read.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = Settings::default();
        for (key, value) in iter {
            settings.insert(key, value);
        }
        settings
    }
}

/// Typed access over [`Settings`] that remembers which keys were read.
///
/// The settings themselves are never modified, so they stay available for
/// diagnostics after validation.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: Settings,
    read: BTreeSet<String>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            read: BTreeSet::new(),
        }
    }

    /// The underlying raw settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read a boolean setting. Only the literals `true` and `false` are
    /// accepted.
    pub fn get_bool(&mut self, key: &str, default: bool) -> ReaderResult<bool> {
        let Some(value) = self.consume(key) else {
            return Ok(default);
        };
        match value {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(ReaderError::format(format!(
                "invalid Boolean value for setting \"{}\": {}",
                key, other
            ))),
        }
    }

    /// Read a non-negative base-10 integer setting.
    pub fn get_size(&mut self, key: &str, default: usize) -> ReaderResult<usize> {
        let Some(value) = self.consume(key) else {
            return Ok(default);
        };
        value.parse().map_err(|_| {
            ReaderError::format(format!(
                "invalid size value for setting \"{}\": {}",
                key, value
            ))
        })
    }

    /// Read a setting verbatim.
    pub fn get_string(&mut self, key: &str, default: &str) -> String {
        self.consume(key).unwrap_or(default).to_string()
    }

    /// Keys that no getter has asked for yet, in sorted order.
    pub fn unread_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.settings.keys().filter(move |k| !self.read.contains(*k))
    }

    /// Fail if any declared setting was never read.
    pub fn ensure_all_read(&self) -> ReaderResult<()> {
        let unread: Vec<&str> = self.unread_keys().collect();
        if unread.is_empty() {
            return Ok(());
        }
        Err(ReaderError::format(format!(
            "unknown setting(s): {}",
            unread.join(", ")
        )))
    }

    fn consume(&mut self, key: &str) -> Option<&str> {
        let value = self.settings.get(key)?;
        if !self.read.contains(key) {
            self.read.insert(key.to_string());
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pairs: &[(&str, &str)]) -> SettingsStore {
        SettingsStore::new(pairs.iter().copied().collect())
    }

    #[test]
    fn test_absent_key_returns_default() {
        let mut store = store(&[]);
        assert!(store.get_bool("optimize", true).unwrap());
        assert_eq!(store.get_size("runs", 200).unwrap(), 200);
        assert_eq!(store.get_string("EVMVersion", ">=byzantium"), ">=byzantium");
        assert!(store.ensure_all_read().is_ok());
    }

    #[test]
    fn test_bool_literals() {
        let mut store = store(&[("a", "true"), ("b", "false"), ("c", "yes")]);
        assert!(store.get_bool("a", false).unwrap());
        assert!(!store.get_bool("b", true).unwrap());

        let err = store.get_bool("c", false).unwrap_err();
        assert!(err.is_format());
        insta::assert_snapshot!(err.to_string(), @r###"invalid Boolean value for setting "c": yes"###);
    }

    #[test]
    fn test_size_values() {
        let mut store = store(&[("runs", "200"), ("bad", "12abc"), ("neg", "-1")]);
        assert_eq!(store.get_size("runs", 0).unwrap(), 200);
        assert!(store.get_size("bad", 0).is_err());
        assert!(store.get_size("neg", 0).is_err());
    }

    #[test]
    fn test_string_is_verbatim() {
        let mut store = store(&[("EVMVersion", ">=constantinople")]);
        assert_eq!(store.get_string("EVMVersion", ""), ">=constantinople");
    }

    #[test]
    fn test_unread_setting_is_reported() {
        let mut store = store(&[("foo", "1")]);
        assert_eq!(store.get_size("bar", 0).unwrap(), 0);

        let err = store.ensure_all_read().unwrap_err();
        assert!(err.is_format());
        insta::assert_snapshot!(err.to_string(), @"unknown setting(s): foo");
    }

    #[test]
    fn test_unread_keys_are_sorted_and_joined() {
        let mut store = store(&[("zeta", "1"), ("alpha", "2"), ("mid", "3")]);
        store.get_string("mid", "");

        let unread: Vec<_> = store.unread_keys().collect();
        assert_eq!(unread, vec!["alpha", "zeta"]);
        insta::assert_snapshot!(
            store.ensure_all_read().unwrap_err().to_string(),
            @"unknown setting(s): alpha, zeta"
        );
    }

    #[test]
    fn test_failed_read_still_counts_as_read() {
        let mut store = store(&[("flag", "maybe")]);
        assert!(store.get_bool("flag", false).is_err());
        assert!(store.ensure_all_read().is_ok());
    }

    #[test]
    fn test_reading_twice_is_fine() {
        let mut store = store(&[("flag", "true")]);
        assert!(store.get_bool("flag", false).unwrap());
        assert!(store.get_bool("flag", false).unwrap());
        assert!(store.ensure_all_read().is_ok());
    }

    #[test]
    fn test_raw_settings_remain_inspectable() {
        let mut store = store(&[("a", "1"), ("b", "2")]);
        store.get_size("a", 0).unwrap();
        store.get_size("b", 0).unwrap();
        assert_eq!(store.settings().len(), 2);
        assert_eq!(store.settings().get("a"), Some("1"));
    }

    #[test]
    fn test_duplicate_insert_overwrites() {
        let settings: Settings = vec![("k", "1"), ("k", "2")].into_iter().collect();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.get("k"), Some("2"));
    }
}
