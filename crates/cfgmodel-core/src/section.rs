//! [`Section`]: the ordered, heterogeneous document node.

use std::any::Any;
use std::fmt;
use std::fmt::Display;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;

use crate::serializer::{Direction, FromConfig, SerializerRegistry};
use crate::{ConfigError, ConfigValue};

static EMPTY_REGISTRY: OnceLock<Arc<SerializerRegistry>> = OnceLock::new();

fn empty_registry() -> Arc<SerializerRegistry> {
    EMPTY_REGISTRY
        .get_or_init(|| Arc::new(SerializerRegistry::new()))
        .clone()
}

/// An ordered mapping of string keys to document nodes.
///
/// Key insertion order is preserved and observable on iteration; re-setting
/// an existing key updates its value in place without moving it, and setting
/// a key to [`ConfigValue::Null`] removes it. The registry handle supplied at
/// construction resolves codecs for typed reads and writes; [`Clone`] is a
/// structural deep copy (values own their children) that shares the registry.
#[derive(Clone)]
pub struct Section {
    reg: Arc<SerializerRegistry>,
    entries: IndexMap<String, ConfigValue>,
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl Section {
    /// Empty section with no registered codecs.
    pub fn new() -> Self {
        Self::with_registry(empty_registry())
    }

    /// Empty section resolving codecs through the given registry.
    pub fn with_registry(reg: Arc<SerializerRegistry>) -> Self {
        Self {
            reg,
            entries: IndexMap::new(),
        }
    }

    pub fn registry(&self) -> &Arc<SerializerRegistry> {
        &self.reg
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// True when the key is present and convertible to `T`. Never fails;
    /// probes through capability checks only.
    pub fn has_as<T: FromConfig>(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|node| T::accepts(node, &self.reg))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(key, node)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &ConfigValue> {
        self.entries.values()
    }

    /// Inserts or updates a node. A [`ConfigValue::Null`] value removes the
    /// key; removal keeps the order of the remaining keys intact.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        let key = key.into();
        match value.into() {
            ConfigValue::Null => {
                self.entries.shift_remove(&key);
            }
            node => {
                self.entries.insert(key, node);
            }
        }
    }

    /// Builder form of [`Section::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Serializes a domain value through the registry before insertion.
    ///
    /// Inline codecs are preferred, then structured ones; with no codec
    /// registered the value degrades to its literal `Display` form (logged,
    /// see [`SerializerRegistry::serialize_or_literal`]).
    pub fn set_serialized<T: Any + Display>(&mut self, key: impl Into<String>, value: &T) {
        let node = self.reg.serialize_or_literal(value);
        self.set(key, node);
    }

    /// Serializes a slice element-wise into a list node.
    pub fn set_serialized_list<T: Any + Display>(&mut self, key: impl Into<String>, values: &[T]) {
        let items = values
            .iter()
            .map(|value| self.reg.serialize_or_literal(value))
            .collect();
        self.set(key, ConfigValue::List(items));
    }

    /// Serializes a map into a nested section, keys through an inline codec
    /// (falling back to their `Display` form) and values through the registry.
    pub fn set_serialized_map<K, V>(&mut self, key: impl Into<String>, map: &IndexMap<K, V>)
    where
        K: Any + Display,
        V: Any + Display,
    {
        let mut nested = Section::with_registry(self.reg.clone());
        for (map_key, value) in map {
            let token = match self.reg.lookup_inline::<K>(Direction::Encode) {
                Some(codec) => codec.encode(map_key).unwrap_or_else(|_| map_key.to_string()),
                None => map_key.to_string(),
            };
            let node = self.reg.serialize_or_literal(value);
            nested.set(token, node);
        }
        self.set(key, nested);
    }

    /// Typed read: `MissingKey` when absent, `TypeMismatch` when present but
    /// not convertible to `T`.
    pub fn get_as<T: FromConfig>(&self, key: &str) -> Result<T, ConfigError> {
        let node = self
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        T::from_config(node, &self.reg)
    }

    /// Typed read that swallows conversion failures and returns the default.
    ///
    /// Only [`ConfigError`] conversion outcomes are caught; this is
    /// deliberate API ergonomics for optional keys, not error hiding.
    pub fn get_or<T: FromConfig>(&self, key: &str, default: T) -> T {
        self.get_as(key).unwrap_or(default)
    }

    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        let node = self
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        node.as_str()
            .ok_or_else(|| ConfigError::mismatch("string", node.kind()))
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        self.get_as(key)
    }

    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        self.get_as(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        self.get_as(key)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_or(key, default)
    }

    pub fn get_list(&self, key: &str) -> Result<&[ConfigValue], ConfigError> {
        let node = self
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        node.as_list()
            .ok_or_else(|| ConfigError::mismatch("list", node.kind()))
    }

    /// Typed list read; fails on the first unconvertible element.
    pub fn get_list_as<T: FromConfig>(&self, key: &str) -> Result<Vec<T>, ConfigError> {
        self.get_list(key)?
            .iter()
            .map(|item| T::from_config(item, &self.reg))
            .collect()
    }

    /// Typed list read that skips unconvertible elements. A missing or
    /// non-list key yields an empty vector.
    pub fn get_list_filtered<T: FromConfig>(&self, key: &str) -> Vec<T> {
        let Some(items) = self.get(key).and_then(ConfigValue::as_list) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| T::from_config(item, &self.reg).ok())
            .collect()
    }

    pub fn get_section(&self, key: &str) -> Result<&Section, ConfigError> {
        let node = self
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        node.as_section()
            .ok_or_else(|| ConfigError::mismatch("section", node.kind()))
    }

    /// Returns the section under `key`, inserting an empty one (sharing this
    /// section's registry) when the key is absent or not a section.
    pub fn get_or_create_section(&mut self, key: &str) -> &mut Section {
        if !matches!(self.entries.get(key), Some(ConfigValue::Section(_))) {
            let fresh = Section::with_registry(self.reg.clone());
            self.entries
                .insert(key.to_string(), ConfigValue::Section(fresh));
        }
        match self.entries.get_mut(key) {
            Some(ConfigValue::Section(section)) => section,
            _ => unreachable!("section was just inserted"),
        }
    }

    /// Adds every key of `other` that is missing here; existing keys are
    /// left untouched.
    pub fn fill(&mut self, other: &Section) {
        for (key, value) in other.entries() {
            if !self.has(key) {
                self.set(key.to_string(), value.clone());
            }
        }
    }

    /// Copies every key of `other` into this section, overwriting existing
    /// values in place.
    pub fn fill_overwrite(&mut self, other: &Section) {
        for (key, value) in other.entries() {
            self.set(key.to_string(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_updates_in_place() {
        let mut sec = Section::new();
        sec.set("a", 1);
        sec.set("b", 2);
        sec.set("a", 10);
        assert_eq!(sec.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(sec.get_int("a").expect("a"), 10);
    }

    #[test]
    fn null_removes_without_reordering() {
        let mut sec = Section::new();
        sec.set("a", 1);
        sec.set("b", 2);
        sec.set("c", 3);
        sec.set("b", ConfigValue::Null);
        assert_eq!(sec.keys().collect::<Vec<_>>(), ["a", "c"]);
        assert!(!sec.has("b"));
    }
}
