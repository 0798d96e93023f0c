//! Multilingual text.
//!
//! A [`LanguageMap`] is an ordered, multi-valued mapping from a language key
//! to the values in that language. Values without a language live under
//! [`NO_LANGUAGE`].
//!
//! Insertion never replaces: adding a value for an existing key appends to
//! that key's list, and merging two maps keeps the first map's keys first.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Record key for values that carry no language tag.
pub const NO_LANGUAGE: &str = "def";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMap {
    entries: Vec<(String, Vec<String>)>,
}

impl LanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single value under `lang`.
    pub fn single(lang: impl Into<String>, value: impl Into<String>) -> Self {
        let mut m = Self::new();
        m.insert(lang, value);
        m
    }

    /// A map holding a single value without language.
    pub fn no_language(value: impl Into<String>) -> Self {
        Self::single(NO_LANGUAGE, value)
    }

    /// Parse a record language map: `{lang: string | [string, ...]}`.
    ///
    /// Non-string values, empty strings and keys left without values are dropped.
    pub fn from_json(v: &Value) -> Self {
        let mut m = Self::new();
        let Some(obj) = v.as_object() else {
            return m;
        };
        for (lang, vals) in obj {
            match vals {
                Value::String(s) => m.insert(lang.as_str(), s.as_str()),
                Value::Array(items) => {
                    for i in items {
                        if let Value::String(s) = i {
                            m.insert(lang.as_str(), s.as_str());
                        }
                    }
                }
                _ => {}
            }
        }
        m
    }

    /// Append `value` under `lang`. Blank values are ignored.
    pub fn insert(&mut self, lang: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        let lang = lang.into();
        match self.entries.iter_mut().find(|(k, _)| *k == lang) {
            Some((_, vals)) => vals.push(value),
            None => self.entries.push((lang, vec![value])),
        }
    }

    /// Merge `other` into `self`: values for existing keys are appended,
    /// new keys are added after the existing ones.
    pub fn merge(&mut self, other: &LanguageMap) {
        for (lang, vals) in &other.entries {
            for v in vals {
                self.insert(lang.as_str(), v.as_str());
            }
        }
    }

    /// Non-mutating merge.
    pub fn merged(mut self, other: &LanguageMap) -> Self {
        self.merge(other);
        self
    }

    /// Merge every map of `maps` in order.
    pub fn merge_all<'a, I>(maps: I) -> Self
    where
        I: IntoIterator<Item = &'a LanguageMap>,
    {
        maps.into_iter().fold(Self::new(), |acc, m| acc.merged(m))
    }

    pub fn get(&self, lang: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == lang)
            .map(|(_, v)| v.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of language keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Every (language, value) pair in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, vals)| vals.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// First value of the first key.
    pub fn first_value(&self) -> Option<&str> {
        self.pairs().next().map(|(_, v)| v)
    }

    /// Rewrite every value through `f`, keeping keys and order.
    pub fn map_values<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str, &str) -> LanguageMap,
    {
        let mut out = Self::new();
        for (lang, value) in self.pairs() {
            out.merge(&f(lang, value));
        }
        out
    }
}

impl Serialize for LanguageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
