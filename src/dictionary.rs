// SPDX-License-Identifier: MPL-2.0
//! Nested translation dictionaries and dotted-key lookup.
//!
//! A [`Dictionary`] is a tree of string leaves and nested tables, parsed
//! from a JSON document. Lookup walks a dotted key (`"home.title"`) one
//! segment at a time; [`Dictionary::resolve`] is total and falls back to
//! the key itself, so a missing translation surfaces as a visible raw key
//! rather than an error.

use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;

/// One node of a dictionary: a translated string or a nested table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Leaf(String),
    Table(HashMap<String, Entry>),
}

/// Tree-shaped mapping from keys to translated strings for one language.
///
/// Acyclic by construction: parsed from a static JSON document. Values
/// that are neither strings nor objects are rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    root: HashMap<String, Entry>,
}

impl Dictionary {
    /// Parses a dictionary from its JSON source text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Looks up a dotted key, descending through nested tables.
    ///
    /// Returns `None` when any segment is missing, when a segment lands
    /// on a leaf before the path is exhausted, or when the final value
    /// is a table rather than a string.
    #[must_use]
    pub fn get(&self, dotted_key: &str) -> Option<&str> {
        let mut segments = dotted_key.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            match current {
                Entry::Table(table) => current = table.get(segment)?,
                Entry::Leaf(_) => return None,
            }
        }
        match current {
            Entry::Leaf(text) => Some(text),
            Entry::Table(_) => None,
        }
    }

    /// Total lookup: the translation for `dotted_key`, or the key itself
    /// when no translation exists.
    #[must_use]
    pub fn resolve<'a>(&'a self, dotted_key: &'a str) -> &'a str {
        self.get(dotted_key).unwrap_or(dotted_key)
    }

    /// `true` when the dictionary holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of string leaves across the whole tree.
    #[must_use]
    pub fn len(&self) -> usize {
        count_leaves(&self.root)
    }

    /// Every leaf key in dotted form, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.root, "", &mut keys);
        keys.sort();
        keys
    }
}

fn count_leaves(table: &HashMap<String, Entry>) -> usize {
    table
        .values()
        .map(|entry| match entry {
            Entry::Leaf(_) => 1,
            Entry::Table(inner) => count_leaves(inner),
        })
        .sum()
}

fn collect_keys(table: &HashMap<String, Entry>, prefix: &str, out: &mut Vec<String>) {
    for (key, entry) in table {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match entry {
            Entry::Leaf(_) => out.push(dotted),
            Entry::Table(inner) => collect_keys(inner, &dotted, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        Dictionary::from_json(r#"{"home": {"title": "Welcome"}}"#).expect("sample must parse")
    }

    #[test]
    fn resolves_nested_leaf() {
        assert_eq!(sample().resolve("home.title"), "Welcome");
    }

    #[test]
    fn missing_key_echoes_back() {
        assert_eq!(sample().resolve("home.subtitle"), "home.subtitle");
    }

    #[test]
    fn path_through_leaf_echoes_back() {
        // "home.title" is a leaf; descending further must not panic.
        assert_eq!(sample().resolve("home.title.extra"), "home.title.extra");
    }

    #[test]
    fn key_landing_on_table_echoes_back() {
        assert_eq!(sample().resolve("home"), "home");
    }

    #[test]
    fn empty_key_echoes_back() {
        assert_eq!(sample().resolve(""), "");
    }

    #[test]
    fn top_level_leaf_resolves() {
        let dictionary = Dictionary::from_json(r#"{"greeting": "Hello"}"#).unwrap();
        assert_eq!(dictionary.resolve("greeting"), "Hello");
    }

    #[test]
    fn deeply_nested_lookup() {
        let dictionary =
            Dictionary::from_json(r#"{"a": {"b": {"c": {"d": "deep"}}}}"#).unwrap();
        assert_eq!(dictionary.resolve("a.b.c.d"), "deep");
        assert_eq!(dictionary.resolve("a.b.c"), "a.b.c");
        assert_eq!(dictionary.resolve("a.b.x.d"), "a.b.x.d");
    }

    #[test]
    fn non_string_values_fail_to_parse() {
        assert!(Dictionary::from_json(r#"{"count": 3}"#).is_err());
        assert!(Dictionary::from_json(r#"{"flags": [true]}"#).is_err());
        assert!(Dictionary::from_json("[]").is_err());
    }

    #[test]
    fn len_counts_leaves_not_tables() {
        let dictionary = Dictionary::from_json(
            r#"{"a": "1", "b": {"c": "2", "d": {"e": "3"}}}"#,
        )
        .unwrap();
        assert_eq!(dictionary.len(), 3);
        assert!(!dictionary.is_empty());
    }

    #[test]
    fn keys_are_flattened_and_sorted() {
        let dictionary = Dictionary::from_json(
            r#"{"b": {"y": "2", "x": "1"}, "a": "0"}"#,
        )
        .unwrap();
        assert_eq!(dictionary.keys(), vec!["a", "b.x", "b.y"]);
    }

    #[test]
    fn empty_document_is_empty() {
        let dictionary = Dictionary::from_json("{}").unwrap();
        assert!(dictionary.is_empty());
        assert_eq!(dictionary.len(), 0);
        assert_eq!(dictionary.resolve("anything"), "anything");
    }
}
