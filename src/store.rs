// SPDX-License-Identifier: MPL-2.0
//! Bundled translation store.
//!
//! Every supported dictionary ships embedded in the binary, one JSON
//! resource per language under `assets/i18n/`. The store is assembled
//! once at startup and never mutated afterwards; adding a language means
//! adding a resource file, nothing else.

use crate::dictionary::Dictionary;
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Immutable mapping from language identifier to its bundled dictionary.
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    dictionaries: HashMap<LanguageIdentifier, Dictionary>,
    available: Vec<LanguageIdentifier>,
}

impl TranslationStore {
    /// Builds the store from the dictionaries embedded at compile time.
    ///
    /// A resource that fails to parse is skipped with a warning so one
    /// bad file cannot take down every other language.
    #[must_use]
    pub fn bundled() -> Self {
        let mut dictionaries = HashMap::new();
        let mut available = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            if let Some(tag) = filename.strip_suffix(".json") {
                if let Ok(language) = tag.parse::<LanguageIdentifier>() {
                    if let Some(content) = Asset::get(filename) {
                        let text = String::from_utf8_lossy(content.data.as_ref());
                        match Dictionary::from_json(&text) {
                            Ok(dictionary) => {
                                dictionaries.insert(language.clone(), dictionary);
                                available.push(language);
                            }
                            Err(error) => {
                                eprintln!("Skipping bundled dictionary {filename}: {error}");
                            }
                        }
                    }
                }
            }
        }

        available.sort_by_key(ToString::to_string);
        Self {
            dictionaries,
            available,
        }
    }

    /// Returns the dictionary for `language`, or `None` when unsupported.
    #[must_use]
    pub fn dictionary(&self, language: &LanguageIdentifier) -> Option<&Dictionary> {
        self.dictionaries.get(language)
    }

    /// Languages with a bundled dictionary, sorted by tag.
    #[must_use]
    pub fn available_languages(&self) -> &[LanguageIdentifier] {
        &self.available
    }

    /// `true` when `language` has a bundled dictionary.
    #[must_use]
    pub fn supports(&self, language: &LanguageIdentifier) -> bool {
        self.dictionaries.contains_key(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> LanguageIdentifier {
        s.parse().expect("test tag must parse")
    }

    #[test]
    fn bundled_store_contains_shipped_languages() {
        let store = TranslationStore::bundled();
        assert!(store.supports(&tag("en-US")));
        assert!(store.supports(&tag("he-IL")));
        assert!(store.supports(&tag("de")));
    }

    #[test]
    fn available_languages_are_sorted() {
        let store = TranslationStore::bundled();
        let tags: Vec<String> = store
            .available_languages()
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
        assert!(!tags.is_empty());
    }

    #[test]
    fn unsupported_language_yields_none() {
        let store = TranslationStore::bundled();
        assert!(store.dictionary(&tag("fr-FR")).is_none());
        assert!(!store.supports(&tag("fr-FR")));
    }

    #[test]
    fn bundled_dictionaries_resolve_shared_keys() {
        let store = TranslationStore::bundled();
        for language in store.available_languages() {
            let dictionary = store.dictionary(language).expect("listed language present");
            assert!(
                dictionary.get("home.title").is_some(),
                "home.title missing in {language}"
            );
        }
    }
}
