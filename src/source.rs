// SPDX-License-Identifier: MPL-2.0
//! Dictionary source port.
//!
//! A [`DictionarySource`] is the seam a deferred
//! [`Localizer`](crate::localizer::Localizer) fetches dictionaries
//! through: bundled resources, a directory on disk, or a mock in tests.
//!
//! # Thread Safety
//!
//! Implementations must be `Send + Sync`; fetches run on the blocking
//! thread pool.

use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::store::TranslationStore;
use std::path::PathBuf;
use unic_langid::LanguageIdentifier;

/// Port for fetching one language's dictionary.
pub trait DictionarySource: Send + Sync {
    /// Fetches the dictionary for `language`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the language is not served by this
    /// source, or when the underlying resource cannot be read or parsed.
    fn fetch(&self, language: &LanguageIdentifier) -> Result<Dictionary>;

    /// Languages this source can serve.
    fn supported(&self) -> Vec<LanguageIdentifier>;
}

/// Serves dictionaries from the embedded translation store.
pub struct BundledSource {
    store: TranslationStore,
}

impl BundledSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: TranslationStore::bundled(),
        }
    }
}

impl Default for BundledSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionarySource for BundledSource {
    fn fetch(&self, language: &LanguageIdentifier) -> Result<Dictionary> {
        self.store
            .dictionary(language)
            .cloned()
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))
    }

    fn supported(&self) -> Vec<LanguageIdentifier> {
        self.store.available_languages().to_vec()
    }
}

/// Reads `<tag>.json` dictionaries from a directory on disk.
///
/// Lets a deployment replace or extend the bundled set without
/// rebuilding. An unreadable directory serves no languages.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl DictionarySource for DirectorySource {
    fn fetch(&self, language: &LanguageIdentifier) -> Result<Dictionary> {
        let path = self.dir.join(format!("{language}.json"));
        let text = std::fs::read_to_string(path)?;
        Dictionary::from_json(&text)
    }

    fn supported(&self) -> Vec<LanguageIdentifier> {
        let mut languages = Vec::new();
        if let Ok(entries) = std::fs::read_dir(&self.dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                        if let Ok(language) = stem.parse::<LanguageIdentifier>() {
                            languages.push(language);
                        }
                    }
                }
            }
        }
        languages.sort_by_key(ToString::to_string);
        languages
    }
}
