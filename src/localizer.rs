// SPDX-License-Identifier: MPL-2.0
//! The localizer: active language state, dotted-key translation, and
//! persisted language selection.
//!
//! One [`Localizer`] covers both loading strategies:
//!
//! - [`Localizer::preloaded`] keeps every bundled dictionary resident and
//!   swaps on language change;
//! - [`Localizer::deferred`] fetches the active dictionary through a
//!   [`DictionarySource`] on the blocking pool.
//!
//! Every deferred load carries a sequence number. A load that finishes
//! after a newer one was issued is discarded, so the last requested
//! language always wins regardless of completion order.
//!
//! The handle is cheap to clone and shares its state; pass it explicitly
//! to every consumer that needs translations.

use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::settings::{self, Settings};
use crate::source::DictionarySource;
use crate::store::TranslationStore;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;
use unic_langid::LanguageIdentifier;

/// Language used when nothing else is requested, persisted, or detected.
pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    Ready,
}

struct Shared {
    language: LanguageIdentifier,
    dictionary: Dictionary,
    phase: Phase,
    /// Sequence number of the most recently issued load.
    issued: u64,
}

#[derive(Clone)]
enum Mode {
    Preloaded(Arc<TranslationStore>),
    Deferred(Arc<dyn DictionarySource>),
}

/// Shared localization state handle.
#[derive(Clone)]
pub struct Localizer {
    shared: Arc<Mutex<Shared>>,
    notify: Arc<Notify>,
    mode: Mode,
    supported: Arc<Vec<LanguageIdentifier>>,
    default_language: LanguageIdentifier,
    settings_path: Option<PathBuf>,
}

impl Localizer {
    /// Creates a localizer over the bundled store; every language change
    /// is an instant dictionary swap.
    ///
    /// `requested` (e.g. a `--lang` CLI flag) takes priority over the
    /// persisted settings and the OS locale.
    #[must_use]
    pub fn preloaded(store: TranslationStore, requested: Option<String>) -> Self {
        Self::preloaded_with_settings(store, requested, None)
    }

    /// Same as [`Localizer::preloaded`], with an explicit settings path
    /// (for tests and portable deployments).
    #[must_use]
    pub fn preloaded_with_settings(
        store: TranslationStore,
        requested: Option<String>,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let supported = store.available_languages().to_vec();
        let store = Arc::new(store);
        let localizer = Self::new(
            Mode::Preloaded(Arc::clone(&store)),
            supported,
            requested,
            settings_path,
        );
        {
            let mut shared = localizer.state();
            shared.dictionary = store
                .dictionary(&shared.language)
                .cloned()
                .unwrap_or_default();
            shared.phase = Phase::Ready;
        }
        localizer
    }

    /// Creates a localizer that fetches dictionaries through `source`.
    ///
    /// Construction performs the initial load and returns once the
    /// dictionary for the resolved language is installed, so consumers
    /// never observe a half-initialized localizer.
    ///
    /// Must be called inside a Tokio runtime.
    pub async fn deferred(source: Arc<dyn DictionarySource>, requested: Option<String>) -> Self {
        Self::deferred_with_settings(source, requested, None).await
    }

    /// Same as [`Localizer::deferred`], with an explicit settings path.
    pub async fn deferred_with_settings(
        source: Arc<dyn DictionarySource>,
        requested: Option<String>,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let supported = source.supported();
        let localizer = Self::new(Mode::Deferred(source), supported, requested, settings_path);
        let language = localizer.current_language();
        localizer.begin_load(language);
        localizer.ready().await;
        localizer
    }

    fn new(
        mode: Mode,
        supported: Vec<LanguageIdentifier>,
        requested: Option<String>,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let default_language: LanguageIdentifier = DEFAULT_LANGUAGE.parse().unwrap();
        let stored = match &settings_path {
            Some(path) => settings::load_from_path(path).unwrap_or_default(),
            None => settings::load().unwrap_or_default(),
        };
        let language = resolve_language(requested, &stored, &supported)
            .unwrap_or_else(|| default_language.clone());

        Self {
            shared: Arc::new(Mutex::new(Shared {
                language,
                dictionary: Dictionary::default(),
                phase: Phase::Loading,
                issued: 0,
            })),
            notify: Arc::new(Notify::new()),
            mode,
            supported: Arc::new(supported),
            default_language,
            settings_path,
        }
    }

    /// Resolves `key` against the active dictionary, falling back to the
    /// key itself when no translation exists.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        self.state().dictionary.resolve(key).to_string()
    }

    /// The currently active language.
    #[must_use]
    pub fn current_language(&self) -> LanguageIdentifier {
        self.state().language.clone()
    }

    /// Languages this localizer can activate, sorted by tag.
    #[must_use]
    pub fn available_languages(&self) -> Vec<LanguageIdentifier> {
        self.supported.as_ref().clone()
    }

    /// Every leaf key of the active dictionary in dotted form, sorted.
    #[must_use]
    pub fn translation_keys(&self) -> Vec<String> {
        self.state().dictionary.keys()
    }

    /// `false` while a load is in flight. Consumers can use this to hold
    /// off rendering until translations are present.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state().phase == Phase::Ready
    }

    /// Waits until the active dictionary is installed.
    pub async fn ready(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_ready() {
                return;
            }
            notified.await;
        }
    }

    /// Activates `language`.
    ///
    /// An unsupported tag is rejected and leaves the active language,
    /// dictionary, and persisted preference untouched. In deferred mode
    /// the load runs in the background (inside the Tokio runtime);
    /// [`Localizer::ready`] resolves once it lands. Accepted changes are
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLanguage`] when `language` is not in
    /// the supported set.
    pub fn set_language(&self, language: &LanguageIdentifier) -> Result<()> {
        if !self.supported.contains(language) {
            return Err(Error::UnsupportedLanguage(language.to_string()));
        }
        match &self.mode {
            Mode::Preloaded(store) => {
                let dictionary = store.dictionary(language).cloned().unwrap_or_default();
                {
                    let mut shared = self.state();
                    shared.language = language.clone();
                    shared.dictionary = dictionary;
                    shared.phase = Phase::Ready;
                }
                self.persist_language(language);
                self.notify.notify_waiters();
                Ok(())
            }
            Mode::Deferred(_) => {
                self.begin_load(language.clone());
                Ok(())
            }
        }
    }

    /// Issues a sequence-numbered load for `language` on the blocking
    /// pool. Only the most recently issued load may install its result.
    fn begin_load(&self, language: LanguageIdentifier) {
        let source = match &self.mode {
            Mode::Deferred(source) => Arc::clone(source),
            Mode::Preloaded(_) => return,
        };
        let seq = {
            let mut shared = self.state();
            shared.issued += 1;
            shared.phase = Phase::Loading;
            shared.issued
        };
        let localizer = self.clone();
        tokio::spawn(async move {
            let fetched = {
                let source = Arc::clone(&source);
                let target = language.clone();
                tokio::task::spawn_blocking(move || source.fetch(&target)).await
            };
            match fetched {
                Ok(Ok(dictionary)) => localizer.install(seq, language, dictionary),
                Ok(Err(error)) => {
                    eprintln!("Failed to load dictionary for {language}: {error}");
                    localizer.fall_back(seq, &source).await;
                }
                Err(join_error) => {
                    eprintln!("Dictionary load for {language} aborted: {join_error}");
                    localizer.fall_back(seq, &source).await;
                }
            }
        });
    }

    /// Recovers from a failed load by installing the default language's
    /// dictionary. The active language and the persisted preference move
    /// to the default as well, so content and preference never diverge.
    async fn fall_back(&self, seq: u64, source: &Arc<dyn DictionarySource>) {
        let fetched = {
            let source = Arc::clone(source);
            let target = self.default_language.clone();
            tokio::task::spawn_blocking(move || source.fetch(&target)).await
        };
        let dictionary = match fetched {
            Ok(Ok(dictionary)) => dictionary,
            Ok(Err(error)) => {
                eprintln!(
                    "Failed to load dictionary for {}: {error}",
                    self.default_language
                );
                Dictionary::default()
            }
            Err(join_error) => {
                eprintln!(
                    "Dictionary load for {} aborted: {join_error}",
                    self.default_language
                );
                Dictionary::default()
            }
        };
        self.install(seq, self.default_language.clone(), dictionary);
    }

    /// Installs a finished load unless a newer one was issued since.
    fn install(&self, seq: u64, language: LanguageIdentifier, dictionary: Dictionary) {
        {
            let mut shared = self.state();
            if seq != shared.issued {
                return; // superseded by a newer request
            }
            shared.language = language.clone();
            shared.dictionary = dictionary;
            shared.phase = Phase::Ready;
        }
        self.persist_language(&language);
        self.notify.notify_waiters();
    }

    fn persist_language(&self, language: &LanguageIdentifier) {
        let mut stored = match &self.settings_path {
            Some(path) => settings::load_from_path(path).unwrap_or_default(),
            None => settings::load().unwrap_or_default(),
        };
        stored.language = Some(language.to_string());
        let saved = match &self.settings_path {
            Some(path) => settings::save_to_path(&stored, path),
            None => settings::save(&stored),
        };
        if let Err(error) = saved {
            eprintln!("Failed to save settings: {error}");
        }
    }

    fn state(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().expect("localizer state lock poisoned")
    }
}

/// Picks the initial language: explicit request, then persisted
/// settings, then the OS locale. Each candidate is accepted only when it
/// is in the supported set.
fn resolve_language(
    requested: Option<String>,
    stored: &Settings,
    supported: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. Explicit request (CLI flag or caller choice)
    if let Some(tag) = requested {
        if let Ok(language) = tag.parse::<LanguageIdentifier>() {
            if supported.contains(&language) {
                return Some(language);
            }
        }
    }

    // 2. Persisted settings
    if let Some(tag) = &stored.language {
        if let Ok(language) = tag.parse::<LanguageIdentifier>() {
            if supported.contains(&language) {
                return Some(language);
            }
        }
    }

    // 3. OS locale
    if let Some(tag) = sys_locale::get_locale() {
        if let Ok(language) = tag.parse::<LanguageIdentifier>() {
            if supported.contains(&language) {
                return Some(language);
            }
        }
    }

    None
}
