// SPDX-License-Identifier: MPL-2.0
//! `phrasebook` provides runtime string localization for client applications.
//!
//! Translations are nested JSON dictionaries, one per language, looked up
//! with dotted keys (`"home.title"`). A [`localizer::Localizer`] holds the
//! active language, resolves keys against its dictionary, and persists the
//! chosen language across sessions. Missing translations resolve to the key
//! itself so untranslated strings stay visible instead of failing.
//!
//! # Features
//!
//! - Bundled dictionaries embedded at compile time
//! - Synchronous (preloaded) and asynchronous (deferred) loading modes
//! - Last-requested-wins coordination of overlapping language changes
//! - Language detection from explicit request, saved settings, or OS locale

#![doc(html_root_url = "https://docs.rs/phrasebook/0.2.0")]

pub mod dictionary;
pub mod error;
pub mod localizer;
pub mod settings;
pub mod source;
pub mod store;
