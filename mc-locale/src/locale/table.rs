// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory translation table
//!
//! Maps platform locale identifiers to their key → string mappings. Each
//! mapping is shared behind an `Arc` and replaced whole, so a reader holds
//! either the old or the new mapping, never a mix.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Translation strings of one locale
pub type LocaleStrings = HashMap<String, String>;

/// Process-wide translation table
#[derive(Debug, Default)]
pub struct LocaleTable {
    locales: RwLock<HashMap<String, Arc<LocaleStrings>>>,
}

impl LocaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or replace) the strings of a locale
    ///
    /// The identifier is lowercased. Returns the mapping that was replaced.
    pub fn install(&self, locale: &str, strings: LocaleStrings) -> Option<Arc<LocaleStrings>> {
        self.locales
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(locale.to_lowercase(), Arc::new(strings))
    }

    /// Snapshot of a locale's strings
    pub fn get(&self, locale: &str) -> Option<Arc<LocaleStrings>> {
        self.locales
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&locale.to_lowercase())
            .cloned()
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.get(locale).is_some()
    }

    /// Sorted identifiers of installed locales
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self
            .locales
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        locales.sort();
        locales
    }

    /// Translate `key` into `locale`, falling back to `default_locale`
    ///
    /// Returns `None` when neither locale is installed. A key missing from
    /// the selected mapping translates to itself.
    pub fn lookup(&self, key: &str, locale: &str, default_locale: &str) -> Option<String> {
        let strings = self.get(locale).or_else(|| self.get(default_locale))?;
        Some(strings.get(key).cloned().unwrap_or_else(|| key.to_string()))
    }
}
