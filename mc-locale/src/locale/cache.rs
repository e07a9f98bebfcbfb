// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local cache of language files
//!
//! Layout under the storage path:
//! - `locales/<locale>.json` for every downloaded locale (upstream name)
//! - `locales/en_us.hash` holding the SHA-1 of the client archive the
//!   archive locale was last extracted from
//! - `tmp_locale.jar` while the client archive is being downloaded
//!
//! Files are written atomically to prevent partial files on interruption.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::integrity::compute_file_sha1;
use super::table::LocaleStrings;
use super::types::ARCHIVE_LOCALE;

/// Local cache for language files
#[derive(Debug, Clone)]
pub struct LocaleCache {
    storage_path: PathBuf,
    locales_dir: PathBuf,
}

impl LocaleCache {
    /// Create a new locale cache at the given storage path
    ///
    /// Creates a `locales/` subdirectory if it doesn't exist.
    pub fn new(storage_path: &Path) -> Result<Self, CacheError> {
        let locales_dir = storage_path.join("locales");
        fs::create_dir_all(&locales_dir)?;
        Ok(Self {
            storage_path: storage_path.to_path_buf(),
            locales_dir,
        })
    }

    /// Directory holding the language files
    pub fn locales_dir(&self) -> &Path {
        &self.locales_dir
    }

    /// Path of the cached file for an upstream locale identifier
    pub fn locale_path(&self, locale: &str) -> PathBuf {
        self.locales_dir.join(format!("{}.json", locale))
    }

    /// Path of the archive hash marker
    pub fn marker_path(&self) -> PathBuf {
        self.locales_dir.join(format!("{}.hash", ARCHIVE_LOCALE))
    }

    /// Temporary location of the client archive during extraction
    pub fn archive_temp_path(&self) -> PathBuf {
        self.storage_path.join("tmp_locale.jar")
    }

    /// Whether a cached file exists for the locale
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locale_path(locale).is_file()
    }

    /// SHA-1 of the cached file
    pub fn locale_sha1(&self, locale: &str) -> Result<String, CacheError> {
        Ok(compute_file_sha1(&self.locale_path(locale))?)
    }

    /// Archive hash recorded by the last successful extraction
    pub fn read_marker(&self) -> Option<String> {
        let data = fs::read_to_string(self.marker_path()).ok()?;
        let line = data.lines().next()?.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }

    /// Record the archive hash of a successful extraction
    pub fn write_marker(&self, sha1: &str) -> Result<(), CacheError> {
        atomic_write(&self.marker_path(), sha1.as_bytes())
    }

    /// Save a language file
    pub fn save_locale(&self, locale: &str, data: &[u8]) -> Result<(), CacheError> {
        atomic_write(&self.locale_path(locale), data)
    }

    /// Read and parse a cached language file
    ///
    /// Returns `Ok(None)` if no file is cached. A file that exists but is not
    /// a flat JSON object is an error. Non-string values are stringified.
    pub fn read_locale(&self, locale: &str) -> Result<Option<LocaleStrings>, CacheError> {
        let path = self.locale_path(locale);
        if !path.is_file() {
            return Ok(None);
        }

        let data = fs::read(&path)?;
        parse_locale(&data).map(Some)
    }
}

/// Parse a flat JSON object of translation keys
pub fn parse_locale(data: &[u8]) -> Result<LocaleStrings, CacheError> {
    let value: serde_json::Value = serde_json::from_slice(data)?;
    let serde_json::Value::Object(object) = value else {
        return Err(CacheError::NotAnObject);
    };

    Ok(object
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect())
}

/// Atomic file write (write to temp, then rename)
///
/// Either the old content remains or the new content is fully written.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> Result<(), CacheError> {
    let temp_path = temp_sibling(path);
    fs::write(&temp_path, data)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// `<file name>.tmp` next to `path`
pub(crate) fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Errors that can occur with the locale cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Language file is valid JSON but not an object
    #[error("Language file is not a JSON object")]
    NotAnObject,
}
