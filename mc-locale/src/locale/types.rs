// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Upstream launcher metadata types
//!
//! These types mirror the JSON documents published for the game launcher:
//! the global version manifest, the per-version detail document and the
//! asset index. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Asset path prefix under which language files are published
pub const LOCALE_ASSET_PREFIX: &str = "minecraft/lang/";

/// Locale that is not in the asset index and ships inside the client archive
pub const ARCHIVE_LOCALE: &str = "en_us";

/// Path of the archive locale inside the client archive
pub const ARCHIVE_LOCALE_ENTRY: &str = "assets/minecraft/lang/en_us.json";

/// Global version manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionManifest {
    /// Latest release and snapshot identifiers
    #[serde(default)]
    pub latest: Option<LatestVersion>,
    /// Every known game version, newest first
    pub versions: Vec<VersionEntry>,
}

impl VersionManifest {
    /// Find the detail document URL for a version id (first match wins)
    pub fn find(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }
}

/// Latest version identifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestVersion {
    /// Latest release id
    pub release: String,
    /// Latest snapshot id
    pub snapshot: String,
}

/// One entry of the version manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Version id, e.g. "1.20.4"
    pub id: String,
    /// URL of the version detail document
    pub url: String,
    /// "release", "snapshot", "old_beta", ...
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Per-version detail document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDetail {
    #[serde(default)]
    pub id: String,
    /// Reference to the asset index document
    #[serde(rename = "assetIndex")]
    pub asset_index: AssetIndexRef,
    /// Downloadable packages keyed by name ("client", "server", ...)
    #[serde(default)]
    pub downloads: HashMap<String, VersionDownload>,
}

/// Reference to an asset index document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetIndexRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub sha1: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "totalSize", default)]
    pub total_size: u64,
    pub url: String,
}

/// Download descriptor of a packaged archive
///
/// The client archive is the source of the [`ARCHIVE_LOCALE`] file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDownload {
    /// SHA-1 of the whole archive
    pub sha1: String,
    /// Archive size in bytes
    pub size: u64,
    /// Download URL
    pub url: String,
}

/// A content-addressed asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// SHA-1 of the asset contents (lowercase hex)
    pub hash: String,
    /// Size in bytes
    pub size: u64,
}

impl AssetDescriptor {
    /// Path of this asset in the content-addressed store: `ab/abcdef...`
    pub fn store_path(&self) -> String {
        let shard = self.hash.get(..2).unwrap_or(&self.hash);
        format!("{}/{}", shard, self.hash)
    }
}

/// Language assets of one game version, keyed by full asset path
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    entries: HashMap<String, AssetDescriptor>,
}

impl AssetIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an asset; paths outside [`LOCALE_ASSET_PREFIX`] are ignored
    ///
    /// Returns true if the entry was retained.
    pub fn insert(&mut self, path: &str, asset: AssetDescriptor) -> bool {
        if !path.starts_with(LOCALE_ASSET_PREFIX) {
            return false;
        }
        self.entries.insert(path.to_string(), asset);
        true
    }

    /// Look up the asset of an upstream locale identifier
    pub fn locale_asset(&self, upstream_locale: &str) -> Option<&AssetDescriptor> {
        self.entries.get(&locale_asset_path(upstream_locale))
    }

    /// Look up an asset by its full path
    pub fn get(&self, path: &str) -> Option<&AssetDescriptor> {
        self.entries.get(path)
    }

    /// Sorted upstream locale identifiers present in the index
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self
            .entries
            .keys()
            .filter_map(|path| path.strip_prefix(LOCALE_ASSET_PREFIX))
            .filter_map(|file| file.strip_suffix(".json"))
            .map(str::to_string)
            .collect();
        locales.sort();
        locales
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Asset path of a locale file: `minecraft/lang/<locale>.json`
pub fn locale_asset_path(upstream_locale: &str) -> String {
    format!("{}{}.json", LOCALE_ASSET_PREFIX, upstream_locale)
}
