// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Minecraft language file cache
//!
//! Provides functionality for:
//! - Resolving the asset index of the configured game version
//! - Downloading per-locale JSON files from the content-addressed store
//! - Extracting `en_us` from the client archive
//! - Translating keys with fallback to the default locale
//!
//! Cached files are verified using SHA-1 hashes published by the upstream
//! asset index, so unchanged files are never downloaded twice.

mod alias;
mod cache;
mod config;
mod fetcher;
mod integrity;
mod manager;
mod resolver;
mod table;
mod types;

pub use alias::{is_valid, normalize, to_platform, to_upstream};
pub use cache::{CacheError, LocaleCache};
pub use config::LocaleConfig;
pub use fetcher::{extract_archive_entry, FetchError, HttpSource, ReqwestSource, StubSource};
pub use integrity::{compute_file_sha1, compute_sha1, verify_sha1, IntegrityError};
pub use manager::{DownloadOutcome, LoadOutcome, LocaleError, LocaleManager};
pub use resolver::{resolve_assets, ResolveError, ResolvedAssets};
pub use table::{LocaleStrings, LocaleTable};
pub use types::{
    AssetDescriptor, AssetIndex, AssetIndexRef, LatestVersion, VersionDetail, VersionDownload,
    VersionEntry, VersionManifest, ARCHIVE_LOCALE, ARCHIVE_LOCALE_ENTRY, LOCALE_ASSET_PREFIX,
};
