//! Locale Manager - orchestrates language file loading
//!
//! The LocaleManager is the main entry point for the locale system.
//! It coordinates between:
//! - Asset resolution (once, in the background)
//! - Cached language files (preferred while their hash matches)
//! - Remote language files (fetched when stale or absent)
//! - The in-memory translation table
//!
//! Nothing here panics or returns an error to the host: the `try_*`
//! methods report precise failures, and the plain methods log them and
//! degrade to echoing translation keys.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::alias::{is_valid, to_platform, to_upstream};
use super::cache::{CacheError, LocaleCache};
use super::config::LocaleConfig;
use super::fetcher::{extract_archive_entry, FetchError, HttpSource, ReqwestSource};
use super::integrity::{compute_file_sha1, verify_sha1, IntegrityError};
use super::resolver::{resolve_assets, ResolveError, ResolvedAssets};
use super::table::LocaleTable;
use super::types::{
    AssetDescriptor, AssetIndex, VersionDownload, ARCHIVE_LOCALE, ARCHIVE_LOCALE_ENTRY,
};

/// Result of bringing a cached language file up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Cached file matches the upstream hash; nothing downloaded
    CacheHit,
    /// A fresh file was downloaded into the cache
    Downloaded,
    /// Cached archive locale used as-is because the client archive is unknown
    Unverified,
    /// Locale is absent from the asset index; only the local cache was used
    LocalOnly,
}

/// Result of loading a cached language file into the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// File parsed and installed
    Loaded,
    /// No cached file
    Missing,
}

/// Manages asset resolution, the cache and the translation table
pub struct LocaleManager {
    config: LocaleConfig,
    cache: LocaleCache,
    source: Arc<dyn HttpSource>,
    table: LocaleTable,
    assets: OnceLock<ResolvedAssets>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LocaleManager {
    /// Create a new LocaleManager fetching through `source`
    pub fn new(config: LocaleConfig, source: Arc<dyn HttpSource>) -> Result<Self, LocaleError> {
        let cache = LocaleCache::new(&config.storage_path)?;
        Ok(Self {
            config,
            cache,
            source,
            table: LocaleTable::new(),
            assets: OnceLock::new(),
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Create a new LocaleManager fetching over HTTP
    pub fn with_reqwest(config: LocaleConfig) -> Result<Self, LocaleError> {
        let source = ReqwestSource::new(&config)?;
        Self::new(config, Arc::new(source))
    }

    /// Startup ordering hook; does nothing
    pub fn init(&self) {}

    /// Resolve assets in the background, then load the default locale
    ///
    /// Must be called from within a tokio runtime. Resolution failures are
    /// logged; the manager then serves cached files only.
    pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = manager.resolve() {
                error!(error = %e, "Failed to resolve language assets");
            }
            let default_locale = manager.config.default_locale.clone();
            manager.download_and_load(&default_locale);
        })
    }

    /// Resolve the asset index and client archive of the game version
    ///
    /// Runs at most once; later calls return `Ok(())` without network
    /// access. On failure whatever was collected before the error is kept.
    pub fn resolve(&self) -> Result<(), ResolveError> {
        let mut result = Ok(());
        self.assets.get_or_init(|| {
            let mut out = ResolvedAssets::default();
            result = resolve_assets(self.source.as_ref(), &self.config, &mut out);
            out
        });
        result
    }

    /// Whether resolution has run (successfully or not)
    pub fn is_resolved(&self) -> bool {
        self.assets.get().is_some()
    }

    /// Resolved language assets, if resolution has run
    pub fn asset_index(&self) -> Option<&AssetIndex> {
        self.assets.get().map(|a| &a.index)
    }

    /// Resolved client archive, if known
    pub fn client_download(&self) -> Option<&VersionDownload> {
        self.assets.get().and_then(|a| a.client.as_ref())
    }

    /// Download (if stale) and load a locale, logging any failure
    pub fn download_and_load(&self, locale: &str) {
        match self.try_download_and_load(locale) {
            Ok(DownloadOutcome::LocalOnly) => {
                debug!(locale = %locale, "Loaded locale locally while not being in asset index")
            }
            Ok(outcome) => debug!(locale = %locale, ?outcome, "Loaded locale"),
            Err(LocaleError::UnknownLocale(upstream)) => {
                warn!(locale = %upstream, "Invalid locale, no asset or cached file")
            }
            Err(LocaleError::MissingAfterDownload(upstream)) => {
                warn!(locale = %upstream, "Locale file missing after download")
            }
            Err(e) => error!(locale = %locale, error = %e, "Failed to load locale"),
        }
    }

    /// Download (if stale) and load a locale
    ///
    /// Locales absent from the asset index (other than the archive locale)
    /// are only loaded from the cache and never refreshed. When a download
    /// fails, any stale cached file is still loaded before the error is
    /// returned.
    ///
    /// Identifiers that are not `[a-z0-9_]+` tokens are rejected as unknown
    /// without touching the filesystem.
    pub fn try_download_and_load(&self, locale: &str) -> Result<DownloadOutcome, LocaleError> {
        let upstream = to_upstream(locale);
        if !is_valid(&upstream) {
            return Err(LocaleError::UnknownLocale(upstream));
        }

        let lock = self.locale_lock(&upstream);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.download_and_load_locked(&upstream)
        };
        self.release_locale_lock(&upstream, lock);
        result
    }

    fn download_and_load_locked(&self, upstream: &str) -> Result<DownloadOutcome, LocaleError> {
        let upstream = upstream.to_string();

        if upstream != ARCHIVE_LOCALE && self.asset(&upstream).is_none() {
            return match self.load_locale(&upstream)? {
                LoadOutcome::Loaded => Ok(DownloadOutcome::LocalOnly),
                LoadOutcome::Missing => Err(LocaleError::UnknownLocale(upstream)),
            };
        }

        debug!(locale = %upstream, "Downloading and loading locale");
        let downloaded = self.download_locale(&upstream);
        let loaded = self.load_locale(&upstream)?;
        let outcome = downloaded?;

        match loaded {
            LoadOutcome::Loaded => Ok(outcome),
            LoadOutcome::Missing => Err(LocaleError::MissingAfterDownload(upstream)),
        }
    }

    /// Bring the cached file of an upstream locale up to date
    ///
    /// Caller must hold the per-locale lock.
    fn download_locale(&self, upstream: &str) -> Result<DownloadOutcome, LocaleError> {
        let is_archive = upstream == ARCHIVE_LOCALE;

        if self.cache.has_locale(upstream) {
            let (current, target) = if is_archive {
                let Some(client) = self.client_download() else {
                    debug!("Skipping {} hash check as client archive is unknown", ARCHIVE_LOCALE);
                    return Ok(DownloadOutcome::Unverified);
                };
                (self.cache.read_marker().unwrap_or_default(), client.sha1.clone())
            } else {
                let asset = self
                    .asset(upstream)
                    .ok_or_else(|| LocaleError::UnknownLocale(upstream.to_string()))?;
                (self.cache.locale_sha1(upstream)?, asset.hash.clone())
            };

            if current.eq_ignore_ascii_case(&target) {
                debug!(locale = %upstream, "Locale already downloaded and up to date");
                return Ok(DownloadOutcome::CacheHit);
            }
            debug!(locale = %upstream, "Locale out of date; re-downloading");
        }

        if is_archive {
            self.download_archive_locale()?;
        } else {
            let asset = self
                .asset(upstream)
                .ok_or_else(|| LocaleError::UnknownLocale(upstream.to_string()))?
                .clone();
            self.download_asset_locale(upstream, &asset)?;
        }
        Ok(DownloadOutcome::Downloaded)
    }

    /// Parse a cached language file and install it into the table
    ///
    /// The table key is the platform name of `upstream`. A missing file is
    /// not an error; an unreadable or malformed one is, and leaves the
    /// table untouched.
    pub fn load_locale(&self, upstream: &str) -> Result<LoadOutcome, LocaleError> {
        if !is_valid(upstream) {
            return Err(LocaleError::UnknownLocale(upstream.to_string()));
        }

        let strings = self
            .cache
            .read_locale(upstream)
            .map_err(|source| LocaleError::MalformedLocale {
                locale: upstream.to_string(),
                source,
            })?;

        let Some(strings) = strings else {
            return Ok(LoadOutcome::Missing);
        };

        self.table.install(&to_platform(upstream), strings);
        Ok(LoadOutcome::Loaded)
    }

    /// Translate `key` into `locale`, falling back to the default locale
    ///
    /// Returns `key` unchanged when no translation is available.
    pub fn translate(&self, key: &str, locale: &str) -> String {
        match self
            .table
            .lookup(key, &to_platform(locale), &self.config.default_locale)
        {
            Some(s) => s,
            None => {
                debug!(locale = %self.config.default_locale, "Missing default locale");
                key.to_string()
            }
        }
    }

    /// Sorted platform identifiers of loaded locales
    pub fn loaded_locales(&self) -> Vec<String> {
        self.table.locales()
    }

    pub fn is_loaded(&self, locale: &str) -> bool {
        self.table.contains(&to_platform(locale))
    }

    /// Get access to the translation table
    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    /// Get access to the cache
    pub fn cache(&self) -> &LocaleCache {
        &self.cache
    }

    /// Get the configuration
    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    fn asset(&self, upstream: &str) -> Option<&AssetDescriptor> {
        self.asset_index()?.locale_asset(upstream)
    }

    fn locale_lock(&self, upstream: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(upstream.to_string()).or_default())
    }

    /// Drop a per-locale lock, removing it from the map once unused
    ///
    /// Clones are only handed out under the map lock, so a count of one
    /// means no other caller holds or waits on it.
    fn release_locale_lock(&self, upstream: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        if locks
            .get(upstream)
            .is_some_and(|l| Arc::strong_count(l) == 1)
        {
            locks.remove(upstream);
        }
    }

    fn download_asset_locale(
        &self,
        upstream: &str,
        asset: &AssetDescriptor,
    ) -> Result<(), LocaleError> {
        let url = format!(
            "{}/{}",
            self.config.resources_url.trim_end_matches('/'),
            asset.store_path()
        );
        let data = self.source.get(&url)?;
        verify_sha1(&data, &asset.hash)?;
        self.cache.save_locale(upstream, &data)?;
        Ok(())
    }

    fn download_archive_locale(&self) -> Result<(), LocaleError> {
        let client = self
            .client_download()
            .ok_or(LocaleError::NoArchiveDescriptor)?;

        info!("Downloading client archive to extract {}", ARCHIVE_LOCALE);
        debug!(url = %client.url, size = client.size, "Client archive");

        let temp_path = self.cache.archive_temp_path();
        let result = self.extract_from_archive(client, &temp_path);
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(&temp_path) {
                warn!(path = %temp_path.display(), error = %e, "Failed to remove client archive");
            }
        }
        result?;

        info!("Extracted {} from client archive", ARCHIVE_LOCALE);
        Ok(())
    }

    fn extract_from_archive(
        &self,
        client: &VersionDownload,
        temp_path: &Path,
    ) -> Result<(), LocaleError> {
        self.source.download_to(&client.url, temp_path)?;

        let actual = compute_file_sha1(temp_path).map_err(CacheError::from)?;
        if !actual.eq_ignore_ascii_case(&client.sha1) {
            return Err(IntegrityError::HashMismatch {
                expected: client.sha1.clone(),
                actual,
            }
            .into());
        }

        extract_archive_entry(
            temp_path,
            ARCHIVE_LOCALE_ENTRY,
            &self.cache.locale_path(ARCHIVE_LOCALE),
            self.config.max_content_size,
        )?;
        self.cache.write_marker(&client.sha1)?;
        Ok(())
    }
}

/// Errors that can occur with the locale manager
#[derive(Debug, Error)]
pub enum LocaleError {
    /// Cache error
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Fetch error (network/remote/archive)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Downloaded content failed verification
    #[error("Integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// Asset resolution failed
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Locale has neither an upstream asset nor a cached file
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// Download reported success but no file is cached
    #[error("Locale file missing after download: {0}")]
    MissingAfterDownload(String),

    /// Cached file exists but could not be read or parsed
    #[error("Malformed locale file {locale}: {source}")]
    MalformedLocale {
        /// Upstream locale identifier
        locale: String,
        /// Underlying cache error
        #[source]
        source: CacheError,
    },

    /// The client archive descriptor was not resolved
    #[error("Client archive descriptor unavailable")]
    NoArchiveDescriptor,
}
