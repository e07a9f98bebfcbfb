//! Asset resolution for the configured game version
//!
//! Walks version manifest → version detail → asset index and collects the
//! client archive descriptor plus every language asset. Results are written
//! into the caller's [`ResolvedAssets`] as they are found, so a failure
//! midway keeps whatever was already collected.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::LocaleConfig;
use super::fetcher::{FetchError, HttpSource};
use super::types::{
    AssetDescriptor, AssetIndex, VersionDetail, VersionDownload, VersionManifest,
    LOCALE_ASSET_PREFIX,
};

/// Output of asset resolution
#[derive(Debug, Clone, Default)]
pub struct ResolvedAssets {
    /// Game version the assets belong to
    pub version: Option<String>,
    /// Client archive, the source of the archive locale
    pub client: Option<VersionDownload>,
    /// Language assets
    pub index: AssetIndex,
}

/// Asset index document; only `objects` is used
#[derive(Debug, Deserialize)]
struct AssetIndexDocument {
    objects: serde_json::Map<String, serde_json::Value>,
}

/// Resolve the language assets of the configured game version
///
/// Uses `config.game_version`, or the manifest's latest release when unset.
pub fn resolve_assets(
    source: &dyn HttpSource,
    config: &LocaleConfig,
    out: &mut ResolvedAssets,
) -> Result<(), ResolveError> {
    let manifest: VersionManifest = serde_json::from_slice(&source.get(&config.manifest_url)?)?;

    let version = match &config.game_version {
        Some(v) => v.clone(),
        None => manifest
            .latest
            .as_ref()
            .map(|l| l.release.clone())
            .ok_or(ResolveError::NoVersion)?,
    };

    let entry = manifest
        .find(&version)
        .ok_or_else(|| ResolveError::VersionNotFound(version.clone()))?;
    out.version = Some(version.clone());

    let detail: VersionDetail = serde_json::from_slice(&source.get(&entry.url)?)?;

    out.client = detail.downloads.get("client").cloned();
    match &out.client {
        Some(client) => debug!(
            version = %version,
            sha1 = %client.sha1,
            size = client.size,
            url = %client.url,
            "Resolved client archive"
        ),
        None => warn!(version = %version, "Version has no client download"),
    }

    let document: AssetIndexDocument =
        serde_json::from_slice(&source.get(&detail.asset_index.url)?)?;

    for (path, value) in &document.objects {
        if !path.starts_with(LOCALE_ASSET_PREFIX) {
            continue;
        }
        let asset = AssetDescriptor::deserialize(value)?;
        out.index.insert(path, asset);
    }

    debug!(
        version = %version,
        locales = out.index.len(),
        "Resolved language assets"
    );
    Ok(())
}

/// Errors that can occur during asset resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A document could not be fetched
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A document could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No version configured and the manifest names no latest release
    #[error("No game version configured and no latest release in manifest")]
    NoVersion,

    /// The configured version is not listed in the manifest
    #[error("Version {0} not found in version manifest")]
    VersionNotFound(String),
}
