//! Configuration for the language file cache

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration for the locale system
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Base directory; language files live in its `locales/` subdirectory
    pub storage_path: PathBuf,

    /// Global version manifest URL
    pub manifest_url: String,

    /// Content-addressed asset store base URL
    pub resources_url: String,

    /// Game version whose assets are used (`None` = latest release)
    pub game_version: Option<String>,

    /// Fallback locale for lookups
    pub default_locale: String,

    /// HTTP timeout for every request
    #[serde(with = "duration_secs")]
    pub timeout: Duration,

    /// Maximum download size (bytes)
    pub max_content_size: u64,

    /// Proxy URL
    pub proxy_url: Option<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("."),
            manifest_url: "https://launchermeta.mojang.com/mc/game/version_manifest.json"
                .to_string(),
            resources_url: "https://resources.download.minecraft.net".to_string(),
            game_version: None,
            default_locale: "en_us".to_string(),
            timeout: Duration::from_secs(30),
            max_content_size: 256 * 1024 * 1024, // client archives are ~30 MB
            proxy_url: None,
        }
    }
}

impl LocaleConfig {
    /// Configure the base storage directory
    pub fn with_storage_path(mut self, path: impl AsRef<Path>) -> Self {
        self.storage_path = path.as_ref().to_path_buf();
        self
    }

    /// Pin the game version instead of following the latest release
    pub fn with_game_version(mut self, version: impl Into<String>) -> Self {
        self.game_version = Some(version.into());
        self
    }

    /// Configure the fallback locale
    ///
    /// The identifier is lowercased so it matches table keys.
    pub fn with_default_locale(mut self, locale: &str) -> Self {
        self.default_locale = locale.to_lowercase();
        self
    }

    /// Configure with custom proxy
    pub fn with_proxy(mut self, proxy_url: String) -> Self {
        self.proxy_url = Some(proxy_url);
        self
    }

    /// Configure the HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
