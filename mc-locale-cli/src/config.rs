//! CLI Configuration

use std::path::PathBuf;
use std::time::Duration;

use mc_locale::LocaleConfig;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Data directory; language files go to its `locales/` subdirectory.
    pub data_dir: PathBuf,
    /// Pinned game version (latest release when unset).
    pub game_version: Option<String>,
    /// Fallback locale.
    pub default_locale: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl CliConfig {
    /// Returns the default data directory (`<data dir>/mc-locale`).
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mc-locale")
    }

    /// Builds the library configuration.
    pub fn locale_config(&self) -> LocaleConfig {
        let mut config = LocaleConfig::default()
            .with_storage_path(&self.data_dir)
            .with_default_locale(&self.default_locale)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(version) = &self.game_version {
            config = config.with_game_version(version.clone());
        }
        config
    }
}
