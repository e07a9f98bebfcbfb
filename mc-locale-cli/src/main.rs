//! mc-locale CLI
//!
//! Resolves, downloads and queries cached Minecraft language files.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mc_locale::LocaleManager;
use tracing::info;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "mc-locale")]
#[command(version, about = "Minecraft language file cache")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (default: platform data dir / mc-locale)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Game version whose assets are used (default: latest release)
    #[arg(long, global = true, env = "MC_LOCALE_GAME_VERSION")]
    game_version: Option<String>,

    /// Fallback locale
    #[arg(long, global = true, default_value = "en_us")]
    default_locale: String,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the asset index and list available locales
    Resolve,

    /// Download and load one or more locales
    Fetch {
        /// Locale identifiers (e.g. de_de, nb_no)
        #[arg(required = true)]
        locales: Vec<String>,
    },

    /// Translate a key
    Translate {
        /// Translation key (e.g. menu.quit)
        key: String,

        /// Locale to translate into
        #[arg(long, default_value = "en_us")]
        locale: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mc_locale=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = CliConfig {
        data_dir: cli.data_dir.unwrap_or_else(CliConfig::default_data_dir),
        game_version: cli.game_version,
        default_locale: cli.default_locale,
        timeout_secs: cli.timeout,
    };

    // The blocking HTTP client must live outside the async runtime
    let manager = Arc::new(
        LocaleManager::with_reqwest(config.locale_config())
            .context("Failed to initialize locale manager")?,
    );
    manager.init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime
        .block_on(manager.start())
        .context("Startup task failed")?;
    drop(runtime);

    match cli.command {
        Commands::Resolve => {
            let index = manager.asset_index();
            let locales = index.map(|i| i.locales()).unwrap_or_default();
            info!(count = locales.len(), "Available locales");
            for locale in locales {
                println!("{}", locale);
            }
        }
        Commands::Fetch { locales } => {
            for locale in &locales {
                manager.download_and_load(locale);
            }
            println!("Loaded: {}", manager.loaded_locales().join(", "));
        }
        Commands::Translate { key, locale } => {
            manager.download_and_load(&locale);
            println!("{}", manager.translate(&key, &locale));
        }
    }

    Ok(())
}
