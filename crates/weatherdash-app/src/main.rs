use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use weatherdash_app::{Cli, Dashboard, Theme};
use weatherdash_core::{AppError, Config};
use weatherdash_store::{FileStore, KeyValueStore};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut dashboard = None;
    match start(&cli, &mut dashboard).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            let dark = dashboard.as_ref().is_some_and(Dashboard::dark_mode);
            eprintln!("{}", Theme::from_dark_mode(dark).error(e.user_message()));
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: &Cli, slot: &mut Option<Dashboard>) -> Result<String, AppError> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_api_key_override(cli.api_key.clone());

    // Initialize logging
    weatherdash_core::init(config.general.log_level.as_deref())?;

    // Fail at startup rather than sending requests without a key
    config.ensure_valid()?;

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage.data_dir));
    let dark_fallback = config.ui.dark_mode.unwrap_or_else(|| {
        Theme::terminal_prefers_dark(std::env::var("COLORFGBG").ok().as_deref())
    });

    let dashboard = slot.insert(Dashboard::new(&config, store, dark_fallback)?);
    tracing::info!("Weatherdash started");

    weatherdash_app::run(cli, dashboard, &config.weather.icon_base_url).await
}
