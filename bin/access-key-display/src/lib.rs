pub mod cli;
pub mod display;
pub mod render;

use thiserror::Error;

use access_key_config::{
    load_stored, persist, resolve,
    ConfigError, ConfigSource, EnvironmentVar,
};
use access_key_storage::{default_storage_opt, run_db_server, StorageClient};

use crate::cli::Cli;
use crate::display::{run, DisplayState};

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Display: cannot render QR code, {0}")]
    Render(String),
    #[error("Display: {0}")]
    Config(#[from] ConfigError),
    #[error("Display: cannot write to terminal, {0}")]
    Io(#[from] std::io::Error),
}

/// Open the persisted store. A store that cannot be opened only costs
/// persistence, the display still runs.
fn open_store(path: &str) -> Option<StorageClient> {
    let (storage_config, storage_in_sender) = default_storage_opt(path.to_string(), false);
    match run_db_server(storage_config) {
        Ok(()) => {
            log::info!("Config store opened at {}.", path);
            Some(StorageClient::new(storage_in_sender))
        },
        Err(e) => {
            log::warn!("{}, configuration will not be persisted", e);
            None
        },
    }
}

pub async fn start(cli: Cli) -> Result<(), DisplayError> {
    let env = EnvironmentVar::load();
    let store_path = cli.store.clone().unwrap_or(env.store_path);

    let mut store = open_store(&store_path);

    // --- Resolve configuration: link, then store, then defaults ---
    let mut sources = vec![ConfigSource::Query(cli.query_params())];
    if let Some(client) = store.as_mut() {
        match load_stored(client).await {
            Ok(Some(stored)) => sources.push(stored),
            Ok(None) => {},
            Err(e) => log::warn!("cannot read stored configuration: {}", e),
        }
    }
    let config = resolve(&sources);

    if let Some(client) = store.as_mut() {
        if let Err(e) = persist(client, &config).await {
            log::warn!("cannot persist configuration: {}", e);
        }
    }
    log::info!("Share link: {}", config.share_link(&env.link_base));

    // --- Redraw loop ---
    let mut state = DisplayState::new(config, cli.at);
    let stdout = std::io::stdout();
    let result = run(&mut state, cli.tick_limit(), !cli.no_qr, &mut stdout.lock()).await;

    if let Some(client) = store {
        client.close().await.map_err(ConfigError::from)?;
        log::info!("Config store closed.");
    }

    result
}
