#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use zentra_site::{
    config,
    core::{DataShim, Repository, dashboard},
    errors::Result,
    notify::Notifier,
    remote::RemoteClient,
    storage::{LocalStore, SqliteStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the environment
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::settings::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Open the local store
    let sqlite = SqliteStore::connect(&app_config.storage.database_url)
        .await
        .inspect(|_| info!("Local store opened."))
        .inspect_err(|e| error!("Failed to open local store: {}", e))?;
    let local = LocalStore::new(Arc::new(sqlite), app_config.storage.key_prefix.clone());

    // 5. Remote backend is optional
    let remote = RemoteClient::from_config(&app_config.remote)
        .map(|client| Arc::new(client) as Arc<dyn Repository>);
    if remote.is_none() {
        warn!("No remote backend configured; serving from the local store only.");
    }

    // 6. Seed and wire up the shim
    let shim = DataShim::open(remote, local)
        .await
        .inspect_err(|e| error!("Failed to open data shim: {}", e))?;
    let notifier = Notifier::from_config(app_config.notifications.clone());
    if !notifier.is_enabled() {
        warn!("Owner notifications are disabled; set RESEND_API_KEY to enable them.");
    }

    let stats = dashboard::dashboard_stats(&shim).await;
    info!(?stats, remote = shim.is_remote_enabled(), "Site data ready");

    Ok(())
}
