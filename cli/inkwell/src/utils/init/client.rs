use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use inkwell_client::{ApiClient, ClientConfig, FileStorage, LocalStorage, TransportMode};
use tracing::{debug, warn};

use crate::config::Config;

/// Persisted client state under the data directory.
pub fn init_storage(config: &Config) -> Arc<dyn LocalStorage> {
    let storage = FileStorage::in_dir(&config.data_dir);
    debug!(path = %storage.path().display(), "using local storage");
    Arc::new(storage)
}

/// Initialize the API client
///
/// - Serve fixtures if both `dev` and `use_mock` are set
/// - Talk to `api_base_url` otherwise
pub fn init_client(config: &Config, storage: Arc<dyn LocalStorage>) -> Result<ApiClient> {
    if config.use_mock && !config.dev {
        warn!("mock data is only available in development mode, using the network");
    }
    let mode = TransportMode::from_flags(config.dev, config.use_mock);

    let client_config = ClientConfig::new(&config.api_base_url)
        .with_mode(mode)
        .with_timeout(Duration::from_secs(config.timeout_secs));

    debug!(?mode, url = %config.api_base_url, "using api client");
    ApiClient::new(client_config, storage).context("Could not create API client")
}
