use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use beer_catalog::{BEERS_CATALOG_MOCK_DATA_VAR, CatalogClient, Client, MockClient};
use tracing::debug;

use crate::config::Config;

/// Initialize the catalog client
///
/// - Initialize a mock client if `$BEERS_CATALOG_MOCK_DATA` is set to a path to mock data
/// - Initialize a real client otherwise
pub fn init_catalog_client(config: &Config) -> Result<Client> {
    if let Ok(path_str) = std::env::var(BEERS_CATALOG_MOCK_DATA_VAR) {
        let path = PathBuf::from(path_str);
        if !path.exists() {
            bail!("path to mock data file doesn't exist: {}", path.display());
        }

        debug!(mock_data_path = %path.display(), "using mock catalog client");
        let client = MockClient::from_file(&path)
            .with_context(|| format!("Could not load mock data from {}", path.display()))?;
        Ok(client.into())
    } else {
        debug!("using catalog client with url: {}", config.catalog_url);
        let client = CatalogClient::new(config.catalog_client_config())
            .context("Could not initialize catalog client")?;
        Ok(client.into())
    }
}
