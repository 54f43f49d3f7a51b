use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use beer_catalog::CatalogClientConfig;
use config::{Config as HierarchicalConfig, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Name of the directory holding the user's configuration
const BEERS_DIR_NAME: &str = "beers";
const BEERS_CONFIG_DIR_VAR: &str = "BEERS_CONFIG_DIR";
const BEERS_ENV_PREFIX: &str = "BEERS_";
pub const BEERS_CONFIG_FILE: &str = "beers.toml";

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8080";
pub const DEFAULT_APP_URL: &str = "http://localhost/";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// The URL of the catalog serving search results
    // Using a URL here adds an extra trailing slash,
    // so just use a String.
    pub catalog_url: String,

    /// Address of the search page.
    ///
    /// Searches started from the command line are addressed relative to it.
    pub app_url: Url,

    /// Seconds to wait for a connection to the catalog
    pub connect_timeout_secs: u64,

    /// Seconds to wait for a complete catalog response
    pub request_timeout_secs: u64,

    /// User agent sent with catalog requests
    pub user_agent: Option<String>,
}

/// Locations configuration is read from, lowest precedence first.
#[derive(Debug, Clone)]
struct ConfigSources {
    /// System wide configuration, `/etc` outside of tests
    system_config_dir: PathBuf,
    /// Per user configuration, e.g. `~/.config/beers`
    user_config_dir: Option<PathBuf>,
    /// Configuration directory set by `$BEERS_CONFIG_DIR`
    config_dir: Option<PathBuf>,
    /// `BEERS_*` environment variables, with the prefix stripped
    env: HashMap<String, String>,
}

impl ConfigSources {
    fn from_env() -> Self {
        let config_dir = env::var_os(BEERS_CONFIG_DIR_VAR).map(PathBuf::from);
        match &config_dir {
            Some(dir) => debug!("`${BEERS_CONFIG_DIR_VAR}` set: {dir:?}"),
            None => debug!("`${BEERS_CONFIG_DIR_VAR}` not set"),
        }

        let env = env::vars()
            .filter_map(|(k, v)| k.strip_prefix(BEERS_ENV_PREFIX).map(|k| (k.to_owned(), v)))
            .collect();

        Self {
            system_config_dir: PathBuf::from("/etc"),
            user_config_dir: dirs::config_dir().map(|dir| dir.join(BEERS_DIR_NAME)),
            config_dir,
            env,
        }
    }

    fn read(self) -> Result<HierarchicalConfig> {
        let mut builder = HierarchicalConfig::builder()
            .set_default("catalog_url", DEFAULT_CATALOG_URL)?
            .set_default("app_url", DEFAULT_APP_URL)?
            .set_default(
                "connect_timeout_secs",
                CatalogClientConfig::DEFAULT_CONNECT_TIMEOUT.as_secs(),
            )?
            .set_default(
                "request_timeout_secs",
                CatalogClientConfig::DEFAULT_REQUEST_TIMEOUT.as_secs(),
            )?;

        let config_dirs = std::iter::once(self.system_config_dir)
            .chain(self.user_config_dir)
            .chain(self.config_dir);
        for dir in config_dirs {
            let file = dir.join(BEERS_CONFIG_FILE);
            debug!("looking for config file at {file:?}");
            builder = builder.add_source(
                File::from(file)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // override via env variables
        let builder = builder.add_source(
            Environment::default()
                .source(Some(self.env))
                .try_parsing(true),
        );

        Ok(builder.build()?)
    }
}

impl Config {
    /// Creates a [Config] from the environment and config files
    pub fn parse() -> Result<Config> {
        Self::from_sources(ConfigSources::from_env())
    }

    fn from_sources(sources: ConfigSources) -> Result<Config> {
        let config = sources
            .read()
            .context("Could not read config")?
            .try_deserialize()
            .context("Could not parse config")?;
        debug!(?config, "parsed config");
        Ok(config)
    }

    /// Settings for the catalog client
    pub fn catalog_client_config(&self) -> CatalogClientConfig {
        CatalogClientConfig {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..CatalogClientConfig::new(&self.catalog_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;

    fn default_config() -> Config {
        Config {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            app_url: Url::parse(DEFAULT_APP_URL).unwrap(),
            connect_timeout_secs: 15,
            request_timeout_secs: 60,
            user_agent: None,
        }
    }

    fn write_config(dir: &Path, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(BEERS_CONFIG_FILE), content).unwrap();
    }

    /// Sources rooted in `root`, none of which exist yet
    fn sources(root: &TempDir) -> ConfigSources {
        ConfigSources {
            system_config_dir: root.path().join("etc"),
            user_config_dir: Some(root.path().join("user")),
            config_dir: Some(root.path().join("explicit")),
            env: HashMap::new(),
        }
    }

    #[test]
    fn defaults_without_files() {
        let root = tempfile::tempdir().unwrap();
        let config = Config::from_sources(sources(&root)).unwrap();
        assert_eq!(config, default_config());
    }

    #[test]
    fn later_files_override_earlier_files() {
        let root = tempfile::tempdir().unwrap();
        let sources = sources(&root);
        write_config(&sources.system_config_dir, indoc::indoc! {r#"
            catalog_url = "http://system:8080"
            user_agent = "system"
            "#});
        write_config(sources.user_config_dir.as_ref().unwrap(), indoc::indoc! {r#"
            catalog_url = "http://user:8080"
            connect_timeout_secs = 5
            "#});
        write_config(sources.config_dir.as_ref().unwrap(), indoc::indoc! {r#"
            catalog_url = "http://explicit:8080"
            app_url = "http://beers.example/search"
            "#});

        let config = Config::from_sources(sources).unwrap();
        assert_eq!(config, Config {
            catalog_url: "http://explicit:8080".to_string(),
            app_url: Url::parse("http://beers.example/search").unwrap(),
            connect_timeout_secs: 5,
            request_timeout_secs: 60,
            user_agent: Some("system".to_string()),
        });
    }

    #[test]
    fn env_overrides_files() {
        let root = tempfile::tempdir().unwrap();
        let mut sources = sources(&root);
        write_config(sources.user_config_dir.as_ref().unwrap(), indoc::indoc! {r#"
            catalog_url = "http://user:8080"
            request_timeout_secs = 30
            "#});
        sources.env = HashMap::from_iter([
            ("CATALOG_URL".to_string(), "http://env:8080".to_string()),
            ("REQUEST_TIMEOUT_SECS".to_string(), "2".to_string()),
        ]);

        let config = Config::from_sources(sources).unwrap();
        assert_eq!(config.catalog_url, "http://env:8080");
        assert_eq!(config.request_timeout_secs, 2);
    }

    #[test]
    fn invalid_app_url_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let mut sources = sources(&root);
        sources.env = HashMap::from_iter([("APP_URL".to_string(), "not a url".to_string())]);

        let err = Config::from_sources(sources).unwrap_err();
        assert_eq!(err.to_string(), "Could not parse config");
    }

    #[test]
    fn catalog_client_config_carries_settings() {
        let config = Config {
            catalog_url: "http://catalog:8080".to_string(),
            connect_timeout_secs: 1,
            request_timeout_secs: 2,
            user_agent: Some("beers-test".to_string()),
            ..default_config()
        };

        let client_config = config.catalog_client_config();
        assert_eq!(client_config.catalog_url, "http://catalog:8080");
        assert_eq!(client_config.connect_timeout, Duration::from_secs(1));
        assert_eq!(client_config.request_timeout, Duration::from_secs(2));
        assert_eq!(client_config.user_agent.as_deref(), Some("beers-test"));
        assert!(client_config.extra_headers.is_empty());
    }

    #[test]
    #[serial]
    fn parse_reads_config_dir_and_env() {
        let home = tempfile::tempdir().unwrap();
        let config_dir = tempfile::tempdir().unwrap();
        write_config(config_dir.path(), indoc::indoc! {r#"
            app_url = "http://beers.example/"
            "#});

        temp_env::with_vars(
            [
                ("HOME", Some(home.path().as_os_str())),
                ("XDG_CONFIG_HOME", Some(home.path().join(".config").as_os_str())),
                (BEERS_CONFIG_DIR_VAR, Some(config_dir.path().as_os_str())),
                ("BEERS_USER_AGENT", Some(OsStr::new("beers-env"))),
            ],
            || {
                let config = Config::parse().unwrap();
                assert_eq!(config.app_url.as_str(), "http://beers.example/");
                assert_eq!(config.user_agent.as_deref(), Some("beers-env"));
                assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
            },
        );
    }
}
