use std::{str::FromStr, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

use crate::auth::IdentityCachePolicy;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub search: SearchSettings,
    pub cache: CacheSettings,
    pub credentials: CredentialSettings,
    #[serde(default)]
    pub identity_cache: IdentityCacheSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Reported by the health check.
    pub environment: String,
    pub region: String,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct SearchSettings {
    pub endpoint: String,
    #[serde(default = "default_true")]
    pub secure: bool,
    pub user_index: String,
    pub location_index: String,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(default = "default_search_timeout")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl std::fmt::Debug for SearchSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSettings")
            .field("endpoint", &self.endpoint)
            .field("secure", &self.secure)
            .field("user_index", &self.user_index)
            .field("location_index", &self.location_index)
            .field("username", &self.username)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish_non_exhaustive()
    }
}

impl SearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct CacheSettings {
    pub url: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub user_accounts_db: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub location_accounts_db: u32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CredentialSettings {
    pub region: String,
    #[serde(default)]
    pub extra_regions: Vec<String>,
    pub table_name: String,
    pub index_name: String,
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct IdentityCacheSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub ttl_seconds: u64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_capacity: u64,
}

impl Default for IdentityCacheSettings {
    fn default() -> Self {
        let policy = IdentityCachePolicy::default();
        Self {
            ttl_seconds: policy.ttl.as_secs(),
            max_capacity: policy.max_capacity,
        }
    }
}

impl From<&IdentityCacheSettings> for IdentityCachePolicy {
    fn from(settings: &IdentityCacheSettings) -> Self {
        Self {
            ttl: Duration::from_secs(settings.ttl_seconds),
            max_capacity: settings.max_capacity,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_search_timeout() -> u64 {
    30
}

fn default_header_name() -> String {
    "x-application-id".to_string()
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no current directory: {e}")))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("invalid APP_ENVIRONMENT: {e}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("USERINFO")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
