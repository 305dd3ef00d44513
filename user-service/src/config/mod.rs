use secrecy::Secret;
use serde::Deserialize;
use service_core::config::{self as core_config, get_env, get_env_parsed, is_prod};
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub store: StoreBackend,
    /// Present whenever `store` is [`StoreBackend::Postgres`].
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Which `UserStore` implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown user store backend '{}'", other)),
        }
    }
}

impl UserConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = is_prod();

        let store: StoreBackend = get_env("USER_STORE", Some("postgres"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let database = match store {
            StoreBackend::Postgres => Some(DatabaseConfig {
                url: Secret::new(get_env("DATABASE_URL", None, is_prod)?),
                max_connections: get_env_parsed("DATABASE_MAX_CONNECTIONS", 10, is_prod)?,
                min_connections: get_env_parsed("DATABASE_MIN_CONNECTIONS", 1, is_prod)?,
            }),
            StoreBackend::Memory => None,
        };

        Ok(UserConfig {
            common,
            service_name: get_env("SERVICE_NAME", Some("user-service"), is_prod)?,
            store,
            database,
        })
    }

    /// In-memory configuration for tests and local runs.
    pub fn in_memory(port: u16) -> Self {
        UserConfig {
            common: core_config::Config { port },
            service_name: "user-service".to_string(),
            store: StoreBackend::Memory,
            database: None,
        }
    }
}
