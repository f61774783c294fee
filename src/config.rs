use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{Result, SnowmanError};
use crate::models::RegionCodeTable;
use crate::utils::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_DATABASE_PATH, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_PORT, ENV_PREFIX,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    /// Replaces the built-in prefecture table when present.
    #[serde(default)]
    pub region_codes: Option<BTreeMap<String, i64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Load defaults, then the TOML file, then `SNOWMAN_*` environment variables.
    ///
    /// An explicit `path` must exist; the default `snowman.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// As [`load`](Self::load), reading variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .set_default("database.path", DEFAULT_DATABASE_PATH)?
            .set_default("database.max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    pub fn region_table(&self) -> RegionCodeTable {
        match &self.region_codes {
            Some(codes) => RegionCodeTable::new(codes.clone()),
            None => RegionCodeTable::jis_prefectures(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn check(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(SnowmanError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if matches!(&self.region_codes, Some(codes) if codes.is_empty()) {
            return Err(SnowmanError::Config(
                "region_codes is present but empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: PathBuf::from(DEFAULT_DATABASE_PATH),
                max_connections: DEFAULT_MAX_CONNECTIONS,
            },
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            region_codes: None,
        }
    }
}
