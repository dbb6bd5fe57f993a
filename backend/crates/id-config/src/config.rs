use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, CacheConfig, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, DatabaseConfig, HandlerConfig, LoggingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub handler: HandlerConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// Loading order:
    /// 1. `ID_CONFIG_DIR` env var, else `./.id/`
    /// 2. Create the config directory if it doesn't exist
    /// 3. Read `config.toml` if present, else use defaults
    /// 4. Apply `ID_*` environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: `ID_CONFIG_DIR` env var > `./.id/` (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all sections. Call after load() to fail fast at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&config_dir)?;
        self.cache.validate()?;
        self.logging.validate()?;
        self.handler.validate()?;

        Ok(())
    }

    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Full path of the log file, when file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
            None => Ok(None),
        }
    }

    pub fn private_key_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.auth.jwt_private_key_path {
            Some(path) => Ok(Some(Self::config_dir()?.join(path))),
            None => Ok(None),
        }
    }

    pub fn public_key_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.auth.jwt_public_key_path {
            Some(path) => Ok(Some(Self::config_dir()?.join(path))),
            None => Ok(None),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);
        info!(
            "  auth: {} (issuer={}, kid={}, validity={}h)",
            self.auth.algorithm(),
            self.auth.issuer,
            self.auth.kid,
            self.auth.token_validity_hours
        );
        info!(
            "  cache: capacity={}, shards={}, ttl={}s, eviction={}%",
            self.cache.capacity,
            self.cache.shards,
            self.cache.ttl_secs,
            self.cache.eviction_percentage
        );
        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );
        info!("  handler: timeout={}s", self.handler.timeout_secs);
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("ID_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("ID_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("ID_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("ID_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "ID_AUTH_JWT_PRIVATE_KEY_PATH",
            &mut self.auth.jwt_private_key_path,
        );
        Self::apply_env_option_string(
            "ID_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );
        Self::apply_env_string("ID_AUTH_ISSUER", &mut self.auth.issuer);
        Self::apply_env_string("ID_AUTH_KID", &mut self.auth.kid);
        Self::apply_env_parse(
            "ID_AUTH_TOKEN_VALIDITY_HOURS",
            &mut self.auth.token_validity_hours,
        );

        // Cache
        Self::apply_env_parse("ID_CACHE_CAPACITY", &mut self.cache.capacity);
        Self::apply_env_parse("ID_CACHE_SHARDS", &mut self.cache.shards);
        Self::apply_env_parse("ID_CACHE_TTL_SECS", &mut self.cache.ttl_secs);
        Self::apply_env_parse(
            "ID_CACHE_EVICTION_PERCENTAGE",
            &mut self.cache.eviction_percentage,
        );

        // Logging
        Self::apply_env_parse("ID_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ID_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_string("ID_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("ID_LOG_FILE", &mut self.logging.file);

        // Handler
        Self::apply_env_parse("ID_HANDLER_TIMEOUT_SECS", &mut self.handler.timeout_secs);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"; anything else is false
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
