mod auth_config;
mod cache_config;
mod config;
mod database_config;
mod error;
mod handler_config;
mod log_level;
mod logging_config;
mod server_config;

pub use auth_config::AuthConfig;
pub use cache_config::CacheConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use handler_config::HandlerConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

pub const CONFIG_DIR_ENV: &str = "ID_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".id";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "identities.db";

const DEFAULT_ISSUER: &str = "identity-service";
const DEFAULT_KID: &str = "primary";
const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_TOKEN_VALIDITY_HOURS: i64 = 8760;
const MAX_TOKEN_VALIDITY_HOURS: i64 = 87_600;

const DEFAULT_CACHE_CAPACITY: usize = 10_000;
const DEFAULT_CACHE_SHARDS: usize = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 60;
const DEFAULT_CACHE_EVICTION_PERCENTAGE: u8 = 10;

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

#[cfg(test)]
mod tests;
