use std::env;

use auth::HashingCost;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for gatekeeper.
///
/// Read once at startup and never re-read.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    5000
}

/// Token signing configuration.
#[derive(Deserialize, Clone, Default)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    /// Token lifetime. Unset means tokens never expire.
    #[serde(default)]
    pub expiration_hours: Option<i64>,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Argon2id work factor.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PasswordConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Hash computations allowed to run at the same time
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl PasswordConfig {
    pub fn cost(&self) -> HashingCost {
        HashingCost::new(self.memory_kib, self.iterations, self.parallelism)
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_memory_kib() -> u32 {
    HashingCost::DEFAULT_MEMORY_KIB
}

fn default_iterations() -> u32 {
    HashingCost::DEFAULT_ITERATIONS
}

fn default_parallelism() -> u32 {
    HashingCost::DEFAULT_PARALLELISM
}

fn default_max_concurrent() -> usize {
    4
}

/// PostgreSQL database configuration.
///
/// Without a URL the service keeps users in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

/// Longest accepted token lifetime: ten years.
pub const MAX_EXPIRATION_HOURS: i64 = 10 * 365 * 24;

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `PORT` and `JWT_SECRET`
    /// 2. Environment variables (SERVER__PORT, JWT__SECRET, DATABASE__URL, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Fails when sources cannot be parsed or the result does not pass [`Config::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations the service must not start with.
    ///
    /// # Errors
    /// * Blank signing secret
    /// * Token lifetime not in `1..=MAX_EXPIRATION_HOURS`
    /// * Hashing cost Argon2 does not accept
    /// * Zero concurrent hashes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT_SECRET or JWT__SECRET)".to_string(),
            ));
        }

        if let Some(hours) = self.jwt.expiration_hours {
            if !(1..=MAX_EXPIRATION_HOURS).contains(&hours) {
                return Err(ConfigError::Message(format!(
                    "jwt.expiration_hours must be between 1 and {}, got {}",
                    MAX_EXPIRATION_HOURS, hours
                )));
            }
        }

        if self.password.max_concurrent == 0 {
            return Err(ConfigError::Message(
                "password.max_concurrent must be at least 1".to_string(),
            ));
        }

        self.password
            .cost()
            .params()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            jwt: JwtConfig {
                secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
                expiration_hours: None,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = valid_config();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.password.cost(), HashingCost::default());
        assert!(config.database.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_secret_is_fatal() {
        let mut config = valid_config();
        config.jwt.secret = "   ".to_string();
        assert!(config.validate().is_err());

        config.jwt.secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_expiry_is_fatal() {
        let mut config = valid_config();
        config.jwt.expiration_hours = Some(0);
        assert!(config.validate().is_err());

        config.jwt.expiration_hours = Some(12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_expiry_is_fatal() {
        let mut config = valid_config();
        config.jwt.expiration_hours = Some(MAX_EXPIRATION_HOURS);
        assert!(config.validate().is_ok());

        config.jwt.expiration_hours = Some(MAX_EXPIRATION_HOURS + 1);
        assert!(config.validate().is_err());

        config.jwt.expiration_hours = Some(i64::MAX);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_concurrent_hashes_is_fatal() {
        let mut config = valid_config();
        assert_eq!(config.password.max_concurrent, 4);

        config.password.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_hashing_cost_is_fatal() {
        let mut config = valid_config();
        config.password.iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_secret_not_in_debug_output() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("test-secret-key"));
    }
}
