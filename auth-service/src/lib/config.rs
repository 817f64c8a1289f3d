use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret, shared by every request; at least 32 bytes
    /// recommended for HS256.
    pub secret: String,
    /// Access token time-to-live in milliseconds.
    pub expiration_ms: i64,
    /// Refresh token time-to-live in milliseconds.
    pub refresh_expiration_ms: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.expiration_ms <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_ms must be positive".to_string(),
            ));
        }
        if self.jwt.refresh_expiration_ms <= 0 {
            return Err(ConfigError::Message(
                "jwt.refresh_expiration_ms must be positive".to_string(),
            ));
        }
        if self.jwt.secret.len() < 32 {
            tracing::warn!(
                length = self.jwt.secret.len(),
                "JWT secret is shorter than the 32 bytes recommended for HS256"
            );
        }
        Ok(())
    }
}
