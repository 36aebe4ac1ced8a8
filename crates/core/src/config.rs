use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Token signing configuration. Loaded once at startup and injected into the
/// token service; never mutated afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub audience: String,
    #[serde(default = "default_token_expiry")]
    pub token_expiry_seconds: i64,
}

fn default_token_expiry() -> i64 {
    86400 // 24 hours
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from mensa.toml in the current directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file("mensa.toml")
    }

    /// Load configuration with environment variable overrides
    /// Environment variables should be prefixed with MENSA_
    /// Example: MENSA_AUTH_JWT_SECRET, MENSA_SERVER_PORT
    pub fn load_with_env() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("mensa").required(false))
            .add_source(
                config::Environment::with_prefix("MENSA")
                    .separator("_")
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_token_expiry(), 86400);
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 3000);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
            [server]
            port = 8080

            [auth]
            jwt_secret = "secret"
            issuer = "mensa"
            audience = "mensa-client"
        "#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.token_expiry_seconds, 86400);
        assert_eq!(config.auth.issuer, "mensa");
    }
}
