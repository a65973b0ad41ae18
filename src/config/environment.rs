//! Environment configuration
//!
//! Reads the service settings from environment variables (optionally
//! populated from a `.env` file by `dotenvy`).

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// One year, in seconds
pub const MAX_JWT_EXPIRATION: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiration: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

impl EnvironmentConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = var_or("ENVIRONMENT", "development");
        let is_production = environment == "production";

        // Development gets a fixed secret so the service starts without setup.
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if is_production => return Err(ConfigError::Missing("JWT_SECRET")),
            _ => "development-secret-change-me".to_string(),
        };

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", 3000)?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            jwt_secret,
            jwt_expiration: bounded_expiration(parse_var("JWT_EXPIRATION", 86_400)?)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cors_origins: parse_origins(&var_or("CORS_ORIGINS", "")),
            log_level: var_or("LOG_LEVEL", "info"),
            environment,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Token lifetime must be between one second and one year
fn bounded_expiration(seconds: u64) -> Result<u64, ConfigError> {
    if seconds == 0 || seconds > MAX_JWT_EXPIRATION {
        return Err(ConfigError::Invalid {
            name: "JWT_EXPIRATION",
            value: seconds.to_string(),
        });
    }
    Ok(seconds)
}

/// Comma separated list, blanks dropped
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:5173, https://fuel.example.com ,"),
            vec!["http://localhost:5173", "https://fuel.example.com"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_jwt_expiration_bounds() {
        assert_eq!(bounded_expiration(86_400).unwrap(), 86_400);
        assert_eq!(bounded_expiration(MAX_JWT_EXPIRATION).unwrap(), MAX_JWT_EXPIRATION);
        assert!(matches!(
            bounded_expiration(0),
            Err(ConfigError::Invalid { name: "JWT_EXPIRATION", .. })
        ));
        assert!(bounded_expiration(u64::MAX).is_err());
    }

    #[test]
    fn test_server_url() {
        let config = EnvironmentConfig {
            environment: "development".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "postgres://localhost/fuel".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiration: 60,
            bcrypt_cost: 4,
            cors_origins: vec![],
            log_level: "debug".to_string(),
        };

        assert_eq!(config.server_url(), "127.0.0.1:8080");
    }
}
