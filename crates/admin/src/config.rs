//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `SMTP_HOST` - SMTP server hostname
//! - `SMTP_USERNAME` - SMTP authentication username
//! - `SMTP_PASSWORD` - SMTP authentication password
//! - `SMTP_FROM` - Email sender address
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `SMTP_PORT` - SMTP port (default: 587)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance traces sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_SMTP_PORT: u16 = 587;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Email configuration
    pub email: EmailConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// SMTP email configuration.
///
/// `SecretString` redacts the password in `Debug` output.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP authentication username
    pub smtp_username: String,
    /// SMTP authentication password
    pub smtp_password: SecretString,
    /// Sender address for outgoing mail
    pub from_address: String,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL").map(SecretString::from)?;

        let host = optional("ADMIN_HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;

        let port = parse_optional("ADMIN_PORT", DEFAULT_PORT)?;

        let email = EmailConfig {
            smtp_host: require("SMTP_HOST")?,
            smtp_port: parse_optional("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            smtp_username: require("SMTP_USERNAME")?,
            smtp_password: require("SMTP_PASSWORD").map(SecretString::from)?,
            from_address: require("SMTP_FROM")?,
        };

        Ok(Self {
            database_url,
            host,
            port,
            email,
            sentry_dsn: optional("SENTRY_DSN"),
            sentry_environment: optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_optional("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_optional("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// The socket address the server binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_optional<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    optional(name).map_or(Ok(default), |raw| {
        raw.parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AdminConfig {
        AdminConfig {
            database_url: SecretString::from("postgres://localhost/meridian"),
            host: DEFAULT_HOST.parse().expect("valid default host"),
            port: DEFAULT_PORT,
            email: EmailConfig {
                smtp_host: "smtp.example.com".to_string(),
                smtp_port: DEFAULT_SMTP_PORT,
                smtp_username: "mailer".to_string(),
                smtp_password: SecretString::from("hunter2"),
                from_address: "noreply@example.com".to_string(),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_socket_addr_combines_host_and_port() {
        let config = test_config();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = test_config();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("postgres://localhost/meridian"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("DATABASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: DATABASE_URL"
        );
    }
}
