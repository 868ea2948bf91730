//! Configuration management for the SMS email bridge.
//!
//! All settings come from environment variables (optionally via a `.env`
//! file), are validated once at startup and never mutated afterwards.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Runtime configuration for the bridge.
#[derive(Debug, Clone)]
pub struct Config {
    /// SimpleLogin API base URL
    pub api_base_url: String,

    /// SimpleLogin API key
    pub api_key: String,

    /// Operator mailbox that aliases forward to
    pub primary_email: String,

    /// Bridge domain used for phone-derived aliases (e.g. `relaysms.me`)
    pub primary_domain: String,

    /// SMTP submission host
    pub smtp_host: String,

    /// SMTP submission port (default: 587)
    pub smtp_port: u16,

    /// SMTP username
    pub smtp_username: String,

    /// SMTP password
    pub smtp_password: String,

    /// Whether to negotiate STARTTLS with the SMTP host (default: true)
    pub smtp_tls: bool,

    /// Deadline in seconds for each HTTP and SMTP call (default: 30)
    pub request_timeout: u64,

    /// Log verbosity (default: "info")
    pub log_level: String,
}

const DEFAULT_API_BASE_URL: &str = "https://app.simplelogin.io/api";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SL_API_KEY`: SimpleLogin API key
    /// - `SL_PRIMARY_EMAIL`: operator mailbox address
    /// - `SL_PRIMARY_DOMAIN`: bridge domain for phone-derived aliases
    /// - `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD`
    ///
    /// Optional environment variables:
    /// - `SL_API_BASE_URL`: API base URL (default: the hosted SimpleLogin API)
    /// - `SMTP_PORT`: submission port (default: 587)
    /// - `SMTP_TLS`: "true"/"false" (default: true)
    /// - `REQUEST_TIMEOUT`: per-call deadline in seconds (default: 30)
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present; missing files are fine.
        let _ = dotenvy::dotenv();

        let api_base_url =
            env::var("SL_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "SL_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let api_key = Self::require_var("SL_API_KEY")?;
        let primary_email = Self::require_var("SL_PRIMARY_EMAIL")?;
        let primary_domain = Self::require_var("SL_PRIMARY_DOMAIN")?;

        if !primary_email.contains('@') {
            return Err(ConfigError::InvalidValue {
                var: "SL_PRIMARY_EMAIL".to_string(),
                reason: "Must be an email address".to_string(),
            });
        }

        let smtp_host = Self::require_var("SMTP_HOST")?;
        let smtp_username = Self::require_var("SMTP_USERNAME")?;
        let smtp_password = Self::require_var("SMTP_PASSWORD")?;
        let smtp_port = Self::parse_env_u16("SMTP_PORT", 587)?;
        let smtp_tls = Self::parse_env_bool("SMTP_TLS", true)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 30)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            api_base_url,
            api_key,
            primary_email,
            primary_domain,
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            smtp_tls,
            request_timeout,
            log_level,
        })
    }

    /// Read a required environment variable, rejecting empty values.
    fn require_var(var_name: &str) -> ConfigResult<String> {
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))?;

        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(value)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a port number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as bool with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}
