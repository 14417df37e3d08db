//! API configuration
//!
//! Loaded from `API_`-prefixed environment variables. Every field carries a
//! development default so a bare `cargo run` comes up against a local
//! database. An unprefixed `DATABASE_URL` is also honored because that is
//! the variable managed Postgres providers export.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// PostgreSQL connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Upper bound for a single payment or adjustment amount
    #[serde(default = "default_max_payment")]
    pub max_payment: Decimal,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "postgres://localhost/trade_ledger".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_payment() -> Decimal {
    Decimal::from(10_000_000)
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            log_level: default_log_level(),
            max_payment: default_max_payment(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables, falling back
    /// to the development defaults for anything unset
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut cfg: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()?;

        // The unprefixed variable applies only when API_DATABASE_URL is absent
        if std::env::var("API_DATABASE_URL").is_err() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                cfg.database_url = url;
            }
        }

        Ok(cfg)
    }

    /// Returns the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_local_development() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.max_payment, Decimal::from(10_000_000));
        assert!(config.database_url.starts_with("postgres://"));
    }
}
