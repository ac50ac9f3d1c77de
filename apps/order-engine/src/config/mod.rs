//! Configuration module for the order engine.
//!
//! Loads a YAML file, interpolates environment variables, applies
//! environment overrides and validates the result.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_engine::config::{Config, load_config};
//!
//! // Path from ORDER_ENGINE_CONFIG, falling back to config.yaml
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod observability;
mod accounts;
mod risk;
mod server;
mod timeouts;

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::market::Market;

pub use observability::{LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use accounts::AccountSeed;
pub use risk::RiskConfig;
pub use server::ServerConfig;
pub use timeouts::{LookupConfig, MatchingConfig};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ORDER_ENGINE_CONFIG";

/// Environment variable overriding `server.http_port`.
pub const HTTP_PORT_ENV: &str = "HTTP_PORT";

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    /// An environment override held an unusable value.
    #[error("Invalid value for {name}: {value}")]
    InvalidEnvVar {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Matching authority configuration.
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Order lookup configuration.
    #[serde(default)]
    pub lookup: LookupConfig,
    /// Leverage caps.
    #[serde(default)]
    pub risk: RiskConfig,
    /// Markets served by the static registry.
    #[serde(default)]
    pub markets: Vec<Market>,
    /// Account balances checked for margin. Unlisted accounts are not checked.
    #[serde(default)]
    pub accounts: Vec<AccountSeed>,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to `$ORDER_ENGINE_CONFIG`,
///   then `config.yaml`.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, str::to_string);

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    let interpolated = interpolate_env_vars(&contents);
    let mut config: Config = serde_yaml_bw::from_str(&interpolated)?;

    apply_port_override(&mut config, std::env::var(HTTP_PORT_ENV).ok())?;
    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

fn apply_port_override(config: &mut Config, value: Option<String>) -> Result<(), ConfigError> {
    let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(());
    };
    config.server.http_port = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: HTTP_PORT_ENV,
            value: raw.clone(),
        })?;
    Ok(())
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if let Err(e) = config.server.socket_addr() {
        return Err(ConfigError::ValidationError(format!(
            "server.bind_address '{}' is not an IP address: {e}",
            config.server.bind_address
        )));
    }

    let metrics = &config.observability.metrics;
    if metrics.enabled && metrics.port == config.server.http_port {
        return Err(ConfigError::ValidationError(
            "server.http_port and observability.metrics.port must be different".to_string(),
        ));
    }

    if config.matching.timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "matching.timeout_ms must be positive".to_string(),
        ));
    }

    if config.lookup.timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "lookup.timeout_ms must be positive".to_string(),
        ));
    }

    if config.risk.default_max_leverage == 0 {
        return Err(ConfigError::ValidationError(
            "risk.default_max_leverage must be at least 1".to_string(),
        ));
    }

    if let Some((symbol, _)) = config.risk.caps.iter().find(|(_, cap)| **cap == 0) {
        return Err(ConfigError::ValidationError(format!(
            "risk.caps.{symbol} must be at least 1"
        )));
    }

    let mut seen = HashSet::new();
    for market in &config.markets {
        if market.symbol.is_empty() {
            return Err(ConfigError::ValidationError(
                "markets[].symbol must not be empty".to_string(),
            ));
        }
        if !seen.insert(&market.symbol) {
            return Err(ConfigError::ValidationError(format!(
                "market {} is listed more than once",
                market.symbol
            )));
        }
        if market.mark_price <= Decimal::ZERO || market.index_price <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "market {} prices must be positive",
                market.symbol
            )));
        }
    }

    let mut accounts = HashSet::new();
    for account in &config.accounts {
        if account.id.is_blank() {
            return Err(ConfigError::ValidationError(
                "accounts[].id must not be empty".to_string(),
            ));
        }
        if !accounts.insert(&account.id) {
            return Err(ConfigError::ValidationError(format!(
                "account {} is listed more than once",
                account.id
            )));
        }
        if account.balance < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "account {} balance must not be negative",
                account.id
            )));
        }
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Symbol;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.matching.timeout_ms, 2_000);
        assert_eq!(config.lookup.timeout_ms, 1_000);
        assert_eq!(config.risk.default_max_leverage, 20);
        assert!(config.markets.is_empty());
        assert_eq!(config.observability.logging.format, "json");
        assert!(config.observability.metrics.enabled);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "level: ${ORDER_ENGINE_TEST_NONEXISTENT_VAR:-debug}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "level: debug");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "bind: ${ORDER_ENGINE_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "bind: ");
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "matching:\n  timeout_ms: ${{ORDER_ENGINE_TEST_MATCHING_MS:-750}}\nrisk:\n  default_max_leverage: 5"
        )
        .unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.matching.timeout_ms, 750);
        assert_eq!(config.risk.default_max_leverage, 5);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let err = load_config(path.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        apply_port_override(&mut config, Some(" 9000 ".to_string())).unwrap();
        assert_eq!(config.server.http_port, 9000);

        apply_port_override(&mut config, None).unwrap();
        apply_port_override(&mut config, Some(String::new())).unwrap();
        assert_eq!(config.server.http_port, 9000);

        let err = apply_port_override(&mut config, Some("eighty".to_string())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar {
                name: HTTP_PORT_ENV,
                ..
            }
        ));
    }

    #[test]
    fn test_validation_port_clash() {
        let yaml = r"
server:
  http_port: 9090
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for clashing ports");
        };
        assert!(err.to_string().contains("must be different"));
    }

    #[test]
    fn test_port_clash_allowed_when_metrics_disabled() {
        let yaml = r"
server:
  http_port: 9090
observability:
  metrics:
    enabled: false
";
        assert!(load_config_from_string(yaml).is_ok());
    }

    #[test]
    fn test_validation_bad_bind_address() {
        let yaml = r#"
server:
  bind_address: "localhost"
"#;
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for non-IP bind address");
        };
        assert!(err.to_string().contains("bind_address"));
    }

    #[test]
    fn test_validation_zero_timeouts() {
        for yaml in ["matching:\n  timeout_ms: 0\n", "lookup:\n  timeout_ms: 0\n"] {
            let Err(err) = load_config_from_string(yaml) else {
                panic!("expected error for zero timeout");
            };
            assert!(err.to_string().contains("timeout_ms"));
        }
    }

    #[test]
    fn test_validation_zero_leverage_cap() {
        let yaml = r"
risk:
  caps:
    BTC-PERP: 0
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero cap");
        };
        assert!(err.to_string().contains("BTC-PERP"));
    }

    #[test]
    fn test_validation_duplicate_market() {
        let yaml = r"
markets:
  - symbol: BTC-PERP
    base_asset: BTC
    quote_asset: USD
    index_price: 50000
    mark_price: 50010
  - symbol: btc-perp
    base_asset: BTC
    quote_asset: USD
    index_price: 50000
    mark_price: 50010
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for duplicate market");
        };
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validation_negative_balance() {
        let yaml = r"
accounts:
  - id: u1
    balance: -1
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for negative balance");
        };
        assert!(err.to_string().contains("u1"));
    }

    #[test]
    fn test_validation_duplicate_account() {
        let yaml = r"
accounts:
  - id: u1
    balance: 10
  - id: u1
    balance: 20
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for duplicate account");
        };
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
server:
  bind_address: "127.0.0.1"
  http_port: 8081

matching:
  timeout_ms: 500

lookup:
  timeout_ms: 250

risk:
  default_max_leverage: 10
  caps:
    btc-perp: 50

markets:
  - symbol: BTC-PERP
    base_asset: BTC
    quote_asset: USD
    index_price: 50000
    mark_price: 50010
    funding_rate: 0.0001
  - symbol: ETH-USDT
    base_asset: ETH
    quote_asset: USDT
    index_price: 3000
    mark_price: 3005

accounts:
  - id: u1
    email: u1@example.com
    balance: 2500.5

observability:
  logging:
    level: "debug"
    format: "pretty"
  metrics:
    enabled: true
    port: 9191
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(
            config.server.socket_addr().unwrap(),
            "127.0.0.1:8081".parse().unwrap()
        );
        assert_eq!(config.matching.timeout().as_millis(), 500);
        assert_eq!(config.lookup.timeout().as_millis(), 250);
        assert_eq!(config.risk.default_max_leverage, 10);
        assert_eq!(config.risk.caps.get(&Symbol::new("BTC-PERP")), Some(&50));
        assert_eq!(config.markets.len(), 2);
        assert_eq!(config.markets[0].mark_price, dec!(50010));
        assert_eq!(config.markets[0].funding_rate, dec!(0.0001));
        assert_eq!(config.markets[1].volume_24h, Decimal::ZERO);
        let account = config.accounts[0].to_account();
        assert_eq!(account.id.as_str(), "u1");
        assert_eq!(account.email, "u1@example.com");
        assert_eq!(account.balance, dec!(2500.5));
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.observability.metrics.port, 9191);
    }
}
