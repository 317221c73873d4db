//! Configuration management for Floodgate.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable holding the per-minute admission limit.
pub const MINUTE_LIMIT_ENV: &str = "RATE_LIMIT_MAX_REQUESTS_PER_MINUTE";
/// Environment variable holding the per-hour admission limit.
pub const HOUR_LIMIT_ENV: &str = "RATE_LIMIT_MAX_REQUESTS_PER_HOUR";

/// Main configuration for Floodgate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloodgateConfig {
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limiting: RateLimitingConfig,
}

/// Rate limiting configuration.
///
/// Both limits are read once at construction time; the limiter does not
/// observe later changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitingConfig {
    /// Max admitted requests per client per rolling minute window
    #[serde(default = "default_minute_limit")]
    pub minute_limit: u64,

    /// Max admitted requests per client per rolling hour window
    #[serde(default = "default_hour_limit")]
    pub hour_limit: u64,
}

impl Default for RateLimitingConfig {
    fn default() -> Self {
        Self {
            minute_limit: default_minute_limit(),
            hour_limit: default_hour_limit(),
        }
    }
}

fn default_minute_limit() -> u64 {
    20
}

fn default_hour_limit() -> u64 {
    300
}

impl RateLimitingConfig {
    /// Build the configuration from the process environment.
    ///
    /// Reads [`MINUTE_LIMIT_ENV`] and [`HOUR_LIMIT_ENV`]. A variable that is
    /// unset or does not parse as a non-negative integer falls back to the
    /// default for that limit; malformed configuration is never fatal.
    pub fn from_env() -> Self {
        Self {
            minute_limit: parse_limit(
                MINUTE_LIMIT_ENV,
                std::env::var(MINUTE_LIMIT_ENV).ok(),
                default_minute_limit(),
            ),
            hour_limit: parse_limit(
                HOUR_LIMIT_ENV,
                std::env::var(HOUR_LIMIT_ENV).ok(),
                default_hour_limit(),
            ),
        }
    }
}

/// Parse a limit value, falling back to the default when absent or malformed.
fn parse_limit(name: &str, value: Option<String>, default: u64) -> u64 {
    match value {
        None => default,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(limit) => limit,
            Err(_) => {
                warn!(
                    name = name,
                    value = %raw,
                    default = default,
                    "Ignoring non-numeric limit, using default"
                );
                default
            }
        },
    }
}

impl FloodgateConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: FloodgateConfig = serde_yaml::from_str(&contents)
            .map_err(|e| crate::error::FloodgateError::Config(e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RateLimitingConfig::default();
        assert_eq!(config.minute_limit, 20);
        assert_eq!(config.hour_limit, 300);
    }

    #[test]
    fn test_parse_limit_unset_uses_default() {
        assert_eq!(parse_limit(MINUTE_LIMIT_ENV, None, 20), 20);
    }

    #[test]
    fn test_parse_limit_numeric() {
        assert_eq!(parse_limit(MINUTE_LIMIT_ENV, Some("50".to_string()), 20), 50);
        assert_eq!(parse_limit(HOUR_LIMIT_ENV, Some(" 600 ".to_string()), 300), 600);
    }

    #[test]
    fn test_parse_limit_non_numeric_uses_default() {
        assert_eq!(parse_limit(MINUTE_LIMIT_ENV, Some("plenty".to_string()), 20), 20);
        assert_eq!(parse_limit(HOUR_LIMIT_ENV, Some("".to_string()), 300), 300);
        assert_eq!(parse_limit(HOUR_LIMIT_ENV, Some("-5".to_string()), 300), 300);
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
rate_limiting:
  minute_limit: 10
  hour_limit: 100
"#;
        let config: FloodgateConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.rate_limiting.minute_limit, 10);
        assert_eq!(config.rate_limiting.hour_limit, 100);
    }

    #[test]
    fn test_parse_yaml_partial_config_fills_defaults() {
        let yaml = r#"
rate_limiting:
  minute_limit: 5
"#;
        let config: FloodgateConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.rate_limiting.minute_limit, 5);
        assert_eq!(config.rate_limiting.hour_limit, 300);
    }

    #[test]
    fn test_parse_yaml_empty_config() {
        let config: FloodgateConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.rate_limiting, RateLimitingConfig::default());
    }
}
