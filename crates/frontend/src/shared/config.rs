//! Application configuration.
//!
//! The dashboard ships with an embedded TOML config. The API host is taken
//! from the current window location; only the port comes from the config.

use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub table: TableConfig,
    pub stepper: StepperConfig,
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub search_debounce_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StepperConfig {
    pub draft_key_prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NotificationsConfig {
    pub poll_interval_ms: u32,
    pub title_interval_ms: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000

[table]
default_page_size = 50
page_size_options = [10, 25, 50, 100]
search_debounce_ms = 300

[stepper]
draft_key_prefix = "wizard_draft:"

[notifications]
poll_interval_ms = 30000
title_interval_ms = 1000
"#;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub fn parse_config(raw: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(raw)
}

/// Global configuration, parsed once on first access
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match parse_config(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Embedded config is invalid: {}", e);
            AppConfig::fallback()
        }
    })
}

impl AppConfig {
    fn fallback() -> Self {
        Self {
            api: ApiConfig { port: 3000 },
            table: TableConfig {
                default_page_size: 50,
                page_size_options: vec![10, 25, 50, 100],
                search_debounce_ms: 300,
            },
            stepper: StepperConfig {
                draft_key_prefix: "wizard_draft:".to_string(),
            },
            notifications: NotificationsConfig {
                poll_interval_ms: 30_000,
                title_interval_ms: 1_000,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.table.default_page_size, 50);
        assert_eq!(config.table.search_debounce_ms, 300);
        assert_eq!(config.stepper.draft_key_prefix, "wizard_draft:");
    }

    #[test]
    fn test_fallback_matches_embedded_default() {
        assert_eq!(parse_config(DEFAULT_CONFIG).unwrap(), AppConfig::fallback());
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(parse_config("[api]\nport = 1").is_err());
    }
}
