//! # Pure data module: configuration DTOs only
//!
//! Maps the TOML config file onto [`AppConfig`]. No validation and no
//! default values here: a missing key becomes an empty path or zero delay,
//! and `qvuew::bootstrap` decides what those mean.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Preference store file (path info only, no existence check)
    pub preferences_path: PathBuf,

    /// JSON business catalog; empty means no catalog
    pub catalog_path: PathBuf,

    /// Directory for rolling log files; empty disables file logging
    pub log_dir: PathBuf,

    /// Simulated auth backend latencies
    pub auth: AuthDelays,
}

/// Latencies of the simulated auth backend, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthDelays {
    pub send_code_ms: u64,
    pub login_ms: u64,
    pub signup_ms: u64,
    pub reset_password_ms: u64,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// Empty strings and zero delays are valid facts; negative integers are
    /// read as zero.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let ms_at = |key: &str| {
            toml_value
                .get("auth")
                .and_then(|a| a.get(key))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(0)
        };

        Ok(Self {
            preferences_path: PathBuf::from(str_at("storage", "preferences_path")),
            catalog_path: PathBuf::from(str_at("storage", "catalog_path")),
            log_dir: PathBuf::from(str_at("logging", "log_dir")),
            auth: AuthDelays {
                send_code_ms: ms_at("send_code_delay_ms"),
                login_ms: ms_at("login_delay_ms"),
                signup_ms: ms_at("signup_delay_ms"),
                reset_password_ms: ms_at("reset_password_delay_ms"),
            },
        })
    }

    /// Create empty AppConfig (all empty/zero values)
    pub fn empty() -> Self {
        Self {
            preferences_path: PathBuf::new(),
            catalog_path: PathBuf::new(),
            log_dir: PathBuf::new(),
            auth: AuthDelays::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_all_sections() {
        let toml_str = r#"
            [storage]
            preferences_path = "/tmp/qvuew/preferences.json"
            catalog_path = "/tmp/qvuew/catalog.json"

            [auth]
            send_code_delay_ms = 10
            login_delay_ms = 20
            signup_delay_ms = 30
            reset_password_delay_ms = 40

            [logging]
            log_dir = "/tmp/qvuew/logs"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(
            config.preferences_path,
            PathBuf::from("/tmp/qvuew/preferences.json")
        );
        assert_eq!(config.catalog_path, PathBuf::from("/tmp/qvuew/catalog.json"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/qvuew/logs"));
        assert_eq!(
            config.auth,
            AuthDelays {
                send_code_ms: 10,
                login_ms: 20,
                signup_ms: 30,
                reset_password_ms: 40,
            }
        );
    }

    #[test]
    fn test_from_toml_missing_values_are_empty_facts() {
        let toml_value: Value = toml::from_str("[auth]\nlogin_delay_ms = -5\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, AppConfig::empty());
    }
}
