//! # Configuration Loader
//!
//! `load_config` is pure data loading: read the TOML file, map it onto the
//! [`AppConfig`] DTO, accept whatever is in the file. Defaults are filled
//! afterwards by [`resolve_config`], which is the only place that decides
//! what an empty path or a zero delay means.

use std::path::PathBuf;

use anyhow::Context;
use qv_core::config::{AppConfig, AuthDelays};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "QVUEW_CONFIG";

/// Latencies used when the config leaves a delay at zero.
pub const DEFAULT_AUTH_DELAYS: AuthDelays = AuthDelays {
    send_code_ms: 1500,
    login_ms: 1500,
    signup_ms: 2000,
    reset_password_ms: 1500,
};

/// Load configuration from a TOML file
///
/// **NO validation is performed**: empty strings, zero and negative delays
/// are mapped as facts.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Like [`load_config`], but a missing file yields an empty config.
pub fn load_or_default(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        return Ok(AppConfig::empty());
    }
    load_config(config_path)
}

/// Config file location: `$QVUEW_CONFIG`, else `<config_dir>/qvuew/config.toml`.
pub fn config_path() -> PathBuf {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(explicit);
    }
    dirs::config_dir()
        .unwrap_or_default()
        .join("qvuew")
        .join("config.toml")
}

/// Fills every empty value with its default.
///
/// Paths default to the platform data directory; a zero delay takes the
/// matching entry of [`DEFAULT_AUTH_DELAYS`].
pub fn resolve_config(config: AppConfig) -> anyhow::Result<AppConfig> {
    let preferences_path = or_default_path(config.preferences_path, qv_infra::fs::preferences_path)?;
    let log_dir = or_default_path(config.log_dir, qv_infra::fs::log_dir)?;

    let or_default_ms = |value: u64, default: u64| if value == 0 { default } else { value };
    let auth = AuthDelays {
        send_code_ms: or_default_ms(config.auth.send_code_ms, DEFAULT_AUTH_DELAYS.send_code_ms),
        login_ms: or_default_ms(config.auth.login_ms, DEFAULT_AUTH_DELAYS.login_ms),
        signup_ms: or_default_ms(config.auth.signup_ms, DEFAULT_AUTH_DELAYS.signup_ms),
        reset_password_ms: or_default_ms(
            config.auth.reset_password_ms,
            DEFAULT_AUTH_DELAYS.reset_password_ms,
        ),
    };

    Ok(AppConfig {
        preferences_path,
        catalog_path: config.catalog_path,
        log_dir,
        auth,
    })
}

fn or_default_path(
    path: PathBuf,
    default: impl FnOnce() -> anyhow::Result<PathBuf>,
) -> anyhow::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        default().context("Failed to resolve default data directory")
    } else {
        Ok(path)
    }
}
