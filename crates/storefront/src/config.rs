//! Page host configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `BAGSHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `BAGSHOP_PORT` - Listen port (default: 3000)
//! - `BAGSHOP_STATIC_DIR` - Stylesheet and images (default: crates/storefront/static)
//! - `BAGSHOP_PKG_DIR` - wasm-bindgen output (default: crates/web/pkg)
//! - `BAGSHOP_ASSETS_DIR` - 3D models (default: crates/storefront/assets)
//! - `BAGSHOP_MODEL_PATH` - Model URL handed to the viewer (default: /assets/red-handbag.glb)
//! - `BAGSHOP_SWATCHES` - Comma-separated swatch colors (default: #111827,#b91c1c,#d6b48c,#f5f5f4)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0 to 1 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0 to 1 (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use vibe_bagshop_core::Color;

const DEFAULT_SWATCHES: &str = "#111827,#b91c1c,#d6b48c,#f5f5f4";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Page host configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Directory served under `/pkg`
    pub pkg_dir: PathBuf,
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
    /// URL of the 3D model, written to the canvas `data-model-src`
    pub model_path: String,
    /// Swatch colors in display order; never empty
    pub swatches: Vec<Color>,
    /// Error tracking
    pub sentry: SentryConfig,
}

/// Sentry client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SentryConfig {
    /// Sentry DSN; Sentry is disabled when unset
    pub dsn: Option<String>,
    /// Environment tag, e.g. `production`
    pub environment: Option<String>,
    /// Fraction of errors reported
    pub sample_rate: f32,
    /// Fraction of requests traced
    pub traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build configuration from an explicit variable map.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = get_env_or_default(vars, "BAGSHOP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BAGSHOP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default(vars, "BAGSHOP_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BAGSHOP_PORT".to_string(), e.to_string()))?;

        let model_path = get_env_or_default(vars, "BAGSHOP_MODEL_PATH", "/assets/red-handbag.glb");
        if model_path.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "BAGSHOP_MODEL_PATH".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            static_dir: get_env_or_default(vars, "BAGSHOP_STATIC_DIR", "crates/storefront/static")
                .into(),
            pkg_dir: get_env_or_default(vars, "BAGSHOP_PKG_DIR", "crates/web/pkg").into(),
            assets_dir: get_env_or_default(vars, "BAGSHOP_ASSETS_DIR", "crates/storefront/assets")
                .into(),
            model_path,
            swatches: parse_swatches(&get_env_or_default(
                vars,
                "BAGSHOP_SWATCHES",
                DEFAULT_SWATCHES,
            ))?,
            sentry: SentryConfig::from_vars(vars)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SentryConfig {
    fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: get_optional_env(vars, "SENTRY_DSN"),
            environment: get_optional_env(vars, "SENTRY_ENVIRONMENT"),
            sample_rate: parse_rate(vars, "SENTRY_SAMPLE_RATE", "1.0")?,
            traces_sample_rate: parse_rate(vars, "SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable. Empty values count as unset.
fn get_optional_env(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Get a variable or a default value.
fn get_env_or_default(vars: &HashMap<String, String>, key: &str, default: &str) -> String {
    vars.get(key).cloned().unwrap_or_else(|| default.to_string())
}

/// Parse a comma-separated swatch list. Blank entries are skipped.
fn parse_swatches(raw: &str) -> Result<Vec<Color>, ConfigError> {
    let swatches = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Color::parse(s)
                .map_err(|e| ConfigError::InvalidEnvVar("BAGSHOP_SWATCHES".to_string(), e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if swatches.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            "BAGSHOP_SWATCHES".to_string(),
            "at least one color is required".to_string(),
        ));
    }
    Ok(swatches)
}

/// Parse a sample rate in `0.0..=1.0`.
fn parse_rate(vars: &HashMap<String, String>, key: &str, default: &str) -> Result<f32, ConfigError> {
    let raw = get_env_or_default(vars, key, default);
    let rate = raw
        .trim()
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("{rate} is outside 0..=1"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.model_path, "/assets/red-handbag.glb");
        assert_eq!(config.pkg_dir, PathBuf::from("crates/web/pkg"));
        assert_eq!(config.swatches.len(), 4);
        assert_eq!(config.swatches[0].as_str(), "#111827");
        assert_eq!(
            config.sentry,
            SentryConfig {
                dsn: None,
                environment: None,
                sample_rate: 1.0,
                traces_sample_rate: 0.0,
            }
        );
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_vars(&vars(&[
            ("BAGSHOP_HOST", "0.0.0.0"),
            ("BAGSHOP_PORT", "8080"),
            ("BAGSHOP_MODEL_PATH", "/assets/tote.glb"),
            ("BAGSHOP_SWATCHES", " #FFF , ,#000000 "),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.25"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.model_path, "/assets/tote.glb");
        let swatches: Vec<&str> = config.swatches.iter().map(Color::as_str).collect();
        assert_eq!(swatches, vec!["#fff", "#000000"]);
        assert_eq!(config.sentry.dsn.as_deref(), Some("https://key@sentry.example/1"));
        assert!((config.sentry.traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_dsn_disables_sentry() {
        let config = StorefrontConfig::from_vars(&vars(&[("SENTRY_DSN", "  ")])).unwrap();
        assert_eq!(config.sentry.dsn, None);
    }

    #[test]
    fn test_invalid_port() {
        let err = StorefrontConfig::from_vars(&vars(&[("BAGSHOP_PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "BAGSHOP_PORT"));
    }

    #[test]
    fn test_invalid_swatch() {
        let err = parse_swatches("#111827,red").unwrap_err();
        assert!(err.to_string().contains("BAGSHOP_SWATCHES"));
        assert!(err.to_string().contains("red"));
    }

    #[test]
    fn test_blank_swatch_list() {
        assert!(parse_swatches(" , ").is_err());
    }

    #[test]
    fn test_rate_out_of_range() {
        let err =
            StorefrontConfig::from_vars(&vars(&[("SENTRY_SAMPLE_RATE", "1.5")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SENTRY_SAMPLE_RATE"));
        assert!(parse_rate(&vars(&[("X", "abc")]), "X", "0").is_err());
    }

    #[test]
    fn test_empty_model_path() {
        let err = StorefrontConfig::from_vars(&vars(&[("BAGSHOP_MODEL_PATH", " ")])).unwrap_err();
        assert!(err.to_string().contains("BAGSHOP_MODEL_PATH"));
    }
}
