// Portal configuration
//
// Loaded from a TOML file (`onboarding.toml` next to the process by default,
// path overridable via ONBOARDING_CONFIG). A missing file is not an error:
// every field has a hard default so the engine can run against a locally
// hosted gateway out of the box. Invalid values fail closed.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::PortalError;

/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "ONBOARDING_CONFIG";

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "onboarding.toml";

/// Ceiling on accepted config file size; anything larger is rejected unread.
const MAX_CONFIG_FILE_SIZE: u64 = 256 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortalConfig {
    pub gateway: GatewayConfig,
    pub uploads: UploadConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            uploads: UploadConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Base URL of the remote data gateway, without the `/entities/...` path.
    pub base_url: String,
    /// Entity name sent in every ExecuteRequest envelope.
    pub entity_name: String,
    /// Per-request timeout for gateway calls.
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            entity_name: "ApplicantPortal".to_string(),
            request_timeout_secs: 12,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Largest accepted document, in bytes.
    pub max_size_bytes: u64,
    /// Lower-case extensions accepted for upload, without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: 5 * 1024 * 1024,
            allowed_extensions: vec![
                "pdf".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "doc".to_string(),
                "docx".to_string(),
            ],
        }
    }
}

impl PortalConfig {
    /// Load configuration from the override path, the default filename, or
    /// fall back to defaults when no file exists.
    pub fn load() -> Result<Self, PortalError> {
        let path = match env::var(CONFIG_ENV_VAR) {
            Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
            _ => PathBuf::from(DEFAULT_CONFIG_NAME),
        };
        if !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        Self::from_path(&path)
    }

    /// Load and validate configuration from an explicit path.
    pub fn from_path(path: &Path) -> Result<Self, PortalError> {
        let meta = fs::metadata(path)?;
        if meta.len() > MAX_CONFIG_FILE_SIZE {
            return Err(PortalError::Config(format!(
                "config file {} exceeds {} bytes",
                path.display(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, PortalError> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| PortalError::Config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail closed on values the engine cannot operate with.
    pub fn validate(&self) -> Result<(), PortalError> {
        let url = Url::parse(&self.gateway.base_url)
            .map_err(|e| PortalError::Config(format!("gateway.base_url: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(PortalError::Config(format!(
                "gateway.base_url must be http(s), got '{}'",
                url.scheme()
            )));
        }
        if self.gateway.entity_name.trim().is_empty() {
            return Err(PortalError::Config(
                "gateway.entity_name must not be empty".to_string(),
            ));
        }
        if self.gateway.request_timeout_secs == 0 {
            return Err(PortalError::Config(
                "gateway.request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.uploads.max_size_bytes == 0 {
            return Err(PortalError::Config(
                "uploads.max_size_bytes must be positive".to_string(),
            ));
        }
        if self.uploads.allowed_extensions.is_empty() {
            return Err(PortalError::Config(
                "uploads.allowed_extensions must not be empty".to_string(),
            ));
        }
        for ext in &self.uploads.allowed_extensions {
            if ext.trim().is_empty() || ext.starts_with('.') || ext.chars().any(|c| c.is_uppercase())
            {
                return Err(PortalError::Config(format!(
                    "uploads.allowed_extensions entries must be lower-case without dots, got '{}'",
                    ext
                )));
            }
        }
        Ok(())
    }
}
