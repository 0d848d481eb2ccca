use crate::credential::Credential;
use crate::error::{GatewayError, Result};
use crate::translate::bedrock_types::default_invoke_url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Name of the environment variable holding the bearer credential
    #[serde(default = "default_credential_env")]
    pub credential_env: String,
    /// Operator override for the vendor invoke URL (private endpoints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_credential_env() -> String {
    "BEARER_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            credential_env: default_credential_env(),
            endpoint_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Search standard locations for a config file.
    /// Priority: CLI arg > CWD > XDG config > home dir > built-in defaults
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        for candidate in config_search_paths() {
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "Loading config");
                return Self::load(&candidate);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Resolve the vendor invoke URL. Never depends on the inbound request.
    pub fn effective_endpoint(&self) -> String {
        self.endpoint_url
            .clone()
            .unwrap_or_else(default_invoke_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the credential from the configured environment variable.
    /// An unset or empty variable yields `None`; the gateway still starts.
    pub fn resolve_credential(&self) -> Option<Credential> {
        std::env::var(&self.credential_env)
            .ok()
            .and_then(Credential::new)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("bedrock-gateway.toml"));

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        paths.push(PathBuf::from(xdg).join("bedrock-gateway").join("config.toml"));
    }
    if let Some(home) = home_dir() {
        paths.push(home.join(".config").join("bedrock-gateway").join("config.toml"));
        paths.push(home.join(".bedrock-gateway.toml"));
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
