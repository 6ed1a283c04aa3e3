use crate::{Error, Result};
use motobook_providers::{CatalogSource, FileCatalogSource, HttpCatalogSource};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. MOTOBOOK_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.motobook (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("MOTOBOOK_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("motobook"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".motobook"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_otp_accept_code() -> String {
    "123456".to_string()
}

/// Where the catalog snapshot comes from. A local file takes precedence
/// over the endpoint so demos and tests can pin a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig { endpoint: None, file: None, timeout_secs: default_timeout_secs() }
    }
}

/// Mock gateway knobs plus the shared per-call timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_otp_accept_code")]
    pub otp_accept_code: String,
    #[serde(default)]
    pub latency_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            timeout_secs: default_timeout_secs(),
            otp_accept_code: default_otp_accept_code(),
            latency_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Config {
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_secs)
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway.timeout_secs)
    }

    pub fn gateway_latency(&self) -> Duration {
        Duration::from_millis(self.gateway.latency_ms)
    }

    /// Build the configured catalog source.
    pub fn catalog_source(&self) -> Result<Box<dyn CatalogSource>> {
        if let Some(file) = &self.catalog.file {
            return Ok(Box::new(FileCatalogSource::new(file)));
        }
        if let Some(endpoint) = &self.catalog.endpoint {
            let source = HttpCatalogSource::new(endpoint, self.catalog_timeout())
                .map_err(Error::Provider)?;
            return Ok(Box::new(source));
        }
        Err(Error::Config(
            "no catalog source configured; set catalog.endpoint or catalog.file (run 'motobook init')"
                .to_string(),
        ))
    }
}
