//! Configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;
use warpd_context::DEFAULT_AUX_CHAIN;
use warpd_error::{Result, WarpError};

/// Default registry location
pub const DEFAULT_REGISTRY_URL: &str = "https://github.com/hyperlane-xyz/hyperlane-registry";

/// Parsed registry settings handed to the registry client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryLocation {
    pub url: Url,
    /// Git branch to read; `None` reads the default branch
    pub branch: Option<String>,
    pub proxy_url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpdConfig {
    /// Registry settings, see [`WarpdConfig::registry_location`]
    pub registry_url: String,
    pub registry_branch: Option<String>,
    pub registry_proxy_url: Option<String>,
    /// Auxiliary chain the wallet signer attaches to
    pub aux_chain: String,
    /// Directory holding the persisted `app-state` snapshot
    pub storage_dir: PathBuf,
    /// Confirmation wait bound; `None` waits forever
    pub confirmation_timeout_secs: Option<u64>,
    pub registry_backoff_attempts: u32,
    pub log_filter: String,
}

impl Default for WarpdConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            registry_branch: Some("main".to_string()),
            registry_proxy_url: None,
            aux_chain: DEFAULT_AUX_CHAIN.to_string(),
            storage_dir: PathBuf::from(".warpd"),
            confirmation_timeout_secs: None,
            registry_backoff_attempts: 3,
            log_filter: "warpd=info".to_string(),
        }
    }
}

impl WarpdConfig {
    /// Loads `path`, then applies `.env` and process environment overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        dotenvy::dotenv().ok();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` without environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw)
            .map_err(|e| WarpError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Applies `WARPD_*` overrides resolved through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("WARPD_REGISTRY_URL") {
            self.registry_url = v;
        }
        if let Some(v) = lookup("WARPD_REGISTRY_BRANCH") {
            self.registry_branch = Some(v);
        }
        if let Some(v) = lookup("WARPD_REGISTRY_PROXY_URL") {
            self.registry_proxy_url = Some(v);
        }
        if let Some(v) = lookup("WARPD_AUX_CHAIN") {
            self.aux_chain = v;
        }
        if let Some(v) = lookup("WARPD_STORAGE_DIR") {
            self.storage_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("WARPD_CONFIRMATION_TIMEOUT_SECS") {
            let secs = v.trim().parse().map_err(|_| {
                WarpError::Config(format!("WARPD_CONFIRMATION_TIMEOUT_SECS is not a number: {}", v))
            })?;
            self.confirmation_timeout_secs = Some(secs);
        }
        if let Some(v) = lookup("WARPD_LOG") {
            self.log_filter = v;
        }
        Ok(())
    }

    /// Registry URL, branch and proxy, with the URLs parsed
    pub fn registry_location(&self) -> Result<RegistryLocation> {
        let url = Url::parse(&self.registry_url)
            .map_err(|e| WarpError::Config(format!("invalid registry_url: {}", e)))?;
        let proxy_url = self
            .registry_proxy_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| WarpError::Config(format!("invalid registry_proxy_url: {}", e)))?;
        let branch = self.registry_branch.clone().filter(|b| !b.is_empty());
        Ok(RegistryLocation {
            url,
            branch,
            proxy_url,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.registry_location()?;
        if self.aux_chain.is_empty() {
            return Err(WarpError::Config("aux_chain must not be empty".into()));
        }
        if self.registry_backoff_attempts == 0 {
            return Err(WarpError::Config(
                "registry_backoff_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
