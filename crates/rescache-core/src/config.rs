use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::service::Service;

/// A named base URL (one `[[services]]` table in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Name used on the command line (`--service NAME`).
    pub name: String,
    /// Raw base URL; normalized when the service is built.
    pub base_url: String,
}

/// Global configuration loaded from `~/.config/rescache/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescacheConfig {
    /// Service used when neither `--base` nor `--service` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_service: Option<String>,
    /// Known services, in file order.
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

impl RescacheConfig {
    /// Looks up a service entry by name.
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|s| s.name == name)
    }

    /// The entry named by `default_service`, if set and present.
    pub fn default_service(&self) -> Option<&ServiceConfig> {
        self.default_service
            .as_deref()
            .and_then(|name| self.service(name))
    }

    /// Builds a service for the named entry.
    pub fn build_service(&self, name: &str) -> Result<Service> {
        let cfg = self
            .service(name)
            .with_context(|| format!("no service named {name:?} in config"))?;
        Service::from_config(cfg).with_context(|| format!("service {name:?}"))
    }

    /// Checks names are unique and the default (if any) exists.
    pub fn validate(&self) -> Result<()> {
        for (i, svc) in self.services.iter().enumerate() {
            if svc.name.trim().is_empty() {
                bail!("service #{} has an empty name", i + 1);
            }
            if self.services[..i].iter().any(|s| s.name == svc.name) {
                bail!("duplicate service name {:?}", svc.name);
            }
        }
        if let Some(name) = &self.default_service {
            if self.service(name).is_none() {
                bail!("default_service {name:?} is not a configured service");
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rescache")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`. Base URLs are not parsed here; a bad base
/// only fails when that service is built.
pub fn load_from_path(path: &Path) -> Result<RescacheConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: RescacheConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RescacheConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RescacheConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}
