use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use privnote_core::config::DEFAULT_TIMEOUT;
use privnote_core::link::DEFAULT_ORIGIN;
use privnote_core::ServiceConfig;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PrivnoteConfig {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    pub origin: String,
    pub timeout_seconds: u64,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsSection {
    pub duration_hours: u32,
    pub ask_confirm: bool,
    pub notify_email: Option<String>,
    pub notify_ref: Option<String>,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            duration_hours: 0,
            ask_confirm: true,
            notify_email: None,
            notify_ref: None,
        }
    }
}

impl PrivnoteConfig {
    /// Build the core service configuration, with an optional origin override.
    pub fn service_config(&self, origin_override: Option<&str>) -> anyhow::Result<ServiceConfig> {
        let origin = origin_override.unwrap_or(&self.service.origin);
        Ok(ServiceConfig::with_origin(origin)?
            .timeout(Duration::from_secs(self.service.timeout_seconds.max(1))))
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Read the config at `path`, or the built-in defaults if it does not exist.
pub fn load_config(path: &Path) -> anyhow::Result<PrivnoteConfig> {
    if !path.exists() {
        return Ok(PrivnoteConfig::default());
    }
    read_config(path)
}

pub fn read_config(path: &Path) -> anyhow::Result<PrivnoteConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &PrivnoteConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("privnote"));
        }
    }
    Ok(home_dir()?.join(".config").join("privnote"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nduration_hours = 24\n").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.defaults.duration_hours, 24);
        assert!(config.defaults.ask_confirm);
        assert_eq!(config.service.origin, DEFAULT_ORIGIN);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.service.timeout_seconds, DEFAULT_TIMEOUT.as_secs());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = PrivnoteConfig::default();
        config.defaults.notify_email = Some("alice@example.com".to_string());

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();
        assert_eq!(
            loaded.defaults.notify_email.as_deref(),
            Some("alice@example.com")
        );
    }

    #[test]
    fn test_service_config_override() {
        let config = PrivnoteConfig::default();
        let service = config
            .service_config(Some("http://127.0.0.1:8080"))
            .unwrap();
        assert_eq!(service.create_url(), "http://127.0.0.1:8080/legacy/");

        assert!(config.service_config(Some("not a url")).is_err());
    }
}
