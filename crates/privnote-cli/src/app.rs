//! Application context for the Privnote CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file and builds the
//! note client from them.

use std::io::IsTerminal;
use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use privnote_core::{HttpTransport, Privnote, ServiceConfig};

use crate::cli::Cli;
use crate::config::{default_config_path, load_config, PrivnoteConfig};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<PrivnoteConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self, no_input: bool) -> bool {
        std::io::stdin().is_terminal() && !no_input
    }

    /// Resolve the config file path from `--config`/`PRIVNOTE_CONFIG` or the XDG default.
    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        match self.cli.config.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
            _ => default_config_path(),
        }
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&PrivnoteConfig> {
        self.config
            .get_or_try_init(|| load_config(&self.config_path()?))
    }

    /// Core service configuration, honoring `--origin`.
    pub fn service_config(&self) -> anyhow::Result<ServiceConfig> {
        self.config()?.service_config(self.cli.origin.as_deref())
    }

    /// Note client over HTTP.
    pub fn privnote(&self) -> anyhow::Result<Privnote<HttpTransport>> {
        Ok(Privnote::connect(self.service_config()?)?)
    }
}
