//! Configuration merger for CLI arguments and config files
//!
//! Flags given on the command line win over whatever the config files and
//! `FORKFUL_*` variables produced.

use std::path::Path;

use super::parser::{Cli, Commands, Environment};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Applies CLI overrides on top of file-based settings
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base settings from `--config` (single file) or the layered
    /// `config/` directory, honouring `--env`.
    pub fn load(
        config_path: Option<&Path>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let loader = match config_path {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        let loader = match environment {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        Ok(Self::new(loader.load()?))
    }

    /// Returns the base settings with every CLI override applied and the
    /// shared sections re-validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(ref command) = cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;
        if let Some(Commands::Web { .. }) = cli.command {
            config.web.validate()?;
        }

        Ok(config)
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                dry_run: _,
            } => {
                if let Some(host) = host {
                    config.server.host = host.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
                // Command-specific level beats --verbose/--quiet.
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
            Commands::Web {
                host,
                port,
                api_url,
                dry_run: _,
            } => {
                if let Some(host) = host {
                    config.web.host = host.clone();
                }
                if let Some(port) = port {
                    config.web.port = *port;
                }
                if let Some(url) = api_url {
                    config.web.api_base_url = url.clone();
                }
            }
            Commands::Migrate { .. } => {}
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
