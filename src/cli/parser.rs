//! CLI argument parsing with clap
//!
//! Defines the `forkful` command line: the REST API (`serve`), the
//! server-rendered frontend (`web`) and schema migrations (`migrate`).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Restaurant reviews: REST API and web frontend
#[derive(Parser, Debug)]
#[command(name = "forkful")]
#[command(about = "Restaurant reviews: REST API and web frontend")]
#[command(long_about = "
Forkful serves a restaurant review REST API backed by PostgreSQL and a
server-rendered web frontend that talks to that API over HTTP.

EXAMPLES:
    # Start the REST API with default configuration
    forkful serve

    # Start the API on all interfaces
    forkful serve --host 0.0.0.0 --port 5185

    # Start the web frontend against a remote API
    forkful web --port 5000 --api-url http://api.internal:5185

    # Use a custom configuration file
    forkful --config /etc/forkful/production.toml serve

    # Check configuration without starting anything
    forkful serve --dry-run
    forkful web --dry-run

    # Apply, preview or roll back database migrations
    forkful migrate
    forkful migrate --dry-run
    forkful migrate --rollback 2
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Read this single TOML file instead of the layered `config/` directory.
    /// `FORKFUL_*` environment variables still apply on top of it.
    ///
    /// Example: --config /etc/forkful/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` layer is loaded, taking
    /// precedence over `FORKFUL_APP_ENV`.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the REST API server (default)
    ///
    /// Examples:
    ///   forkful serve                            # Start with defaults
    ///   forkful serve --host 0.0.0.0 --port 80   # Bind to all interfaces on port 80
    ///   forkful serve --dry-run                  # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 5185
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over the configuration file and --verbose/--quiet.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Start the server-rendered web frontend
    ///
    /// Examples:
    ///   forkful web                                      # Start with defaults
    ///   forkful web --api-url http://127.0.0.1:5185      # Point at a specific API
    ///   forkful web --dry-run                            # Validate config without starting
    Web {
        /// Host address to bind to
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 5000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Base URL of the REST API, without the `/api` suffix
        #[arg(long, value_name = "URL", value_parser = super::validation::validate_api_url)]
        api_url: Option<String>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Examples:
    ///   forkful migrate                    # Apply all pending migrations
    ///   forkful migrate --dry-run          # Show pending migrations without applying
    ///   forkful migrate --rollback 3       # Roll back the last 3 migrations
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to roll back (1 to 100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Checks argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Migrate {
            dry_run: true,
            rollback: Some(_),
        }) = self.command
        {
            return Err("Cannot use --dry-run and --rollback together".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }

    /// The command to run, `serve` when none was given
    pub fn command_or_default(&self) -> Commands {
        match &self.command {
            Some(command) => command.clone(),
            None => Commands::Serve {
                host: None,
                port: None,
                log_level: None,
                dry_run: false,
            },
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}
