//! Serve command handler
//!
//! Validates the API configuration and either stops there (`--dry-run`) or
//! starts the REST API server.

use crate::config::settings::Settings;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Run the API until a shutdown signal arrives, or only validate when
    /// `dry_run` is set.
    ///
    /// # Errors
    /// - Configuration validation errors (database, JWT)
    /// - Server startup errors
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config).run().await
    }

    /// Validate everything `serve` needs without touching the network
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;
        self.config.database.validate()?;
        self.config.jwt.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ API would bind to: {}", self.config.server.address());
        println!("✓ Database URL is configured");
        println!("✓ JWT secret is configured");
        if self.config.database.auto_migrate {
            println!("✓ Pending migrations would be applied at startup");
        }
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
