//! Web command handler

use crate::config::settings::Settings;
use crate::web::WebServer;

/// Handler for the `web` command
pub struct WebCommandHandler {
    config: Settings,
}

impl WebCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Start the frontend, or only validate its section when `dry_run` is set.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }

        WebServer::new(self.config).run().await
    }

    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;
        self.config.web.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Frontend would bind to: {}", self.config.web.address());
        println!("✓ API base URL: {}", self.config.web.api_base_url);
        println!("✓ Session key is configured");
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.web.session_key = "k".repeat(64);
        config
    }

    #[test]
    fn test_web_handler_new() {
        let config = valid_config();
        assert_eq!(WebCommandHandler::new(config.clone()).config(), &config);
    }

    #[tokio::test]
    async fn test_web_handler_dry_run() {
        assert!(WebCommandHandler::new(valid_config()).execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_web_handler_dry_run_short_session_key() {
        let mut config = valid_config();
        config.web.session_key = "too-short".to_string();
        let err = WebCommandHandler::new(config)
            .execute(true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Session key"));
    }
}
