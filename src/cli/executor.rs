//! Command executor for dispatching CLI commands

use tracing::warn;

use super::handlers::{MigrateCommandHandler, ServeCommandHandler, WebCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppError;

/// Run the parsed command with merged settings
///
/// No subcommand means `serve`. Long-running commands only return once the
/// server has shut down.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    validate_command_args(cli)?;

    match cli.command_or_default() {
        Commands::Serve { dry_run, .. } => {
            ServeCommandHandler::new(settings).execute(dry_run).await
        }
        Commands::Web { dry_run, .. } => WebCommandHandler::new(settings).execute(dry_run).await,
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await
        }
    }
}

fn validate_command_args(cli: &Cli) -> Result<(), AppError> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match cli.command {
        Some(Commands::Serve {
            ref host,
            port: Some(port),
            ..
        })
        | Some(Commands::Web {
            ref host,
            port: Some(port),
            ..
        }) if port < 1024 => {
            if host.as_deref() == Some("0.0.0.0") {
                warn!(port, "Binding to 0.0.0.0 on a privileged port usually requires root");
            }
        }
        Some(Commands::Migrate {
            rollback: Some(steps),
            ..
        }) if steps > 50 => {
            warn!(steps, "Rolling back a large number of migrations");
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/forkful_test".to_string();
        config.jwt.secret = "0123456789abcdef0123456789abcdef".to_string();
        config.web.session_key = "k".repeat(64);
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["forkful", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_web_dry_run() {
        let cli = Cli::try_parse_from(["forkful", "web", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, valid_config()).await.is_ok());
    }

    #[test]
    fn test_validate_command_args() {
        let cli = Cli::try_parse_from(["forkful", "serve", "--port", "8080"]).unwrap();
        assert!(validate_command_args(&cli).is_ok());

        let cli = Cli::try_parse_from(["forkful", "migrate", "--rollback", "60"]).unwrap();
        assert!(validate_command_args(&cli).is_ok());
    }

    #[tokio::test]
    async fn test_validate_conflicting_args() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(5),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };

        let err = execute_command(&cli, valid_config()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::Validation { field, .. }) if field == "cli_arguments"
        ));
    }
}
