use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use super::prompt::{AlertCommand, ConfirmCommand};
use tui_modals::config::Config;

/// Modal alert and confirmation prompts for your terminal
#[derive(Parser, Debug)]
#[command(
    name = "modals",
    version,
    about = "Modal alert and confirmation prompts for your terminal",
    long_about = r#"Shows a single modal dialog on the alternate screen and reports the answer.

Examples:
  modals alert "Build finished"              # Acknowledge a message
  modals confirm "Delete the file?"          # Exit 0 on yes, 1 on no
  echo "Deploy now?" | modals confirm        # Read the question from stdin"#
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Configuration file to use instead of the default locations
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show an alert
    Alert(AlertCommand),
    /// Ask a yes/no question
    Confirm(ConfirmCommand),
}

impl Cli {
    /// Run the selected prompt and return the process exit code
    pub async fn execute(self, config: Config) -> Result<i32> {
        if self.debug {
            debug!("Debug logging enabled");
        }
        config.validate()?;
        debug!(?config, "Configuration initialized");

        let exit = match self.command {
            Commands::Alert(cmd) => cmd.execute(&config).await?,
            Commands::Confirm(cmd) => cmd.execute(&config).await?,
        };

        info!(outcome = ?exit.outcome, aborted = exit.aborted, "Prompt finished");
        Ok(exit.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_confirm_with_globals() {
        let cli = Cli::try_parse_from([
            "modals",
            "confirm",
            "Delete",
            "it?",
            "--yes-text",
            "Delete",
            "--no-backdrop-close",
            "--log-file",
            "/tmp/modals.log",
        ])
        .unwrap();

        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/modals.log")));
        match cli.command {
            Commands::Confirm(cmd) => {
                assert_eq!(cmd.message, vec!["Delete".to_string(), "it?".to_string()]);
                assert_eq!(cmd.yes_text.as_deref(), Some("Delete"));
                assert!(cmd.no_backdrop_close);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_alert() {
        let cli = Cli::try_parse_from(["modals", "--debug", "alert", "Saved", "--confirm-text", "OK"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Commands::Alert(cmd) => {
                assert_eq!(cmd.message, vec!["Saved".to_string()]);
                assert_eq!(cmd.confirm_text.as_deref(), Some("OK"));
                assert_eq!(cmd.alarm_text, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["modals"]).is_err());
    }
}
