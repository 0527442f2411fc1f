use anyhow::{anyhow, Result};
use clap::Args;
use std::io::{self, IsTerminal, Read};
use tracing::debug;

use tui_modals::config::Config;
use tui_modals::tui::{self, PromptExit, PromptRequest};

/// Show an alert and wait until it is acknowledged
#[derive(Args, Debug)]
pub struct AlertCommand {
    /// Message to show. Read from stdin when omitted
    pub message: Vec<String>,

    /// Heading shown next to the alert marker
    #[arg(long = "alarm-text")]
    pub alarm_text: Option<String>,

    /// Label of the acknowledge control
    #[arg(long = "confirm-text")]
    pub confirm_text: Option<String>,
}

impl AlertCommand {
    pub async fn execute(self, config: &Config) -> Result<PromptExit> {
        debug!("Executing alert command");
        let request = PromptRequest::Alert {
            message: read_message(&self.message)?,
            alarm_text: self.alarm_text,
            confirm_text: self.confirm_text,
        };
        tui::run_prompt(request, config).await
    }
}

/// Ask a yes/no question; exits 0 on yes and 1 on no
#[derive(Args, Debug)]
pub struct ConfirmCommand {
    /// Question to ask. Read from stdin when omitted
    pub message: Vec<String>,

    /// Dialog heading
    #[arg(long)]
    pub title: Option<String>,

    /// Label of the confirming control
    #[arg(long = "yes-text")]
    pub yes_text: Option<String>,

    /// Label of the cancelling control
    #[arg(long = "no-text")]
    pub no_text: Option<String>,

    /// Ignore clicks outside the dialog
    #[arg(long = "no-backdrop-close")]
    pub no_backdrop_close: bool,

    /// Do not print the answer
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl ConfirmCommand {
    pub async fn execute(self, config: &Config) -> Result<PromptExit> {
        debug!("Executing confirm command");
        let request = PromptRequest::Confirm {
            message: read_message(&self.message)?,
            title: self.title,
            yes_text: self.yes_text,
            no_text: self.no_text,
            close_on_backdrop: self.no_backdrop_close.then_some(false),
        };

        let exit = tui::run_prompt(request, config).await?;
        if !self.quiet {
            if let Some(outcome) = exit.outcome {
                println!("{}", outcome);
            }
        }
        Ok(exit)
    }
}

/// Join the message arguments, or read the message from piped stdin.
fn read_message(args: &[String]) -> Result<String> {
    let message = if !args.is_empty() {
        args.join(" ")
    } else if io::stdin().is_terminal() {
        String::new()
    } else {
        debug!("Reading message from stdin");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
        buffer
    };

    let message = message.trim().to_string();
    if message.is_empty() {
        return Err(anyhow!("No message provided. Pass it as arguments or pipe it via stdin."));
    }
    Ok(message)
}
