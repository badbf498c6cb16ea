pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "uniclub")]
#[command(about = "UniClub CLI - Command-line client for the UniClub API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in, sign out and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Browse clubs and their members")]
    Club {
        #[command(subcommand)]
        cmd: commands::club::ClubCommands,
    },

    #[command(about = "Search and apply to recruitments")]
    Recruitment {
        #[command(subcommand)]
        cmd: commands::recruitment::RecruitmentCommands,
    },

    #[command(about = "Your applications")]
    Application {
        #[command(subcommand)]
        cmd: commands::application::ApplicationCommands,
    },

    #[command(about = "Notifications")]
    Notification {
        #[command(subcommand)]
        cmd: commands::notification::NotificationCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let result = dispatch(cli.command, output_format.clone()).await;
    if let Err(e) = &result {
        utils::output_error(&output_format, &e.to_string())?;
    }
    result
}

async fn dispatch(command: Commands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = config::build_client()?;

    match command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &client, output_format).await,
        Commands::Club { cmd } => commands::club::handle(cmd, &client, output_format).await,
        Commands::Recruitment { cmd } => commands::recruitment::handle(cmd, &client, output_format).await,
        Commands::Application { cmd } => commands::application::handle(cmd, &client, output_format).await,
        Commands::Notification { cmd } => commands::notification::handle(cmd, &client, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_selects_json_output() {
        let cli = Cli::try_parse_from(["uniclub", "notification", "unread", "--json"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));

        let cli = Cli::try_parse_from(["uniclub", "auth", "status"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Text));
    }

    #[test]
    fn text_is_the_default_not_a_flag() {
        assert!(Cli::try_parse_from(["uniclub", "--text", "auth", "status"]).is_err());
    }
}
