pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::services::DirectoryService;

#[derive(Parser)]
#[command(name = "glpi")]
#[command(about = "GLPI CLI - list users and tickets straight from a GLPI instance")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Open a GLPI session and print its token")]
    Session {
        #[arg(long, help = "Authorization header value, e.g. 'user_token abc123'")]
        authorization: String,
        #[arg(long, help = "GLPI application token")]
        app_token: String,
    },

    #[command(about = "List complete users ordered by first name")]
    Users {
        #[command(flatten)]
        tokens: commands::TokenArgs,
    },

    #[command(about = "List tickets newest first with resolved authors")]
    Tickets {
        #[command(flatten)]
        tokens: commands::TokenArgs,
    },

    #[command(about = "Dump every raw search record of an item type")]
    Fetch {
        #[arg(help = "GLPI item type, e.g. User, Ticket, Computer")]
        item_type: String,
        #[command(flatten)]
        tokens: commands::TokenArgs,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// `--text` wins when both flags are given
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.text {
            OutputFormat::Text
        } else if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let directory = DirectoryService::from_config(crate::config::config())?;

    match cli.command {
        Commands::Session { authorization, app_token } => {
            commands::session(&directory, &authorization, &app_token, &output_format).await
        }
        Commands::Users { tokens } => commands::users(&directory, &tokens, &output_format).await,
        Commands::Tickets { tokens } => commands::tickets(&directory, &tokens, &output_format).await,
        Commands::Fetch { item_type, tokens } => {
            commands::fetch(&directory, &item_type, &tokens, &output_format).await
        }
    }
}
