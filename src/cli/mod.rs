pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster CLI - session tokens and offline per-minute metrics")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign a development session token with the configured secret")]
    Token {
        #[arg(long, help = "Subject (user identity)")]
        sub: String,
        #[arg(long, help = "Display name")]
        name: Option<String>,
        #[arg(long, help = "Email address")]
        email: Option<String>,
        #[arg(long, help = "Lifetime in hours (defaults to AUTH_SESSION_TTL_HOURS)")]
        ttl_hours: Option<i64>,
    },

    #[command(about = "Compute per-minute metrics for a roster JSON file")]
    PerMinute {
        #[arg(help = "Path to a JSON array of player rows")]
        file: PathBuf,
        #[arg(long, help = "Keep aggregate 'total' rows")]
        include_totals: bool,
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

    match cli.command {
        Commands::Token { sub, name, email, ttl_hours } => {
            commands::token::handle(sub, name, email, ttl_hours, output_format)
        }
        Commands::PerMinute { file, include_totals } => {
            commands::per_minute::handle(&file, include_totals, output_format).await
        }
    }
}
