//! TapRyt CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! tapryt-cli migrate
//!
//! # Seed the database with a demo user and card
//! tapryt-cli seed -e demo@example.com -p demo-password
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with demo data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tapryt-cli")]
#[command(author, version, about = "TapRyt CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a demo user and card
    Seed {
        /// Email address for the demo user
        #[arg(short, long, default_value = "demo@example.com")]
        email: String,

        /// Password for the demo user
        #[arg(short, long, default_value = "demo-password")]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { email, password } => {
            commands::seed::run(&email, &password).await?;
        }
    }
    Ok(())
}
