//! Onboarding CLI - migrations and profile tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! onboard migrate
//!
//! # Submit a profile saved as JSON (same field names as the web form)
//! onboard submit investor --file investor.json
//! onboard submit startup --file startup.json
//!
//! # Look up stored profiles
//! onboard list investors
//! onboard get startup 7f1d3a52-0c8e-4b7a-9d2e-3f6a1c5b8e90
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations (`ONBOARD_DATABASE_URL`)
//! - `submit` - Validate and submit a profile through the API (`ONBOARD_API_URL`)
//! - `list` / `get` - Query stored profiles through the API

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use onboarding_core::Persona;

mod commands;

#[derive(Parser)]
#[command(name = "onboard")]
#[command(author, version, about = "Investor and startup onboarding tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Validate and submit a profile
    Submit {
        /// Which kind of profile the file holds
        persona: PersonaArg,

        /// JSON file with the form fields
        #[arg(short, long)]
        file: PathBuf,
    },
    /// List active profiles, newest first
    List {
        /// `investors` or `startups`
        collection: CollectionArg,
    },
    /// Show one profile by ID
    Get {
        /// Which kind of profile to fetch
        persona: PersonaArg,

        /// Profile ID (UUID)
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PersonaArg {
    Investor,
    Startup,
}

#[derive(Clone, Copy, ValueEnum)]
enum CollectionArg {
    Investors,
    Startups,
}

impl From<PersonaArg> for Persona {
    fn from(arg: PersonaArg) -> Self {
        match arg {
            PersonaArg::Investor => Self::Investor,
            PersonaArg::Startup => Self::Startup,
        }
    }
}

impl From<CollectionArg> for Persona {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Investors => Self::Investor,
            CollectionArg::Startups => Self::Startup,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "onboard=info,onboarding_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

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
        Commands::Submit { persona, file } => {
            commands::profiles::submit(persona.into(), &file).await?;
        }
        Commands::List { collection } => commands::profiles::list(collection.into()).await?,
        Commands::Get { persona, id } => commands::profiles::get(persona.into(), &id).await?,
    }
    Ok(())
}
