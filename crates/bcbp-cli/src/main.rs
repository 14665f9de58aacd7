mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { payload, pretty } => commands::decode(payload, pretty),
        Commands::Encode { input } => commands::encode(input.as_deref()),
        Commands::Inspect {
            payload,
            reference_date,
        } => commands::inspect(payload, reference_date),
        Commands::Validate { payload } => commands::validate(payload),
    }
}
