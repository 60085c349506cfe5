#![warn(clippy::pedantic)]

use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use clap::Parser;

mod cli;
mod config;
mod constants;
mod context;
mod event;
mod external_contributors;
#[cfg(test)]
mod fixtures;
mod octocrab_utils;
mod server;
mod shared;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    cli::init_tracing();

    let mut cli = cli::Cli::parse();
    let config = config::OpsBotConfig::load(cli.config.as_deref())?;

    // Set global octocrab instance using the provided auth
    octocrab::initialise(std::mem::take(&mut cli.auth).try_into_octocrab().await?);

    match cli.command {
        cli::Commands::Serve(args) => {
            server::serve(args, config).await?;
        }
        cli::Commands::Handle(args) => {
            if args.event != constants::PULL_REQUEST_EVENT {
                bail!("Unsupported event {:?}", args.event);
            }
            let payload = tokio::fs::read_to_string(&args.payload)
                .await
                .with_context(|| format!("failed to read {}", args.payload.display()))?;
            let payload: event::PullRequestEvent = serde_json::from_str(&payload)?;
            let outcome =
                server::handle_event(payload.into(), octocrab::instance(), Arc::new(config))
                    .await?;
            if outcome.is_none() {
                tracing::info!("Nothing to do");
            }
        }
    }
    Ok(())
}
