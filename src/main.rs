mod cli;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use malnad_homes::config::Config;
use malnad_homes::favorites::JsonFileFavoriteStore;
use malnad_homes::repository::{JsonFileRepository, ListingRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    // RUST_LOG wins over MALNAD_LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str().to_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let data_file = args.data_file.clone().unwrap_or_else(|| config.data_file.clone());
    let repo = JsonFileRepository::new(data_file);
    info!(
        "🏠 Malnad Homes - {} listings at {}",
        repo.backend_name(),
        repo.path().display()
    );

    match args.command {
        Command::Search(search) => cli::search(&repo, &config, search).await,
        Command::Submit(submit) => cli::submit(&repo, submit).await,
        Command::Pending => cli::pending(&repo).await,
        Command::Approve { id } => cli::approve(&repo, &id).await,
        Command::Reject { id } => cli::reject(&repo, &id).await,
        Command::Favorite { user, id } => {
            let store = JsonFileFavoriteStore::new(config.favorites_file.clone());
            cli::favorite(&store, &user, &id).await
        }
        Command::Saved { user } => {
            let store = JsonFileFavoriteStore::new(config.favorites_file.clone());
            cli::saved(&store, &repo, &user).await
        }
    }
}
