use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;

use commands::{ConfigCommand, FavoriteCommand, ProfileCommand, RecipeCommand, UploadCommand};
use config::Config;
use resep_core::{ApiClient, FavoritesService, IdentityProvider, LocalStore, UploadClient};

/// Default log directives when RUST_LOG is unset. Most events (offline
/// fallbacks, corrupt-file recovery) are emitted from resep_core, so it
/// is named alongside the binary crate.
const DEFAULT_LOG_FILTER: &str = "resep=warn,resep_core=warn";

#[derive(Parser)]
#[command(name = "resep")]
#[command(version)]
#[command(about = "A recipe catalog CLI with favorites and profile", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the recipe catalog
    Recipe(RecipeCommand),

    /// Manage favorite recipes
    Favorite(FavoriteCommand),

    /// Manage the local user profile
    Profile(ProfileCommand),

    /// Upload a recipe image
    Upload(UploadCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    tracing::debug!("Data directory: {}", config.data_dir.value.display());

    let store = LocalStore::new(config.data_dir.value.clone());
    let api_client = config.api.base_url.as_deref().map(ApiClient::new);

    match cli.command {
        Some(Commands::Recipe(cmd)) => {
            cmd.run(api_client.as_ref()).await?;
        }
        Some(Commands::Favorite(cmd)) => {
            let mut identity = IdentityProvider::new(store.clone());
            let service = FavoritesService::new(api_client, store);
            cmd.run(&service, &mut identity).await?;
        }
        Some(Commands::Profile(cmd)) => {
            let mut identity = IdentityProvider::new(store.clone());
            cmd.run(&store, &mut identity)?;
        }
        Some(Commands::Upload(cmd)) => {
            let upload_client = config.api.base_url.as_deref().map(UploadClient::new);
            cmd.run(upload_client.as_ref()).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
