mod create_point;
mod lookup;
mod page;

use clap::{Parser, Subcommand};
use ecoleta_client::{BackendClient, HttpOptions, IbgeClient};
use tracing_subscriber::EnvFilter;

use crate::create_point::CreatePointArgs;

#[derive(Debug, Parser)]
#[command(name = "ecoleta")]
#[command(about = "Register Ecoleta collection points")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the recyclable-item catalog
    Items,
    /// List Brazilian state abbreviations
    Ufs,
    /// List the cities of a state
    Cities {
        /// State abbreviation, e.g. SP
        uf: String,
    },
    /// Fill in and submit the collection point form
    CreatePoint(CreatePointArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = ecoleta_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, api_url = %config.api_url, "configuration loaded");

    let options = HttpOptions::from_app_config(&config);
    let backend = BackendClient::new(&config.api_url, options.clone())?;
    let ibge = IbgeClient::with_base_url(&config.ibge_url, options)?;

    match cli.command {
        Commands::Items => lookup::print_items(&backend).await?,
        Commands::Ufs => lookup::print_ufs(&ibge).await?,
        Commands::Cities { uf } => lookup::print_cities(&ibge, &uf).await?,
        Commands::CreatePoint(args) => {
            create_point::run(&args, backend, ibge, config.device_position).await?;
        }
    }

    Ok(())
}
