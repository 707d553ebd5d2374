//! Read-only listing commands: the item catalog and IBGE geography.
//!
//! Unlike the page loaders these surface failures, since the listing is the
//! whole point of the command.

use ecoleta_client::{BackendClient, IbgeClient};

/// Prints `id  title  image_url`, one item per line.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn print_items(backend: &BackendClient) -> anyhow::Result<()> {
    let items = backend.list_items().await?;
    for item in &items {
        println!("{:>3}  {:<24}  {}", item.id, item.title, item.image_url);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the UF request fails.
pub async fn print_ufs(ibge: &IbgeClient) -> anyhow::Result<()> {
    for uf in ibge.list_ufs().await? {
        println!("{uf}");
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the city request fails.
pub async fn print_cities(ibge: &IbgeClient, uf: &str) -> anyhow::Result<()> {
    let uf = uf.to_uppercase();
    let cities = ibge.list_cities(&uf).await?;
    if cities.is_empty() {
        tracing::warn!(uf = %uf, "no cities returned");
    }
    for city in cities {
        println!("{city}");
    }
    Ok(())
}
