//! Catalog lookups: brand list and price bounds

use crate::config::Config;
use crate::error::Result;
use crate::search::range::format_label;
use crate::service::{ApiClient, SearchService};
use colored::Colorize;

/// Print the brands offered by the catalog
pub async fn list_brands(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.service)?;
    let brands = client.brands().await?;

    if brands.is_empty() {
        println!("{}", "No brands available.".yellow());
        return Ok(());
    }

    println!("\nBrands ({}):", brands.len());
    for brand in brands {
        println!("  {}", brand.cyan());
    }
    println!();
    Ok(())
}

/// Print the catalog price bounds
pub async fn show_price_range(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.service)?;
    let bounds = client.price_range().await?;
    println!("Price range: {}", format_label([bounds.min, bounds.max]).green());
    Ok(())
}
