use anyhow::Context;
use campus_market::api::ListingSource;
use campus_market::auth::{AllauthClient, AuthSource};
use campus_market::filter::{ProductPanel, PropertyPanel, SortKey};
use campus_market::search::ProductSearch;
use campus_market::{ApiClient, AppConfig};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "campus-market")]
#[command(about = "Browse the campus marketplace from the terminal")]
struct Cli {
    /// TOML config file, overridden by MARKET_* environment variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List shop products
    Shop {
        /// price-asc, price-desc or newest
        sort: Option<SortKey>,
    },
    /// List open rental properties
    Rent {
        /// rent-asc, rent-desc or newest
        sort: Option<SortKey>,
    },
    /// Search products by title
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Show the current session and login providers
    Session,
}

async fn save_json<T: Serialize>(path: &str, items: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing {}", path))?;
    info!("💾 Saved results to {}", path);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let api = ApiClient::new(&config)?;

    info!("🛒 Campus Market");
    info!("API: {}", api.base_url());

    match cli.command {
        Command::Shop { sort } => {
            let shop = api.shop();
            let products = shop.fetch_listings().await.context("fetching products")?;
            info!("✅ Fetched {} listings from {}", products.len(), shop.source_name());

            let mut panel = ProductPanel::new(products);
            panel.set_sort(sort);
            let products = panel.apply();

            for (i, product) in products.iter().enumerate() {
                println!("{}. {} ({} ₹)", i + 1, product.title, product.selling_price);
                println!("   Brand: {}, MRP: {}", product.brand, product.mrp);
                println!("   In stock: {}", product.quantity);
                println!("   ID: {}", product.id);
                println!();
            }
            save_json("products.json", &products).await?;
        }
        Command::Rent { sort } => {
            let rent = api.rent();
            let properties = rent.fetch_listings().await.context("fetching properties")?;
            info!("✅ Fetched {} listings from {}", properties.len(), rent.source_name());

            let mut panel = PropertyPanel::new(properties);
            panel.set_sort(sort);
            let properties = panel.apply();

            for (i, property) in properties.iter().enumerate() {
                println!("{}. {} ({} ₹/month)", i + 1, property.title, property.rent_per_month);
                println!("   Location: {}", property.location);
                println!(
                    "   Vacancy: {}/{}, sharing {}",
                    property.available_vacancy, property.total_vacancy, property.sharing
                );
                println!("   ID: {}", property.id);
                println!();
            }
            save_json("properties.json", &properties).await?;
        }
        Command::Search { query } => {
            let query = query.join(" ");
            let search = ProductSearch::from_config(&config);
            let hits = search
                .search(&api, &query)
                .await
                .context("searching products")?
                .unwrap_or_default();

            info!("🔎 {} result(s) for {:?}", hits.len(), query);
            for hit in &hits {
                println!("{}  {} ({} ₹)", hit.id, hit.title, hit.selling_price);
            }
        }
        Command::Session => {
            let auth = AllauthClient::new(&config)?;
            let status = auth.status().await.context("checking session")?;
            match (&status.user, &status.pending_flow) {
                (Some(user), _) => println!("Signed in as {}", user.username),
                (None, Some(flow)) => println!("Not signed in, pending flow: {}", flow),
                (None, None) => println!("Not signed in"),
            }
            let providers = auth.providers().await.context("loading providers")?;
            for provider in providers {
                println!("Provider: {} ({})", provider.name, provider.id);
            }
        }
    }

    Ok(())
}
