use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_api::CatalogClient;
use vitrine_core::{CatalogController, Config, LoadPhase, RemoteCatalogSource};
use vitrine_store::{KvStore, SqliteStore};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(version, about = "Storefront catalog from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List the current catalog (banners and products)
    Catalog,
    /// Live-search the catalog by name or category
    Search {
        /// Search term
        term: String,
    },
    /// Toggle a product in or out of the favorites set
    Fav {
        /// Product id
        id: String,
    },
    /// List favorite product ids
    Favs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;

    let store: Arc<dyn KvStore> = Arc::new(
        SqliteStore::new(&config.store_path()?).context("opening the on-device store")?,
    );
    let source = Arc::new(RemoteCatalogSource::new(CatalogClient::new(
        config.api.base_url.clone(),
    )));

    let (controller, _intents) = CatalogController::new(source, store);
    controller.initialize();
    wait_for_settlement(&controller).await?;
    // The favorites load is a side channel that never blocks the catalog;
    // in a one-shot CLI we still want it applied before reading or toggling.
    tokio::time::sleep(Duration::from_millis(100)).await;

    if controller.phase() == LoadPhase::Failed {
        if let Some(error) = controller.error() {
            tracing::warn!("catalog fetch failed ({error}), showing cached data if any");
        }
    }

    match cli.command {
        Commands::Catalog => {
            for banner in controller.banners() {
                println!("[banner {}] {}", banner.id, banner.photo);
            }
            for product in controller.products() {
                println!(
                    "{:>8}  {}  ({})  R$ {:.2}",
                    product.id, product.name, product.category, product.price
                );
            }
        }
        Commands::Search { term } => {
            controller.set_search_term(&term);
            let hits = controller.filtered_results();
            if hits.is_empty() {
                println!("no matches for '{term}'");
            }
            for product in hits {
                println!("{:>8}  {}  ({})", product.id, product.name, product.category);
            }
        }
        Commands::Fav { id } => {
            controller.toggle_favorite(&id);
            let state = if controller.is_favorite(&id) {
                "added to"
            } else {
                "removed from"
            };
            println!("{id} {state} favorites");
            // The persist runs fire-and-forget; give it a beat before exit.
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        Commands::Favs => {
            for id in controller.favorites() {
                println!("{id}");
            }
        }
    }

    Ok(())
}

/// Block until the catalog request settles, bounded so a dead backend does
/// not hang the terminal forever (the screen layer has no such timeout).
async fn wait_for_settlement(controller: &CatalogController) -> anyhow::Result<()> {
    tokio::time::timeout(Duration::from_secs(30), async {
        while controller.is_loading() {
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    })
    .await
    .context("timed out waiting for the catalog")
}
