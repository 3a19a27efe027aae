//! `technexus`: browse the local catalog and post listings from the terminal.

mod render;

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;

use technexus_catalog::{Category, CategoryFilter, ListingForm, contact_link};
use technexus_core::{Entity, ProductId};
use technexus_infra::{CatalogStore, ListingSubmitter, StorefrontConfig};

#[derive(Parser)]
#[command(name = "technexus", about = "TechNexus storefront catalog")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List listings, newest first.
    List {
        /// All, Phones, Laptops or Accessories.
        #[arg(long, default_value_t = CategoryFilter::All)]
        category: CategoryFilter,

        /// Case-insensitive match against title and description.
        #[arg(long, default_value = "")]
        search: String,

        /// Print the matching records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one listing in full.
    Show { id: ProductId },

    /// Print the seller's WhatsApp link for a listing.
    Contact { id: ProductId },

    /// Post a new listing.
    Post {
        #[arg(long)]
        title: String,

        #[arg(long)]
        price: String,

        /// Seller WhatsApp number; `+` and spaces are ignored.
        #[arg(long)]
        contact: String,

        #[arg(long, default_value_t = Category::Phones)]
        category: Category,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        image_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        technexus_observability::init_with_default("debug");
    } else {
        technexus_observability::init();
    }

    let config = StorefrontConfig::from_env().context("invalid storefront configuration")?;
    tracing::debug!(data_dir = %config.data_dir.display(), slot = %config.storage_key, "starting");

    let mut store = CatalogStore::new(config.catalog_storage());
    store
        .initialize()
        .with_context(|| format!("failed to load catalog from {}", config.data_dir.display()))?;

    match cli.command {
        Command::List {
            category,
            search,
            json,
        } => {
            let found = store.query(category, &search)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                println!("{}\n", render::tabs(category));
                print!("{}", render::grid(&found));
            }
        }
        Command::Show { id } => {
            let Some(product) = store.get(&id)? else {
                bail!("no listing with id {id}");
            };
            print!("{}", render::detail(product));
            println!("\nContact seller: {}", contact_link(product));
        }
        Command::Contact { id } => {
            let Some(product) = store.get(&id)? else {
                bail!("no listing with id {id}");
            };
            println!("{}", contact_link(product));
        }
        Command::Post {
            title,
            price,
            contact,
            category,
            description,
            image_url,
        } => {
            let form = ListingForm {
                title,
                price,
                description,
                category,
                seller_contact: contact,
                image_url,
            };

            let store = Arc::new(Mutex::new(store));
            let submitter = ListingSubmitter::with_delay(store, config.submit_delay);
            let handle = submitter
                .submit(form, |outcome| {
                    if let Ok(product) = outcome {
                        tracing::debug!(id = %product.id(), "submission callback");
                    }
                })
                .context("listing rejected")?;

            eprintln!("Posting listing...");
            let product = handle.wait().await.context("failed to post listing")?;
            println!("Listing posted: {}", product.id());
            println!("{}", render::card(&product));
        }
    }

    Ok(())
}
