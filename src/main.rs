//! Shoprec CLI
//!
//! Binary entry point. CLI parsing (clap) and output formatting; the
//! recommendation logic lives in the library crate.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use shoprec::cart::{Cart, CartLine};
use shoprec::catalog::{JsonCatalog, Product};
use shoprec::config::EngineConfig;
use shoprec::engine::RecommendationEngine;

#[derive(Parser, Debug)]
#[command(name = "shoprec")]
#[command(about = "Content-based product recommendations over a catalog snapshot")]
struct Cli {
    /// Path to the product catalog (JSON array of products)
    #[arg(long, global = true, default_value = "catalog.json")]
    catalog: PathBuf,

    /// Path to an engine config file (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the catalog by free text, most relevant first
    Search(SearchArgs),
    /// Show products related to a reference product
    Related(RelatedArgs),
    /// Show recommendations for a cart
    Cart(CartArgs),
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Free-text query
    query: String,

    /// Maximum number of results to print (0 = all)
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

#[derive(clap::Args, Debug)]
struct RelatedArgs {
    /// Reference product id
    product_id: String,

    /// Maximum number of related items
    #[arg(long, default_value_t = 5)]
    limit: usize,
}

#[derive(clap::Args, Debug)]
struct CartArgs {
    /// Product id of a cart line, in insertion order (repeatable).
    /// An empty cart falls back to the configured default topic.
    #[arg(long = "item")]
    items: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                format!("shoprec={}", cli.log_level)
                    .parse()
                    .expect("valid log directive"),
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::default(),
    };

    let source = Arc::new(JsonCatalog::new(&cli.catalog));
    let engine = RecommendationEngine::new(source, config);
    // Surface a broken catalog immediately instead of as an empty result
    engine.initialize().await?;

    match cli.command {
        Command::Search(args) => {
            let mut results = engine.search(&args.query).await;
            if args.limit > 0 {
                results.truncate(args.limit);
            }
            print_products(&results, cli.json, &format!("matching \"{}\"", args.query))?;
        }
        Command::Related(args) => {
            let results = engine.related_to(&args.product_id, args.limit).await;
            print_products(
                &results,
                cli.json,
                &format!("related to {}", args.product_id),
            )?;
        }
        Command::Cart(args) => {
            let cart = Cart {
                lines: args
                    .items
                    .into_iter()
                    .map(|product_id| CartLine {
                        product_id,
                        quantity: 1,
                    })
                    .collect(),
            };
            let results = engine.recommendations_for_cart(&cart).await;
            print_products(&results, cli.json, "recommended for cart")?;
        }
    }

    Ok(())
}

fn print_products(products: &[Product], json: bool, what: &str) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(products)?);
        return Ok(());
    }

    println!("Found {} products {what}\n", products.len());
    for p in products {
        let brand = p.brand.as_deref().unwrap_or("-");
        println!("  {:<8} {:<32} {:<16} {}", p.id, p.name, p.category, brand);
    }
    Ok(())
}
