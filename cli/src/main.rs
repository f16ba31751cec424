//! `catalog` — terminal front end for the product catalog API.
//!
//! The binary is the host in the host-does-IO split: `catalog-core` builds
//! requests and owns the view state, this crate executes requests with ureq
//! and prints the state.

mod browse;
mod http;
mod view;

use std::io;
use std::time::Duration;

use anyhow::{bail, Result};
use catalog_core::{ApiResult, CatalogController, HttpRequest, NewProduct, ProductClient, Transport};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::http::UreqTransport;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Browse and edit a product catalog")]
struct Cli {
    /// API base URL, including the `/api` prefix.
    #[arg(long, global = true, env = "CATALOG_API_BASE", default_value = catalog_core::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout.
    #[arg(long, global = true, env = "CATALOG_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List products, optionally filtered.
    List {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        in_stock: bool,
        /// Number of pages to load.
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Create a product.
    Add {
        name: String,
        price: f64,
        #[arg(long)]
        in_stock: bool,
    },
    /// Flip a product's saved flag.
    ToggleSaved { id: u64 },
    /// Delete a product.
    Delete { id: u64 },
    /// Interactive session.
    Browse,
}

fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing();

    let client = ProductClient::new(&cli.base_url);
    let mut http = UreqTransport::new(Duration::from_secs(cli.timeout_secs));
    info!(base_url = client.base_url(), "catalog client ready");

    match cli.command {
        Command::List { query, in_stock, pages } => list(client, &mut http, query, in_stock, pages),
        Command::Add { name, price, in_stock } => {
            let req = client.build_create_product(&NewProduct::new(name, price, in_stock))?;
            let product = call(&mut http, &req, |r| client.parse_create_product(r))?;
            println!("created {}", view::render_product(&product).trim_start());
            Ok(())
        }
        Command::ToggleSaved { id } => {
            let req = client.build_toggle_saved(id);
            let product = call(&mut http, &req, |r| client.parse_toggle_saved(r))?;
            println!("{}", view::render_product(&product).trim_start());
            Ok(())
        }
        Command::Delete { id } => {
            let req = client.build_delete_product(id);
            call(&mut http, &req, |r| client.parse_delete_product(r))?;
            println!("deleted #{id}");
            Ok(())
        }
        Command::Browse => {
            let mut catalog = CatalogController::new(client);
            browse::run(&mut catalog, &mut http, io::stdin().lock(), io::stdout())
        }
    }
}

/// One request straight through the API client, no controller state.
fn call<T>(
    http: &mut UreqTransport,
    req: &HttpRequest,
    parse: impl FnOnce(catalog_core::HttpResponse) -> ApiResult<T>,
) -> Result<T> {
    let response = http.execute(req)?;
    Ok(parse(response)?)
}

fn list(
    client: ProductClient,
    http: &mut UreqTransport,
    query: Option<String>,
    in_stock: bool,
    pages: u32,
) -> Result<()> {
    let mut catalog = CatalogController::new(client);
    let pending = catalog
        .set_filters(query.unwrap_or_default(), in_stock)
        .or_else(|| catalog.mount());
    catalog.run_opt(pending, http);

    for _ in 1..pages {
        let pending = catalog.load_more();
        if catalog.run_opt(pending, http).is_none() {
            break;
        }
    }

    if let Some(error) = &catalog.state().error {
        bail!("{error}");
    }
    print!("{}", view::render(catalog.state()));
    Ok(())
}
