//! Shopfront CLI - browse the catalog and manage the local cart.
//!
//! # Usage
//!
//! ```bash
//! # New arrivals, filtered and sorted
//! shopfront catalog -c Bags -c Shoes --sort price-ascending --page 2
//!
//! # A configured carousel collection
//! shopfront collection mobiles
//!
//! # Cart
//! shopfront cart add 665f1 --variant L
//! shopfront cart show
//! shopfront cart remove 665f1 --variant L
//! shopfront cart clear
//! ```
//!
//! Configuration comes from the environment; see
//! `shopfront_storefront::config` for the variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_core::SortOption;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::storage::{FileStore, KeyValueStore};
use shopfront_storefront::{AppError, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront catalog and cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a filterable, sortable, paginated product grid
    Catalog(CatalogArgs),
    /// Show a configured product collection
    Collection {
        /// Collection name (omit to list collections)
        name: Option<String>,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Args)]
struct CatalogArgs {
    /// Tag to scope the listing (defaults to the new arrivals tag)
    #[arg(long, conflicts_with = "all")]
    tag: Option<String>,

    /// List the whole catalog instead of a tag
    #[arg(long)]
    all: bool,

    /// Category filter; repeat for several (OR-combined)
    #[arg(short, long = "category")]
    categories: Vec<String>,

    /// Sort order: relevance, price-ascending, price-descending
    #[arg(short, long, default_value = "relevance")]
    sort: SortOption,

    /// Page number (1-indexed)
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Bypass the response cache
    #[arg(long)]
    reload: bool,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents
    Show,
    /// Add a catalog product to the cart
    Add {
        /// Product ID
        product_id: String,

        /// Variant (size); defaults to SHOPFRONT_DEFAULT_VARIANT
        #[arg(short, long)]
        variant: Option<String>,

        /// Units to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line from the cart
    Remove {
        /// Product ID
        product_id: String,

        /// Variant (size); defaults to SHOPFRONT_DEFAULT_VARIANT
        #[arg(short, long)]
        variant: Option<String>,
    },
    /// Remove every line
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output stays clean on stdout
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=warn,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.cart.data_dir.clone()));
    let state = AppState::with_parts(config, store, Arc::new(commands::StdoutNotifier))
        .expect("Failed to initialize application state");

    if let Err(e) = run(cli, &state).await {
        e.report();
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, state: &AppState) -> Result<(), AppError> {
    let output = match cli.command {
        Commands::Catalog(args) => commands::catalog::list(state, args.into()).await,
        Commands::Collection { name: Some(name) } => commands::collection::show(state, &name).await?,
        Commands::Collection { name: None } => commands::collection::list(state),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(state),
            CartAction::Add {
                product_id,
                variant,
                quantity,
            } => commands::cart::add(state, &product_id, variant.as_deref(), quantity).await?,
            CartAction::Remove {
                product_id,
                variant,
            } => commands::cart::remove(state, &product_id, variant.as_deref()),
            CartAction::Clear => commands::cart::clear(state),
        },
    };

    commands::emit(&output);
    Ok(())
}

impl From<CatalogArgs> for commands::catalog::ListOptions {
    fn from(args: CatalogArgs) -> Self {
        Self {
            tag: args.tag,
            all: args.all,
            categories: args.categories,
            sort: args.sort,
            page: args.page,
            reload: args.reload,
        }
    }
}
