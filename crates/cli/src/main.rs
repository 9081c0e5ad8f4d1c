//! Catalog Panel CLI - terminal front end for the catalog backend.
//!
//! # Usage
//!
//! ```bash
//! # Store the token issued by the login page
//! catalog-cli session set-token eyJhbGciOi...
//!
//! # List products (management list for admins, shopping grid otherwise)
//! catalog-cli products
//!
//! # Create, then update, a product
//! catalog-cli product save --name "Caneca" --price 19.90 --quantity 3 --image caneca.png
//! catalog-cli product save --id 4 --name "Caneca" --price 17.50 --quantity 3 --status 0
//!
//! # Delete without prompting
//! catalog-cli product delete 4 --yes
//!
//! # Shopping cart
//! catalog-cli cart add 42
//! catalog-cli cart show
//! ```
//!
//! # Commands
//!
//! - `session` - Store or inspect the session token
//! - `logout` - Clear the session
//! - `products` - Check access and list the catalog
//! - `product` - Show, save, delete and preview products (admin)
//! - `cart` - Add to and show the local cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use catalog_panel::config::PanelConfig;
use catalog_panel_core::ProductId;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(author, version, about = "Catalog panel terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Clear the stored session
    Logout,
    /// Check access and list products for the current role
    Products,
    /// Manage products (admin only)
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Use the local shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Store a bearer token issued by the login page
    SetToken {
        /// Token value
        token: String,
    },
    /// Show token age, expiry and cached role
    Status,
}

#[derive(Subcommand)]
enum ProductAction {
    /// Load a product into the edit form
    Show {
        /// Product ID
        id: ProductId,
    },
    /// Create a product, or update one when `--id` is given
    Save {
        /// Product to update
        #[arg(long)]
        id: Option<ProductId>,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price, e.g. 19.90
        #[arg(short, long)]
        price: String,

        /// Units in stock
        #[arg(short, long)]
        quantity: String,

        /// Status code (1 active, 0 inactive)
        #[arg(short, long, default_value = "1")]
        status: String,

        /// Image file to upload
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: ProductId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Preview an image file as it would be uploaded
    Preview {
        /// Image file
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Show cart entries and total
    Show,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &PanelConfig) -> Option<sentry::ClientInitGuard> {
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

    tracing::debug!("Sentry initialized");
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

    // Load configuration first (needed for Sentry init)
    let config = PanelConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalog_panel=info,catalog_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(commands::CommandError::from(e)),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &PanelConfig) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Session { action } => match action {
            SessionAction::SetToken { token } => commands::session::set_token(config, &token)?,
            SessionAction::Status => commands::session::status(config)?,
        },
        Commands::Logout => commands::session::logout(config)?,
        Commands::Products => commands::catalog::list(config).await?,
        Commands::Product { action } => match action {
            ProductAction::Show { id } => commands::catalog::show(config, id).await?,
            ProductAction::Save {
                id,
                name,
                price,
                quantity,
                status,
                image,
            } => {
                let fields = commands::catalog::ProductFields {
                    id,
                    name,
                    price,
                    quantity,
                    status,
                    image,
                };
                commands::catalog::save(config, fields).await?;
            }
            ProductAction::Delete { id, yes } => commands::catalog::delete(config, id, yes).await?,
            ProductAction::Preview { path } => commands::catalog::preview(config, &path)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(config, id)?,
            CartAction::Show => commands::cart::show(config)?,
        },
    }
    Ok(())
}
