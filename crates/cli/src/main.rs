//! Bazaar CLI - drive the storefront from a terminal.
//!
//! Each invocation opens the storage file, runs one or more storefront
//! commands against it, and prints the rendered fragment and any notice.
//!
//! # Usage
//!
//! ```bash
//! # Filter the catalog
//! bazaar products --query shoe --category footwear --max-price 2000
//!
//! # Manage the cart
//! bazaar cart add p1
//! bazaar cart remove p1
//! bazaar cart remove-at 0
//! bazaar cart show
//!
//! # Place an order from the cart
//! bazaar checkout --name "Asha" --address "12 Lane" --payment cod
//!
//! # Order history
//! bazaar orders
//!
//! # Categories and products
//! bazaar catalog
//!
//! # Admin dashboard
//! bazaar admin login -u admin -p 12345
//! bazaar admin dashboard
//! bazaar admin logout
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use bazaar_core::{PaymentMethod, ProductId};

mod commands;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the product grid with filters applied
    Products {
        /// Case-insensitive title search
        #[arg(short, long)]
        query: Option<String>,

        /// Exact category, or `all`
        #[arg(short, long)]
        category: Option<String>,

        /// Highest price to show
        #[arg(short, long)]
        max_price: Option<String>,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the current cart
    Checkout {
        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Shipping address
        #[arg(short, long)]
        address: String,

        /// Payment method (`COD`, `UPI`, `Card`)
        #[arg(short, long, default_value = "COD")]
        payment: PaymentMethod,
    },
    /// Show placed orders
    Orders,
    /// List categories and products
    Catalog,
    /// Admin dashboard
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id from the catalog
        id: ProductId,
    },
    /// Remove a product's line
    Remove {
        /// Product id in the cart
        id: ProductId,
    },
    /// Remove the line at a position (0-based)
    RemoveAt {
        index: usize,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Log in to the dashboard
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show order statistics
    Dashboard,
}

fn main() {
    // Initialize tracing; stdout is reserved for rendered output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar_storefront=info,bazaar_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    let mut app = commands::open_state()?;

    match cli.command {
        Commands::Products {
            query,
            category,
            max_price,
        } => commands::shop::products(&mut app, query, category, max_price)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::shop::show_cart(&mut app)?,
            CartAction::Add { id } => commands::shop::add(&mut app, id)?,
            CartAction::Remove { id } => commands::shop::remove(&mut app, id)?,
            CartAction::RemoveAt { index } => commands::shop::remove_at(&mut app, index)?,
        },
        Commands::Checkout {
            name,
            address,
            payment,
        } => commands::shop::checkout(&mut app, name, address, payment)?,
        Commands::Orders => commands::shop::orders(&mut app)?,
        Commands::Catalog => commands::shop::catalog(&app),
        Commands::Admin { action } => match action {
            AdminAction::Login { username, password } => {
                commands::admin::login(&mut app, username, password)?;
            }
            AdminAction::Logout => commands::admin::logout(&mut app)?,
            AdminAction::Dashboard => commands::admin::dashboard(&mut app)?,
        },
    }
    Ok(())
}
