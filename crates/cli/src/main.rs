//! ReturnWiz CLI - Drive the portal workflows from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Which surface would a hostname mount?
//! rw-cli resolve -H min-shop.returnwiz.dk
//!
//! # File a customer return: look the order up, return two line items
//! rw-cli return -o 1001 -e customer@example.dk -i item-1,item-2
//!
//! # Register a tenant end to end
//! rw-cli register -n "Acme ApS" -e owner@acme.dk -p s3cret -w acme \
//!     --shopify-url acme.myshopify.com --logo ./logo.png
//!
//! # Merchant session and dashboard
//! rw-cli login -e owner@acme.dk -p s3cret
//! rw-cli dashboard
//! rw-cli logout
//! ```
//!
//! # Commands
//!
//! - `resolve` - Show which portal surface a hostname maps to
//! - `return` - Run the customer return flow against the backend
//! - `register` - Run the merchant onboarding wizard
//! - `login` / `logout` - Manage the persisted merchant session
//! - `dashboard` - List the logged-in merchant's return cases

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rw-cli")]
#[command(author, version, about = "ReturnWiz CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which portal surface a hostname maps to
    Resolve {
        /// Hostname to resolve, e.g. `min-shop.returnwiz.dk`
        #[arg(short = 'H', long)]
        hostname: String,

        /// `shop` override parameter, wins over the hostname
        #[arg(short, long)]
        shop: Option<String>,
    },
    /// File a customer return
    Return {
        /// Customer-facing order number
        #[arg(short, long)]
        order: String,

        /// Email the order was placed with
        #[arg(short, long)]
        email: String,

        /// Comma-separated line item ids to return
        #[arg(short, long, value_delimiter = ',')]
        items: Vec<String>,
    },
    /// Register a tenant through the onboarding wizard
    Register(commands::tenant::RegisterArgs),
    /// Log in as a merchant and persist the session
    Login {
        /// Merchant login email
        #[arg(short, long)]
        email: String,

        /// Merchant login password
        #[arg(short, long)]
        password: String,
    },
    /// Clear the persisted merchant session
    Logout,
    /// List the logged-in merchant's return cases
    Dashboard,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("returnwiz=info,rw_cli=info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Resolve { hostname, shop } => {
            commands::tenant::resolve(&hostname, shop.as_deref())?;
        }
        Commands::Return {
            order,
            email,
            items,
        } => {
            commands::returns::create(&order, &email, &items).await?;
        }
        Commands::Register(args) => {
            commands::tenant::register(args).await?;
        }
        Commands::Login { email, password } => {
            commands::account::login(&email, &password).await?;
        }
        Commands::Logout => {
            commands::account::logout()?;
        }
        Commands::Dashboard => {
            commands::account::dashboard().await?;
        }
    }
    Ok(())
}
