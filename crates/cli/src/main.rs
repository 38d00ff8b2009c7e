//! Flyercraft CLI - command-line client for the Flyercraft backend.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session is persisted for later invocations)
//! flyercraft login -e user@example.com -p secret
//!
//! # Manage products
//! flyercraft products list
//! flyercraft products create --name "Widget" --price 9.99
//! flyercraft products delete <id>          # asks for confirmation
//!
//! # Manage flyers
//! flyercraft flyers create --title "Summer Sale" --product <id> --product <id>
//! flyercraft flyers duplicate <id>
//!
//! # Overview
//! flyercraft dashboard
//! ```
//!
//! # Environment Variables
//!
//! - `FLYERCRAFT_API_URL` - Backend base URL
//! - `FLYERCRAFT_STATE_DIR` - Where the session credential is stored

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use flyercraft_client::api::ApiClient;
use flyercraft_client::config::ClientConfig;
use flyercraft_client::session::SessionManager;
use flyercraft_client::store::FileCredentialStore;
use flyercraft_core::{FlyerLayout, FlyerTemplate};

mod commands;

#[derive(Parser)]
#[command(name = "flyercraft")]
#[command(author, version, about = "Flyercraft command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create a new account
    Register {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out and discard the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Update the signed-in user's profile
    Profile {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage flyers
    Flyers {
        #[command(subcommand)]
        action: FlyerAction,
    },
    /// Show collection totals and flyer status counts
    Dashboard,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Create a product
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        price: Decimal,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        barcode: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        image_url: Option<String>,
    },
    /// Update a product (unset fields keep their current value)
    Update {
        /// Product ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<Decimal>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        barcode: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum FlyerAction {
    /// List all flyers
    List,
    /// Create a flyer
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: Option<String>,

        /// template1..template4
        #[arg(long)]
        template: Option<FlyerTemplate>,

        /// grid, list or cards
        #[arg(long)]
        layout: Option<FlyerLayout>,

        /// Product ID to include; repeatable
        #[arg(long = "product")]
        products: Vec<String>,
    },
    /// Update a flyer (unset fields keep their current value)
    Update {
        /// Flyer ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        template: Option<FlyerTemplate>,

        #[arg(long)]
        layout: Option<FlyerLayout>,

        /// Replacement product selection; repeatable
        #[arg(long = "product")]
        products: Vec<String>,
    },
    /// Delete a flyer
    Delete {
        /// Flyer ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Duplicate a flyer server-side
    Duplicate {
        /// Flyer ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let store = Arc::new(FileCredentialStore::new(config.state_dir.clone()));
    let api = ApiClient::new(&config, store)?;

    let session = SessionManager::new(api.clone());
    session.initialize().await;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&session, &email, &password).await?;
        }
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
        } => {
            commands::auth::register(&session, &first_name, &last_name, &email, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&session),
        Commands::Whoami => commands::auth::whoami(&session),
        Commands::Profile {
            first_name,
            last_name,
            email,
        } => {
            commands::auth::update_profile(&session, first_name, last_name, email).await?;
        }
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(api).await?,
            ProductAction::Create {
                name,
                price,
                description,
                barcode,
                category,
                image_url,
            } => {
                commands::products::create(
                    api,
                    commands::products::ProductFields {
                        name: Some(name),
                        price: Some(price),
                        description,
                        barcode,
                        category,
                        image_url,
                    },
                )
                .await?;
            }
            ProductAction::Update {
                id,
                name,
                price,
                description,
                barcode,
                category,
                image_url,
            } => {
                commands::products::update(
                    api,
                    &id,
                    commands::products::ProductFields {
                        name,
                        price,
                        description,
                        barcode,
                        category,
                        image_url,
                    },
                )
                .await?;
            }
            ProductAction::Delete { id, yes } => commands::products::delete(api, &id, yes).await?,
        },
        Commands::Flyers { action } => match action {
            FlyerAction::List => commands::flyers::list(api).await?,
            FlyerAction::Create {
                title,
                description,
                template,
                layout,
                products,
            } => {
                commands::flyers::create(
                    api,
                    commands::flyers::FlyerFields {
                        title: Some(title),
                        description,
                        template,
                        layout,
                        products,
                    },
                )
                .await?;
            }
            FlyerAction::Update {
                id,
                title,
                description,
                template,
                layout,
                products,
            } => {
                commands::flyers::update(
                    api,
                    &id,
                    commands::flyers::FlyerFields {
                        title,
                        description,
                        template,
                        layout,
                        products,
                    },
                )
                .await?;
            }
            FlyerAction::Delete { id, yes } => commands::flyers::delete(api, &id, yes).await?,
            FlyerAction::Duplicate { id } => commands::flyers::duplicate(api, &id).await?,
        },
        Commands::Dashboard => commands::dashboard::show(api).await?,
    }
    Ok(())
}
