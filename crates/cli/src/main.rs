//! storecart CLI - drive a file-backed cart from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product
//! cart add p1 Widget 9.99 --quantity 2
//!
//! # Show the cart table
//! cart show
//!
//! # Change quantities by row index
//! cart inc 0
//! cart set 0 5
//!
//! # Print the checkout payload
//! cart export
//! ```
//!
//! # Commands
//!
//! - `add`, `remove`, `set`, `inc`, `dec`, `clear` - Cart mutations
//! - `show`, `count`, `total`, `export` - Reads
//!
//! Configuration comes from `CART_STORE_PATH`, `CART_STORAGE_KEY` and
//! `CART_CURRENCY` (see `storecart::config`); `--store` and `--key` override.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storecart::{CartConfig, CartStore, FileStore};

mod commands;

#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about = "storecart command-line cart")]
struct Cli {
    /// Storage file (overrides `CART_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Storage key (overrides `CART_STORAGE_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// Display name
        name: String,

        /// Unit price (e.g. 9.99)
        price: String,

        /// Units to add (default 1)
        #[arg(short, long)]
        quantity: Option<String>,
    },
    /// Remove the line at a row index
    Remove {
        /// Row index as shown by `show`
        index: String,
    },
    /// Set the quantity of a line
    Set {
        /// Row index as shown by `show`
        index: String,

        /// New quantity (at least 1)
        quantity: String,
    },
    /// Add one unit to a line
    Inc {
        /// Row index as shown by `show`
        index: String,
    },
    /// Remove one unit from a line
    Dec {
        /// Row index as shown by `show`
        index: String,
    },
    /// Empty the cart
    Clear,
    /// Print the cart table
    Show,
    /// Print the total item count
    Count,
    /// Print the total price
    Total,
    /// Print the checkout payload (JSON)
    Export,
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storecart=info,storecart_cli=info".into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(path) = cli.store {
        config.store_path = path;
    }
    if let Some(key) = cli.key {
        config.storage_key = key;
    }

    tracing::debug!(path = %config.store_path.display(), key = %config.storage_key, "Opening cart");

    let mut cart = CartStore::with_config(FileStore::new(&config.store_path), &config);
    cart.subscribe(|| tracing::debug!("Cart changed"));

    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            quantity,
        } => {
            commands::items::add(&cart, &id, &name, &price, quantity.as_deref());
        }
        Commands::Remove { index } => {
            commands::items::remove(&cart, &index);
        }
        Commands::Set { index, quantity } => {
            commands::items::set(&cart, &index, &quantity);
        }
        Commands::Inc { index } => {
            commands::items::increment(&cart, &index);
        }
        Commands::Dec { index } => {
            commands::items::decrement(&cart, &index);
        }
        Commands::Clear => {
            commands::items::clear(&cart);
        }
        Commands::Show => commands::show::table(&cart),
        Commands::Count => commands::show::count(&cart),
        Commands::Total => commands::show::total(&cart),
        Commands::Export => commands::show::export(&cart),
    }
    Ok(())
}
