//! Homeval Control - CLI for the property valuation engine
//!
//! Loads configuration and resolves the API credential once, then runs a
//! single valuation, prints the analysis prompt, or shows the effective
//! configuration.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use homeval_common::PropertyAttributes;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "homevalctl")]
#[command(about = "Homeval - residential property valuation", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Property attributes shared by analyze and prompt
#[derive(clap::Args, Debug)]
struct PropertyArgs {
    #[arg(long)]
    city: String,

    #[arg(long)]
    state: String,

    /// Living area in square feet
    #[arg(long)]
    sqft: f64,

    #[arg(long)]
    bedrooms: u32,

    #[arg(long)]
    bathrooms: f64,

    /// Listing price
    #[arg(long)]
    price: f64,
}

impl From<PropertyArgs> for PropertyAttributes {
    fn from(args: PropertyArgs) -> Self {
        PropertyAttributes {
            city: args.city,
            state: args.state,
            sqft: args.sqft,
            bedrooms: args.bedrooms,
            bathrooms: args.bathrooms,
            listing_price: args.price,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate fair market value and classify the listing
    Analyze {
        #[command(flatten)]
        property: PropertyArgs,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,

        /// Seed the market simulation for reproducible fallback results
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the analysis prompt without calling any service
    Prompt {
        #[command(flatten)]
        property: PropertyArgs,
    },

    /// Show effective configuration and credential status
    Config,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            property,
            json,
            seed,
        } => commands::analyze(property.into(), json, seed).await,
        Commands::Prompt { property } => commands::prompt(property.into()),
        Commands::Config => commands::config(),
    }
}
