//! # `product` Subcommand
//!
//! Product registry operations: registration, shipping details, recall,
//! and the read views.

use clap::{Args, Subcommand};

use provena_core::{Clock, ProductId, Tick};
use provena_ledger::Ledger;
use provena_model::ProductDetails;

use crate::actor;

/// Product registry operations.
#[derive(Args, Debug)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// Register a product; the caller becomes manufacturer and custodian.
    Register {
        /// Caller identity.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Display name of the good.
        #[arg(long)]
        name: String,
        /// Free-form description.
        #[arg(long)]
        description: String,
        /// Manufacturing lot number.
        #[arg(long)]
        lot: String,
        /// Product category.
        #[arg(long)]
        category: String,
        /// Manufacturing location.
        #[arg(long)]
        origin: String,
        /// Optional off-ledger metadata reference.
        #[arg(long)]
        metadata_uri: Option<String>,
    },
    /// Set or overwrite destination and expected arrival.
    Ship {
        /// Caller identity.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Delivery destination.
        #[arg(long)]
        destination: String,
        /// Expected arrival tick.
        #[arg(long)]
        eta: u64,
    },
    /// Recall a product. Manufacturer only.
    Recall {
        /// Caller identity.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Reason for the recall.
        #[arg(long)]
        reason: String,
    },
    /// Print the product record.
    Show {
        /// Product id.
        #[arg(long)]
        product: u64,
    },
    /// Print the authenticity summary.
    Verify {
        /// Product id.
        #[arg(long)]
        product: u64,
    },
}

/// Dispatch a `product` subcommand.
pub fn run<C: Clock>(ledger: &Ledger<C>, args: ProductArgs) -> anyhow::Result<()> {
    match args.command {
        ProductCommand::Register {
            caller,
            name,
            description,
            lot,
            category,
            origin,
            metadata_uri,
        } => {
            let id = ledger.register_product(
                &actor(&caller)?,
                ProductDetails {
                    name,
                    description,
                    lot_number: lot,
                    category,
                    origin_location: origin,
                    metadata_uri,
                },
            )?;
            println!("registered {id}");
        }
        ProductCommand::Ship {
            caller,
            product,
            destination,
            eta,
        } => {
            ledger.set_shipping_details(
                &actor(&caller)?,
                ProductId(product),
                destination,
                Tick(eta),
            )?;
            println!("shipping details set for {}", ProductId(product));
        }
        ProductCommand::Recall {
            caller,
            product,
            reason,
        } => {
            ledger.recall_product(&actor(&caller)?, ProductId(product), &reason)?;
            println!("recall recorded for {}", ProductId(product));
        }
        ProductCommand::Show { product } => {
            let record = ledger.product(ProductId(product))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        ProductCommand::Verify { product } => {
            let summary = ledger.verify_authenticity(ProductId(product))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
