//! # `transfer` Subcommand
//!
//! The custody-transfer workflow: initiate, accept, reject, cancel,
//! and inspection of transfer records.

use clap::{Args, Subcommand};

use provena_core::{Clock, ProductId, TransferId};
use provena_ledger::Ledger;

use crate::actor;

/// Custody-transfer operations.
#[derive(Args, Debug)]
pub struct TransferArgs {
    #[command(subcommand)]
    pub command: TransferCommand,
}

#[derive(Subcommand, Debug)]
pub enum TransferCommand {
    /// Open a pending transfer. Custodian only.
    Initiate {
        /// Caller identity.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Identity asked to take custody.
        #[arg(long)]
        recipient: String,
        /// Handling conditions for the recipient.
        #[arg(long)]
        conditions: Option<String>,
    },
    /// Accept a pending transfer, taking custody. Recipient only.
    Accept {
        /// Caller identity.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Transfer id.
        #[arg(long)]
        transfer: u64,
    },
    /// Reject a pending transfer with a reason. Recipient only.
    Reject {
        /// Caller identity.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Transfer id.
        #[arg(long)]
        transfer: u64,
        /// Why the transfer was declined.
        #[arg(long)]
        reason: String,
    },
    /// Withdraw a pending transfer. Initiator only.
    Cancel {
        /// Caller identity.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Transfer id.
        #[arg(long)]
        transfer: u64,
    },
    /// Print one transfer record.
    Show {
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Transfer id.
        #[arg(long)]
        transfer: u64,
    },
}

/// Dispatch a `transfer` subcommand.
pub fn run<C: Clock>(ledger: &Ledger<C>, args: TransferArgs) -> anyhow::Result<()> {
    match args.command {
        TransferCommand::Initiate {
            caller,
            product,
            recipient,
            conditions,
        } => {
            let id = ledger.initiate_transfer(
                &actor(&caller)?,
                ProductId(product),
                actor(&recipient)?,
                conditions,
            )?;
            println!("initiated {id}");
        }
        TransferCommand::Accept {
            caller,
            product,
            transfer,
        } => {
            ledger.accept_transfer(&actor(&caller)?, ProductId(product), TransferId(transfer))?;
            println!("accepted {}", TransferId(transfer));
        }
        TransferCommand::Reject {
            caller,
            product,
            transfer,
            reason,
        } => {
            ledger.reject_transfer(
                &actor(&caller)?,
                ProductId(product),
                TransferId(transfer),
                reason,
            )?;
            println!("rejected {}", TransferId(transfer));
        }
        TransferCommand::Cancel {
            caller,
            product,
            transfer,
        } => {
            ledger.cancel_transfer(&actor(&caller)?, ProductId(product), TransferId(transfer))?;
            println!("cancelled {}", TransferId(transfer));
        }
        TransferCommand::Show { product, transfer } => {
            let record = ledger.transfer(ProductId(product), TransferId(transfer))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
