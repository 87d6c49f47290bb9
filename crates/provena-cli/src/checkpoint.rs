//! # `checkpoint` Subcommand
//!
//! Record and inspect waypoints on a product's checkpoint ledger.

use clap::{Args, Subcommand};

use provena_core::{CheckpointId, Clock, ContentDigest, ProductId};
use provena_ledger::Ledger;
use provena_model::{CheckpointDraft, CheckpointKind};

use crate::actor;

/// Checkpoint ledger operations.
#[derive(Args, Debug)]
pub struct CheckpointArgs {
    #[command(subcommand)]
    pub command: CheckpointCommand,
}

#[derive(Subcommand, Debug)]
pub enum CheckpointCommand {
    /// Append a waypoint. Requires custody authority.
    Add {
        /// Caller identity.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Where the waypoint was observed.
        #[arg(long)]
        location: String,
        /// Waypoint category; "delivery" and "retail-sale" drive status.
        #[arg(long)]
        kind: String,
        /// Temperature reading, degrees Celsius.
        #[arg(long)]
        temperature: Option<i32>,
        /// Relative humidity reading, percent.
        #[arg(long)]
        humidity: Option<u32>,
        /// Free-form observations.
        #[arg(long)]
        observations: Option<String>,
        /// Hex digest of the attestation document.
        #[arg(long)]
        attestation: String,
    },
    /// Print one checkpoint record.
    Show {
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Checkpoint id.
        #[arg(long)]
        checkpoint: u64,
    },
}

/// Dispatch a `checkpoint` subcommand.
pub fn run<C: Clock>(ledger: &Ledger<C>, args: CheckpointArgs) -> anyhow::Result<()> {
    match args.command {
        CheckpointCommand::Add {
            caller,
            product,
            location,
            kind,
            temperature,
            humidity,
            observations,
            attestation,
        } => {
            let draft = CheckpointDraft {
                location,
                kind: CheckpointKind::from(kind),
                temperature,
                humidity,
                observations,
                attestation: ContentDigest::from_hex(&attestation)?,
            };
            let id = ledger.add_checkpoint(&actor(&caller)?, ProductId(product), draft)?;
            println!("recorded {id}");
        }
        CheckpointCommand::Show {
            product,
            checkpoint,
        } => {
            let record = ledger.checkpoint(ProductId(product), CheckpointId(checkpoint))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
