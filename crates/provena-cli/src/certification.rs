//! # `cert` Subcommand
//!
//! Certification registry operations: add, revoke, validity check, and
//! record inspection.

use clap::{Args, Subcommand};

use provena_core::{Clock, ContentDigest, ProductId, Tick};
use provena_ledger::Ledger;

use crate::actor;

/// Certification registry operations.
#[derive(Args, Debug)]
pub struct CertificationArgs {
    #[command(subcommand)]
    pub command: CertificationCommand,
}

#[derive(Subcommand, Debug)]
pub enum CertificationCommand {
    /// Add or replace a certification of the given kind.
    Add {
        /// Caller identity.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Certification kind (e.g. "halal", "organic").
        #[arg(long)]
        kind: String,
        /// Expiry tick; must lie strictly in the future.
        #[arg(long)]
        expires: u64,
        /// Hex digest of the certification document.
        #[arg(long)]
        digest: String,
        /// Optional locator for the document.
        #[arg(long)]
        uri: Option<String>,
    },
    /// Revoke a certification. Issuer only.
    Revoke {
        /// Caller identity.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Certification kind.
        #[arg(long)]
        kind: String,
    },
    /// Print whether the certification is currently valid.
    Check {
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Certification kind.
        #[arg(long)]
        kind: String,
    },
    /// Print one certification record.
    Show {
        /// Product id.
        #[arg(long)]
        product: u64,
        /// Certification kind.
        #[arg(long)]
        kind: String,
    },
}

/// Dispatch a `cert` subcommand.
pub fn run<C: Clock>(ledger: &Ledger<C>, args: CertificationArgs) -> anyhow::Result<()> {
    match args.command {
        CertificationCommand::Add {
            caller,
            product,
            kind,
            expires,
            digest,
            uri,
        } => {
            ledger.add_certification(
                &actor(&caller)?,
                ProductId(product),
                &kind,
                Tick(expires),
                ContentDigest::from_hex(&digest)?,
                uri,
            )?;
            println!("certified {} as {kind:?}", ProductId(product));
        }
        CertificationCommand::Revoke {
            caller,
            product,
            kind,
        } => {
            ledger.revoke_certification(&actor(&caller)?, ProductId(product), &kind)?;
            println!("revoked {kind:?} for {}", ProductId(product));
        }
        CertificationCommand::Check { product, kind } => {
            let valid = ledger.is_certification_valid(ProductId(product), &kind);
            println!("{valid}");
        }
        CertificationCommand::Show { product, kind } => {
            let record = ledger.certification(ProductId(product), &kind)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
