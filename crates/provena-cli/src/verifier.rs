//! # `verifier` Subcommand
//!
//! Delegated-authority grants: the caller acts as its own organization
//! when authorizing or deauthorizing verifiers.

use clap::{Args, Subcommand};

use provena_core::Clock;
use provena_ledger::Ledger;

use crate::actor;

/// Verifier authorization operations.
#[derive(Args, Debug)]
pub struct VerifierArgs {
    #[command(subcommand)]
    pub command: VerifierCommand,
}

#[derive(Subcommand, Debug)]
pub enum VerifierCommand {
    /// Grant (or refresh) a verifier's authority under the caller.
    Authorize {
        /// Caller identity, acting as the organization.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Verifier identity to authorize.
        #[arg(long)]
        verifier: String,
        /// Display name of the verifier.
        #[arg(long)]
        name: String,
        /// Role the verifier holds.
        #[arg(long)]
        role: String,
    },
    /// Revoke a verifier's authority; the record stays for audit.
    Deauthorize {
        /// Caller identity, acting as the organization.
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: String,
        /// Verifier identity to deauthorize.
        #[arg(long)]
        verifier: String,
    },
    /// Print whether a verifier holds an active grant.
    Check {
        /// Organization identity.
        #[arg(long)]
        organization: String,
        /// Verifier identity.
        #[arg(long)]
        verifier: String,
    },
}

/// Dispatch a `verifier` subcommand.
pub fn run<C: Clock>(ledger: &Ledger<C>, args: VerifierArgs) -> anyhow::Result<()> {
    match args.command {
        VerifierCommand::Authorize {
            caller,
            verifier,
            name,
            role,
        } => {
            let caller = actor(&caller)?;
            let verifier = actor(&verifier)?;
            ledger.authorize_verifier(&caller, &verifier, name, role);
            println!("authorized {verifier} under {caller}");
        }
        VerifierCommand::Deauthorize { caller, verifier } => {
            let caller = actor(&caller)?;
            let verifier = actor(&verifier)?;
            ledger.deauthorize_verifier(&caller, &verifier)?;
            println!("deauthorized {verifier} under {caller}");
        }
        VerifierCommand::Check {
            organization,
            verifier,
        } => {
            let authorized =
                ledger.is_verifier_authorized(&actor(&organization)?, &actor(&verifier)?);
            println!("{authorized}");
        }
    }
    Ok(())
}
