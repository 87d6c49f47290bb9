//! # provena-cli — Command-Line Interface for the Provena Ledger
//!
//! Drives the full ledger operation surface against a JSON state file,
//! with the caller identity supplied explicitly per command.
//!
//! ## Subcommands
//!
//! - `product` — register, shipping details, recall, show, verify
//! - `checkpoint` — record and inspect waypoints
//! - `transfer` — initiate, accept, reject, cancel, show
//! - `verifier` — authorize, deauthorize, check
//! - `cert` — add, revoke, check, show
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `provena-ledger`; no ledger rules are
//!   re-implemented here.
//! - Mutations print the affected record id; reads print the record as
//!   pretty JSON; boolean queries print `true`/`false`.

use provena_core::ActorId;

pub mod certification;
pub mod checkpoint;
pub mod product;
pub mod state;
pub mod transfer;
pub mod verifier;

/// Parse a caller identity from the command line.
pub(crate) fn actor(s: &str) -> anyhow::Result<ActorId> {
    ActorId::new(s).map_err(Into::into)
}
