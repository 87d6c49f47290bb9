//! # provena-ledger — The Operational Core
//!
//! The authoritative custody-chain ledger: an append-mostly record of a
//! physical good's journey through manufacture, checkpoints, custody
//! transfers, certifications, and recall, every write gated by the
//! caller's authority.
//!
//! ## Modules
//!
//! - **`ledger`**: the [`Ledger`] service, the full operation surface.
//! - **`store`**: the in-memory keyed store with per-product locking and
//!   snapshot export/import.
//! - **`error`**: the flat [`LedgerError`] taxonomy (NotFound /
//!   Unauthorized / InvalidState).
//!
//! ## Atomicity
//!
//! Every operation is all-or-nothing. Preconditions are validated in
//! full before the first write, and each operation holds its product's
//! cell lock from first read to last write, so composite operations
//! (registration with its initial checkpoint, recall with its recall
//! checkpoint, acceptance with its custody checkpoint) are indivisible
//! from any other caller's point of view.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests; poisoned locks are
//!   recovered, not propagated.
//! - Errors are values returned to the caller; the ledger never retries
//!   on its own.

pub mod error;
pub mod ledger;
pub mod store;

pub use error::{ErrorKind, LedgerError};
pub use ledger::{AuthenticitySummary, Ledger};
pub use store::{MemoryStore, Snapshot};
