//! # provena-core — Foundational Types for the Provena Ledger
//!
//! The leaf crate of the workspace: every other crate depends on it, and
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for every identifier namespace.** `ActorId`,
//!    `ProductId`, `CheckpointId`, `TransferId`. No bare strings or
//!    integers cross an API boundary as an identifier.
//!
//! 2. **Explicit time.** The ledger consumes a monotonically increasing
//!    counter through the [`Clock`] trait; it never reads ambient
//!    wall-clock time. Tests drive a [`ManualClock`] and get fully
//!    deterministic behavior.
//!
//! 3. **Digests are values.** [`ContentDigest`] is a 32-byte SHA-256
//!    digest that serializes as hex. Callers supply precomputed digests
//!    for attestation documents; the ledger computes its own only over
//!    short text fields it owns.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `provena-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone` and implement
//!   `Serialize`/`Deserialize`.

pub mod digest;
pub mod identity;
pub mod tick;

pub use digest::{ContentDigest, DigestError};
pub use identity::{ActorId, CheckpointId, IdentityError, ProductId, TransferId};
pub use tick::{Clock, ManualClock, Tick, WallClock};
