//! # Identity Newtypes
//!
//! Newtype wrappers for every identifier namespace in the ledger. A
//! `ProductId` cannot be passed where a `TransferId` is expected, and a
//! principal identity (`ActorId`) is never confused with a record id.
//!
//! Record identifiers are allocator-issued sequential values, not random.
//! Product ids come from a single global counter; checkpoint and transfer
//! ids are per-product sequences starting at 0 with no gaps and no reuse.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised when constructing an identity.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdentityError {
    /// The identity string was empty or all whitespace.
    #[error("actor identity must not be empty")]
    Empty,
}

// ─── Principal Identity ──────────────────────────────────────────────

/// The authenticated principal on whose behalf an operation runs.
///
/// The ledger never derives the caller from ambient context. Every
/// operation receives an `ActorId` explicitly, making each operation a
/// pure function of (state, caller, inputs, tick). Organizations are
/// themselves principals: an organization identity is the `ActorId` of
/// the account that granted its verifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(String);

impl ActorId {
    /// Construct a principal identity, rejecting empty input.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentityError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self(id))
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Record Identifiers ──────────────────────────────────────────────

/// Globally unique product identifier, issued by the global allocator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ProductId(pub u64);

/// Per-product checkpoint identifier. Forms a gapless sequence from 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CheckpointId(pub u64);

/// Per-product custody-transfer identifier. Forms a gapless sequence from 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TransferId(pub u64);

impl ProductId {
    /// The raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl CheckpointId {
    /// The raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TransferId {
    /// The raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product:{}", self.0)
    }
}

impl std::fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "checkpoint:{}", self.0)
    }
}

impl std::fmt::Display for TransferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transfer:{}", self.0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
