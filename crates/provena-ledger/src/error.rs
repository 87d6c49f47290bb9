//! # Error Taxonomy
//!
//! One flat error enum for the whole operation surface. Every operation
//! validates all of its preconditions before performing any write, so a
//! returned error always means the ledger is unchanged.
//!
//! Three families: a record was missing (`*NotFound`), the caller lacked
//! authority (`Unauthorized`), or the target was in a state that forbids
//! the operation (`ProductRecalled`, `TransferNotPending`,
//! `ExpiryNotInFuture`). [`LedgerError::kind`] buckets variants into
//! those families for callers that dispatch coarsely.

use thiserror::Error;

use provena_core::{ActorId, CheckpointId, ProductId, Tick, TransferId};
use provena_model::TransferStatus;

/// Coarse classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced record does not exist.
    NotFound,
    /// The caller is not permitted to perform the operation.
    Unauthorized,
    /// The target exists but its state forbids the operation.
    InvalidState,
}

/// Failure reason returned by every fallible ledger operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No product is registered under this id.
    #[error("{0} not found")]
    ProductNotFound(ProductId),

    /// The product exists but has no checkpoint with this id.
    #[error("{checkpoint} not found for {product}")]
    CheckpointNotFound {
        /// The product whose ledger was consulted.
        product: ProductId,
        /// The missing checkpoint id.
        checkpoint: CheckpointId,
    },

    /// The product exists but has no transfer with this id.
    #[error("{transfer} not found for {product}")]
    TransferNotFound {
        /// The product whose transfers were consulted.
        product: ProductId,
        /// The missing transfer id.
        transfer: TransferId,
    },

    /// The product has no certification of this kind.
    #[error("certification {kind:?} not found for {product}")]
    CertificationNotFound {
        /// The product whose certifications were consulted.
        product: ProductId,
        /// The missing certification kind.
        kind: String,
    },

    /// No authorization record exists for this (organization, verifier).
    #[error("no authorization record for verifier {verifier} under {organization}")]
    AuthorizationNotFound {
        /// The organization the record was looked up under.
        organization: ActorId,
        /// The verifier the record was looked up for.
        verifier: ActorId,
    },

    /// The caller does not hold the authority the operation requires.
    #[error("{caller} is not permitted to {action}")]
    Unauthorized {
        /// The rejected caller.
        caller: ActorId,
        /// What the caller attempted.
        action: &'static str,
    },

    /// The product has been recalled; its ledger accepts no more writes.
    #[error("{0} has been recalled")]
    ProductRecalled(ProductId),

    /// The transfer already reached a terminal state.
    #[error("{transfer} for {product} is {status}, not PENDING")]
    TransferNotPending {
        /// The product the transfer belongs to.
        product: ProductId,
        /// The transfer that is no longer pending.
        transfer: TransferId,
        /// Its terminal status.
        status: TransferStatus,
    },

    /// A certification expiry must lie strictly after the current tick.
    #[error("certification expiry {expires_at} is not after current tick {now}")]
    ExpiryNotInFuture {
        /// The rejected expiry tick.
        expires_at: Tick,
        /// The counter value at validation time.
        now: Tick,
    },
}

impl LedgerError {
    /// The family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProductNotFound(_)
            | Self::CheckpointNotFound { .. }
            | Self::TransferNotFound { .. }
            | Self::CertificationNotFound { .. }
            | Self::AuthorizationNotFound { .. } => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::ProductRecalled(_)
            | Self::TransferNotPending { .. }
            | Self::ExpiryNotInFuture { .. } => ErrorKind::InvalidState,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
