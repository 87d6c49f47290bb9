//! # provena-model — Domain Entities for the Provena Ledger
//!
//! The entities of the custody chain and their pure state logic:
//!
//! - **Product** (`product.rs`): the tracked good, its immutable
//!   manufacturing facts, and its derived lifecycle status.
//! - **Checkpoint** (`checkpoint.rs`): immutable waypoints with an open
//!   kind category; status derivation lives on [`CheckpointKind`].
//! - **Transfer** (`transfer.rs`): the two-party custody handover state
//!   machine (`Pending` to one of three terminal states).
//! - **AuthorizationRecord** (`authorization.rs`): delegated-authority
//!   grants from an organization to its verifiers.
//! - **Certification** (`certification.rs`): time-bounded compliance
//!   attestations with read-time validity derivation.
//!
//! ## Design
//!
//! Entities here hold no storage and make no authorization decisions.
//! They expose constructors, field mutators for the transitions the
//! ledger defines, and the derivation predicates (`derived_status`,
//! `is_valid_at`, `is_terminal`). All precondition checking lives in
//! `provena-ledger`, which validates every operation fully before
//! touching an entity, so the mutators themselves are infallible.

pub mod authorization;
pub mod certification;
pub mod checkpoint;
pub mod product;
pub mod transfer;

pub use authorization::AuthorizationRecord;
pub use certification::{Certification, CertificationStatus};
pub use checkpoint::{Checkpoint, CheckpointDraft, CheckpointKind};
pub use product::{Product, ProductDetails, ProductStatus};
pub use transfer::{Transfer, TransferStatus};
