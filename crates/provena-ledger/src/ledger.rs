//! # Ledger Operations
//!
//! The full operation surface of the custody-chain ledger. Every
//! operation takes the authenticated caller explicitly and executes as
//! one atomic unit against the store: all preconditions are validated
//! before the first write, and composite writes run inside a single
//! product-cell lock.
//!
//! Authorization is caller-relative:
//!
//! - checkpoint writes and shipping details require the product's
//!   current custodian or one of the custodian's active verifiers;
//! - recall requires the manufacturer;
//! - certifications require the manufacturer or one of the
//!   manufacturer's active verifiers to add, and the issuing identity
//!   to revoke;
//! - transfer decisions belong to the named recipient (accept/reject)
//!   or the original initiator (cancel).

use serde::{Deserialize, Serialize};

use provena_core::{
    ActorId, CheckpointId, Clock, ContentDigest, ProductId, Tick, TransferId,
};
use provena_model::{
    AuthorizationRecord, Certification, Checkpoint, CheckpointDraft, CheckpointKind, Product,
    ProductDetails, ProductStatus, Transfer,
};

use crate::error::LedgerError;
use crate::store::{MemoryStore, ProductCell, Snapshot};

// ─── Read Summaries ──────────────────────────────────────────────────

/// Condensed answer to "is this product what it claims to be".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticitySummary {
    /// False iff the product has been recalled.
    pub authentic: bool,
    /// The registering identity.
    pub manufacturer: ActorId,
    /// The manufacturing lot number.
    pub lot_number: String,
    /// Current lifecycle status.
    pub status: ProductStatus,
}

// ─── Ledger ──────────────────────────────────────────────────────────

/// The custody-chain ledger service.
///
/// Owns the store and the injected counter source. Cloning records out
/// of read accessors keeps all mutable state behind the store's locks.
#[derive(Debug)]
pub struct Ledger<C: Clock> {
    store: MemoryStore,
    clock: C,
}

impl<C: Clock> Ledger<C> {
    /// A ledger over an empty store.
    pub fn new(clock: C) -> Self {
        Self::with_store(MemoryStore::new(), clock)
    }

    /// A ledger over previously persisted state.
    pub fn with_store(store: MemoryStore, clock: C) -> Self {
        Self { store, clock }
    }

    /// Export the store state for persistence.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    // ─── Product registry ────────────────────────────────────────────

    /// Register a product and record its `manufacture` checkpoint.
    ///
    /// The caller becomes manufacturer and initial custodian. The
    /// checkpoint's attestation is the SHA-256 digest of the lot number,
    /// and its status derivation moves the product straight from
    /// `Created` to `InTransit`. Both records are published together.
    pub fn register_product(
        &self,
        caller: &ActorId,
        details: ProductDetails,
    ) -> Result<ProductId, LedgerError> {
        let now = self.clock.now();
        let id = self.store.create_product(|id| {
            let product = Product::register(id, details, caller.clone(), now);
            let mut cell = ProductCell::new(product);
            let draft = CheckpointDraft::new(
                cell.product.origin_location.clone(),
                CheckpointKind::Manufacture,
                ContentDigest::of_text(&cell.product.lot_number),
            );
            append_checkpoint(&mut cell, caller, draft, now);
            cell
        });
        tracing::info!(product = %id, manufacturer = %caller, "product registered");
        Ok(id)
    }

    /// Overwrite a product's destination and expected arrival.
    ///
    /// Custody authority is required; product status is not consulted,
    /// so shipping details remain editable after delivery or recall.
    pub fn set_shipping_details(
        &self,
        caller: &ActorId,
        product: ProductId,
        destination: String,
        expected_arrival: Tick,
    ) -> Result<(), LedgerError> {
        self.store.with_cell(product, |cell| {
            self.require_custody_authority(cell, caller, "set shipping details")?;
            cell.product.set_shipping(destination, expected_arrival);
            Ok(())
        })
    }

    /// Recall a product, closing its ledger to further writes.
    ///
    /// Manufacturer only. The `recall` checkpoint is appended while the
    /// product still holds its prior status, then the status flips to
    /// `Recalled`; the checkpoint's attestation is the SHA-256 digest of
    /// the reason text.
    pub fn recall_product(
        &self,
        caller: &ActorId,
        product: ProductId,
        reason: &str,
    ) -> Result<(), LedgerError> {
        let now = self.clock.now();
        self.store.with_cell(product, |cell| {
            if cell.product.manufacturer != *caller {
                return Err(LedgerError::Unauthorized {
                    caller: caller.clone(),
                    action: "recall the product",
                });
            }
            if cell.product.status.is_recalled() {
                return Err(LedgerError::ProductRecalled(product));
            }
            let draft = CheckpointDraft::new(
                cell.product.origin_location.clone(),
                CheckpointKind::Recall,
                ContentDigest::of_text(reason),
            );
            append_checkpoint(cell, caller, draft, now);
            cell.product.status = ProductStatus::Recalled;
            Ok(())
        })?;
        tracing::info!(product = %product, "product recalled");
        Ok(())
    }

    // ─── Checkpoint ledger ───────────────────────────────────────────

    /// Append a waypoint to a product's checkpoint ledger.
    ///
    /// Requires custody authority and a non-recalled product. The
    /// product's status is re-derived from the checkpoint kind on every
    /// append.
    pub fn add_checkpoint(
        &self,
        caller: &ActorId,
        product: ProductId,
        draft: CheckpointDraft,
    ) -> Result<CheckpointId, LedgerError> {
        let now = self.clock.now();
        let id = self.store.with_cell(product, |cell| {
            if cell.product.status.is_recalled() {
                return Err(LedgerError::ProductRecalled(product));
            }
            self.require_custody_authority(cell, caller, "record a checkpoint")?;
            Ok(append_checkpoint(cell, caller, draft, now))
        })?;
        tracing::debug!(product = %product, checkpoint = %id, "checkpoint recorded");
        Ok(id)
    }

    // ─── Authorization registry ──────────────────────────────────────

    /// Grant or refresh a verifier's authority under the caller's
    /// organization. Upsert: idempotent for the calling identity.
    pub fn authorize_verifier(
        &self,
        caller: &ActorId,
        verifier: &ActorId,
        name: impl Into<String>,
        role: impl Into<String>,
    ) {
        let record = AuthorizationRecord::grant(name, role, caller.clone(), self.clock.now());
        self.store
            .upsert_authorization(caller.clone(), verifier.clone(), record);
        tracing::debug!(organization = %caller, verifier = %verifier, "verifier authorized");
    }

    /// Revoke a verifier's authority under the caller's organization.
    /// The record is kept, inactive, for audit.
    pub fn deauthorize_verifier(
        &self,
        caller: &ActorId,
        verifier: &ActorId,
    ) -> Result<(), LedgerError> {
        self.store.deactivate_authorization(caller, verifier)?;
        tracing::debug!(organization = %caller, verifier = %verifier, "verifier deauthorized");
        Ok(())
    }

    /// Whether `verifier` holds an active grant from `organization`.
    /// Pure lookup: unknown pairs are `false`, never an error.
    pub fn is_verifier_authorized(&self, organization: &ActorId, verifier: &ActorId) -> bool {
        self.store.is_verifier_authorized(organization, verifier)
    }

    // ─── Custody transfers ───────────────────────────────────────────

    /// Open a pending custody transfer to `recipient`.
    ///
    /// Only the current custodian may initiate, and only while the
    /// product is not recalled.
    pub fn initiate_transfer(
        &self,
        caller: &ActorId,
        product: ProductId,
        recipient: ActorId,
        conditions: Option<String>,
    ) -> Result<TransferId, LedgerError> {
        let now = self.clock.now();
        let id = self.store.with_cell(product, |cell| {
            if cell.product.status.is_recalled() {
                return Err(LedgerError::ProductRecalled(product));
            }
            if cell.product.custodian != *caller {
                return Err(LedgerError::Unauthorized {
                    caller: caller.clone(),
                    action: "initiate a custody transfer",
                });
            }
            let id = TransferId(cell.transfers.len() as u64);
            cell.transfers
                .push(Transfer::open(id, caller.clone(), recipient, conditions, now));
            Ok(id)
        })?;
        tracing::debug!(product = %product, transfer = %id, "transfer initiated");
        Ok(id)
    }

    /// Accept a pending transfer, taking custody.
    ///
    /// Recipient only. Completes the transfer, moves custody to the
    /// caller, and appends a `transfer` checkpoint; the checkpoint path
    /// re-validates that the product is not recalled, so a recall issued
    /// while the transfer was pending makes acceptance fail whole.
    pub fn accept_transfer(
        &self,
        caller: &ActorId,
        product: ProductId,
        transfer: TransferId,
    ) -> Result<(), LedgerError> {
        let now = self.clock.now();
        self.store.with_cell(product, |cell| {
            let record = find_transfer(cell, product, transfer)?;
            if record.recipient != *caller {
                return Err(LedgerError::Unauthorized {
                    caller: caller.clone(),
                    action: "accept the transfer",
                });
            }
            if !record.is_pending() {
                return Err(LedgerError::TransferNotPending {
                    product,
                    transfer,
                    status: record.status,
                });
            }
            if cell.product.status.is_recalled() {
                return Err(LedgerError::ProductRecalled(product));
            }

            let conditions = record.conditions.clone().unwrap_or_default();
            let location = cell
                .product
                .destination
                .clone()
                .unwrap_or_else(|| cell.product.origin_location.clone());

            // All preconditions hold; apply the whole composite write.
            cell.transfers[transfer.value() as usize].complete(now);
            cell.product.custodian = caller.clone();
            let draft = CheckpointDraft::new(
                location,
                CheckpointKind::Transfer,
                ContentDigest::of_text(&conditions),
            );
            append_checkpoint(cell, caller, draft, now);
            Ok(())
        })?;
        tracing::info!(product = %product, transfer = %transfer, custodian = %caller, "custody transferred");
        Ok(())
    }

    /// Reject a pending transfer, recording the reason.
    ///
    /// Recipient only. The reason replaces the transfer's conditions.
    pub fn reject_transfer(
        &self,
        caller: &ActorId,
        product: ProductId,
        transfer: TransferId,
        reason: String,
    ) -> Result<(), LedgerError> {
        let now = self.clock.now();
        self.store.with_cell(product, |cell| {
            let record = find_transfer(cell, product, transfer)?;
            if record.recipient != *caller {
                return Err(LedgerError::Unauthorized {
                    caller: caller.clone(),
                    action: "reject the transfer",
                });
            }
            if !record.is_pending() {
                return Err(LedgerError::TransferNotPending {
                    product,
                    transfer,
                    status: record.status,
                });
            }
            cell.transfers[transfer.value() as usize].reject(reason, now);
            Ok(())
        })?;
        tracing::debug!(product = %product, transfer = %transfer, "transfer rejected");
        Ok(())
    }

    /// Withdraw a pending transfer. Initiator only.
    pub fn cancel_transfer(
        &self,
        caller: &ActorId,
        product: ProductId,
        transfer: TransferId,
    ) -> Result<(), LedgerError> {
        let now = self.clock.now();
        self.store.with_cell(product, |cell| {
            let record = find_transfer(cell, product, transfer)?;
            if record.initiator != *caller {
                return Err(LedgerError::Unauthorized {
                    caller: caller.clone(),
                    action: "cancel the transfer",
                });
            }
            if !record.is_pending() {
                return Err(LedgerError::TransferNotPending {
                    product,
                    transfer,
                    status: record.status,
                });
            }
            cell.transfers[transfer.value() as usize].cancel(now);
            Ok(())
        })?;
        tracing::debug!(product = %product, transfer = %transfer, "transfer cancelled");
        Ok(())
    }

    // ─── Certification registry ──────────────────────────────────────

    /// Add or replace a certification of the given kind.
    ///
    /// Requires the manufacturer or one of its active verifiers, and an
    /// expiry strictly after the current tick. Re-adding a kind
    /// overwrites the prior record entirely, revoked or not.
    pub fn add_certification(
        &self,
        caller: &ActorId,
        product: ProductId,
        kind: &str,
        expires_at: Tick,
        digest: ContentDigest,
        uri: Option<String>,
    ) -> Result<(), LedgerError> {
        let now = self.clock.now();
        self.store.with_cell(product, |cell| {
            let manufacturer = &cell.product.manufacturer;
            let permitted = *manufacturer == *caller
                || self.store.is_verifier_authorized(manufacturer, caller);
            if !permitted {
                return Err(LedgerError::Unauthorized {
                    caller: caller.clone(),
                    action: "certify the product",
                });
            }
            if expires_at <= now {
                return Err(LedgerError::ExpiryNotInFuture { expires_at, now });
            }
            cell.certifications.insert(
                kind.to_string(),
                Certification::issue(caller.clone(), now, expires_at, digest, uri),
            );
            Ok(())
        })?;
        tracing::info!(product = %product, kind, issuer = %caller, "certification added");
        Ok(())
    }

    /// Revoke a certification. Only its issuer may revoke.
    pub fn revoke_certification(
        &self,
        caller: &ActorId,
        product: ProductId,
        kind: &str,
    ) -> Result<(), LedgerError> {
        self.store.with_cell(product, |cell| {
            let cert = cell.certifications.get_mut(kind).ok_or_else(|| {
                LedgerError::CertificationNotFound {
                    product,
                    kind: kind.to_string(),
                }
            })?;
            if cert.issuer != *caller {
                return Err(LedgerError::Unauthorized {
                    caller: caller.clone(),
                    action: "revoke the certification",
                });
            }
            cert.revoke();
            Ok(())
        })?;
        tracing::info!(product = %product, kind, "certification revoked");
        Ok(())
    }

    /// Whether the certification exists, is unrevoked, and has not
    /// expired at the current tick. Pure lookup: never an error.
    pub fn is_certification_valid(&self, product: ProductId, kind: &str) -> bool {
        let now = self.clock.now();
        self.store
            .read_cell(product, |cell| {
                cell.certifications
                    .get(kind)
                    .is_some_and(|cert| cert.is_valid_at(now))
            })
            .unwrap_or(false)
    }

    // ─── Read accessors ──────────────────────────────────────────────

    /// The product record.
    pub fn product(&self, product: ProductId) -> Result<Product, LedgerError> {
        self.store
            .read_cell(product, |cell| cell.product.clone())
            .ok_or(LedgerError::ProductNotFound(product))
    }

    /// One checkpoint from a product's ledger.
    pub fn checkpoint(
        &self,
        product: ProductId,
        checkpoint: CheckpointId,
    ) -> Result<Checkpoint, LedgerError> {
        self.store
            .read_cell(product, |cell| {
                cell.checkpoints.get(checkpoint.value() as usize).cloned()
            })
            .ok_or(LedgerError::ProductNotFound(product))?
            .ok_or(LedgerError::CheckpointNotFound {
                product,
                checkpoint,
            })
    }

    /// One custody-transfer record.
    pub fn transfer(
        &self,
        product: ProductId,
        transfer: TransferId,
    ) -> Result<Transfer, LedgerError> {
        self.store
            .read_cell(product, |cell| {
                cell.transfers.get(transfer.value() as usize).cloned()
            })
            .ok_or(LedgerError::ProductNotFound(product))?
            .ok_or(LedgerError::TransferNotFound { product, transfer })
    }

    /// One certification record.
    pub fn certification(
        &self,
        product: ProductId,
        kind: &str,
    ) -> Result<Certification, LedgerError> {
        self.store
            .read_cell(product, |cell| cell.certifications.get(kind).cloned())
            .ok_or(LedgerError::ProductNotFound(product))?
            .ok_or_else(|| LedgerError::CertificationNotFound {
                product,
                kind: kind.to_string(),
            })
    }

    /// Number of checkpoints recorded for a product.
    pub fn checkpoint_count(&self, product: ProductId) -> Result<u64, LedgerError> {
        self.store
            .read_cell(product, |cell| cell.checkpoints.len() as u64)
            .ok_or(LedgerError::ProductNotFound(product))
    }

    /// Number of transfers opened for a product.
    pub fn transfer_count(&self, product: ProductId) -> Result<u64, LedgerError> {
        self.store
            .read_cell(product, |cell| cell.transfers.len() as u64)
            .ok_or(LedgerError::ProductNotFound(product))
    }

    /// Condensed authenticity summary for a product.
    pub fn verify_authenticity(
        &self,
        product: ProductId,
    ) -> Result<AuthenticitySummary, LedgerError> {
        self.store
            .read_cell(product, |cell| AuthenticitySummary {
                authentic: !cell.product.status.is_recalled(),
                manufacturer: cell.product.manufacturer.clone(),
                lot_number: cell.product.lot_number.clone(),
                status: cell.product.status,
            })
            .ok_or(LedgerError::ProductNotFound(product))
    }

    // ─── Shared validation ───────────────────────────────────────────

    /// Custody authority: the current custodian, or an active verifier
    /// of the custodian's organization.
    fn require_custody_authority(
        &self,
        cell: &ProductCell,
        caller: &ActorId,
        action: &'static str,
    ) -> Result<(), LedgerError> {
        let custodian = &cell.product.custodian;
        if *custodian == *caller || self.store.is_verifier_authorized(custodian, caller) {
            return Ok(());
        }
        Err(LedgerError::Unauthorized {
            caller: caller.clone(),
            action,
        })
    }
}

// ─── Append Helper ───────────────────────────────────────────────────

/// Append one checkpoint to a cell: assign the next sequence id,
/// snapshot the current custodian, and re-derive product status from
/// the checkpoint kind.
fn append_checkpoint(
    cell: &mut ProductCell,
    verifier: &ActorId,
    draft: CheckpointDraft,
    now: Tick,
) -> CheckpointId {
    let id = CheckpointId(cell.checkpoints.len() as u64);
    let checkpoint = Checkpoint::record(
        id,
        draft,
        cell.product.custodian.clone(),
        verifier.clone(),
        now,
    );
    cell.product.status = checkpoint.kind.derived_status();
    cell.checkpoints.push(checkpoint);
    id
}

/// Look up a transfer for validation, by value.
fn find_transfer(
    cell: &ProductCell,
    product: ProductId,
    transfer: TransferId,
) -> Result<Transfer, LedgerError> {
    cell.transfers
        .get(transfer.value() as usize)
        .cloned()
        .ok_or(LedgerError::TransferNotFound { product, transfer })
}

// ─── Tests ───────────────────────────────────────────────────────────
