//! # In-Memory Keyed Store
//!
//! The reference storage adapter. State is partitioned the way the
//! operations touch it: one lock-guarded cell per product holding the
//! product record together with its checkpoint, transfer, and
//! certification tables; a dedicated mutex for the global product-id
//! allocator; and a separate lock for the authorization table, which is
//! owned by organizations rather than products.
//!
//! No operation ever touches more than one product, so holding a
//! product's cell lock for the duration of an operation is the entire
//! serialization story. Composite writes (a registration with its
//! initial checkpoint, a recall with its recall checkpoint, an accepted
//! transfer with its custody checkpoint) happen inside one cell lock and
//! are therefore atomic with respect to every other call.
//!
//! Checkpoints and transfers are kept as vectors indexed by their
//! sequence id: ids are gapless from 0 by construction, and the next id
//! is the vector length, so a sequence counter can never drift from its
//! table.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use provena_core::{ActorId, ProductId};
use provena_model::{AuthorizationRecord, Certification, Checkpoint, Product, Transfer};

use crate::error::LedgerError;

/// Recover a lock guard whether or not a previous holder panicked.
///
/// Operations validate before they write, so a poisoned cell still holds
/// either the pre-operation state or a fully applied operation.
fn relock<G>(result: Result<G, PoisonError<G>>) -> G {
    result.unwrap_or_else(PoisonError::into_inner)
}

// ─── Product Cell ────────────────────────────────────────────────────

/// Everything owned by one product, guarded by one lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProductCell {
    /// The product record.
    pub product: Product,
    /// Checkpoint ledger; index equals checkpoint id.
    pub checkpoints: Vec<Checkpoint>,
    /// Transfer table; index equals transfer id.
    pub transfers: Vec<Transfer>,
    /// Certifications keyed by document kind.
    pub certifications: BTreeMap<String, Certification>,
}

impl ProductCell {
    /// A cell for a freshly registered product with empty tables.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            checkpoints: Vec::new(),
            transfers: Vec::new(),
            certifications: BTreeMap::new(),
        }
    }
}

// ─── Store ───────────────────────────────────────────────────────────

/// In-memory store with per-product locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Global product-id allocator.
    next_product_id: Mutex<u64>,
    /// One cell per registered product.
    products: RwLock<HashMap<ProductId, Arc<Mutex<ProductCell>>>>,
    /// Authorization records keyed by (organization, verifier).
    authorizations: RwLock<HashMap<(ActorId, ActorId), AuthorizationRecord>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next product id and publish the cell `build` returns
    /// for it, as one atomic step.
    ///
    /// The cell is fully constructed before any other call can observe
    /// the id, which is what makes a registration and its initial
    /// checkpoint a single unit.
    pub(crate) fn create_product(
        &self,
        build: impl FnOnce(ProductId) -> ProductCell,
    ) -> ProductId {
        let mut next = relock(self.next_product_id.lock());
        let id = ProductId(*next);
        let cell = build(id);
        relock(self.products.write()).insert(id, Arc::new(Mutex::new(cell)));
        *next += 1;
        id
    }

    /// Run `op` with exclusive access to a product's cell.
    ///
    /// The cell lock is held until `op` returns, serializing every write
    /// scoped to this product. `op` must validate all preconditions
    /// before its first mutation.
    pub(crate) fn with_cell<R>(
        &self,
        id: ProductId,
        op: impl FnOnce(&mut ProductCell) -> Result<R, LedgerError>,
    ) -> Result<R, LedgerError> {
        let cell = relock(self.products.read())
            .get(&id)
            .cloned()
            .ok_or(LedgerError::ProductNotFound(id))?;
        let mut guard = relock(cell.lock());
        op(&mut guard)
    }

    /// Run `read` against a product's cell, or `None` if unregistered.
    pub(crate) fn read_cell<R>(
        &self,
        id: ProductId,
        read: impl FnOnce(&ProductCell) -> R,
    ) -> Option<R> {
        let cell = relock(self.products.read()).get(&id).cloned()?;
        let guard = relock(cell.lock());
        Some(read(&guard))
    }

    // ─── Authorization table ─────────────────────────────────────────

    /// Insert or replace the record for (organization, verifier).
    pub(crate) fn upsert_authorization(
        &self,
        organization: ActorId,
        verifier: ActorId,
        record: AuthorizationRecord,
    ) {
        relock(self.authorizations.write()).insert((organization, verifier), record);
    }

    /// Flip an existing record to inactive.
    pub(crate) fn deactivate_authorization(
        &self,
        organization: &ActorId,
        verifier: &ActorId,
    ) -> Result<(), LedgerError> {
        let mut table = relock(self.authorizations.write());
        let record = table
            .get_mut(&(organization.clone(), verifier.clone()))
            .ok_or_else(|| LedgerError::AuthorizationNotFound {
                organization: organization.clone(),
                verifier: verifier.clone(),
            })?;
        record.revoke();
        Ok(())
    }

    /// The record for (organization, verifier), if any.
    pub(crate) fn authorization(
        &self,
        organization: &ActorId,
        verifier: &ActorId,
    ) -> Option<AuthorizationRecord> {
        relock(self.authorizations.read())
            .get(&(organization.clone(), verifier.clone()))
            .cloned()
    }

    /// Whether `verifier` holds an active grant from `organization`.
    ///
    /// Pure lookup: unknown pairs and inactive records are `false`.
    pub fn is_verifier_authorized(&self, organization: &ActorId, verifier: &ActorId) -> bool {
        self.authorization(organization, verifier)
            .is_some_and(|record| record.is_active())
    }

    // ─── Snapshots ───────────────────────────────────────────────────

    /// Export the full store state.
    pub fn snapshot(&self) -> Snapshot {
        let products = relock(self.products.read());
        let mut cells: Vec<ProductCell> = products
            .values()
            .map(|cell| relock(cell.lock()).clone())
            .collect();
        cells.sort_by_key(|cell| cell.product.id);

        let authorizations = relock(self.authorizations.read());
        let mut grants: Vec<AuthorizationEntry> = authorizations
            .iter()
            .map(|((organization, verifier), record)| AuthorizationEntry {
                organization: organization.clone(),
                verifier: verifier.clone(),
                record: record.clone(),
            })
            .collect();
        grants.sort_by(|a, b| {
            (&a.organization, &a.verifier).cmp(&(&b.organization, &b.verifier))
        });

        Snapshot {
            next_product_id: *relock(self.next_product_id.lock()),
            products: cells,
            authorizations: grants,
        }
    }

    /// Rebuild a store from an exported snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let products = snapshot
            .products
            .into_iter()
            .map(|cell| (cell.product.id, Arc::new(Mutex::new(cell))))
            .collect();
        let authorizations = snapshot
            .authorizations
            .into_iter()
            .map(|entry| ((entry.organization, entry.verifier), entry.record))
            .collect();
        Self {
            next_product_id: Mutex::new(snapshot.next_product_id),
            products: RwLock::new(products),
            authorizations: RwLock::new(authorizations),
        }
    }
}

// ─── Snapshot Format ─────────────────────────────────────────────────

/// One authorization grant in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuthorizationEntry {
    organization: ActorId,
    verifier: ActorId,
    record: AuthorizationRecord,
}

/// Serializable export of the whole store, ordered deterministically.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    next_product_id: u64,
    products: Vec<ProductCell>,
    authorizations: Vec<AuthorizationEntry>,
}

// ─── Tests ───────────────────────────────────────────────────────────
