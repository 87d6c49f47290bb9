//! # Verifier Authorization
//!
//! An organization grants named verifiers delegated authority to act on
//! its behalf: recording checkpoints for goods in its custody, or
//! certifying goods it manufactured.
//!
//! Records are upsertable. Re-authorizing a verifier overwrites the
//! record; revocation flips `active` to false but keeps the record so
//! the grant history stays auditable.

use serde::{Deserialize, Serialize};

use provena_core::{ActorId, Tick};

/// A delegated-authority grant keyed by (organization, verifier).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationRecord {
    /// Display name of the verifier.
    pub verifier_name: String,
    /// Role the verifier holds within the organization.
    pub role: String,
    /// When the grant was issued.
    pub authorized_at: Tick,
    /// The organization identity that issued the grant.
    pub authorized_by: ActorId,
    /// Whether the grant is currently in force.
    pub active: bool,
}

impl AuthorizationRecord {
    /// Issue an active grant.
    pub fn grant(
        verifier_name: impl Into<String>,
        role: impl Into<String>,
        authorized_by: ActorId,
        at: Tick,
    ) -> Self {
        Self {
            verifier_name: verifier_name.into(),
            role: role.into(),
            authorized_at: at,
            authorized_by,
            active: true,
        }
    }

    /// Take the grant out of force, keeping the record for audit.
    pub fn revoke(&mut self) {
        self.active = false;
    }

    /// Whether the grant is currently in force.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
