//! # Certifications
//!
//! Time-bounded compliance attestations tied to a product and a document
//! kind ("halal", "organic", "iso-22000", ...). At most one live record
//! exists per (product, kind); re-adding the same kind overwrites the
//! prior record entirely.
//!
//! Expiry is never stored as a status. A certification is `Valid` or
//! `Revoked` on disk; whether it is *currently* valid is derived at read
//! time by comparing `expires_at` against the current tick, strictly.

use serde::{Deserialize, Serialize};

use provena_core::{ActorId, ContentDigest, Tick};

// ─── Status ──────────────────────────────────────────────────────────

/// Stored state of a certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificationStatus {
    /// In force until it expires or is revoked.
    Valid,
    /// Withdrawn by its issuer.
    Revoked,
}

impl std::fmt::Display for CertificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Valid => "VALID",
            Self::Revoked => "REVOKED",
        };
        f.write_str(s)
    }
}

// ─── Certification ───────────────────────────────────────────────────

/// A compliance attestation for one product and document kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    /// The identity that issued this record.
    pub issuer: ActorId,
    /// When the record was issued.
    pub issued_at: Tick,
    /// Tick after which the certification no longer counts as valid.
    pub expires_at: Tick,
    /// Digest of the off-ledger certification document.
    pub digest: ContentDigest,
    /// Optional locator for the document.
    pub uri: Option<String>,
    /// Stored state.
    pub status: CertificationStatus,
}

impl Certification {
    /// Issue a valid certification.
    pub fn issue(
        issuer: ActorId,
        issued_at: Tick,
        expires_at: Tick,
        digest: ContentDigest,
        uri: Option<String>,
    ) -> Self {
        Self {
            issuer,
            issued_at,
            expires_at,
            digest,
            uri,
            status: CertificationStatus::Valid,
        }
    }

    /// Withdraw the certification.
    pub fn revoke(&mut self) {
        self.status = CertificationStatus::Revoked;
    }

    /// Whether the certification is in force at `now`.
    ///
    /// Strict comparison: a certification expiring exactly at `now` is
    /// no longer valid. Revocation wins regardless of expiry.
    pub fn is_valid_at(&self, now: Tick) -> bool {
        self.status == CertificationStatus::Valid && self.expires_at > now
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
