//! # Custody Transfer State Machine
//!
//! A two-party workflow moving custody of a product from its current
//! custodian (the initiator) to a recipient.
//!
//! ## States
//!
//! ```text
//! Pending ──accept──▶ Completed (terminal)
//!    │
//!    ├────reject────▶ Rejected  (terminal)
//!    └────cancel────▶ Cancelled (terminal)
//! ```
//!
//! Once a transfer leaves `Pending` it never changes again, with one
//! carve-out: rejection overwrites the `conditions` field with the
//! rejection reason supplied by the recipient.

use serde::{Deserialize, Serialize};

use provena_core::{ActorId, Tick, TransferId};

// ─── Status ──────────────────────────────────────────────────────────

/// State of a custody transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferStatus {
    /// Awaiting the recipient's decision.
    Pending,
    /// Accepted by the recipient; custody moved (terminal).
    Completed,
    /// Declined by the recipient (terminal).
    Rejected,
    /// Withdrawn by the initiator (terminal).
    Cancelled,
}

impl TransferStatus {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

// ─── Transfer ────────────────────────────────────────────────────────

/// One custody-transfer record in a product's gapless transfer sequence.
///
/// The closing methods only flip fields; the ledger validates caller
/// identity and pending status before invoking them, so that every
/// precondition failure aborts with no partial mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    /// Position in the product's transfer sequence.
    pub id: TransferId,
    /// The custodian who opened the transfer.
    pub initiator: ActorId,
    /// The identity asked to take custody.
    pub recipient: ActorId,
    /// When the transfer was opened.
    pub initiated_at: Tick,
    /// When the transfer reached a terminal state, if it has.
    pub completed_at: Option<Tick>,
    /// Current state.
    pub status: TransferStatus,
    /// Handling conditions offered by the initiator; replaced by the
    /// rejection reason if the recipient rejects.
    pub conditions: Option<String>,
}

impl Transfer {
    /// Open a pending transfer.
    pub fn open(
        id: TransferId,
        initiator: ActorId,
        recipient: ActorId,
        conditions: Option<String>,
        at: Tick,
    ) -> Self {
        Self {
            id,
            initiator,
            recipient,
            initiated_at: at,
            completed_at: None,
            status: TransferStatus::Pending,
            conditions,
        }
    }

    /// Close as accepted.
    pub fn complete(&mut self, at: Tick) {
        self.status = TransferStatus::Completed;
        self.completed_at = Some(at);
    }

    /// Close as rejected, replacing the conditions with the reason.
    pub fn reject(&mut self, reason: String, at: Tick) {
        self.status = TransferStatus::Rejected;
        self.completed_at = Some(at);
        self.conditions = Some(reason);
    }

    /// Close as cancelled by the initiator.
    pub fn cancel(&mut self, at: Tick) {
        self.status = TransferStatus::Cancelled;
        self.completed_at = Some(at);
    }

    /// Whether the transfer is still awaiting a decision.
    pub fn is_pending(&self) -> bool {
        self.status == TransferStatus::Pending
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn open_transfer() -> Transfer {
        Transfer::open(
            TransferId(0),
            ActorId::new("warehouse-9").unwrap(),
            ActorId::new("retailer-2").unwrap(),
            Some("keep below -15C".to_string()),
            Tick(100),
        )
    }

    #[test]
    fn test_open_is_pending_without_completion() {
        let t = open_transfer();
        assert!(t.is_pending());
        assert_eq!(t.status, TransferStatus::Pending);
        assert!(t.completed_at.is_none());
        assert_eq!(t.conditions.as_deref(), Some("keep below -15C"));
    }

    #[test]
    fn test_complete_sets_terminal_state_and_tick() {
        let mut t = open_transfer();
        t.complete(Tick(140));
        assert_eq!(t.status, TransferStatus::Completed);
        assert_eq!(t.completed_at, Some(Tick(140)));
        // Acceptance keeps the original conditions.
        assert_eq!(t.conditions.as_deref(), Some("keep below -15C"));
    }

    #[test]
    fn test_reject_overwrites_conditions_with_reason() {
        let mut t = open_transfer();
        t.reject("seal broken on arrival".to_string(), Tick(150));
        assert_eq!(t.status, TransferStatus::Rejected);
        assert_eq!(t.completed_at, Some(Tick(150)));
        assert_eq!(t.conditions.as_deref(), Some("seal broken on arrival"));
    }

    #[test]
    fn test_cancel_keeps_conditions() {
        let mut t = open_transfer();
        t.cancel(Tick(160));
        assert_eq!(t.status, TransferStatus::Cancelled);
        assert_eq!(t.conditions.as_deref(), Some("keep below -15C"));
    }

    #[test]
    fn test_only_pending_is_nonterminal() {
        assert!(!TransferStatus::Pending.is_terminal());
        assert!(TransferStatus::Completed.is_terminal());
        assert!(TransferStatus::Rejected.is_terminal());
        assert!(TransferStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TransferStatus::Pending.to_string(), "PENDING");
        assert_eq!(TransferStatus::Completed.to_string(), "COMPLETED");
        assert_eq!(TransferStatus::Rejected.to_string(), "REJECTED");
        assert_eq!(TransferStatus::Cancelled.to_string(), "CANCELLED");
    }

    #[test]
    fn test_transfer_serde_roundtrip() {
        let mut t = open_transfer();
        t.complete(Tick(140));
        let json = serde_json::to_string(&t).unwrap();
        let parsed: Transfer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.status, TransferStatus::Completed);
        assert_eq!(parsed.recipient, t.recipient);
        assert_eq!(parsed.completed_at, Some(Tick(140)));
    }
}
