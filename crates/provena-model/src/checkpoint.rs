//! # Checkpoint Records
//!
//! Immutable, sequentially numbered waypoints in a product's custody
//! chain. Checkpoint ids form a gapless per-product sequence starting at
//! 0; a checkpoint is never edited or removed once written.
//!
//! The checkpoint kind is an open category: callers may record any
//! waypoint label, but a handful of kinds are reserved because the
//! ledger either writes them itself (`manufacture`, `transfer`,
//! `recall`) or derives product status from them (`delivery`,
//! `retail-sale`).

use serde::{Deserialize, Serialize};

use provena_core::{ActorId, CheckpointId, ContentDigest, Tick};

use crate::product::ProductStatus;

// ─── Kind ────────────────────────────────────────────────────────────

/// Category of a checkpoint.
///
/// Parsing never fails: unreserved labels become [`CheckpointKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CheckpointKind {
    /// Written by the ledger when a product is registered.
    Manufacture,
    /// Written by the ledger when a custody transfer completes.
    Transfer,
    /// Reserved: marks the product as delivered.
    Delivery,
    /// Reserved: marks the product as sold at retail.
    RetailSale,
    /// Written by the ledger when a product is recalled.
    Recall,
    /// Any other waypoint label.
    Other(String),
}

impl CheckpointKind {
    /// The wire label of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manufacture => "manufacture",
            Self::Transfer => "transfer",
            Self::Delivery => "delivery",
            Self::RetailSale => "retail-sale",
            Self::Recall => "recall",
            Self::Other(label) => label,
        }
    }

    /// The product status this kind implies.
    ///
    /// Every checkpoint append re-derives the product's status through
    /// this rule; only the two reserved sale/delivery kinds map anywhere
    /// other than `InTransit`.
    pub fn derived_status(&self) -> ProductStatus {
        match self {
            Self::Delivery => ProductStatus::Delivered,
            Self::RetailSale => ProductStatus::Sold,
            _ => ProductStatus::InTransit,
        }
    }
}

impl From<&str> for CheckpointKind {
    fn from(label: &str) -> Self {
        match label {
            "manufacture" => Self::Manufacture,
            "transfer" => Self::Transfer,
            "delivery" => Self::Delivery,
            "retail-sale" => Self::RetailSale,
            "recall" => Self::Recall,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CheckpointKind {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl std::fmt::Display for CheckpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CheckpointKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CheckpointKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from(String::deserialize(deserializer)?))
    }
}

// ─── Draft ───────────────────────────────────────────────────────────

/// Caller-supplied fields of a checkpoint, before the ledger assigns the
/// sequence id and snapshots custody.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointDraft {
    /// Where the waypoint was observed.
    pub location: String,
    /// Category of the waypoint.
    pub kind: CheckpointKind,
    /// Temperature reading at the waypoint, degrees Celsius.
    pub temperature: Option<i32>,
    /// Relative humidity reading at the waypoint, percent.
    pub humidity: Option<u32>,
    /// Free-form observations.
    pub observations: Option<String>,
    /// Digest of the off-ledger attestation document.
    pub attestation: ContentDigest,
}

impl CheckpointDraft {
    /// A draft with only the required fields set.
    pub fn new(
        location: impl Into<String>,
        kind: impl Into<CheckpointKind>,
        attestation: ContentDigest,
    ) -> Self {
        Self {
            location: location.into(),
            kind: kind.into(),
            temperature: None,
            humidity: None,
            observations: None,
            attestation,
        }
    }
}

// ─── Checkpoint ──────────────────────────────────────────────────────

/// One immutable waypoint in a product's custody chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Position in the product's gapless checkpoint sequence.
    pub id: CheckpointId,
    /// Where the waypoint was observed.
    pub location: String,
    /// When the waypoint was recorded.
    pub recorded_at: Tick,
    /// The product's custodian at write time.
    pub custodian: ActorId,
    /// The identity that recorded the waypoint.
    pub verifier: ActorId,
    /// Category of the waypoint.
    pub kind: CheckpointKind,
    /// Temperature reading, degrees Celsius.
    pub temperature: Option<i32>,
    /// Relative humidity reading, percent.
    pub humidity: Option<u32>,
    /// Free-form observations.
    pub observations: Option<String>,
    /// Digest of the off-ledger attestation document.
    pub attestation: ContentDigest,
}

impl Checkpoint {
    /// Materialize a draft into the record the ledger stores.
    pub fn record(
        id: CheckpointId,
        draft: CheckpointDraft,
        custodian: ActorId,
        verifier: ActorId,
        at: Tick,
    ) -> Self {
        Self {
            id,
            location: draft.location,
            recorded_at: at,
            custodian,
            verifier,
            kind: draft.kind,
            temperature: draft.temperature,
            humidity: draft.humidity,
            observations: draft.observations,
            attestation: draft.attestation,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_labels_parse_to_reserved_kinds() {
        assert_eq!(CheckpointKind::from("manufacture"), CheckpointKind::Manufacture);
        assert_eq!(CheckpointKind::from("transfer"), CheckpointKind::Transfer);
        assert_eq!(CheckpointKind::from("delivery"), CheckpointKind::Delivery);
        assert_eq!(CheckpointKind::from("retail-sale"), CheckpointKind::RetailSale);
        assert_eq!(CheckpointKind::from("recall"), CheckpointKind::Recall);
    }

    #[test]
    fn test_unreserved_labels_stay_free_form() {
        let kind = CheckpointKind::from("customs-clearance");
        assert_eq!(kind, CheckpointKind::Other("customs-clearance".to_string()));
        assert_eq!(kind.as_str(), "customs-clearance");
    }

    #[test]
    fn test_status_derivation_rule() {
        assert_eq!(
            CheckpointKind::Delivery.derived_status(),
            ProductStatus::Delivered
        );
        assert_eq!(
            CheckpointKind::RetailSale.derived_status(),
            ProductStatus::Sold
        );
        assert_eq!(
            CheckpointKind::Manufacture.derived_status(),
            ProductStatus::InTransit
        );
        assert_eq!(
            CheckpointKind::Recall.derived_status(),
            ProductStatus::InTransit
        );
        assert_eq!(
            CheckpointKind::Other("warehouse-scan".to_string()).derived_status(),
            ProductStatus::InTransit
        );
    }

    #[test]
    fn test_kind_serializes_as_its_label() {
        let json = serde_json::to_string(&CheckpointKind::RetailSale).unwrap();
        assert_eq!(json, "\"retail-sale\"");
        let parsed: CheckpointKind = serde_json::from_str("\"retail-sale\"").unwrap();
        assert_eq!(parsed, CheckpointKind::RetailSale);

        let parsed: CheckpointKind = serde_json::from_str("\"x-ray-scan\"").unwrap();
        assert_eq!(parsed, CheckpointKind::Other("x-ray-scan".to_string()));
    }

    #[test]
    fn test_record_snapshots_custodian_and_verifier() {
        let custodian = ActorId::new("warehouse-9").unwrap();
        let verifier = ActorId::new("inspector-3").unwrap();
        let draft = CheckpointDraft::new(
            "Port of Karachi",
            "customs-clearance",
            ContentDigest::of_text("attestation"),
        );
        let cp = Checkpoint::record(
            CheckpointId(4),
            draft,
            custodian.clone(),
            verifier.clone(),
            Tick(77),
        );
        assert_eq!(cp.id, CheckpointId(4));
        assert_eq!(cp.custodian, custodian);
        assert_eq!(cp.verifier, verifier);
        assert_eq!(cp.recorded_at, Tick(77));
        assert!(cp.temperature.is_none());
    }

    #[test]
    fn test_checkpoint_serde_roundtrip() {
        let mut draft = CheckpointDraft::new(
            "Cold store 4",
            "delivery",
            ContentDigest::of_text("doc"),
        );
        draft.temperature = Some(-18);
        draft.humidity = Some(40);
        let cp = Checkpoint::record(
            CheckpointId(0),
            draft,
            ActorId::new("carrier").unwrap(),
            ActorId::new("carrier").unwrap(),
            Tick(5),
        );
        let json = serde_json::to_string(&cp).unwrap();
        let parsed: Checkpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, CheckpointKind::Delivery);
        assert_eq!(parsed.temperature, Some(-18));
        assert_eq!(parsed.attestation, cp.attestation);
    }
}
