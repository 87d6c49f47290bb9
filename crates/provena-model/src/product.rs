//! # Product Lifecycle
//!
//! The tracked good itself: immutable manufacturing facts plus the two
//! mutable handles the rest of the ledger drives, lifecycle status and
//! current custodian.
//!
//! ## States
//!
//! ```text
//! Created ──▶ InTransit ◀──▶ Delivered
//!                 │    ◀──▶ Sold
//!                 ▼
//!             Recalled (terminal)
//! ```
//!
//! Status is not set directly by callers. It is re-derived from the kind
//! of every checkpoint appended to the product, so the very first
//! `manufacture` checkpoint moves a product off `Created`, and a later
//! waypoint can move a `Delivered` product back to `InTransit`. The one
//! exception is `Recalled`, which is set by the recall operation and is
//! terminal: no further checkpoints are accepted.

use serde::{Deserialize, Serialize};

use provena_core::{ActorId, ProductId, Tick};

// ─── Status ──────────────────────────────────────────────────────────

/// Lifecycle status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    /// Registered but no checkpoint recorded yet. Transient: the
    /// registration operation itself appends the first checkpoint.
    Created,
    /// Moving through the custody chain.
    InTransit,
    /// A `delivery` checkpoint was the most recent status-bearing event.
    Delivered,
    /// A `retail-sale` checkpoint was the most recent status-bearing event.
    Sold,
    /// Recalled by the manufacturer (terminal).
    Recalled,
}

impl ProductStatus {
    /// Whether the product has been recalled.
    ///
    /// Recalled is the only status that blocks further ledger writes.
    pub fn is_recalled(&self) -> bool {
        matches!(self, Self::Recalled)
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Created => "CREATED",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
            Self::Sold => "SOLD",
            Self::Recalled => "RECALLED",
        };
        f.write_str(s)
    }
}

// ─── Registration Details ────────────────────────────────────────────

/// Caller-supplied facts captured at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Display name of the good.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Manufacturing lot number.
    pub lot_number: String,
    /// Product category (e.g. "pharmaceutical", "produce").
    pub category: String,
    /// Where the good was manufactured.
    pub origin_location: String,
    /// Optional reference to off-ledger metadata.
    pub metadata_uri: Option<String>,
}

// ─── Product ─────────────────────────────────────────────────────────

/// A tracked physical good.
///
/// `manufacturer` and `created_at` never change after registration.
/// `status` mutates only through checkpoint derivation and recall;
/// `custodian` mutates only when a custody transfer completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Globally unique identifier.
    pub id: ProductId,
    /// Display name of the good.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Manufacturing lot number.
    pub lot_number: String,
    /// Product category.
    pub category: String,
    /// Where the good was manufactured.
    pub origin_location: String,
    /// The identity that registered the product. Immutable.
    pub manufacturer: ActorId,
    /// When the product was registered. Immutable.
    pub created_at: Tick,
    /// Current lifecycle status.
    pub status: ProductStatus,
    /// The identity currently responsible for physical possession.
    pub custodian: ActorId,
    /// Planned delivery destination, if shipping details were set.
    pub destination: Option<String>,
    /// Expected arrival tick, if shipping details were set.
    pub expected_arrival: Option<Tick>,
    /// Optional reference to off-ledger metadata.
    pub metadata_uri: Option<String>,
}

impl Product {
    /// Register a product. The manufacturer starts as custodian.
    pub fn register(
        id: ProductId,
        details: ProductDetails,
        manufacturer: ActorId,
        at: Tick,
    ) -> Self {
        Self {
            id,
            name: details.name,
            description: details.description,
            lot_number: details.lot_number,
            category: details.category,
            origin_location: details.origin_location,
            custodian: manufacturer.clone(),
            manufacturer,
            created_at: at,
            status: ProductStatus::Created,
            destination: None,
            expected_arrival: None,
            metadata_uri: details.metadata_uri,
        }
    }

    /// Overwrite the shipping fields. No status restriction applies.
    pub fn set_shipping(&mut self, destination: String, expected_arrival: Tick) {
        self.destination = Some(destination);
        self.expected_arrival = Some(expected_arrival);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ProductDetails {
        ProductDetails {
            name: "Cold-chain vaccine".to_string(),
            description: "10-dose vial carton".to_string(),
            lot_number: "L100".to_string(),
            category: "pharmaceutical".to_string(),
            origin_location: "Lahore plant 2".to_string(),
            metadata_uri: None,
        }
    }

    fn manufacturer() -> ActorId {
        ActorId::new("acme-pharma").unwrap()
    }

    #[test]
    fn test_register_starts_created_with_manufacturer_as_custodian() {
        let p = Product::register(ProductId(0), details(), manufacturer(), Tick(10));
        assert_eq!(p.status, ProductStatus::Created);
        assert_eq!(p.custodian, p.manufacturer);
        assert_eq!(p.created_at, Tick(10));
        assert_eq!(p.lot_number, "L100");
        assert!(p.destination.is_none());
        assert!(p.expected_arrival.is_none());
    }

    #[test]
    fn test_set_shipping_overwrites_both_fields() {
        let mut p = Product::register(ProductId(0), details(), manufacturer(), Tick(10));
        p.set_shipping("Karachi DC".to_string(), Tick(500));
        assert_eq!(p.destination.as_deref(), Some("Karachi DC"));
        assert_eq!(p.expected_arrival, Some(Tick(500)));

        p.set_shipping("Islamabad DC".to_string(), Tick(900));
        assert_eq!(p.destination.as_deref(), Some("Islamabad DC"));
        assert_eq!(p.expected_arrival, Some(Tick(900)));
    }

    #[test]
    fn test_only_recalled_is_recalled() {
        assert!(ProductStatus::Recalled.is_recalled());
        assert!(!ProductStatus::Created.is_recalled());
        assert!(!ProductStatus::InTransit.is_recalled());
        assert!(!ProductStatus::Delivered.is_recalled());
        assert!(!ProductStatus::Sold.is_recalled());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ProductStatus::Created.to_string(), "CREATED");
        assert_eq!(ProductStatus::InTransit.to_string(), "IN_TRANSIT");
        assert_eq!(ProductStatus::Delivered.to_string(), "DELIVERED");
        assert_eq!(ProductStatus::Sold.to_string(), "SOLD");
        assert_eq!(ProductStatus::Recalled.to_string(), "RECALLED");
    }

    #[test]
    fn test_product_serde_roundtrip() {
        let p = Product::register(ProductId(3), details(), manufacturer(), Tick(10));
        let json = serde_json::to_string(&p).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, p.id);
        assert_eq!(parsed.status, p.status);
        assert_eq!(parsed.custodian, p.custodian);
    }
}
