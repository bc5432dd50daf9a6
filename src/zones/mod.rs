//! Delivery zone domain: the zone/slot data model, zone resolution,
//! slot fallback and the checkout-facing delivery quote.
//!
//! Everything in here is pure. Persistence lives behind
//! [`crate::store::ZoneStore`]; handlers fetch one snapshot of zones and pass
//! it down.

pub mod quote;
pub mod resolver;
pub mod slots;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use quote::{quote_delivery, DeliveryQuote};
pub use resolver::resolve_zone;
pub use slots::{default_slots, resolve_slots};

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A named delivery time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: String,
    pub name: String,
    pub name_localized: String,
    pub time_range: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    /// Extra delivery surcharge for this window, minor currency units
    #[serde(default)]
    pub price: i64,
}

/// A geofenced delivery area with its own pricing and slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: Uuid,
    pub name: String,
    pub center: Coordinate,
    pub radius_km: f64,
    /// Minor currency units (paise)
    pub delivery_charge: i64,
    /// Minor currency units (paise)
    pub min_order_amount: i64,
    pub is_active: bool,
    pub delivery_slots: Vec<Slot>,
    pub created_at: DateTime<Utc>,
}

impl Zone {
    /// A zone whose geofence cannot contain any point.
    pub fn is_degenerate(&self) -> bool {
        !self.radius_km.is_finite() || self.radius_km <= 0.0 || !self.center.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneValidationError {
    #[error("Zone name must not be empty")]
    EmptyName,
    #[error("Radius must be a positive number of kilometers, got {0}")]
    InvalidRadius(f64),
    #[error("Delivery charge must not be negative, got {0}")]
    NegativeDeliveryCharge(i64),
    #[error("Minimum order amount must not be negative, got {0}")]
    NegativeMinOrderAmount(i64),
    #[error("Center ({latitude}, {longitude}) is not a valid coordinate")]
    InvalidCenter { latitude: f64, longitude: f64 },
    #[error("Slot {0} has an empty id")]
    EmptySlotId(usize),
    #[error("Slot id '{0}' appears more than once")]
    DuplicateSlotId(String),
    #[error("Slot '{0}' has a negative price")]
    NegativeSlotPrice(String),
}

/// Zone attributes as accepted at the store boundary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewZone {
    pub name: String,
    pub center: Coordinate,
    pub radius_km: f64,
    #[serde(default)]
    pub delivery_charge: i64,
    #[serde(default)]
    pub min_order_amount: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub delivery_slots: Vec<Slot>,
}

fn default_active() -> bool {
    true
}

impl NewZone {
    pub fn validate(&self) -> Result<(), ZoneValidationError> {
        if self.name.trim().is_empty() {
            return Err(ZoneValidationError::EmptyName);
        }
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(ZoneValidationError::InvalidRadius(self.radius_km));
        }
        if self.delivery_charge < 0 {
            return Err(ZoneValidationError::NegativeDeliveryCharge(
                self.delivery_charge,
            ));
        }
        if self.min_order_amount < 0 {
            return Err(ZoneValidationError::NegativeMinOrderAmount(
                self.min_order_amount,
            ));
        }
        if !self.center.is_finite() || !self.center.is_in_range() {
            return Err(ZoneValidationError::InvalidCenter {
                latitude: self.center.latitude,
                longitude: self.center.longitude,
            });
        }

        let mut seen = HashSet::new();
        for (index, slot) in self.delivery_slots.iter().enumerate() {
            if slot.id.trim().is_empty() {
                return Err(ZoneValidationError::EmptySlotId(index));
            }
            if !seen.insert(slot.id.as_str()) {
                return Err(ZoneValidationError::DuplicateSlotId(slot.id.clone()));
            }
            if slot.price < 0 {
                return Err(ZoneValidationError::NegativeSlotPrice(slot.id.clone()));
            }
        }

        Ok(())
    }
}

/// Partial update of a zone. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneChanges {
    pub name: Option<String>,
    pub center: Option<Coordinate>,
    pub radius_km: Option<f64>,
    pub delivery_charge: Option<i64>,
    pub min_order_amount: Option<i64>,
    pub is_active: Option<bool>,
    pub delivery_slots: Option<Vec<Slot>>,
}

impl ZoneChanges {
    /// Merge onto an existing zone, producing the attributes to validate and store.
    pub fn apply_to(self, zone: &Zone) -> NewZone {
        NewZone {
            name: self.name.unwrap_or_else(|| zone.name.clone()),
            center: self.center.unwrap_or(zone.center),
            radius_km: self.radius_km.unwrap_or(zone.radius_km),
            delivery_charge: self.delivery_charge.unwrap_or(zone.delivery_charge),
            min_order_amount: self.min_order_amount.unwrap_or(zone.min_order_amount),
            is_active: self.is_active.unwrap_or(zone.is_active),
            delivery_slots: self
                .delivery_slots
                .unwrap_or_else(|| zone.delivery_slots.clone()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn valid() -> NewZone {
        NewZone {
            name: "Adyar".to_string(),
            center: CHENNAI,
            radius_km: 5.0,
            delivery_charge: 0,
            min_order_amount: 30000,
            is_active: true,
            delivery_slots: vec![slot("sunrise", 0), slot("evening", 1000)],
        }
    }

    #[test]
    fn test_valid_zone_passes() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let zone = NewZone {
                radius_km: radius,
                ..valid()
            };
            assert!(matches!(
                zone.validate(),
                Err(ZoneValidationError::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn test_rejects_negative_money() {
        let zone = NewZone {
            delivery_charge: -1,
            ..valid()
        };
        assert_eq!(
            zone.validate(),
            Err(ZoneValidationError::NegativeDeliveryCharge(-1))
        );

        let zone = NewZone {
            min_order_amount: -500,
            ..valid()
        };
        assert_eq!(
            zone.validate(),
            Err(ZoneValidationError::NegativeMinOrderAmount(-500))
        );
    }

    #[test]
    fn test_rejects_out_of_range_center() {
        let zone = NewZone {
            center: Coordinate::new(91.0, 80.0),
            ..valid()
        };
        assert!(matches!(
            zone.validate(),
            Err(ZoneValidationError::InvalidCenter { .. })
        ));
    }

    #[test]
    fn test_rejects_blank_name_and_duplicate_slots() {
        let zone = NewZone {
            name: "   ".to_string(),
            ..valid()
        };
        assert_eq!(zone.validate(), Err(ZoneValidationError::EmptyName));

        let zone = NewZone {
            delivery_slots: vec![slot("morning", 0), slot("morning", 500)],
            ..valid()
        };
        assert_eq!(
            zone.validate(),
            Err(ZoneValidationError::DuplicateSlotId("morning".to_string()))
        );
    }

    #[test]
    fn test_changes_keep_unset_fields() {
        let existing = zone("Adyar", CHENNAI, 5.0, 1500);
        let merged = ZoneChanges {
            radius_km: Some(7.5),
            is_active: Some(false),
            ..Default::default()
        }
        .apply_to(&existing);

        assert_eq!(merged.name, "Adyar");
        assert_eq!(merged.radius_km, 7.5);
        assert_eq!(merged.delivery_charge, 1500);
        assert!(!merged.is_active);
    }

    #[test]
    fn test_slot_json_uses_camel_case() {
        let json = serde_json::to_value(slot("sunrise", 2000)).unwrap();
        assert_eq!(json["nameLocalized"], "sunrise");
        assert_eq!(json["timeRange"], "9:00 AM - 10:00 AM");
        assert_eq!(json["price"], 2000);
    }
}
