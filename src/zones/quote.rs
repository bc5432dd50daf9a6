use serde::Serialize;

use super::{Slot, Zone};

/// What checkout needs to know about delivering an order into a zone.
/// All amounts are minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryQuote {
    pub delivery_charge: i64,
    pub slot_surcharge: i64,
    pub total_delivery_fee: i64,
    pub min_order_amount: i64,
    pub meets_minimum: bool,
    /// How much more the order needs to reach the zone minimum
    pub shortfall: i64,
}

pub fn quote_delivery(zone: &Zone, order_subtotal: i64, slot: Option<&Slot>) -> DeliveryQuote {
    let slot_surcharge = slot.map(|s| s.price.max(0)).unwrap_or(0);
    let shortfall = (zone.min_order_amount - order_subtotal).max(0);

    DeliveryQuote {
        delivery_charge: zone.delivery_charge,
        slot_surcharge,
        total_delivery_fee: zone.delivery_charge.saturating_add(slot_surcharge),
        min_order_amount: zone.min_order_amount,
        meets_minimum: shortfall == 0,
        shortfall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::test_support::{slot, zone, CHENNAI};

    fn zone_b() -> Zone {
        let mut z = zone("Zone B", CHENNAI, 10.0, 3000);
        z.min_order_amount = 40000;
        z
    }

    #[test]
    fn test_order_below_minimum() {
        let quote = quote_delivery(&zone_b(), 25000, None);
        assert!(!quote.meets_minimum);
        assert_eq!(quote.shortfall, 15000);
        assert_eq!(quote.total_delivery_fee, 3000);
    }

    #[test]
    fn test_exact_minimum_is_enough() {
        let quote = quote_delivery(&zone_b(), 40000, None);
        assert!(quote.meets_minimum);
        assert_eq!(quote.shortfall, 0);
    }

    #[test]
    fn test_slot_surcharge_is_added() {
        let sunrise = slot("sunrise", 2000);
        let quote = quote_delivery(&zone_b(), 90000, Some(&sunrise));
        assert_eq!(quote.delivery_charge, 3000);
        assert_eq!(quote.slot_surcharge, 2000);
        assert_eq!(quote.total_delivery_fee, 5000);
    }
}
