use super::{Slot, Zone};

/// Built-in delivery windows offered when a zone has none of its own,
/// or before any zone is known.
pub fn default_slots() -> Vec<Slot> {
    vec![
        Slot {
            id: "sunrise".to_string(),
            name: "Sunrise".to_string(),
            name_localized: "அதிகாலை".to_string(),
            time_range: "6:00 AM - 8:00 AM".to_string(),
            icon: "🌅".to_string(),
            description: "Early doorstep delivery before the day starts".to_string(),
            price: 2000,
        },
        Slot {
            id: "morning".to_string(),
            name: "Morning".to_string(),
            name_localized: "காலை".to_string(),
            time_range: "8:00 AM - 12:00 PM".to_string(),
            icon: "☀️".to_string(),
            description: "Standard morning delivery".to_string(),
            price: 0,
        },
        Slot {
            id: "evening".to_string(),
            name: "Evening".to_string(),
            name_localized: "மாலை".to_string(),
            time_range: "4:00 PM - 7:00 PM".to_string(),
            icon: "🌆".to_string(),
            description: "Delivered in time for dinner".to_string(),
            price: 1000,
        },
    ]
}

/// The zone's own slots when it has any, the default table otherwise.
pub fn resolve_slots(zone: Option<&Zone>) -> Vec<Slot> {
    match zone {
        Some(zone) if !zone.delivery_slots.is_empty() => zone.delivery_slots.clone(),
        _ => default_slots(),
    }
}
