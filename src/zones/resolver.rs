use super::{Coordinate, Zone};
use crate::utils::geo::{haversine_distance, is_within_radius};

/// Pick the most specific active zone whose geofence contains `point`.
///
/// Active zones are tried from the smallest radius upward and the first one
/// whose own center lies within its radius of the point wins, so a small
/// downtown zone takes precedence over a metro zone wrapped around it. The
/// boundary is inclusive. Zones with equal radii keep their input order.
///
/// Zones with a non-positive radius or a non-finite center never match; they
/// are skipped rather than failing the whole lookup.
pub fn resolve_zone(point: Coordinate, zones: &[Zone]) -> Option<&Zone> {
    let mut candidates: Vec<&Zone> = zones
        .iter()
        .filter(|z| z.is_active)
        .filter(|z| {
            if z.is_degenerate() {
                tracing::warn!(
                    zone_id = %z.id,
                    zone = %z.name,
                    radius_km = z.radius_km,
                    "Skipping zone with degenerate geofence"
                );
                return false;
            }
            true
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }

    candidates.sort_by(|a, b| a.radius_km.total_cmp(&b.radius_km));

    candidates.into_iter().find(|zone| {
        tracing::trace!(
            zone = %zone.name,
            distance_km = haversine_distance(point, zone.center),
            radius_km = zone.radius_km,
            "Zone distance"
        );
        is_within_radius(point, zone.center, zone.radius_km)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::test_support::{zone, CHENNAI};

    /// A point `km` kilometers due north of `origin`.
    fn north_of(origin: Coordinate, km: f64) -> Coordinate {
        let degrees = (km / crate::utils::geo::EARTH_RADIUS_KM).to_degrees();
        Coordinate::new(origin.latitude + degrees, origin.longitude)
    }

    fn chennai_zones() -> Vec<Zone> {
        // Deliberately unsorted
        vec![
            zone("Zone D", CHENNAI, 25.0, 8000),
            zone("Zone B", CHENNAI, 10.0, 3000),
            zone("Zone A", CHENNAI, 5.0, 0),
            zone("Zone C", CHENNAI, 15.0, 5000),
        ]
    }

    #[test]
    fn test_center_resolves_to_smallest_zone() {
        let zones = chennai_zones();
        let found = resolve_zone(CHENNAI, &zones).unwrap();
        assert_eq!(found.name, "Zone A");
        assert_eq!(found.delivery_charge, 0);
    }

    #[test]
    fn test_seven_km_resolves_to_zone_b() {
        let zones = chennai_zones();
        let found = resolve_zone(north_of(CHENNAI, 7.0), &zones).unwrap();
        assert_eq!(found.name, "Zone B");
        assert_eq!(found.delivery_charge, 3000);
    }

    #[test]
    fn test_forty_km_is_outside_everything() {
        let zones = chennai_zones();
        assert!(resolve_zone(north_of(CHENNAI, 40.0), &zones).is_none());
    }

    #[test]
    fn test_nested_zones_prefer_smaller_radius() {
        let zones = vec![
            zone("Metro", CHENNAI, 10.0, 3000),
            zone("Downtown", CHENNAI, 5.0, 0),
        ];
        let found = resolve_zone(north_of(CHENNAI, 3.0), &zones).unwrap();
        assert_eq!(found.name, "Downtown");
    }

    #[test]
    fn test_boundary_point_is_inside() {
        let point = north_of(CHENNAI, 5.0);
        let exact = haversine_distance(point, CHENNAI);
        let zones = vec![zone("Edge", CHENNAI, exact, 0)];
        assert_eq!(resolve_zone(point, &zones).unwrap().name, "Edge");
    }

    #[test]
    fn test_inactive_zone_is_never_returned() {
        let mut inactive = zone("Closed", CHENNAI, 5.0, 0);
        inactive.is_active = false;
        let zones = vec![inactive, zone("Open", CHENNAI, 20.0, 4000)];

        assert_eq!(resolve_zone(CHENNAI, &zones).unwrap().name, "Open");
        assert!(resolve_zone(CHENNAI, &zones[..1]).is_none());
    }

    #[test]
    fn test_empty_list_is_no_match() {
        assert!(resolve_zone(CHENNAI, &[]).is_none());
    }

    #[test]
    fn test_each_zone_uses_its_own_center() {
        let velachery = Coordinate::new(12.9815, 80.2180);
        // The small zone sits around Velachery; the big one around central Chennai.
        // A point at the Chennai center is ~12.6 km from Velachery, outside the
        // small zone even though it is well within 5 km of the big zone's center.
        let zones = vec![
            zone("Velachery", velachery, 5.0, 1000),
            zone("Chennai Metro", CHENNAI, 20.0, 4000),
        ];

        assert_eq!(resolve_zone(CHENNAI, &zones).unwrap().name, "Chennai Metro");
        assert_eq!(resolve_zone(velachery, &zones).unwrap().name, "Velachery");
    }

    #[test]
    fn test_degenerate_zone_is_skipped() {
        let zones = vec![
            zone("Broken", CHENNAI, 0.0, 0),
            zone("Negative", CHENNAI, -3.0, 0),
            zone("NoCenter", Coordinate::new(f64::NAN, 80.0), 5.0, 0),
            zone("Working", CHENNAI, 8.0, 2500),
        ];
        assert_eq!(resolve_zone(CHENNAI, &zones).unwrap().name, "Working");
    }

    #[test]
    fn test_zero_radius_zone_at_point_does_not_match() {
        // Distance 0 <= radius 0 would match without the geofence guard
        let zones = vec![zone("Pin", CHENNAI, 0.0, 0)];
        assert!(resolve_zone(CHENNAI, &zones).is_none());
    }

    #[test]
    fn test_just_outside_boundary_is_no_match() {
        let point = north_of(CHENNAI, 5.0);
        let exact = haversine_distance(point, CHENNAI);
        let zones = vec![zone("Edge", CHENNAI, exact * 0.999_999, 0)];
        assert!(resolve_zone(point, &zones).is_none());
    }

    #[test]
    fn test_equal_radii_keep_input_order() {
        let zones = vec![
            zone("First", CHENNAI, 5.0, 100),
            zone("Second", CHENNAI, 5.0, 200),
        ];
        for _ in 0..5 {
            assert_eq!(resolve_zone(CHENNAI, &zones).unwrap().name, "First");
        }
    }
}
