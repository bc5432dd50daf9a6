use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ZoneStore;
use crate::error::{AppError, AppResult};
use crate::zones::{NewZone, Zone, ZoneChanges};

/// Process-local zone store. Used by tests and for running without Postgres.
#[derive(Debug, Default)]
pub struct MemoryZoneStore {
    zones: RwLock<Vec<Zone>>,
}

impl MemoryZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with already-built zones. Bypasses validation so tests can load
    /// misconfigured records.
    pub fn with_zones(zones: Vec<Zone>) -> Self {
        Self {
            zones: RwLock::new(zones),
        }
    }
}

fn sorted(mut zones: Vec<Zone>) -> Vec<Zone> {
    zones.sort_by(|a, b| a.radius_km.total_cmp(&b.radius_km));
    zones
}

fn build(id: Uuid, zone: NewZone, created_at: chrono::DateTime<Utc>) -> Zone {
    Zone {
        id,
        name: zone.name,
        center: zone.center,
        radius_km: zone.radius_km,
        delivery_charge: zone.delivery_charge,
        min_order_amount: zone.min_order_amount,
        is_active: zone.is_active,
        delivery_slots: zone.delivery_slots,
        created_at,
    }
}

#[async_trait]
impl ZoneStore for MemoryZoneStore {
    async fn list_active_zones(&self) -> AppResult<Vec<Zone>> {
        let zones = self.zones.read().await;
        Ok(sorted(zones.iter().filter(|z| z.is_active).cloned().collect()))
    }

    async fn list_zones(&self) -> AppResult<Vec<Zone>> {
        Ok(sorted(self.zones.read().await.clone()))
    }

    async fn find_zone(&self, id: Uuid) -> AppResult<Option<Zone>> {
        let zones = self.zones.read().await;
        Ok(zones.iter().find(|z| z.id == id).cloned())
    }

    async fn create_zone(&self, zone: NewZone) -> AppResult<Zone> {
        zone.validate()?;
        let created = build(Uuid::new_v4(), zone, Utc::now());
        self.zones.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_zone(&self, id: Uuid, changes: ZoneChanges) -> AppResult<Zone> {
        let mut zones = self.zones.write().await;
        let existing = zones
            .iter_mut()
            .find(|z| z.id == id)
            .ok_or_else(|| AppError::NotFound("Zone not found".to_string()))?;

        let merged = changes.apply_to(existing);
        merged.validate()?;
        *existing = build(id, merged, existing.created_at);
        Ok(existing.clone())
    }

    async fn delete_zone(&self, id: Uuid) -> AppResult<()> {
        let mut zones = self.zones.write().await;
        let before = zones.len();
        zones.retain(|z| z.id != id);

        if zones.len() == before {
            return Err(AppError::NotFound("Zone not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::test_support::CHENNAI;

    fn new_zone(name: &str, radius_km: f64) -> NewZone {
        NewZone {
            name: name.to_string(),
            center: CHENNAI,
            radius_km,
            delivery_charge: 0,
            min_order_amount: 0,
            is_active: true,
            delivery_slots: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_active_listing_is_sorted_and_filtered() {
        let store = MemoryZoneStore::new();
        store.create_zone(new_zone("Wide", 20.0)).await.unwrap();
        store.create_zone(new_zone("Tight", 4.0)).await.unwrap();
        let hidden = store.create_zone(new_zone("Hidden", 1.0)).await.unwrap();
        store
            .update_zone(
                hidden.id,
                ZoneChanges {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let active: Vec<String> = store
            .list_active_zones()
            .await
            .unwrap()
            .into_iter()
            .map(|z| z.name)
            .collect();
        assert_eq!(active, ["Tight", "Wide"]);
        assert_eq!(store.list_zones().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_zone() {
        let store = MemoryZoneStore::new();
        let err = store.create_zone(new_zone("Zero", 0.0)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidZone(_)));
        assert!(store.list_zones().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_zone_untouched() {
        let store = MemoryZoneStore::new();
        let zone = store.create_zone(new_zone("Adyar", 5.0)).await.unwrap();

        let err = store
            .update_zone(
                zone.id,
                ZoneChanges {
                    delivery_charge: Some(-10),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidZone(_)));
        assert_eq!(store.find_zone(zone.id).await.unwrap(), Some(zone));
    }

    #[tokio::test]
    async fn test_delete_unknown_zone_is_not_found() {
        let store = MemoryZoneStore::new();
        let err = store.delete_zone(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
