use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::ZoneStore;
use crate::entities::zone;
use crate::error::{AppError, AppResult};
use crate::zones::{Coordinate, NewZone, Slot, Zone, ZoneChanges};

/// Zones persisted in Postgres through sea-orm.
#[derive(Clone)]
pub struct SeaOrmZoneStore {
    db: DatabaseConnection,
}

impl SeaOrmZoneStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<zone::Model> for Zone {
    fn from(model: zone::Model) -> Self {
        // A corrupt slot column falls back to the default table instead of
        // failing every lookup that touches this zone
        let delivery_slots: Vec<Slot> = serde_json::from_value(model.delivery_slots)
            .unwrap_or_else(|e| {
                tracing::warn!(zone_id = %model.id, error = %e, "Ignoring unreadable delivery slots");
                Vec::new()
            });

        Zone {
            id: model.id,
            name: model.name,
            center: Coordinate::new(model.center_lat, model.center_lng),
            radius_km: model.radius_km,
            delivery_charge: model.delivery_charge,
            min_order_amount: model.min_order_amount,
            is_active: model.is_active,
            delivery_slots,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

fn slots_json(slots: &[Slot]) -> AppResult<serde_json::Value> {
    serde_json::to_value(slots)
        .map_err(|e| AppError::Internal(format!("Failed to encode delivery slots: {}", e)))
}

fn fill(active: &mut zone::ActiveModel, zone: NewZone) -> AppResult<()> {
    active.delivery_slots = Set(slots_json(&zone.delivery_slots)?);
    active.name = Set(zone.name);
    active.center_lat = Set(zone.center.latitude);
    active.center_lng = Set(zone.center.longitude);
    active.radius_km = Set(zone.radius_km);
    active.delivery_charge = Set(zone.delivery_charge);
    active.min_order_amount = Set(zone.min_order_amount);
    active.is_active = Set(zone.is_active);
    Ok(())
}

#[async_trait]
impl ZoneStore for SeaOrmZoneStore {
    async fn list_active_zones(&self) -> AppResult<Vec<Zone>> {
        let zones = zone::Entity::find()
            .filter(zone::Column::IsActive.eq(true))
            .order_by_asc(zone::Column::RadiusKm)
            .order_by_asc(zone::Column::CreatedAt)
            .order_by_asc(zone::Column::Id)
            .all(&self.db)
            .await?;

        Ok(zones.into_iter().map(Zone::from).collect())
    }

    async fn list_zones(&self) -> AppResult<Vec<Zone>> {
        let zones = zone::Entity::find()
            .order_by_asc(zone::Column::RadiusKm)
            .order_by_asc(zone::Column::Name)
            .all(&self.db)
            .await?;

        Ok(zones.into_iter().map(Zone::from).collect())
    }

    async fn find_zone(&self, id: Uuid) -> AppResult<Option<Zone>> {
        let zone = zone::Entity::find_by_id(id).one(&self.db).await?;
        Ok(zone.map(Zone::from))
    }

    async fn create_zone(&self, new_zone: NewZone) -> AppResult<Zone> {
        new_zone.validate()?;

        let mut active = zone::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        fill(&mut active, new_zone)?;

        let model = active.insert(&self.db).await?;
        tracing::info!(zone_id = %model.id, zone = %model.name, "Zone created");
        Ok(model.into())
    }

    async fn update_zone(&self, id: Uuid, changes: ZoneChanges) -> AppResult<Zone> {
        let model = zone::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Zone not found".to_string()))?;

        let current = Zone::from(model.clone());
        let merged = changes.apply_to(&current);
        merged.validate()?;

        let mut active: zone::ActiveModel = model.into();
        fill(&mut active, merged)?;

        let model = active.update(&self.db).await?;
        tracing::info!(zone_id = %model.id, active = model.is_active, "Zone updated");
        Ok(model.into())
    }

    async fn delete_zone(&self, id: Uuid) -> AppResult<()> {
        let result = zone::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Zone not found".to_string()));
        }

        tracing::info!(zone_id = %id, "Zone deleted");
        Ok(())
    }
}
