//! Zone persistence behind an injected repository interface.
//!
//! Handlers take one [`ZoneStore::list_active_zones`] snapshot per request and
//! hand it to the pure resolver; nothing re-reads zones mid-resolution.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::zones::{NewZone, Zone, ZoneChanges};

pub use memory::MemoryZoneStore;
pub use postgres::SeaOrmZoneStore;

#[async_trait]
pub trait ZoneStore: Send + Sync {
    /// Active zones ordered by ascending radius.
    async fn list_active_zones(&self) -> AppResult<Vec<Zone>>;

    /// Every zone, active or not, ordered by ascending radius.
    async fn list_zones(&self) -> AppResult<Vec<Zone>>;

    async fn find_zone(&self, id: Uuid) -> AppResult<Option<Zone>>;

    /// Validates and stores a new zone.
    async fn create_zone(&self, zone: NewZone) -> AppResult<Zone>;

    /// Merges `changes` onto the stored zone and validates the result.
    async fn update_zone(&self, id: Uuid, changes: ZoneChanges) -> AppResult<Zone>;

    async fn delete_zone(&self, id: Uuid) -> AppResult<()>;
}
