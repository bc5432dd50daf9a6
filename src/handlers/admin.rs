use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::utils::jwt::Claims;
use crate::zones::{NewZone, Zone, ZoneChanges};
use crate::AppState;

// ============ Zone Management ============

/// List all zones including inactive ones (admin)
pub async fn list_zones(State(state): State<AppState>) -> AppResult<Json<Vec<Zone>>> {
    let zones = state.zones.list_zones().await?;
    Ok(Json(zones))
}

/// Get a single zone (admin)
pub async fn get_zone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Zone>> {
    let zone = state
        .zones
        .find_zone(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Zone not found".to_string()))?;
    Ok(Json(zone))
}

/// Create a new zone (admin)
pub async fn create_zone(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<NewZone>,
) -> AppResult<(StatusCode, Json<Zone>)> {
    let zone = state.zones.create_zone(payload).await?;
    tracing::info!(admin = %claims.sub, zone_id = %zone.id, radius_km = zone.radius_km, "Admin created zone");
    Ok((StatusCode::CREATED, Json(zone)))
}

/// Update a zone, including activating or deactivating it (admin)
pub async fn update_zone(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<ZoneChanges>,
) -> AppResult<Json<Zone>> {
    let zone = state.zones.update_zone(id, payload).await?;
    tracing::info!(admin = %claims.sub, zone_id = %zone.id, is_active = zone.is_active, "Admin updated zone");
    Ok(Json(zone))
}

/// Delete a zone (admin)
pub async fn delete_zone(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    state.zones.delete_zone(id).await?;
    tracing::info!(admin = %claims.sub, zone_id = %id, "Admin deleted zone");
    Ok(Json(serde_json::json!({ "message": "Zone deleted" })))
}
