use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::zones::{
    quote_delivery, resolve_slots, resolve_zone, Coordinate, DeliveryQuote, Slot, Zone,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckZoneRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub id: Uuid,
    pub zone_name: String,
    pub delivery_charge: i64,
    pub min_order_amount: i64,
    pub delivery_slots: Vec<Slot>,
}

impl From<&Zone> for ZoneSummary {
    fn from(zone: &Zone) -> Self {
        Self {
            id: zone.id,
            zone_name: zone.name.clone(),
            delivery_charge: zone.delivery_charge,
            min_order_amount: zone.min_order_amount,
            delivery_slots: resolve_slots(Some(zone)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    pub id: Uuid,
    pub name: String,
    pub center: Coordinate,
    pub radius_km: f64,
    pub delivery_charge: i64,
    pub min_order_amount: i64,
    pub delivery_slots: Vec<Slot>,
}

impl From<Zone> for ZoneInfo {
    fn from(zone: Zone) -> Self {
        Self {
            id: zone.id,
            name: zone.name,
            center: zone.center,
            radius_km: zone.radius_km,
            delivery_charge: zone.delivery_charge,
            min_order_amount: zone.min_order_amount,
            delivery_slots: zone.delivery_slots,
        }
    }
}

/// Both coordinates must be present and on the globe
fn require_point(latitude: Option<f64>, longitude: Option<f64>) -> AppResult<Coordinate> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(AppError::BadRequest(
            "Latitude and longitude are required".to_string(),
        ));
    };

    let point = Coordinate::new(latitude, longitude);
    if !point.is_finite() || !point.is_in_range() {
        return Err(AppError::BadRequest(format!(
            "({}, {}) is not a valid coordinate",
            latitude, longitude
        )));
    }
    Ok(point)
}

/// Resolve a coordinate against one snapshot of the active zones
async fn locate(state: &AppState, point: Coordinate) -> AppResult<Zone> {
    let zones = state.zones.list_active_zones().await?;

    match resolve_zone(point, &zones) {
        Some(zone) => {
            tracing::debug!(
                latitude = point.latitude,
                longitude = point.longitude,
                zone_id = %zone.id,
                zone = %zone.name,
                "Coordinate resolved to zone"
            );
            Ok(zone.clone())
        }
        None => {
            tracing::info!(
                latitude = point.latitude,
                longitude = point.longitude,
                active_zones = zones.len(),
                "Coordinate outside all delivery zones"
            );
            Err(AppError::OutsideDeliveryArea)
        }
    }
}

/// Find the delivery zone for a coordinate
pub async fn check_zone(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CheckZoneRequest>,
) -> AppResult<Json<ZoneSummary>> {
    let point = require_point(payload.latitude, payload.longitude)?;
    let zone = locate(&state, point).await?;
    Ok(Json(ZoneSummary::from(&zone)))
}

/// List active zones, smallest radius first
pub async fn list_zones(State(state): State<AppState>) -> AppResult<Json<Vec<ZoneInfo>>> {
    let zones = state.zones.list_active_zones().await?;
    Ok(Json(zones.into_iter().map(ZoneInfo::from).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsQuery {
    pub zone_id: Option<Uuid>,
}

/// Delivery slots for a zone, or the default table
pub async fn delivery_slots(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SlotsQuery>,
) -> AppResult<Json<Vec<Slot>>> {
    let zone = match query.zone_id {
        Some(id) => state.zones.find_zone(id).await?.filter(|z| z.is_active),
        None => None,
    };

    if query.zone_id.is_some() && zone.is_none() {
        tracing::debug!(zone_id = ?query.zone_id, "Unknown or inactive zone, serving default slots");
    }

    Ok(Json(resolve_slots(zone.as_ref())))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub subtotal: i64,
    pub slot_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub zone_id: Uuid,
    pub zone_name: String,
    pub slot_id: Option<String>,
    #[serde(flatten)]
    pub quote: DeliveryQuote,
}

/// Delivery charge and minimum-order check for a prospective order
pub async fn quote(
    State(state): State<AppState>,
    AppJson(payload): AppJson<QuoteRequest>,
) -> AppResult<Json<QuoteResponse>> {
    let point = require_point(payload.latitude, payload.longitude)?;
    if payload.subtotal < 0 {
        return Err(AppError::BadRequest("Subtotal must not be negative".to_string()));
    }

    let zone = locate(&state, point).await?;
    let slots = resolve_slots(Some(&zone));

    let slot = match payload.slot_id.as_deref() {
        Some(slot_id) => Some(slots.iter().find(|s| s.id == slot_id).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Slot '{}' is not offered in {}",
                slot_id, zone.name
            ))
        })?),
        None => None,
    };

    let quote = quote_delivery(&zone, payload.subtotal, slot);

    Ok(Json(QuoteResponse {
        zone_id: zone.id,
        zone_name: zone.name.clone(),
        slot_id: slot.map(|s| s.id.clone()),
        quote,
    }))
}
