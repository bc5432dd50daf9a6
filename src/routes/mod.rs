use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, zones};
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::middleware::rate_limit::{create_global_governor, log_request};
use crate::AppState;

/// Build the API router. Rate limiting and request logging need the peer
/// address and are added by [`with_edge_layers`].
pub fn create_router(state: AppState) -> Router {
    // Public routes used by the storefront and checkout
    let public_routes = Router::new()
        .route("/zones", get(zones::list_zones))
        .route("/zones/check", post(zones::check_zone))
        .route("/zones/quote", post(zones::quote))
        .route("/delivery-slots", get(zones::delivery_slots));

    // Admin routes (requires auth + admin role)
    let admin_routes = Router::new()
        .route("/zones", get(admin::list_zones).post(admin::create_zone))
        .route(
            "/zones/{id}",
            get(admin::get_zone)
                .put(admin::update_zone)
                .delete(admin::delete_zone),
        )
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api", public_routes)
        .nest("/api/admin", admin_routes)
        .with_state(state)
}

/// Tracing, CORS, per-IP rate limiting and request logging. The server must be
/// started with connect info so the peer address is available.
pub fn with_edge_layers(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(create_global_governor())
        // Outside the governor so rejected requests are logged too
        .layer(middleware::from_fn(log_request))
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        extract::ConnectInfo,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::store::MemoryZoneStore;
    use crate::Config;

    fn state() -> AppState {
        AppState {
            zones: Arc::new(MemoryZoneStore::new()),
            config: Config {
                database_url: "postgres://unused".to_string(),
                database_max_connections: 1,
                jwt_secret: "secret".to_string(),
                server_host: "127.0.0.1".to_string(),
                server_port: 0,
            },
        }
    }

    fn request_from(addr: SocketAddr) -> Request<Body> {
        let mut request = Request::builder()
            .uri("/api/delivery-slots")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        request
    }

    #[tokio::test]
    async fn test_burst_over_limit_gets_json_429() {
        let app = with_edge_layers(create_router(state()));
        let addr: SocketAddr = "203.0.113.7:40000".parse().unwrap();

        let mut limited = None;
        for _ in 0..100 {
            let response = app.clone().oneshot(request_from(addr)).await.unwrap();
            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                limited = Some(response);
                break;
            }
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = limited.expect("burst should be rate limited");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "RATE_LIMITED");
    }

    #[tokio::test]
    async fn test_other_clients_are_not_limited() {
        let app = with_edge_layers(create_router(state()));
        let noisy: SocketAddr = "203.0.113.8:40000".parse().unwrap();
        let quiet: SocketAddr = "198.51.100.4:40000".parse().unwrap();

        for _ in 0..100 {
            let _ = app.clone().oneshot(request_from(noisy)).await.unwrap();
        }

        let response = app.oneshot(request_from(quiet)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
