use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use delivery_zone_backend::{
    config::Config,
    db,
    routes,
    store::SeaOrmZoneStore,
    AppState, ZoneStore,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delivery_zone_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!("Starting server at {}", config.server_addr());

    // Connect to database
    let db = db::connect(&config)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database");

    // Run migrations
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Migrations complete");

    let store = SeaOrmZoneStore::new(db);
    report_zones(&store).await;

    // Create app state
    let state = AppState {
        zones: Arc::new(store),
        config: config.clone(),
    };

    // Create router with middleware
    let app = routes::with_edge_layers(routes::create_router(state));

    // Start server with socket address for rate limiting
    let addr: SocketAddr = config.server_addr().parse().expect("Invalid address");
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}

/// Log the active zone set at startup and flag records the resolver will skip
async fn report_zones(store: &SeaOrmZoneStore) {
    match store.list_active_zones().await {
        Ok(zones) => {
            tracing::info!(active_zones = zones.len(), "Loaded delivery zones");
            for zone in zones.iter().filter(|z| z.is_degenerate()) {
                tracing::warn!(zone_id = %zone.id, zone = %zone.name, "Zone can never match a coordinate");
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to load delivery zones"),
    }
}
