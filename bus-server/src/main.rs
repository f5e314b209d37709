use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bus_server::staticmap::{SnapshotBuilder, SnapshotConfig};
use bus_server::store::{MemoryStore, StopStore};
use bus_server::vitrasa::{ScheduleClient, ScheduleClientConfig};
use bus_server::web::{AppState, create_router};

/// Default request timeout for outbound HTTP calls, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()
        .expect("BIND_ADDR must be a socket address");

    let stops_path = std::env::var("STOPS_DATA_PATH").unwrap_or_else(|_| "stops.json".to_string());

    let api_key = std::env::var("GOOGLE_MAPS_API_KEY").unwrap_or_else(|_| {
        warn!("GOOGLE_MAPS_API_KEY not set. Nearby-stops images will fail.");
        String::new()
    });

    let timeout_secs = match std::env::var("HTTP_TIMEOUT_SECS") {
        Ok(v) => v.parse().expect("HTTP_TIMEOUT_SECS must be a whole number of seconds"),
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    // Load stops and lines (fail fast if unavailable)
    let store: Arc<dyn StopStore> =
        Arc::new(MemoryStore::load(&stops_path).expect("Failed to load stop dataset"));

    let mut schedule_config = ScheduleClientConfig::new().with_timeout(timeout_secs);
    if let Ok(endpoint) = std::env::var("VITRASA_ENDPOINT") {
        schedule_config = schedule_config.with_endpoint(endpoint);
    }
    let schedules = ScheduleClient::new(schedule_config, Arc::clone(&store))
        .expect("Failed to create arrivals client");

    let snapshots = SnapshotBuilder::new(SnapshotConfig::new(api_key).with_timeout(timeout_secs))
        .expect("Failed to create static map client");

    let state = AppState::new(store, schedules, snapshots);
    let app = create_router(state);

    info!(%addr, "bus server listening");
    info!("API endpoints:");
    info!("  GET  /health");
    info!("  GET  /api/stops");
    info!("  GET  /api/stops/find?text=");
    info!("  GET  /api/stops/find/location?lat=&lon=&radius=");
    info!("  GET  /api/stops/find/location/image?lat=&lon=&radius=&limit=");
    info!("  GET  /api/stops/{{stop_number}}");
    info!("  GET  /api/stops/{{stop_number}}/schedule");
    info!("  GET  /api/lines");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
