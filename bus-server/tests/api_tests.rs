//! End-to-end tests for the HTTP API.
//!
//! The router runs in-process; the arrivals page and the static map
//! service are mocked with wiremock.

use std::io::Cursor;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, RgbaImage};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bus_server::domain::{Coordinate, Line, Stop};
use bus_server::staticmap::{SnapshotBuilder, SnapshotConfig};
use bus_server::store::{Dataset, MemoryStore, StopStore};
use bus_server::vitrasa::{ScheduleClient, ScheduleClientConfig};
use bus_server::web::{AppState, create_router};

/// Meters per degree of latitude for a 6,371 km Earth.
const METERS_PER_DEG_LAT: f64 = 111_194.926_644_558_73;

/// A stop `meters` due north of (42.0, -8.7).
fn stop_north(number: u32, name: &str, meters: f64) -> Stop {
    Stop {
        id: i64::from(number),
        stop_number: number,
        stop_id: number + 1000,
        name: name.to_string(),
        location: Coordinate::new(42.0 + meters / METERS_PER_DEG_LAT, -8.7).unwrap(),
    }
}

fn store() -> Arc<dyn StopStore> {
    Arc::new(
        MemoryStore::new(Dataset {
            lines: vec![
                Line {
                    id: 1,
                    name: "L1".to_string(),
                },
                Line {
                    id: 2,
                    name: "C3".to_string(),
                },
            ],
            stops: vec![
                stop_north(100, "Rúa do Príncipe", 100.0),
                stop_north(600, "Praza de Compostela", 600.0),
                stop_north(499, "Rúa Urzaiz", 499.0),
            ],
        })
        .unwrap(),
    )
}

fn app(server: &MockServer) -> Router {
    let store = store();
    let schedules = ScheduleClient::new(
        ScheduleClientConfig::new()
            .with_endpoint(format!("{}/Default.aspx", server.uri()))
            .with_timeout(5),
        Arc::clone(&store),
    )
    .unwrap();
    let snapshots = SnapshotBuilder::new(
        SnapshotConfig::new("test-key")
            .with_base_url(format!("{}/staticmap", server.uri()))
            .with_timeout(5),
    )
    .unwrap();

    create_router(AppState::new(store, schedules, snapshots))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn stop_numbers(json: &Value) -> Vec<u64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|s| s["stop_number"].as_u64().unwrap())
        .collect()
}

fn arrivals_page(rows: &[[&str; 3]]) -> String {
    let rows: String = rows
        .iter()
        .map(|[line, route, time]| {
            format!("<tr><td><font>{line}</font></td><td><font>{route}</font></td><td><font>{time}</font></td></tr>")
        })
        .collect();
    format!(
        "<html><body><table id=\"GridView1\"><tr><th>Línea</th><th>Ruta</th><th>Minutos</th></tr>{rows}</table></body></html>"
    )
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let response = app(&server)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_stops_and_lines() {
    let server = MockServer::start().await;

    let (status, json) = get(app(&server), "/api/stops").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stop_numbers(&json), vec![100, 600, 499]);

    let (status, json) = get(app(&server), "/api/lines").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["name"], "L1");
}

#[tokio::test]
async fn test_get_stop() {
    let server = MockServer::start().await;

    let (status, json) = get(app(&server), "/api/stops/499").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Rúa Urzaiz");
    assert_eq!(json["stop_id"], 1499);

    let (status, json) = get(app(&server), "/api/stops/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Stop 1 not found");
}

#[tokio::test]
async fn test_non_numeric_stop_number_is_json_bad_request() {
    let server = MockServer::start().await;

    for uri in ["/api/stops/abc", "/api/stops/abc/schedule", "/api/stops/-4"] {
        let (status, json) = get(app(&server), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"], "Invalid stop number", "{uri}");
    }
}

#[tokio::test]
async fn test_find_stops_by_text() {
    let server = MockServer::start().await;

    let (status, json) = get(app(&server), "/api/stops/find?text=r%C3%BAa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stop_numbers(&json), vec![100, 499]);

    let (status, _) = get(app(&server), "/api/stops/find").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(app(&server), "/api/stops/find?text=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_find_stops_by_location() {
    let server = MockServer::start().await;

    let (status, json) = get(app(&server), "/api/stops/find/location?lat=42.0&lon=-8.7&radius=500").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stop_numbers(&json), vec![100, 499]);
}

#[tokio::test]
async fn test_find_stops_by_location_rejects_bad_input() {
    let server = MockServer::start().await;

    for uri in [
        "/api/stops/find/location?lat=42.0&lon=-8.7",
        "/api/stops/find/location?lat=abc&lon=-8.7&radius=500",
        "/api/stops/find/location?lat=142.0&lon=-8.7&radius=500",
        "/api/stops/find/location?lat=42.0&lon=-8.7&radius=-1",
    ] {
        let (status, json) = get(app(&server), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(json["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_stop_schedule() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Default.aspx"))
        .and(query_param("parada", "499"))
        .respond_with(ResponseTemplate::new(200).set_body_string(arrivals_page(&[
            ["C3", "Bouzas", "2"],
            ["L1", "Centro", "7"],
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, json) = get(app(&server), "/api/stops/499/schedule").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stop"]["stop_number"], 499);

    let schedules = json["schedules"].as_array().unwrap();
    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[0]["line"]["name"], "C3");
    assert_eq!(schedules[0]["route"], "Bouzas");
    assert_eq!(schedules[0]["time"], 2);
    assert_eq!(schedules[1]["line"]["id"], 1);
}

#[tokio::test]
async fn test_stop_schedule_unknown_stop_skips_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, _) = get(app(&server), "/api/stops/1/schedule").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stop_schedule_layout_change_is_bad_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Default.aspx"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Mantenimiento</body></html>"))
        .mount(&server)
        .await;

    let (status, json) = get(app(&server), "/api/stops/499/schedule").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "failed to extract schedule: table not found");
}

#[tokio::test]
async fn test_nearby_stops_image() {
    let server = MockServer::start().await;

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::new(600, 400))
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/staticmap"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png))
        .expect(1)
        .mount(&server)
        .await;

    let (status, json) = get(
        app(&server),
        "/api/stops/find/location/image?lat=42.0&lon=-8.7&radius=1000&limit=2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Closest first, truncated to the limit
    assert_eq!(stop_numbers(&json["stops"]), vec![100, 499]);
    assert_eq!(json["radius"], 1000.0);
    assert_eq!(json["origin"]["lat"], 42.0);

    let bytes = STANDARD.decode(json["image"].as_str().unwrap()).unwrap();
    let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
    assert_eq!((image.width(), image.height()), (600, 400));
}

#[tokio::test]
async fn test_nearby_stops_image_map_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/staticmap"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, json) = get(
        app(&server),
        "/api/stops/find/location/image?lat=42.0&lon=-8.7&radius=1000",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json.get("image").is_none());
}
