// Integration tests for the next-stop service

use actix_web::{http::StatusCode, test as actix_test, web, App};
use chrono::{FixedOffset, TimeZone, Utc};
use next_stop::core::{rank_stops, select_best_stop};
use next_stop::models::{GeoPoint, TimeContext};
use next_stop::routes::{configure_routes, handle_json_payload_error, AppState};
use next_stop::services::Catalog;
use serde_json::{json, Value};

fn app_state() -> AppState {
    AppState {
        catalog: Catalog::sample(),
        default_offset: FixedOffset::east_opt(0).unwrap(),
    }
}

macro_rules! init_app {
    () => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .configure(configure_routes),
        )
        .await
    };
}

#[test]
fn test_integration_end_to_end_selection() {
    let catalog = Catalog::sample();
    // Driver standing on Stop A, Monday 09:00
    let driver = GeoPoint::new(12.9716, 77.5946);
    let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

    let best = select_best_stop(&catalog, driver, &ts).unwrap();

    // Stop F: mid demand (0.5), lowest supply (1.0), far away (~0.0)
    assert_eq!(best.id, 6);
    assert_eq!(best.name, "Stop F");
}

#[test]
fn test_selection_is_idempotent() {
    let catalog = Catalog::sample();
    let driver = GeoPoint::new(12.95, 77.62);
    let ts = Utc.with_ymd_and_hms(2024, 1, 20, 18, 30, 0).unwrap();

    let first = select_best_stop(&catalog, driver, &ts).unwrap().id;
    let second = select_best_stop(&catalog, driver, &ts).unwrap().id;
    assert_eq!(first, second);
}

#[test]
fn test_standing_on_a_strong_stop_selects_it() {
    let catalog = Catalog::sample();
    let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

    let at_stop_d = select_best_stop(&catalog, GeoPoint::new(12.9784, 77.6408), &ts).unwrap();
    let at_stop_i = select_best_stop(&catalog, GeoPoint::new(12.9568, 77.7011), &ts).unwrap();

    assert_eq!(at_stop_d.id, 4);
    assert_eq!(at_stop_i.id, 9);
}

#[test]
fn test_ranking_head_matches_selection() {
    let catalog = Catalog::sample();
    let driver = GeoPoint::new(12.9716, 77.5946);
    let ranking = rank_stops(&catalog, driver, &TimeContext::new(false, 9));

    assert_eq!(ranking.len(), 10);
    assert_eq!(ranking[0].stop.id, 6);
    // Stop F sits ~8 km away, so its proximity is small but not zero
    assert_eq!(ranking[0].breakdown.demand, 0.5);
    assert_eq!(ranking[0].breakdown.scarcity, 1.0);
    assert!(ranking[0].breakdown.proximity > 0.0 && ranking[0].breakdown.proximity < 1e-4);
    assert!((ranking[0].score() - 1.500_012_624_580_416_2).abs() < 1e-9);
    // Stop A is co-located with the driver
    assert_eq!(ranking[1].stop.id, 1);
    assert_eq!(ranking[1].breakdown.proximity, 1.0);
}

#[actix_web::test]
async fn test_next_stop_endpoint() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/next-stop")
        .set_json(json!({
            "currentLocation": { "latitude": 12.9716, "longitude": 77.5946 },
            "currentTime": "2024-01-15T09:00:00Z"
        }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({
            "nextStop": {
                "id": 6,
                "name": "Stop F",
                "location": { "latitude": 12.9304, "longitude": 77.6783 }
            }
        })
    );
}

#[actix_web::test]
async fn test_versioned_route() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/next-stop")
        .set_json(json!({
            "currentLocation": { "latitude": 12.9784, "longitude": 77.6408 },
            "currentTime": "2024-01-15 09:00:00"
        }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["nextStop"]["id"], 4);
}

#[actix_web::test]
async fn test_missing_location_is_bad_request() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/next-stop")
        .set_json(json!({ "currentTime": "2024-01-15T09:00:00Z" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid location. Provide latitude and longitude.");
    assert_eq!(body["status_code"], 400);
}

#[actix_web::test]
async fn test_non_numeric_latitude_is_bad_request() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/next-stop")
        .set_json(json!({
            "currentLocation": { "latitude": "twelve", "longitude": 77.5946 },
            "currentTime": "2024-01-15T09:00:00Z"
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid location. Provide latitude and longitude.");
}

#[actix_web::test]
async fn test_unparseable_time_is_bad_request() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/next-stop")
        .set_json(json!({
            "currentLocation": { "latitude": 12.9716, "longitude": 77.5946 },
            "currentTime": "half past nine"
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid time. Provide a valid timestamp.");
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/next-stop")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["status_code"], 400);
}

#[actix_web::test]
async fn test_ranking_endpoint() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/next-stop/ranking")
        .set_json(json!({
            "currentLocation": { "latitude": 12.9716, "longitude": 77.5946 },
            "currentTime": "2024-01-15T09:00:00Z"
        }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    let ranking = body["ranking"].as_array().unwrap();
    assert_eq!(ranking.len(), 10);
    assert_eq!(ranking[0]["stop"]["id"], 6);

    let scores: Vec<f64> = ranking.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    for i in 1..scores.len() {
        assert!(scores[i - 1] >= scores[i], "Ranking not sorted by score");
    }
}

#[actix_web::test]
async fn test_stops_and_health_endpoints() {
    let app = init_app!();

    let req = actix_test::TestRequest::get().uri("/stops").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 10);
    assert_eq!(body["stops"][0]["name"], "Stop A");

    let req = actix_test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["stops"], 10);
}

#[actix_web::test]
async fn test_wrongly_typed_fields_map_to_boundary_errors() {
    let app = init_app!();

    let req = actix_test::TestRequest::post()
        .uri("/next-stop")
        .set_json(json!({
            "currentLocation": "x",
            "currentTime": "2024-01-15T09:00:00Z"
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid location. Provide latitude and longitude.");

    let req = actix_test::TestRequest::post()
        .uri("/next-stop")
        .set_json(json!({
            "currentLocation": { "latitude": 12.9716, "longitude": 77.5946 },
            "currentTime": 1705309200
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid time. Provide a valid timestamp.");
}
