// End-to-end booking flow against the real router with an in-memory
// reservation service standing in for the club API.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use courtbook_booking::routes::routes_with_service;
use courtbook_booking::service::ClubApiError;
use courtbook_common::services::{
    BoxFuture, BoxedError, NewReservation, Reservation, ReservationResult, ReservationService,
};
use courtbook_config::{AppConfig, BookingConfig, ServerConfig};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

// A fixed day far in the future keeps the today filter out of the way.
const DAY: &str = "2032-06-10";

/// Minimal in-memory stand-in for the club reservation API.
struct InMemoryReservationService {
    reservations: Mutex<Vec<Reservation>>,
    next_id: Mutex<u32>,
}

impl InMemoryReservationService {
    fn new() -> Self {
        Self {
            reservations: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }
}

impl ReservationService for InMemoryReservationService {
    type Error = BoxedError;

    fn list_reservations(
        &self,
        _court_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Reservation>, Self::Error> {
        Box::pin(async move {
            let reservations = self.reservations.lock().unwrap();
            let mut listed: Vec<Reservation> = reservations
                .iter()
                .filter(|r| include_cancelled || r.status != "cancelled")
                .filter(|r| {
                    let start = DateTime::parse_from_rfc3339(&r.start_time).unwrap();
                    let end = DateTime::parse_from_rfc3339(&r.end_time).unwrap();
                    start.with_timezone(&Utc) < to && end.with_timezone(&Utc) > from
                })
                .cloned()
                .collect();
            listed.sort_by(|a, b| a.start_time.cmp(&b.start_time));
            Ok(listed)
        })
    }

    fn create_reservation(
        &self,
        court_id: &str,
        reservation: NewReservation,
    ) -> BoxFuture<'_, ReservationResult, Self::Error> {
        let court_id = court_id.to_string();

        Box::pin(async move {
            let start = DateTime::parse_from_rfc3339(&reservation.start_time)
                .map_err(|e| BoxedError(Box::new(ClubApiError::ParseError(e.to_string()))))?
                .with_timezone(&Utc);
            let end = DateTime::parse_from_rfc3339(&reservation.end_time)
                .map_err(|e| BoxedError(Box::new(ClubApiError::ParseError(e.to_string()))))?
                .with_timezone(&Utc);

            let mut reservations = self.reservations.lock().unwrap();
            for existing in reservations.iter().filter(|r| r.status != "cancelled") {
                let existing_start = DateTime::parse_from_rfc3339(&existing.start_time)
                    .unwrap()
                    .with_timezone(&Utc);
                let existing_end = DateTime::parse_from_rfc3339(&existing.end_time)
                    .unwrap()
                    .with_timezone(&Utc);
                if start < existing_end && end > existing_start {
                    return Err(BoxedError(Box::new(ClubApiError::Conflict)));
                }
            }

            let mut next_id = self.next_id.lock().unwrap();
            let reservation_id = format!("res-{}", *next_id);
            *next_id += 1;

            let now = Utc::now().to_rfc3339();
            reservations.push(Reservation {
                reservation_id: reservation_id.clone(),
                court_id,
                start_time: reservation.start_time,
                end_time: reservation.end_time,
                member_name: reservation.member_name,
                note: reservation.note,
                status: "confirmed".to_string(),
                created: now.clone(),
                updated: now,
            });

            Ok(ReservationResult {
                reservation_id: Some(reservation_id),
                status: "confirmed".to_string(),
            })
        })
    }

    fn cancel_reservation(
        &self,
        _court_id: &str,
        reservation_id: &str,
    ) -> BoxFuture<'_, ReservationResult, Self::Error> {
        let reservation_id = reservation_id.to_string();

        Box::pin(async move {
            let mut reservations = self.reservations.lock().unwrap();
            for reservation in reservations.iter_mut() {
                if reservation.reservation_id == reservation_id {
                    reservation.status = "cancelled".to_string();
                    return Ok(ReservationResult {
                        reservation_id: Some(reservation_id),
                        status: "cancelled".to_string(),
                    });
                }
            }
            Err(BoxedError(Box::new(ClubApiError::NotFound(reservation_id))))
        })
    }
}

fn test_app() -> Router {
    let config = Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8086,
        },
        use_booking: true,
        booking: Some(BookingConfig {
            api_base_url: "https://api.club.example/v1".to_string(),
            court_id: "court-1".to_string(),
            time_zone: Some("Europe/Zurich".to_string()),
            slot_duration_minutes: None,
            first_slot: None,
            last_slot_end: None,
        }),
    });
    routes_with_service(config, Arc::new(InMemoryReservationService::new()))
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn delete_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn full_booking_flow() {
    let app = test_app();

    // 1. A free day offers all eleven slots.
    let (status, body) = get_json(&app, &format!("/availability?date={DAY}")).await;
    assert_eq!(status, StatusCode::OK);
    let slots = body["slots"].as_array().expect("slots array");
    assert_eq!(slots.len(), 11);
    assert_eq!(slots[0]["label"], "08:30 - 09:45");

    // 2. Reserve the 16:00 slot.
    let (status, body) = post_json(
        &app,
        "/reserve",
        json!({
            "start_time": "2032-06-10T16:00:00+02:00",
            "member_name": "R. Federer",
            "note": "league match"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let reservation_id = body["reservation_id"]
        .as_str()
        .expect("reservation id")
        .to_string();

    // 3. The slot is no longer offered.
    let (status, body) = get_json(&app, &format!("/availability?date={DAY}")).await;
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["label"].as_str())
        .collect();
    assert_eq!(labels.len(), 10);
    assert!(!labels.contains(&"16:00 - 17:15"));

    // 4. Booking the same slot again conflicts.
    let (status, body) = post_json(
        &app,
        "/reserve",
        json!({
            "start_time": "2032-06-10T16:00:00+02:00",
            "member_name": "Someone Else"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], 409);

    // 5. The admin schedule shows the occupant on its slot.
    let (status, body) = get_json(&app, &format!("/admin/schedule?date={DAY}")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 11);
    let occupied: Vec<&Value> = entries
        .iter()
        .filter(|e| !e["reservation"].is_null())
        .collect();
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0]["label"], "16:00 - 17:15");
    assert_eq!(
        occupied[0]["reservation"]["member_name"],
        "R. Federer"
    );

    // 6. Cancel and verify the slot reopens.
    let (status, body) =
        delete_json(&app, &format!("/admin/reservations/{reservation_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = get_json(&app, &format!("/availability?date={DAY}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slots"].as_array().unwrap().len(), 11);

    // 7. An unknown reservation id is a 404.
    let (status, _) = delete_json(&app, "/admin/reservations/res-999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn off_grid_reservations_are_rejected_with_400() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/reserve",
        json!({
            "start_time": "2032-06-10T09:00:00+02:00",
            "member_name": "R. Federer"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
}

#[tokio::test]
async fn malformed_dates_are_rejected_with_400() {
    let app = test_app();
    let (status, _) = get_json(&app, "/availability?date=whenever").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_list_includes_cancelled_on_request() {
    let app = test_app();

    let (_, body) = post_json(
        &app,
        "/reserve",
        json!({
            "start_time": "2032-06-10T08:30:00+02:00",
            "member_name": "R. Federer"
        }),
    )
    .await;
    let reservation_id = body["reservation_id"].as_str().unwrap().to_string();

    let (status, _) = delete_json(&app, &format!("/admin/reservations/{reservation_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(
        &app,
        "/admin/reservations?start_date=2032-06-08&end_date=2032-06-14",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["reservations"].as_array().unwrap().is_empty());

    let (status, body) = get_json(
        &app,
        "/admin/reservations?start_date=2032-06-08&end_date=2032-06-14&include_cancelled=true",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reservations = body["reservations"].as_array().unwrap();
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0]["status"], "cancelled");
}
