// libs/scheduling-cell/tests/suggestion_test.rs
//
// End-to-end behavior of the slot-suggestion search: direct hits return
// doctors immediately, exhausted slots produce bounded chronological
// suggestions, empty pools short-circuit.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde_json::json;
use uuid::Uuid;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use assert_matches::assert_matches;
use scheduling_cell::models::SchedulingError;
use scheduling_cell::services::suggestion::SuggestionService;
use shared_config::AppConfig;

fn test_config(mock_uri: &str) -> AppConfig {
    AppConfig {
        database_url: mock_uri.to_string(),
        database_api_key: "test-key".to_string(),
    }
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn doctor_json(id: Uuid, first: &str, last: &str, speciality: &str) -> serde_json::Value {
    json!({
        "id": id,
        "first_name": first,
        "last_name": last,
        "speciality": speciality,
        "is_available": true
    })
}

fn booked_appointment_json(doctor_id: Uuid, date: &str, start: &str, end: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "patient_id": Uuid::new_v4(),
        "doctor_id": doctor_id,
        "room_id": null,
        "date": date,
        "start_time": start,
        "end_time": end,
        "status": "confirmed"
    })
}

#[tokio::test]
async fn returns_free_doctor_without_suggesting() {
    let mock_server = MockServer::start().await;
    let dr_a = Uuid::new_v4();
    let dr_b = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("speciality", "eq.Cardiology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            doctor_json(dr_a, "Alice", "Adams", "Cardiology"),
            doctor_json(dr_b, "Boris", "Bell", "Cardiology")
        ])))
        .mount(&mock_server)
        .await;

    // Dr. A is booked over the requested hour; Dr. B is free all day
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("doctor_id", format!("eq.{}", dr_a)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            booked_appointment_json(dr_a, "2025-01-10", "10:00:00", "11:00:00")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("doctor_id", format!("eq.{}", dr_b)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = SuggestionService::new(&test_config(&mock_server.uri()));

    let outcome = service
        .find_available_or_suggest(d(2025, 1, 10), t(10, 0), t(11, 0), Some("Cardiology"))
        .await
        .unwrap();

    assert_eq!(outcome.available_doctors.len(), 1);
    assert_eq!(outcome.available_doctors[0].id, dr_b);
    assert!(outcome.suggested_slots.is_empty());
}

#[tokio::test]
async fn suggests_nearest_slots_when_fully_booked() {
    let mock_server = MockServer::start().await;
    let dr_a = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            doctor_json(dr_a, "Alice", "Adams", "Cardiology")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            booked_appointment_json(dr_a, "2025-01-10", "10:00:00", "11:00:00")
        ])))
        .mount(&mock_server)
        .await;

    let service = SuggestionService::new(&test_config(&mock_server.uri()));

    let outcome = service
        .find_available_or_suggest(d(2025, 1, 10), t(10, 0), t(11, 0), Some("Cardiology"))
        .await
        .unwrap();

    assert!(outcome.available_doctors.is_empty());
    assert_eq!(outcome.suggested_slots.len(), 5);

    // The first free hourly slot right after the booked one
    let first = &outcome.suggested_slots[0];
    assert_eq!(first.date, d(2025, 1, 10));
    assert_eq!(first.start_time, t(11, 0));
    assert_eq!(first.end_time, t(12, 0));
    assert_eq!(first.available_doctors_count, 1);

    // Strictly chronological, within business hours, inside the horizon
    for pair in outcome.suggested_slots.windows(2) {
        assert!((pair[0].date, pair[0].start_time) < (pair[1].date, pair[1].start_time));
    }
    for slot in &outcome.suggested_slots {
        assert!(slot.start_time >= t(7, 0));
        assert!(slot.end_time <= t(20, 0));
        assert!(slot.date <= d(2025, 1, 10) + Duration::days(3));
    }
}

#[tokio::test]
async fn empty_doctor_pool_short_circuits() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    // No availability probe may run when the pool is empty
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = SuggestionService::new(&test_config(&mock_server.uri()));

    let outcome = service
        .find_available_or_suggest(d(2025, 1, 10), t(10, 0), t(11, 0), Some("Dermatology"))
        .await
        .unwrap();

    assert!(outcome.available_doctors.is_empty());
    assert!(outcome.suggested_slots.is_empty());
}

#[tokio::test]
async fn speciality_filter_is_trimmed_and_exact() {
    let mock_server = MockServer::start().await;
    let dr_a = Uuid::new_v4();

    // The mock only answers the exact trimmed filter value; an untrimmed
    // query would fall through and fail the test.
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("speciality", "eq.Cardiology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            doctor_json(dr_a, "Alice", "Adams", "Cardiology")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = SuggestionService::new(&test_config(&mock_server.uri()));

    let outcome = service
        .find_available_or_suggest(d(2025, 1, 10), t(10, 0), t(11, 0), Some("  Cardiology  "))
        .await
        .unwrap();

    assert_eq!(outcome.available_doctors.len(), 1);
    assert!(outcome
        .available_doctors
        .iter()
        .all(|doc| doc.speciality == "Cardiology"));
}

#[tokio::test]
async fn failing_probes_bound_the_search() {
    let mock_server = MockServer::start().await;
    let dr_a = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            doctor_json(dr_a, "Alice", "Adams", "Cardiology")
        ])))
        .mount(&mock_server)
        .await;

    // Every availability probe fails; each counts as "busy" and the walk
    // must still terminate at the horizon with no suggestions.
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("storage down"))
        .mount(&mock_server)
        .await;

    let service = SuggestionService::new(&test_config(&mock_server.uri()));

    let outcome = service
        .find_available_or_suggest(d(2025, 1, 10), t(10, 0), t(11, 0), None)
        .await
        .unwrap();

    assert!(outcome.available_doctors.is_empty());
    assert!(outcome.suggested_slots.is_empty());
}

#[tokio::test]
async fn evening_request_rolls_over_to_next_morning() {
    let mock_server = MockServer::start().await;
    let dr_a = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            doctor_json(dr_a, "Alice", "Adams", "Cardiology")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            booked_appointment_json(dr_a, "2025-01-10", "18:00:00", "19:00:00")
        ])))
        .mount(&mock_server)
        .await;

    let service = SuggestionService::new(&test_config(&mock_server.uri()));

    let outcome = service
        .find_available_or_suggest(d(2025, 1, 10), t(18, 0), t(19, 0), None)
        .await
        .unwrap();

    assert!(outcome.available_doctors.is_empty());
    assert!(!outcome.suggested_slots.is_empty());

    // 19:00-20:00 still fits the same day; the following slot would end
    // past closing, so the walk resumes next day within business hours
    let first = &outcome.suggested_slots[0];
    assert_eq!(first.date, d(2025, 1, 10));
    assert_eq!(first.start_time, t(19, 0));

    let second = &outcome.suggested_slots[1];
    assert_eq!(second.date, d(2025, 1, 11));
    assert!(second.start_time >= t(7, 0));
    assert!(second.end_time <= t(20, 0));
}

#[tokio::test]
async fn rejects_inverted_interval() {
    let mock_server = MockServer::start().await;
    let service = SuggestionService::new(&test_config(&mock_server.uri()));

    let result = service
        .find_available_or_suggest(d(2025, 1, 10), t(11, 0), t(10, 0), None)
        .await;

    assert_matches!(result, Err(SchedulingError::Validation(_)));
}
