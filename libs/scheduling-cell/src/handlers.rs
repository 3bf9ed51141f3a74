// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ConflictCheckRequest, ConflictCheckResponse, SchedulingError, SlotSearchRequest};
use crate::services::{
    availability::AvailabilityService, eligibility::EligibilityService,
    schedule::ScheduleService, suggestion::SuggestionService,
};

// Query parameters for the availability endpoints
#[derive(Debug, Deserialize)]
pub struct IntervalQuery {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Deserialize)]
pub struct StrictAvailabilityQuery {
    pub speciality: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

fn to_app_error(e: SchedulingError) -> AppError {
    match e {
        SchedulingError::Validation(msg) => AppError::ValidationError(msg),
        SchedulingError::Database(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn check_doctor_availability(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<IntervalQuery>,
) -> Result<Json<Value>, AppError> {
    if query.start_time >= query.end_time {
        return Err(AppError::ValidationError(
            "Start time must be before end time".to_string(),
        ));
    }

    let availability_service = AvailabilityService::new(&state);

    let available = availability_service
        .is_doctor_available(doctor_id, query.date, query.start_time, query.end_time)
        .await;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": query.date,
        "start_time": query.start_time,
        "end_time": query.end_time,
        "available": available
    })))
}

#[axum::debug_handler]
pub async fn get_available_rooms(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<IntervalQuery>,
) -> Result<Json<Value>, AppError> {
    let availability_service = AvailabilityService::new(&state);

    let rooms = availability_service
        .get_available_rooms(query.date, query.start_time, query.end_time)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!({
        "total": rooms.len(),
        "rooms": rooms
    })))
}

#[axum::debug_handler]
pub async fn search_slots(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<SlotSearchRequest>,
) -> Result<Json<Value>, AppError> {
    let suggestion_service = SuggestionService::new(&state);

    let outcome = suggestion_service
        .find_available_or_suggest(
            request.date,
            request.start_time,
            request.end_time,
            request.speciality.as_deref(),
        )
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!(outcome)))
}

#[axum::debug_handler]
pub async fn get_strictly_available_doctors(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<StrictAvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let eligibility_service = EligibilityService::new(&state);

    let doctors = eligibility_service
        .strictly_available_doctors(&query.speciality, query.date, query.start_time, query.end_time)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!({
        "total": doctors.len(),
        "doctors": doctors
    })))
}

#[axum::debug_handler]
pub async fn check_work_block_conflict(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<ConflictCheckRequest>,
) -> Result<Json<ConflictCheckResponse>, AppError> {
    let schedule_service = ScheduleService::new(&state);

    let has_conflict = schedule_service
        .has_schedule_conflict(
            request.doctor_id,
            request.date,
            request.start_time,
            request.end_time,
            request.exclude_block_id,
        )
        .await
        .map_err(to_app_error)?;

    Ok(Json(ConflictCheckResponse { has_conflict }))
}
