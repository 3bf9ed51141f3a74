use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn scheduling_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/doctors/{doctor_id}/availability",
            get(handlers::check_doctor_availability),
        )
        .route("/rooms/available", get(handlers::get_available_rooms))
        .route("/appointments/search", post(handlers::search_slots))
        .route(
            "/doctors/strictly-available",
            get(handlers::get_strictly_available_doctors),
        )
        .route(
            "/work-blocks/conflict-check",
            post(handlers::check_work_block_conflict),
        )
        .with_state(state)
}
