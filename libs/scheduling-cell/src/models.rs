// libs/scheduling-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{NaiveDate, NaiveTime};
use std::fmt;
use thiserror::Error;

// ==============================================================================
// CORE SCHEDULING MODELS
// ==============================================================================

/// A booked (or requested) visit. The scheduling core only ever reads these
/// rows; creating and mutating them is the booking write layer's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A working-hours entry for a doctor on a concrete date, optionally tied
/// to a room. Blocks for the same doctor/date must not overlap each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorWorkBlock {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub room_type: String,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Unavailable,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Available => write!(f, "available"),
            RoomStatus::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Doctor read model. Name fields are denormalised from the person record
/// owned by the profile service; `is_available` is the manually toggled
/// flag, independent of schedule and booking state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub speciality: String,
    pub is_available: bool,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ==============================================================================
// STORE FILTERS
// ==============================================================================

#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub doctor_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status_in: Vec<AppointmentStatus>,
    pub status_not_in: Vec<AppointmentStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorFilter {
    pub speciality: Option<String>,
    pub is_available_only: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Clone)]
pub struct WorkBlockFilter {
    pub doctor_id: Uuid,
    pub date: Option<NaiveDate>,
    pub exclude_id: Option<Uuid>,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSearchRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub speciality: Option<String>,
}

/// An alternative slot proposed when the literally requested one has no
/// free doctor, annotated with how many doctors could take it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestedSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub available_doctors_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSearchOutcome {
    pub available_doctors: Vec<Doctor>,
    pub suggested_slots: Vec<SuggestedSlot>,
}

impl SlotSearchOutcome {
    pub fn empty() -> Self {
        Self {
            available_doctors: vec![],
            suggested_slots: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckRequest {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub exclude_block_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub has_conflict: bool,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}
