// libs/scheduling-cell/src/services/store.rs
use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::PostgrestClient;

use crate::models::{
    Appointment, AppointmentFilter, Doctor, DoctorFilter, DoctorWorkBlock, Room, RoomFilter,
    WorkBlockFilter,
};

/// Read-only accessor over the booking collections. Every availability
/// question in this cell goes through these four queries; nothing here
/// ever writes.
pub struct BookingStore {
    db: PostgrestClient,
}

impl BookingStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            db: PostgrestClient::new(config),
        }
    }

    pub async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        let mut query_parts = Vec::new();

        if let Some(doctor_id) = filter.doctor_id {
            query_parts.push(format!("doctor_id=eq.{}", doctor_id));
        }
        if let Some(room_id) = filter.room_id {
            query_parts.push(format!("room_id=eq.{}", room_id));
        }
        if let Some(date) = filter.date {
            query_parts.push(format!("date=eq.{}", date));
        }
        query_parts.push("order=start_time.asc".to_string());

        let path = format!("/rest/v1/appointments?{}", query_parts.join("&"));
        let result: Vec<Value> = self.db.get_rows(&path).await?;

        let mut appointments: Vec<Appointment> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Appointment>, _>>()?;

        // Status filtering happens on the decoded rows; the status column is
        // inspected in code, not pushed down.
        if !filter.status_in.is_empty() {
            appointments.retain(|apt| filter.status_in.contains(&apt.status));
        }
        if !filter.status_not_in.is_empty() {
            appointments.retain(|apt| !filter.status_not_in.contains(&apt.status));
        }

        debug!("Fetched {} appointments", appointments.len());
        Ok(appointments)
    }

    pub async fn list_doctors(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>> {
        let mut query_parts = Vec::new();

        if let Some(ref speciality) = filter.speciality {
            let trimmed = speciality.trim();
            if !trimmed.is_empty() {
                query_parts.push(format!("speciality=eq.{}", urlencoding::encode(trimmed)));
            }
        }
        if filter.is_available_only {
            query_parts.push("is_available=eq.true".to_string());
        }
        query_parts.push("order=last_name.asc".to_string());

        let path = format!("/rest/v1/doctors?{}", query_parts.join("&"));
        let result: Vec<Value> = self.db.get_rows(&path).await?;

        let doctors: Vec<Doctor> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Doctor>, _>>()?;

        debug!("Fetched {} doctors", doctors.len());
        Ok(doctors)
    }

    pub async fn list_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>> {
        let mut query_parts = Vec::new();

        if let Some(status) = filter.status {
            query_parts.push(format!("status=eq.{}", status));
        }
        query_parts.push("order=name.asc".to_string());

        let path = format!("/rest/v1/rooms?{}", query_parts.join("&"));
        let result: Vec<Value> = self.db.get_rows(&path).await?;

        let rooms: Vec<Room> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Room>, _>>()?;

        debug!("Fetched {} rooms", rooms.len());
        Ok(rooms)
    }

    pub async fn list_work_blocks(&self, filter: &WorkBlockFilter) -> Result<Vec<DoctorWorkBlock>> {
        let mut query_parts = vec![format!("doctor_id=eq.{}", filter.doctor_id)];

        if let Some(date) = filter.date {
            query_parts.push(format!("date=eq.{}", date));
        }
        if let Some(exclude_id) = filter.exclude_id {
            query_parts.push(format!("id=neq.{}", exclude_id));
        }
        query_parts.push("order=start_time.asc".to_string());

        let path = format!("/rest/v1/doctor_work_blocks?{}", query_parts.join("&"));
        let result: Vec<Value> = self.db.get_rows(&path).await?;

        let blocks: Vec<DoctorWorkBlock> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<DoctorWorkBlock>, _>>()?;

        debug!("Fetched {} work blocks", blocks.len());
        Ok(blocks)
    }
}
