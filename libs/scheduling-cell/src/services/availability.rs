// libs/scheduling-cell/src/services/availability.rs
use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::models::{
    AppointmentFilter, AppointmentStatus, Room, RoomFilter, RoomStatus, SchedulingError,
};
use crate::services::interval::overlaps;
use crate::services::store::BookingStore;

pub struct AvailabilityService {
    store: BookingStore,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: BookingStore::new(config),
        }
    }

    /// Whether a doctor is free for the whole of [start_time, end_time) on
    /// `date`: no non-cancelled appointment may overlap the interval.
    ///
    /// A storage failure reports "not available". Treating an uncertain
    /// probe as busy can never double-book anyone; the failure is logged
    /// here at the boundary, not swallowed.
    pub async fn is_doctor_available(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> bool {
        let filter = AppointmentFilter {
            doctor_id: Some(doctor_id),
            date: Some(date),
            status_not_in: vec![AppointmentStatus::Cancelled],
            ..Default::default()
        };

        match self.store.list_appointments(&filter).await {
            Ok(appointments) => {
                let busy = appointments
                    .iter()
                    .any(|apt| overlaps(start_time, end_time, apt.start_time, apt.end_time));
                debug!(
                    "Doctor {} on {} [{} - {}): {}",
                    doctor_id,
                    date,
                    start_time,
                    end_time,
                    if busy { "busy" } else { "available" }
                );
                !busy
            }
            Err(e) => {
                warn!(
                    "Availability check failed for doctor {} on {}, treating as unavailable: {}",
                    doctor_id, date, e
                );
                false
            }
        }
    }

    /// Rooms that can take a booking over [start_time, end_time) on `date`:
    /// status is `available` and no non-cancelled appointment occupies the
    /// room over an overlapping interval.
    pub async fn get_available_rooms(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Vec<Room>, SchedulingError> {
        if start_time >= end_time {
            return Err(SchedulingError::Validation(
                "Start time must be before end time".to_string(),
            ));
        }

        let rooms = self
            .store
            .list_rooms(&RoomFilter {
                status: Some(RoomStatus::Available),
            })
            .await
            .map_err(|e| SchedulingError::Database(e.to_string()))?;

        let appointments = self
            .store
            .list_appointments(&AppointmentFilter {
                date: Some(date),
                status_not_in: vec![AppointmentStatus::Cancelled],
                ..Default::default()
            })
            .await
            .map_err(|e| SchedulingError::Database(e.to_string()))?;

        // Appointments without a room assignment occupy nothing.
        let occupied: HashSet<Uuid> = appointments
            .iter()
            .filter(|apt| overlaps(start_time, end_time, apt.start_time, apt.end_time))
            .filter_map(|apt| apt.room_id)
            .collect();

        let free: Vec<Room> = rooms
            .into_iter()
            .filter(|room| !occupied.contains(&room.id))
            .collect();

        debug!(
            "{} rooms free on {} [{} - {})",
            free.len(),
            date,
            start_time,
            end_time
        );
        Ok(free)
    }
}
