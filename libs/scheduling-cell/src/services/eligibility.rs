// libs/scheduling-cell/src/services/eligibility.rs
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use shared_config::AppConfig;

use crate::models::{
    AppointmentFilter, AppointmentStatus, Doctor, DoctorFilter, SchedulingError, WorkBlockFilter,
};
use crate::services::interval::{contains, overlaps};
use crate::services::store::BookingStore;

/// The stricter doctor filter backing the confirm-booking path: the
/// manual availability flag must be on, a work block must cover the whole
/// interval, and no confirmed appointment may overlap it.
pub struct EligibilityService {
    store: BookingStore,
}

impl EligibilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: BookingStore::new(config),
        }
    }

    pub async fn strictly_available_doctors(
        &self,
        speciality: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Vec<Doctor>, SchedulingError> {
        if start_time >= end_time {
            return Err(SchedulingError::Validation(
                "Start time must be before end time".to_string(),
            ));
        }

        let doctors = self
            .store
            .list_doctors(&DoctorFilter {
                speciality: Some(speciality.trim().to_string()),
                is_available_only: true,
            })
            .await
            .map_err(|e| SchedulingError::Database(e.to_string()))?;

        let mut eligible = Vec::new();

        for doctor in doctors {
            let blocks = self
                .store
                .list_work_blocks(&WorkBlockFilter {
                    doctor_id: doctor.id,
                    date: Some(date),
                    exclude_id: None,
                })
                .await
                .map_err(|e| SchedulingError::Database(e.to_string()))?;

            // The requested interval must sit entirely inside one block;
            // two adjacent blocks that only jointly cover it do not count.
            let on_duty = blocks
                .iter()
                .any(|block| contains(block.start_time, block.end_time, start_time, end_time));
            if !on_duty {
                continue;
            }

            let appointments = self
                .store
                .list_appointments(&AppointmentFilter {
                    doctor_id: Some(doctor.id),
                    date: Some(date),
                    status_in: vec![AppointmentStatus::Confirmed],
                    ..Default::default()
                })
                .await
                .map_err(|e| SchedulingError::Database(e.to_string()))?;

            // Only confirmed bookings block this path. Pending ones do not:
            // the confirm flow is allowed to outrun an unconfirmed request.
            let booked = appointments
                .iter()
                .any(|apt| overlaps(start_time, end_time, apt.start_time, apt.end_time));
            if booked {
                continue;
            }

            eligible.push(doctor);
        }

        debug!(
            "{} strictly available doctors for '{}' on {} [{} - {})",
            eligible.len(),
            speciality.trim(),
            date,
            start_time,
            end_time
        );

        Ok(eligible)
    }
}
