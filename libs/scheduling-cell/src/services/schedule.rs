// libs/scheduling-cell/src/services/schedule.rs
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;

use crate::models::{SchedulingError, WorkBlockFilter};
use crate::services::interval::block_conflict;
use crate::services::store::BookingStore;

/// Validates new or edited work blocks against a doctor's existing blocks
/// for the day. A conflict is a normal outcome, reported as `Ok(true)`.
pub struct ScheduleService {
    store: BookingStore,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: BookingStore::new(config),
        }
    }

    /// Whether [start_time, end_time) collides with any of the doctor's
    /// work blocks on `date`. On update, pass the block being edited as
    /// `exclude_block_id` so it does not conflict with itself.
    pub async fn has_schedule_conflict(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude_block_id: Option<Uuid>,
    ) -> Result<bool, SchedulingError> {
        if start_time >= end_time {
            return Err(SchedulingError::Validation(
                "Start time must be before end time".to_string(),
            ));
        }

        let blocks = self
            .store
            .list_work_blocks(&WorkBlockFilter {
                doctor_id,
                date: Some(date),
                exclude_id: exclude_block_id,
            })
            .await
            .map_err(|e| SchedulingError::Database(e.to_string()))?;

        let conflict = blocks
            .iter()
            .any(|block| block_conflict(start_time, end_time, block.start_time, block.end_time));

        debug!(
            "Work block [{} - {}) for doctor {} on {}: {}",
            start_time,
            end_time,
            doctor_id,
            date,
            if conflict { "conflict" } else { "clear" }
        );

        Ok(conflict)
    }
}
