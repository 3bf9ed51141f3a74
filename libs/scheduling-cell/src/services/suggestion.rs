// libs/scheduling-cell/src/services/suggestion.rs
//
// The slot-suggestion search: check the literally requested slot first,
// and only when no doctor can take it walk forward through business hours
// proposing the nearest alternative slots.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use shared_config::AppConfig;

use crate::models::{DoctorFilter, SchedulingError, SlotSearchOutcome, SuggestedSlot};
use crate::services::availability::AvailabilityService;
use crate::services::store::BookingStore;

// Fixed search policy. Not user-configurable.
const SLOT_DURATION_MINUTES: i64 = 60;
const SEARCH_HORIZON_DAYS: i64 = 3;
const MAX_SUGGESTIONS: usize = 5;

fn business_open() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap()
}

fn business_close() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap()
}

fn next_day_open(date: NaiveDate) -> NaiveDateTime {
    date.succ_opt().unwrap().and_time(business_open())
}

pub struct SuggestionService {
    store: BookingStore,
    availability: AvailabilityService,
}

impl SuggestionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: BookingStore::new(config),
            availability: AvailabilityService::new(config),
        }
    }

    /// Either the doctors free for the literal requested slot, or up to
    /// five chronologically nearest alternative slots within the next
    /// three days of business hours.
    pub async fn find_available_or_suggest(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        speciality: Option<&str>,
    ) -> Result<SlotSearchOutcome, SchedulingError> {
        if start_time >= end_time {
            return Err(SchedulingError::Validation(
                "Start time must be before end time".to_string(),
            ));
        }

        let speciality = speciality
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        // The pool is queried once and reused across every probe below.
        let doctors = self
            .store
            .list_doctors(&DoctorFilter {
                speciality,
                is_available_only: false,
            })
            .await
            .map_err(|e| SchedulingError::Database(e.to_string()))?;

        if doctors.is_empty() {
            debug!("No doctors match the requested speciality, skipping search");
            return Ok(SlotSearchOutcome::empty());
        }

        // Direct check: if anyone is free for the literal request, return
        // immediately and propose nothing.
        let mut available_doctors = Vec::new();
        for doctor in &doctors {
            if self
                .availability
                .is_doctor_available(doctor.id, date, start_time, end_time)
                .await
            {
                available_doctors.push(doctor.clone());
            }
        }

        if !available_doctors.is_empty() {
            debug!(
                "{} doctors free for the requested slot, no suggestions needed",
                available_doctors.len()
            );
            return Ok(SlotSearchOutcome {
                available_doctors,
                suggested_slots: vec![],
            });
        }

        debug!(
            "No doctor free on {} [{} - {}), searching forward",
            date, start_time, end_time
        );

        // Bounded forward walk. The horizon is fixed from the original
        // request, not recomputed per iteration.
        let horizon_date = date + Duration::days(SEARCH_HORIZON_DAYS);
        let mut cursor = date.and_time(start_time);
        let mut suggested_slots: Vec<SuggestedSlot> = Vec::new();

        while suggested_slots.len() < MAX_SUGGESTIONS {
            cursor += Duration::minutes(SLOT_DURATION_MINUTES);

            if cursor.time() >= business_close() {
                cursor = next_day_open(cursor.date());
            }
            if cursor.time() < business_open() {
                cursor = cursor.date().and_time(business_open());
            }
            if cursor.date() > horizon_date {
                break;
            }

            let slot_end = cursor + Duration::minutes(SLOT_DURATION_MINUTES);

            // A window whose end would pass closing time is skipped whole,
            // never truncated; the walk resumes next morning.
            if slot_end.date() != cursor.date() || slot_end.time() > business_close() {
                cursor = next_day_open(cursor.date());
                continue;
            }

            let mut count = 0;
            for doctor in &doctors {
                if self
                    .availability
                    .is_doctor_available(doctor.id, cursor.date(), cursor.time(), slot_end.time())
                    .await
                {
                    count += 1;
                }
            }

            if count > 0 {
                suggested_slots.push(SuggestedSlot {
                    date: cursor.date(),
                    start_time: cursor.time(),
                    end_time: slot_end.time(),
                    available_doctors_count: count,
                });
            }
        }

        debug!("Forward search produced {} suggestions", suggested_slots.len());

        Ok(SlotSearchOutcome {
            available_doctors: vec![],
            suggested_slots,
        })
    }
}
