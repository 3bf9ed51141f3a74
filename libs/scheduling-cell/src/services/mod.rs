pub mod interval;
pub mod store;
pub mod availability;
pub mod suggestion;
pub mod schedule;
pub mod eligibility;

pub use store::BookingStore;
pub use availability::AvailabilityService;
pub use suggestion::SuggestionService;
pub use schedule::ScheduleService;
pub use eligibility::EligibilityService;
