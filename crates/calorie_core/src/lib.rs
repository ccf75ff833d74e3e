//! Client-side state controller for a calorie and weight tracker.
//! Owns view state, search staleness, calendar aggregation and settings
//! write ordering; every effect leaves as a request value.

pub mod autocomplete;
pub mod calendar;
pub mod channel;
pub mod conf_sync;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod view;
pub mod wire;

pub use autocomplete::{highlight, Autocomplete, CommitAction, Focus, SearchRequest, Segment};
pub use calendar::{render as render_calendar, weight_loss_grams, CalendarGrid, LossBadge};
pub use channel::{Sequence, Ticket, VersionMap};
pub use conf_sync::{ConfSync, PendingWrite};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::day::{CalendarData, ConfKey, Configuration, DaySummary, WeightPoint};
pub use model::item::{Item, ItemId, ItemPatch, NewItem};
pub use model::month::MonthCursor;
pub use model::suggestion::SuggestionResult;
pub use service::driver::{execute, Driver};
pub use service::local::LocalCalorieService;
pub use service::{CalorieService, ServiceError, ServiceResult};
pub use view::{Msg, Outcome, Reply, Request, Screen, SessionOptions, ViewController};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
