//! Flutter-facing session API.
//!
//! # Responsibility
//! - Wrap one `ViewController` per UI session behind sync FRB calls.
//! - Hand HTTP work to the host as numbered calls and route the raw
//!   responses back into the controller.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Every call id is answered at most once; unknown ids are ignored.
//! - Invalid user text is a no-op update, never an error.

use calorie_core::model::month::parse_date;
use calorie_core::view::{Msg, Outcome, Reply, Request};
use calorie_core::wire::{decode_reply, http_call};
use calorie_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ConfKey, ItemPatch,
    ServiceError, SessionOptions, ViewController,
};
use chrono::NaiveDate;
use log::{error, warn};
use std::collections::HashMap;

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error`, case-insensitive.
/// - `log_dir`: absolute directory for rolling log files.
/// - Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// HTTP exchange the host must perform, then answer via `complete` or `fail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCall {
    pub id: u64,
    /// `GET|POST|PUT|DELETE`.
    pub method: String,
    pub path: String,
    /// JSON request body for writes.
    pub body: Option<String>,
}

/// Result of one session call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub calls: Vec<HostCall>,
    /// `screen_json()` changed and should be redrawn.
    pub render: bool,
}

/// One browsing session: owned view state plus in-flight host calls.
#[flutter_rust_bridge::frb(opaque)]
pub struct CalorieSession {
    controller: ViewController,
    in_flight: HashMap<u64, Request>,
    next_call_id: u64,
}

impl CalorieSession {
    /// Creates a session whose "today" is `today` (`YYYY-MM-DD`).
    ///
    /// A missing or malformed date falls back to the local calendar date.
    #[flutter_rust_bridge::frb(sync)]
    pub fn new(today: Option<String>, history_days: Option<u32>) -> CalorieSession {
        let today = resolve_today(today.as_deref());
        let mut options = SessionOptions::default();
        if let Some(days) = history_days {
            options.history_days = u64::from(days);
        }
        Self {
            controller: ViewController::new(today, options),
            in_flight: HashMap::new(),
            next_call_id: 1,
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn start(&mut self) -> SessionUpdate {
        self.dispatch(Msg::Start)
    }

    /// Malformed dates are ignored.
    #[flutter_rust_bridge::frb(sync)]
    pub fn select_date(&mut self, date: String) -> SessionUpdate {
        match parse_date(&date) {
            Some(date) => self.dispatch(Msg::SelectDate(date)),
            None => SessionUpdate::default(),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn previous_month(&mut self) -> SessionUpdate {
        self.dispatch(Msg::PreviousMonth)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn next_month(&mut self) -> SessionUpdate {
        self.dispatch(Msg::NextMonth)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn entry_text_changed(&mut self, text: String) -> SessionUpdate {
        self.dispatch(Msg::EntryTextChanged(text))
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn focus_next(&mut self) -> SessionUpdate {
        self.dispatch(Msg::FocusNext)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn focus_previous(&mut self) -> SessionUpdate {
        self.dispatch(Msg::FocusPrevious)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn commit(&mut self) -> SessionUpdate {
        self.dispatch(Msg::Commit)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn close_suggestions(&mut self) -> SessionUpdate {
        self.dispatch(Msg::CloseSuggestions)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn multiplier_changed(&mut self, text: String) -> SessionUpdate {
        self.dispatch(Msg::MultiplierChanged(text))
    }

    /// `key` is `metabolism` or `budget`; other keys are ignored.
    #[flutter_rust_bridge::frb(sync)]
    pub fn conf_input_changed(&mut self, key: String, text: String) -> SessionUpdate {
        match ConfKey::parse(&key) {
            Some(key) => self.dispatch(Msg::ConfInputChanged { key, text }),
            None => SessionUpdate::default(),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn edit_item(
        &mut self,
        id: u64,
        name: Option<String>,
        calories: Option<f64>,
        multiplier: Option<f64>,
    ) -> SessionUpdate {
        let patch = ItemPatch {
            name,
            calories,
            multiplier,
        };
        self.dispatch(Msg::EditItem { id, patch })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn plus_one(&mut self, id: u64) -> SessionUpdate {
        self.dispatch(Msg::PlusOne(id))
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn remove_item(&mut self, id: u64) -> SessionUpdate {
        self.dispatch(Msg::RemoveItem(id))
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn record_weight(&mut self, text: String) -> SessionUpdate {
        self.dispatch(Msg::RecordWeight(text))
    }

    /// Feeds the raw HTTP response for `call_id` back into the session.
    #[flutter_rust_bridge::frb(sync)]
    pub fn complete(&mut self, call_id: u64, status: u16, body: String) -> SessionUpdate {
        match self.in_flight.remove(&call_id) {
            Some(request) => self.dispatch(decode_reply(&request, status, &body)),
            None => {
                warn!("event=host_complete module=ffi status=ignored call_id={call_id}");
                SessionUpdate::default()
            }
        }
    }

    /// Reports that `call_id` never produced a response.
    #[flutter_rust_bridge::frb(sync)]
    pub fn fail(&mut self, call_id: u64, message: String) -> SessionUpdate {
        match self.in_flight.remove(&call_id) {
            Some(request) => {
                let reply = Reply::failed(&request, ServiceError::Transport(message));
                self.dispatch(Msg::Completed(reply))
            }
            None => SessionUpdate::default(),
        }
    }

    /// Number of host calls not yet answered.
    #[flutter_rust_bridge::frb(sync)]
    pub fn pending_calls(&self) -> u32 {
        u32::try_from(self.in_flight.len()).unwrap_or(u32::MAX)
    }

    /// Current screen as JSON; `{}` if serialization fails.
    #[flutter_rust_bridge::frb(sync)]
    pub fn screen_json(&self) -> String {
        serde_json::to_string(&self.controller.screen()).unwrap_or_else(|err| {
            error!("event=screen_json module=ffi status=error error={err}");
            "{}".to_string()
        })
    }

    fn dispatch(&mut self, msg: Msg) -> SessionUpdate {
        let Outcome { requests, render } = self.controller.update(msg);
        let calls = requests
            .into_iter()
            .map(|request| {
                let id = self.next_call_id;
                self.next_call_id += 1;
                let call = http_call(&request);
                self.in_flight.insert(id, request);
                HostCall {
                    id,
                    method: call.method.to_string(),
                    path: call.path,
                    body: call.body,
                }
            })
            .collect();
        SessionUpdate { calls, render }
    }
}

fn resolve_today(raw: Option<&str>) -> NaiveDate {
    let local_today = || chrono::Local::now().date_naive();
    match raw {
        None => local_today(),
        Some(raw) => parse_date(raw).unwrap_or_else(|| {
            warn!("event=session_new module=ffi status=fallback reason=bad_today");
            local_today()
        }),
    }
}
