//! Messages into the view controller and requests out of it.
//!
//! # Invariants
//! - Every `Request` has exactly one matching `Reply` variant.
//! - Requests that can go stale carry the ticket or version they were issued
//!   under, and their replies echo it back.

use crate::autocomplete::SearchRequest;
use crate::channel::Ticket;
use crate::conf_sync::PendingWrite;
use crate::model::day::{CalendarData, ConfKey, DaySummary, WeightPoint};
use crate::model::item::{ItemId, ItemPatch, NewItem};
use crate::model::month::MonthCursor;
use crate::model::suggestion::SuggestionResult;
use crate::service::{ServiceError, ServiceResult};
use chrono::NaiveDate;

/// User intents plus service completions.
#[derive(Debug)]
pub enum Msg {
    /// Loads the initial day, month and weight history.
    Start,
    SelectDate(NaiveDate),
    PreviousMonth,
    NextMonth,
    EntryTextChanged(String),
    FocusNext,
    FocusPrevious,
    /// Enter in the entry field.
    Commit,
    /// Click outside the suggestion list.
    CloseSuggestions,
    MultiplierChanged(String),
    ConfInputChanged { key: ConfKey, text: String },
    EditItem { id: ItemId, patch: ItemPatch },
    /// One more serving of an item in the day view.
    PlusOne(ItemId),
    RemoveItem(ItemId),
    RecordWeight(String),
    Completed(Reply),
}

/// Side effects the host must perform, then answer with a `Reply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    FetchDay { ticket: Ticket, date: NaiveDate },
    FetchMonth { ticket: Ticket, month: MonthCursor },
    Search(SearchRequest),
    WriteConf(PendingWrite),
    AddItem(NewItem),
    EditItem { id: ItemId, patch: ItemPatch },
    RemoveItem(ItemId),
    RecordWeight(WeightPoint),
    FetchWeightHistory { ticket: Ticket, since: NaiveDate },
}

#[derive(Debug)]
pub enum Reply {
    DayLoaded {
        ticket: Ticket,
        result: ServiceResult<DaySummary>,
    },
    MonthLoaded {
        ticket: Ticket,
        month: MonthCursor,
        result: ServiceResult<CalendarData>,
    },
    SearchCompleted {
        ticket: Ticket,
        result: ServiceResult<Vec<SuggestionResult>>,
    },
    ConfWritten {
        write: PendingWrite,
        result: ServiceResult<()>,
    },
    /// Add, edit, "+1" and remove all complete here.
    ItemWritten { result: ServiceResult<()> },
    WeightWritten { result: ServiceResult<()> },
    WeightHistoryLoaded {
        ticket: Ticket,
        result: ServiceResult<Vec<WeightPoint>>,
    },
}

impl Reply {
    /// The failure reply for `request`.
    pub fn failed(request: &Request, error: ServiceError) -> Self {
        match request {
            Request::FetchDay { ticket, .. } => Self::DayLoaded {
                ticket: *ticket,
                result: Err(error),
            },
            Request::FetchMonth { ticket, month } => Self::MonthLoaded {
                ticket: *ticket,
                month: *month,
                result: Err(error),
            },
            Request::Search(search) => Self::SearchCompleted {
                ticket: search.ticket,
                result: Err(error),
            },
            Request::WriteConf(write) => Self::ConfWritten {
                write: *write,
                result: Err(error),
            },
            Request::AddItem(_) | Request::EditItem { .. } | Request::RemoveItem(_) => {
                Self::ItemWritten { result: Err(error) }
            }
            Request::RecordWeight(_) => Self::WeightWritten { result: Err(error) },
            Request::FetchWeightHistory { ticket, .. } => Self::WeightHistoryLoaded {
                ticket: *ticket,
                result: Err(error),
            },
        }
    }
}

/// What one `update` call asks of the host.
#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
    pub requests: Vec<Request>,
    /// The screen changed and should be redrawn.
    pub render: bool,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn render() -> Self {
        Self {
            requests: Vec::new(),
            render: true,
        }
    }

    pub fn with(mut self, request: Request) -> Self {
        self.requests.push(request);
        self
    }
}
