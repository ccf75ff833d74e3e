//! Composition root: owns all session state and reduces messages over it.
//!
//! # Responsibility
//! - Turn user intents into state changes and service requests.
//! - Apply service replies, dropping those that lost a race.
//! - Project the owned state into a `Screen`.
//!
//! # Invariants
//! - `update` performs no I/O; effects leave as `Request` values.
//! - Stale replies change nothing and are not logged.
//! - Committed settings change only through ConfSync acknowledgements, or
//!   from a day load for keys not yet written this session.

use crate::autocomplete::{Autocomplete, CommitAction};
use crate::calendar;
use crate::channel::Sequence;
use crate::conf_sync::ConfSync;
use crate::model::day::{CalendarData, ConfKey, Configuration, DaySummary, WeightPoint};
use crate::model::item::{ItemPatch, NewItem};
use crate::search::DEFAULT_SUGGESTION_LIMIT;
use crate::service::ServiceError;
use crate::view::input::{parse_number, parse_quick_entry};
use crate::view::message::{Msg, Outcome, Reply, Request};
use crate::view::screen::{DayPanel, EntryPanel, Screen, SettingField, SuggestionRow};
use crate::view::state::ViewState;
use chrono::{Days, NaiveDate};
use log::warn;
use std::collections::BTreeMap;

/// Text of the banner shown after a failed fetch or write.
pub const INTERNAL_ERROR_BANNER: &str = "internal error";
const DEFAULT_MULTIPLIER_INPUT: &str = "1";
pub const DEFAULT_HISTORY_DAYS: u64 = 90;

/// Per-session tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// How far back the weight history reaches from today.
    pub history_days: u64,
    /// Maximum suggestions shown per query.
    pub suggestion_limit: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            history_days: DEFAULT_HISTORY_DAYS,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

pub struct ViewController {
    options: SessionOptions,
    today: NaiveDate,
    view: ViewState,
    conf: Configuration,
    conf_sync: ConfSync,
    conf_drafts: BTreeMap<ConfKey, String>,
    day: Option<DaySummary>,
    day_sequence: Sequence,
    month_data: CalendarData,
    month_sequence: Sequence,
    history: Vec<WeightPoint>,
    history_sequence: Sequence,
    autocomplete: Autocomplete,
    multiplier_input: String,
    banner: Option<String>,
}

impl ViewController {
    pub fn new(today: NaiveDate, options: SessionOptions) -> Self {
        Self {
            options,
            today,
            view: ViewState::new(today),
            conf: Configuration::default(),
            conf_sync: ConfSync::new(),
            conf_drafts: BTreeMap::new(),
            day: None,
            day_sequence: Sequence::new(),
            month_data: CalendarData::new(),
            month_sequence: Sequence::new(),
            history: Vec::new(),
            history_sequence: Sequence::new(),
            autocomplete: Autocomplete::with_limit(options.suggestion_limit),
            multiplier_input: DEFAULT_MULTIPLIER_INPUT.to_string(),
            banner: None,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Settings used by every computation.
    pub fn configuration(&self) -> Configuration {
        self.conf
    }

    pub fn day(&self) -> Option<&DaySummary> {
        self.day.as_ref()
    }

    pub fn month_data(&self) -> &CalendarData {
        &self.month_data
    }

    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    pub fn weight_history(&self) -> &[WeightPoint] {
        &self.history
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn update(&mut self, msg: Msg) -> Outcome {
        match msg {
            Msg::Start => Outcome::render()
                .with(self.fetch_day())
                .with(self.fetch_month())
                .with(self.fetch_history()),
            Msg::SelectDate(date) => {
                self.view.select_date(date);
                self.day = None;
                Outcome::render().with(self.fetch_day())
            }
            Msg::PreviousMonth => {
                self.view.previous_month();
                self.show_month()
            }
            Msg::NextMonth => {
                self.view.next_month();
                self.show_month()
            }
            Msg::EntryTextChanged(text) => {
                let outcome = Outcome::render();
                match self.autocomplete.on_text_changed(text) {
                    Some(search) => outcome.with(Request::Search(search)),
                    None => outcome,
                }
            }
            Msg::FocusNext => {
                self.autocomplete.focus_next();
                Outcome::render()
            }
            Msg::FocusPrevious => {
                self.autocomplete.focus_previous();
                Outcome::render()
            }
            Msg::Commit => self.commit(),
            Msg::CloseSuggestions => {
                self.autocomplete.close();
                Outcome::render()
            }
            Msg::MultiplierChanged(text) => {
                self.multiplier_input = text;
                Outcome::render()
            }
            Msg::ConfInputChanged { key, text } => self.edit_conf(key, text),
            Msg::EditItem { id, patch } => {
                if patch.validate().is_err() {
                    return Outcome::none();
                }
                Outcome::none().with(Request::EditItem { id, patch })
            }
            Msg::PlusOne(id) => match self.day.as_ref().and_then(|day| day.item(id)) {
                Some(item) => Outcome::none().with(Request::EditItem {
                    id,
                    patch: ItemPatch::plus_one(item),
                }),
                None => Outcome::none(),
            },
            Msg::RemoveItem(id) => Outcome::none().with(Request::RemoveItem(id)),
            Msg::RecordWeight(text) => match parse_number(&text) {
                Ok(weight) if weight > 0.0 => {
                    Outcome::none().with(Request::RecordWeight(WeightPoint {
                        date: self.view.selected_date,
                        weight,
                    }))
                }
                _ => Outcome::none(),
            },
            Msg::Completed(reply) => self.complete(reply),
        }
    }

    pub fn screen(&self) -> Screen {
        let focus = self.autocomplete.focus();
        let suggestions = self
            .autocomplete
            .suggestions()
            .iter()
            .enumerate()
            .map(|(index, suggestion)| SuggestionRow::new(suggestion, focus.index() == Some(index)))
            .collect();

        let settings = ConfKey::ALL
            .iter()
            .map(|&key| SettingField {
                key,
                input: self
                    .conf_drafts
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| self.conf.get(key).to_string()),
                committed: self.conf.get(key),
            })
            .collect();

        Screen {
            today: self.today,
            selected_date: self.view.selected_date,
            day: self
                .day
                .as_ref()
                .map(|summary| DayPanel::new(summary, &self.conf)),
            calendar: calendar::render(
                self.view.month_cursor,
                &self.month_data,
                &self.conf,
                self.view.selected_date,
                self.today,
            ),
            entry: EntryPanel {
                text: self.autocomplete.text().to_string(),
                multiplier: self.multiplier_input.clone(),
                focus,
                suggestions,
            },
            settings,
            weight_history: self.history.clone(),
            banner: self.banner.clone(),
        }
    }

    fn complete(&mut self, reply: Reply) -> Outcome {
        match reply {
            Reply::DayLoaded { ticket, result } => {
                if !self.day_sequence.is_current(ticket) {
                    return Outcome::none();
                }
                match result {
                    Ok(summary) => {
                        for key in ConfKey::ALL {
                            if !self.conf_sync.is_touched(key) {
                                self.conf.set(key, summary.conf.get(key));
                            }
                        }
                        self.day = Some(summary);
                        self.banner = None;
                        Outcome::render()
                    }
                    Err(err) => self.fail("day_fetch", &err),
                }
            }
            Reply::MonthLoaded {
                ticket,
                month,
                result,
            } => {
                if !self.month_sequence.is_current(ticket) || month != self.view.month_cursor {
                    return Outcome::none();
                }
                match result {
                    Ok(data) => {
                        self.month_data = data;
                        self.banner = None;
                        Outcome::render()
                    }
                    Err(err) => self.fail("month_fetch", &err),
                }
            }
            Reply::SearchCompleted { ticket, result } => {
                if !self.autocomplete.is_current(ticket) {
                    return Outcome::none();
                }
                match result {
                    Ok(results) => {
                        self.autocomplete.on_results(ticket, results);
                        Outcome::render()
                    }
                    Err(err) => {
                        warn!("event=search module=view status=error error={err}");
                        Outcome::none()
                    }
                }
            }
            Reply::ConfWritten { write, result } => {
                if self.conf_sync.acknowledge(&write, &result, &mut self.conf) {
                    return Outcome::render();
                }
                if let Err(err) = result {
                    if self.conf_sync.is_latest(&write) {
                        warn!(
                            "event=conf_write module=view status=error key={} error={err}",
                            write.key.as_str()
                        );
                    }
                }
                Outcome::none()
            }
            Reply::ItemWritten { result } => match result {
                Ok(()) => Outcome::render()
                    .with(self.fetch_day())
                    .with(self.fetch_month()),
                Err(err) => self.fail("item_write", &err),
            },
            Reply::WeightWritten { result } => match result {
                Ok(()) => Outcome::render()
                    .with(self.fetch_day())
                    .with(self.fetch_month())
                    .with(self.fetch_history()),
                Err(err) => self.fail("weight_write", &err),
            },
            Reply::WeightHistoryLoaded { ticket, result } => {
                if !self.history_sequence.is_current(ticket) {
                    return Outcome::none();
                }
                match result {
                    Ok(points) => {
                        self.history = points;
                        Outcome::render()
                    }
                    Err(err) => self.fail("history_fetch", &err),
                }
            }
        }
    }

    fn commit(&mut self) -> Outcome {
        let Ok(multiplier) = parse_number(&self.multiplier_input) else {
            return Outcome::none();
        };
        let (name, calories) = match self.autocomplete.commit_action() {
            CommitAction::Suggestion { name, calories } => (name, calories),
            CommitAction::RawText(text) => match parse_quick_entry(&text) {
                Ok(entry) => (entry.name, entry.calories),
                Err(_) => return Outcome::none(),
            },
        };

        let item =
            NewItem::new(name, calories, self.view.selected_date).with_multiplier(multiplier);
        if item.validate().is_err() {
            return Outcome::none();
        }

        self.autocomplete.reset();
        self.multiplier_input = DEFAULT_MULTIPLIER_INPUT.to_string();
        Outcome::render().with(Request::AddItem(item))
    }

    fn edit_conf(&mut self, key: ConfKey, text: String) -> Outcome {
        let parsed = parse_number(&text);
        self.conf_drafts.insert(key, text);
        match parsed {
            Ok(value) => Outcome::render().with(Request::WriteConf(self.conf_sync.set(key, value))),
            Err(_) => Outcome::render(),
        }
    }

    fn show_month(&mut self) -> Outcome {
        self.month_data.clear();
        Outcome::render().with(self.fetch_month())
    }

    fn fail(&mut self, event: &str, err: &ServiceError) -> Outcome {
        warn!("event={event} module=view status=error error={err}");
        self.banner = Some(INTERNAL_ERROR_BANNER.to_string());
        Outcome::render()
    }

    fn fetch_day(&mut self) -> Request {
        Request::FetchDay {
            ticket: self.day_sequence.issue(),
            date: self.view.selected_date,
        }
    }

    fn fetch_month(&mut self) -> Request {
        Request::FetchMonth {
            ticket: self.month_sequence.issue(),
            month: self.view.month_cursor,
        }
    }

    fn fetch_history(&mut self) -> Request {
        let since = self
            .today
            .checked_sub_days(Days::new(self.options.history_days))
            .unwrap_or(NaiveDate::MIN);
        Request::FetchWeightHistory {
            ticket: self.history_sequence.issue(),
            since,
        }
    }
}
