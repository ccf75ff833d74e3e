//! HTTP/JSON mapping of controller requests for a remote calorie backend.
//!
//! # Responsibility
//! - Describe each `Request` as method, path and JSON body.
//! - Decode a raw response into the matching completion message.
//!
//! # Invariants
//! - Non-2xx statuses decode to `ServiceError::Status`, whatever the body.
//! - Decoded replies echo the ticket or version of their request.

use crate::model::day::{CalendarData, Configuration, DaySummary, WeightPoint};
use crate::model::item::Item;
use crate::model::month::{format_date, parse_date};
use crate::model::suggestion::SuggestionResult;
use crate::service::{ServiceError, ServiceResult};
use crate::view::{Msg, Reply, Request};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCall {
    pub method: HttpMethod,
    pub path: String,
    /// JSON body for writes.
    pub body: Option<String>,
}

impl HttpCall {
    fn get(path: String) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            body: None,
        }
    }

    fn with_body(method: HttpMethod, path: String, body: serde_json::Value) -> Self {
        Self {
            method,
            path,
            body: Some(body.to_string()),
        }
    }
}

/// The HTTP exchange that carries out `request`.
pub fn http_call(request: &Request) -> HttpCall {
    match request {
        Request::FetchDay { date, .. } => {
            HttpCall::get(format!("/api/summary/{}", format_date(*date)))
        }
        Request::FetchMonth { month, .. } => HttpCall::get(format!("/api/calendar_data/{month}")),
        Request::Search(search) => HttpCall::get(format!(
            "/api/autocomplete/{}",
            urlencoding::encode(&search.query)
        )),
        Request::WriteConf(write) => HttpCall::with_body(
            HttpMethod::Post,
            "/api/conf".to_string(),
            json!({ "key": write.key.as_str(), "value": write.value.to_string() }),
        ),
        Request::AddItem(item) => HttpCall::with_body(
            HttpMethod::Post,
            "/api/item".to_string(),
            json!({
                "name": item.name,
                "calories": item.calories,
                "multiplier": item.multiplier,
                "date": format_date(item.date),
            }),
        ),
        Request::EditItem { id, patch } => HttpCall::with_body(
            HttpMethod::Put,
            format!("/api/item/{id}"),
            json!({
                "name": patch.name,
                "calories": patch.calories,
                "multiplier": patch.multiplier,
            }),
        ),
        Request::RemoveItem(id) => HttpCall {
            method: HttpMethod::Delete,
            path: format!("/api/item/{id}"),
            body: None,
        },
        Request::RecordWeight(point) => HttpCall::with_body(
            HttpMethod::Post,
            "/api/weight".to_string(),
            json!({ "date": format_date(point.date), "weight": point.weight }),
        ),
        Request::FetchWeightHistory { since, .. } => {
            HttpCall::get(format!("/api/weight_history/{}", format_date(*since)))
        }
    }
}

/// Decodes the response to `request` into its completion message.
pub fn decode_reply(request: &Request, status: u16, body: &str) -> Msg {
    if !(200..300).contains(&status) {
        return Msg::Completed(Reply::failed(request, ServiceError::Status(status)));
    }

    let reply = match request {
        Request::FetchDay { ticket, date } => Reply::DayLoaded {
            ticket: *ticket,
            result: decode_summary(*date, body),
        },
        Request::FetchMonth { ticket, month } => Reply::MonthLoaded {
            ticket: *ticket,
            month: *month,
            result: decode_calendar(body),
        },
        Request::Search(search) => Reply::SearchCompleted {
            ticket: search.ticket,
            result: decode_json::<Vec<SuggestionResult>>(body),
        },
        Request::WriteConf(write) => Reply::ConfWritten {
            write: *write,
            result: Ok(()),
        },
        Request::AddItem(_) | Request::EditItem { .. } | Request::RemoveItem(_) => {
            Reply::ItemWritten { result: Ok(()) }
        }
        Request::RecordWeight(_) => Reply::WeightWritten { result: Ok(()) },
        Request::FetchWeightHistory { ticket, .. } => Reply::WeightHistoryLoaded {
            ticket: *ticket,
            result: decode_history(body),
        },
    };
    Msg::Completed(reply)
}

#[derive(Deserialize)]
struct SummaryBody {
    items: Vec<ItemBody>,
    #[serde(default)]
    conf: HashMap<String, String>,
    #[serde(default)]
    weight: Option<f64>,
}

#[derive(Deserialize)]
struct ItemBody {
    id: u64,
    name: String,
    calories: f64,
    multiplier: f64,
    timestamp: i64,
}

#[derive(Deserialize)]
struct CalendarEntry {
    total: f64,
}

#[derive(Deserialize)]
struct HistoryBody {
    weights: Vec<(String, f64)>,
}

fn decode_json<T: DeserializeOwned>(body: &str) -> ServiceResult<T> {
    serde_json::from_str(body).map_err(|err| ServiceError::Decode(err.to_string()))
}

fn decode_date(raw: &str) -> ServiceResult<NaiveDate> {
    parse_date(raw).ok_or_else(|| ServiceError::Decode(format!("bad date `{raw}`")))
}

// The day total is recomputed from items; the body's `total` is not trusted.
fn decode_summary(date: NaiveDate, body: &str) -> ServiceResult<DaySummary> {
    let parsed: SummaryBody = decode_json(body)?;
    let conf = Configuration::from_entries(
        parsed
            .conf
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );
    let items = parsed
        .items
        .into_iter()
        .map(|item| Item {
            id: item.id,
            name: item.name,
            calories: item.calories,
            multiplier: item.multiplier,
            date,
            timestamp: item.timestamp,
        })
        .collect();
    Ok(DaySummary::from_items(date, conf, parsed.weight, items))
}

fn decode_calendar(body: &str) -> ServiceResult<CalendarData> {
    let parsed: HashMap<String, CalendarEntry> = decode_json(body)?;
    parsed
        .into_iter()
        .map(|(raw, entry)| Ok((decode_date(&raw)?, entry.total)))
        .collect()
}

fn decode_history(body: &str) -> ServiceResult<Vec<WeightPoint>> {
    let parsed: HistoryBody = decode_json(body)?;
    let mut points = parsed
        .weights
        .into_iter()
        .map(|(raw, weight)| {
            Ok(WeightPoint {
                date: decode_date(&raw)?,
                weight,
            })
        })
        .collect::<ServiceResult<Vec<_>>>()?;
    points.sort_by_key(|point| point.date);
    Ok(points)
}
