use calorie_core::service::driver::execute;
use calorie_core::view::{Msg, Reply, Request, ViewController, INTERNAL_ERROR_BANNER};
use calorie_core::{
    CalendarData, CalorieService, ConfKey, Configuration, DaySummary, Driver, Item, ItemId,
    ItemPatch, MonthCursor, NewItem, ServiceError, ServiceResult, SessionOptions,
    SuggestionResult, WeightPoint,
};
use chrono::NaiveDate;
use std::cell::RefCell;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()
}

/// Serves one fixed day and records every write it receives.
struct FixedService {
    day: DaySummary,
    month: CalendarData,
    writes: RefCell<Vec<String>>,
    fail_writes: bool,
}

impl FixedService {
    fn new(items: Vec<Item>, conf: Configuration) -> Self {
        let day = DaySummary::from_items(today(), conf, Some(81.2), items);
        let mut month = CalendarData::new();
        month.insert(today(), day.total);
        Self {
            day,
            month,
            writes: RefCell::new(Vec::new()),
            fail_writes: false,
        }
    }

    fn record(&self, write: String) -> ServiceResult<()> {
        self.writes.borrow_mut().push(write);
        if self.fail_writes {
            return Err(ServiceError::Status(500));
        }
        Ok(())
    }
}

impl CalorieService for FixedService {
    fn fetch_day(&self, date: NaiveDate) -> ServiceResult<DaySummary> {
        let mut day = self.day.clone();
        day.date = date;
        Ok(day)
    }

    fn fetch_month(&self, _month: MonthCursor) -> ServiceResult<CalendarData> {
        Ok(self.month.clone())
    }

    fn search(&self, query: &str) -> ServiceResult<Vec<SuggestionResult>> {
        Ok(vec![
            SuggestionResult::new(format!("{query} soup"), 120.0, vec![0]),
            SuggestionResult::new(format!("{query} salad"), 80.0, vec![0]),
        ])
    }

    fn write_conf(&self, key: ConfKey, value: f64) -> ServiceResult<()> {
        self.record(format!("conf {} {value}", key.as_str()))
    }

    fn add_item(&self, item: &NewItem) -> ServiceResult<ItemId> {
        self.record(format!(
            "add {} {} x{} {}",
            item.name, item.calories, item.multiplier, item.date
        ))?;
        Ok(99)
    }

    fn edit_item(&self, id: ItemId, patch: &ItemPatch) -> ServiceResult<()> {
        self.record(format!("edit {id} {:?}", patch.multiplier))
    }

    fn remove_item(&self, id: ItemId) -> ServiceResult<()> {
        self.record(format!("remove {id}"))
    }

    fn record_weight(&self, point: WeightPoint) -> ServiceResult<()> {
        self.record(format!("weight {} {}", point.date, point.weight))
    }

    fn weight_history(&self, since: NaiveDate) -> ServiceResult<Vec<WeightPoint>> {
        Ok(vec![WeightPoint {
            date: since,
            weight: 82.0,
        }])
    }
}

fn item(id: ItemId, name: &str, calories: f64, multiplier: f64) -> Item {
    Item {
        id,
        name: name.to_string(),
        calories,
        multiplier,
        date: today(),
        timestamp: id as i64,
    }
}

fn started(service: FixedService) -> Driver<FixedService> {
    let mut driver = Driver::new(
        ViewController::new(today(), SessionOptions::default()),
        service,
    );
    assert_eq!(driver.dispatch(Msg::Start), 3);
    driver
}

#[test]
fn day_panel_shows_total_budget_left_and_loss() {
    let conf = Configuration {
        metabolism: 2000.0,
        budget: 2200.0,
    };
    let driver = started(FixedService::new(
        vec![item(1, "porridge", 400.0, 1.0), item(2, "pasta", 700.0, 2.0)],
        conf,
    ));

    let screen = driver.controller().screen();
    let day = screen.day.expect("day should be loaded");
    assert_eq!(day.total, 1800.0);
    assert_eq!(day.budget_left, 400.0);
    assert_eq!(day.loss.grams, 26);
    assert_eq!(day.weight, Some(81.2));
    assert_eq!(day.items[1].effective_calories, 1400.0);
    assert_eq!(driver.controller().configuration(), conf);

    let badge = screen.calendar.cell(today()).and_then(|cell| cell.loss);
    assert_eq!(badge.map(|badge| badge.grams), Some(26));
    assert_eq!(screen.weight_history.len(), 1);
}

#[test]
fn committing_focused_suggestion_adds_it_and_refreshes() {
    let mut driver = started(FixedService::new(vec![], Configuration::default()));
    driver.dispatch(Msg::EntryTextChanged("tomato".to_string()));
    assert_eq!(driver.controller().autocomplete().suggestions().len(), 2);

    driver.dispatch(Msg::FocusPrevious);
    driver.dispatch(Msg::MultiplierChanged("2".to_string()));
    // add + day refresh + month refresh
    assert_eq!(driver.dispatch(Msg::Commit), 3);

    assert_eq!(
        driver.service().writes.borrow().as_slice(),
        ["add tomato salad 80 x2 2024-01-17"]
    );
    let screen = driver.controller().screen();
    assert_eq!(screen.entry.text, "");
    assert_eq!(screen.entry.multiplier, "1");
    assert!(screen.entry.suggestions.is_empty());
}

#[test]
fn unfocused_commit_adds_raw_text_and_invalid_text_is_ignored() {
    let mut driver = started(FixedService::new(vec![], Configuration::default()));

    driver.dispatch(Msg::EntryTextChanged("apple".to_string()));
    assert_eq!(driver.dispatch(Msg::Commit), 0);
    assert_eq!(driver.controller().autocomplete().text(), "apple");

    driver.dispatch(Msg::EntryTextChanged("apple 95".to_string()));
    driver.dispatch(Msg::Commit);
    assert_eq!(
        driver.service().writes.borrow().as_slice(),
        ["add apple 95 x1 2024-01-17"]
    );
}

#[test]
fn plus_one_and_remove_are_fire_and_refresh() {
    let mut driver = started(FixedService::new(
        vec![item(5, "toast", 90.0, 1.0)],
        Configuration::default(),
    ));
    assert_eq!(driver.dispatch(Msg::PlusOne(5)), 3);
    assert_eq!(driver.dispatch(Msg::RemoveItem(5)), 3);
    assert_eq!(
        driver.service().writes.borrow().as_slice(),
        ["edit 5 Some(2.0)", "remove 5"]
    );
}

#[test]
fn weight_write_refreshes_day_month_and_history() {
    let mut driver = started(FixedService::new(vec![], Configuration::default()));
    assert_eq!(driver.dispatch(Msg::RecordWeight("80.4".to_string())), 4);
    assert_eq!(
        driver.service().writes.borrow().as_slice(),
        ["weight 2024-01-17 80.4"]
    );
}

#[test]
fn failed_item_write_shows_banner_until_next_refresh() {
    let mut service = FixedService::new(vec![], Configuration::default());
    service.fail_writes = true;
    let mut driver = started(service);

    driver.dispatch(Msg::EntryTextChanged("kiwi 40".to_string()));
    assert_eq!(driver.dispatch(Msg::Commit), 1);
    assert_eq!(driver.controller().banner(), Some(INTERNAL_ERROR_BANNER));

    driver.dispatch(Msg::SelectDate(today()));
    assert_eq!(driver.controller().banner(), None);
}

#[test]
fn month_navigation_keeps_selected_day() {
    let mut driver = started(FixedService::new(vec![], Configuration::default()));
    driver.dispatch(Msg::PreviousMonth);
    let view = driver.controller().view();
    assert_eq!(view.month_cursor, MonthCursor::new(2023, 12).unwrap());
    assert_eq!(view.selected_date, today());

    driver.dispatch(Msg::NextMonth);
    driver.dispatch(Msg::NextMonth);
    assert_eq!(
        driver.controller().view().month_cursor,
        MonthCursor::new(2024, 2).unwrap()
    );
}

#[test]
fn out_of_order_search_replies_render_latest_query() {
    let service = FixedService::new(vec![], Configuration::default());
    let mut controller = ViewController::new(today(), SessionOptions::default());

    let first = controller
        .update(Msg::EntryTextChanged("be".to_string()))
        .requests;
    let second = controller
        .update(Msg::EntryTextChanged("bean".to_string()))
        .requests;

    let newer = controller.update(execute(&service, &second[0]));
    assert!(newer.render);
    let older = controller.update(execute(&service, &first[0]));
    assert!(!older.render);

    let names: Vec<_> = controller
        .screen()
        .entry
        .suggestions
        .into_iter()
        .map(|row| row.name)
        .collect();
    assert_eq!(names, ["bean soup", "bean salad"]);
}

#[test]
fn closing_list_drops_in_flight_search() {
    let service = FixedService::new(vec![], Configuration::default());
    let mut controller = ViewController::new(today(), SessionOptions::default());
    let requests = controller
        .update(Msg::EntryTextChanged("rice".to_string()))
        .requests;
    controller.update(Msg::CloseSuggestions);

    let outcome = controller.update(execute(&service, &requests[0]));
    assert!(!outcome.render);
    assert!(controller.screen().entry.suggestions.is_empty());
}

#[test]
fn empty_text_never_searches() {
    let mut controller = ViewController::new(today(), SessionOptions::default());
    let outcome = controller.update(Msg::EntryTextChanged(String::new()));
    assert!(outcome
        .requests
        .iter()
        .all(|request| !matches!(request, Request::Search(_))));
}

#[test]
fn stale_month_reply_after_navigation_is_ignored() {
    let service = FixedService::new(vec![], Configuration::default());
    let mut controller = ViewController::new(today(), SessionOptions::default());
    let start = controller.update(Msg::Start).requests;
    controller.update(Msg::NextMonth);

    let month_request = start
        .iter()
        .find(|request| matches!(request, Request::FetchMonth { .. }))
        .unwrap();
    let outcome = controller.update(execute(&service, month_request));
    assert!(!outcome.render);
    assert!(controller.month_data().is_empty());

    let failure = controller.update(Msg::Completed(Reply::failed(
        month_request,
        ServiceError::Status(502),
    )));
    assert!(!failure.render);
    assert_eq!(controller.banner(), None);
}
