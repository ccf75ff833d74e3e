use calorie_core::view::{Msg, Reply, Request, ViewController};
use calorie_core::{
    ConfKey, Configuration, DaySummary, PendingWrite, ServiceError, SessionOptions,
};
use chrono::NaiveDate;

fn controller() -> ViewController {
    let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    ViewController::new(today, SessionOptions::default())
}

fn set(controller: &mut ViewController, key: ConfKey, text: &str) -> PendingWrite {
    let outcome = controller.update(Msg::ConfInputChanged {
        key,
        text: text.to_string(),
    });
    match outcome.requests.as_slice() {
        [Request::WriteConf(write)] => *write,
        other => panic!("expected one conf write, got {other:?}"),
    }
}

fn ack(controller: &mut ViewController, write: PendingWrite) -> bool {
    controller
        .update(Msg::Completed(Reply::ConfWritten {
            write,
            result: Ok(()),
        }))
        .render
}

#[test]
fn newest_value_wins_regardless_of_ack_order() {
    for newest_first in [true, false] {
        let mut controller = controller();
        let older = set(&mut controller, ConfKey::Metabolism, "100");
        let newer = set(&mut controller, ConfKey::Metabolism, "110");
        assert!(newer.version > older.version);

        if newest_first {
            assert!(ack(&mut controller, newer));
            assert!(!ack(&mut controller, older));
        } else {
            assert!(!ack(&mut controller, older));
            assert!(ack(&mut controller, newer));
        }
        assert_eq!(controller.configuration().metabolism, 110.0);
    }
}

#[test]
fn failed_write_keeps_committed_value_and_typed_input() {
    let mut controller = controller();
    let write = set(&mut controller, ConfKey::Budget, "1500");
    let outcome = controller.update(Msg::Completed(Reply::ConfWritten {
        write,
        result: Err(ServiceError::Transport("offline".to_string())),
    }));

    assert!(!outcome.render);
    assert_eq!(controller.banner(), None);
    assert_eq!(controller.configuration().budget, 2000.0);

    let screen = controller.screen();
    let budget = screen
        .settings
        .iter()
        .find(|field| field.key == ConfKey::Budget)
        .unwrap();
    assert_eq!(budget.input, "1500");
    assert_eq!(budget.committed, 2000.0);
}

#[test]
fn writes_to_different_keys_do_not_interfere() {
    let mut controller = controller();
    let metabolism = set(&mut controller, ConfKey::Metabolism, "2300");
    let budget = set(&mut controller, ConfKey::Budget, "1800,5");

    assert!(ack(&mut controller, budget));
    assert!(ack(&mut controller, metabolism));
    assert_eq!(controller.configuration().metabolism, 2300.0);
    assert_eq!(controller.configuration().budget, 1800.5);
}

#[test]
fn day_load_keeps_keys_written_this_session() {
    let mut controller = controller();
    let start = controller.update(Msg::Start);
    let (ticket, date) = match start.requests.as_slice() {
        [Request::FetchDay { ticket, date }, ..] => (*ticket, *date),
        other => panic!("expected a day fetch first, got {other:?}"),
    };

    let write = set(&mut controller, ConfKey::Metabolism, "2500");
    assert!(ack(&mut controller, write));

    let server = Configuration {
        metabolism: 2000.0,
        budget: 1700.0,
    };
    let loaded = controller.update(Msg::Completed(Reply::DayLoaded {
        ticket,
        result: Ok(DaySummary::from_items(date, server, None, Vec::new())),
    }));

    assert!(loaded.render);
    assert_eq!(controller.configuration().metabolism, 2500.0);
    assert_eq!(controller.configuration().budget, 1700.0);
}
