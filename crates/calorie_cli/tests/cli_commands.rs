use calorie_cli::{run, Cli};
use clap::Parser;
use std::path::Path;

fn invoke(db: &Path, args: &[&str]) -> anyhow::Result<String> {
    let db = db.to_str().expect("utf-8 temp path");
    let mut argv = vec!["calorie", "--db", db, "--today", "2024-01-10"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn add_then_day_shows_totals_and_loss() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("calorie.db");

    let added = invoke(&db, &["add", "apple", "52"]).expect("add");
    assert!(added.contains("apple"), "{added}");
    assert!(added.contains("total 52"), "{added}");

    let day = invoke(&db, &["day"]).expect("day");
    assert!(day.contains("2024-01-10"));
    assert!(day.contains("left 1948"), "{day}");
    assert!(day.contains("loss 253g"), "{day}");
}

#[test]
fn multiplier_and_date_apply_to_added_item() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("calorie.db");

    let out = invoke(
        &db,
        &["add", "rice", "130", "--multiplier", "1,5", "--date", "2024-01-09"],
    )
    .expect("add");
    assert!(out.starts_with("2024-01-09"), "{out}");
    assert!(out.contains("total 195"), "{out}");

    let today = invoke(&db, &["day"]).expect("day");
    assert!(today.contains("total 0"), "{today}");
}

#[test]
fn search_and_pick_use_stored_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("calorie.db");
    invoke(&db, &["add", "apple", "52"]).expect("add apple");
    invoke(&db, &["add", "banana", "89"]).expect("add banana");

    let found = invoke(&db, &["search", "apl"]).expect("search");
    assert!(found.starts_with("1. "), "{found}");
    assert!(found.contains("52"), "{found}");
    assert!(!found.contains("banana"), "{found}");

    let picked = invoke(&db, &["pick", "apl", "1", "--date", "2024-01-11"]).expect("pick");
    assert!(picked.contains("apple"), "{picked}");
    assert!(picked.contains("total 52"), "{picked}");

    let missing = invoke(&db, &["pick", "apl", "3"]);
    assert!(missing.is_err());
}

#[test]
fn unparsable_entry_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("calorie.db");

    assert!(invoke(&db, &["add", "just", "words"]).is_err());
    assert!(invoke(&db, &["add", "pear", "40", "--multiplier", "x"]).is_err());
    let day = invoke(&db, &["day"]).expect("day");
    assert!(day.contains("total 0"), "{day}");
}

#[test]
fn plus_one_edit_and_remove_round_out_an_item() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("calorie.db");
    invoke(&db, &["add", "egg", "70"]).expect("add");

    let plus = invoke(&db, &["plus-one", "1"]).expect("plus-one");
    assert!(plus.contains("total 140"), "{plus}");

    let edited = invoke(&db, &["edit", "1", "--calories", "80"]).expect("edit");
    assert!(edited.contains("total 160"), "{edited}");

    let removed = invoke(&db, &["remove", "1"]).expect("remove");
    assert!(removed.contains("total 0"), "{removed}");

    assert!(invoke(&db, &["remove", "1"]).is_err());
    assert!(invoke(&db, &["plus-one", "1"]).is_err());
}

#[test]
fn conf_changes_budget_and_rejects_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("calorie.db");

    let settings = invoke(&db, &["conf", "budget", "1800"]).expect("conf");
    assert!(settings.contains("budget 1800"), "{settings}");
    assert!(settings.contains("metabolism 2000"), "{settings}");

    let day = invoke(&db, &["day"]).expect("day");
    assert!(day.contains("left 1800"), "{day}");

    assert!(invoke(&db, &["conf", "budget", "lots"]).is_err());
    assert!(invoke(&db, &["conf", "appetite", "1"]).is_err());
}

#[test]
fn weight_is_listed_in_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("calorie.db");

    let day = invoke(&db, &["weight", "70,5"]).expect("weight");
    assert!(day.contains("weight 70.50"), "{day}");
    invoke(&db, &["weight", "71", "--date", "2024-01-08"]).expect("weight");

    let history = invoke(&db, &["history"]).expect("history");
    assert_eq!(history, "2024-01-08 71\n2024-01-10 70.50\n");

    assert!(invoke(&db, &["weight", "-3"]).is_err());
}

#[test]
fn calendar_navigates_to_requested_month() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("calorie.db");
    invoke(&db, &["add", "soup", "230", "--date", "2023-12-04"]).expect("add");

    let grid = invoke(&db, &["calendar", "--month", "2023-12"]).expect("calendar");
    let mut lines = grid.lines();
    assert_eq!(lines.next(), Some("2023-12"));
    assert!(grid.contains(" 4 230g"), "{grid}");

    let current = invoke(&db, &["calendar"]).expect("calendar");
    assert!(current.starts_with("2024-01"), "{current}");
    assert!(current.contains(">10"), "{current}");
}
