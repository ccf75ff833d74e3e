//! Command-line front end over a local SQLite calorie store.
//!
//! # Responsibility
//! - Map each subcommand to controller messages and run them to completion.
//! - Print the resulting screen section as plain text.
//!
//! # Invariants
//! - Every command starts a fresh session for `--today`.
//! - A command that leaves the error banner set exits with an error.

pub mod render;

use anyhow::{bail, Context, Result};
use calorie_core::model::month::parse_date;
use calorie_core::service::local::LocalCalorieService;
use calorie_core::view::{Msg, ViewController};
use calorie_core::{ConfKey, Driver, ItemPatch, MonthCursor, SessionOptions};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "calorie")]
#[command(about = "Track calories, weight and estimated weight loss", long_about = None)]
#[command(version)]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, env = "CALORIE_DB_PATH", default_value = "calorie.db", global = true)]
    pub db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "CALORIE_LOG_DIR", global = true)]
    pub log_dir: Option<String>,

    #[arg(long, env = "CALORIE_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Overrides today's date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg, global = true)]
    pub today: Option<NaiveDate>,

    /// Days of weight history to load.
    #[arg(long, default_value_t = 90, global = true)]
    pub history_days: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show items, total and budget for a day
    Day {
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Show the month grid with loss estimates
    Calendar {
        /// Month to show (YYYY-MM); defaults to today's month.
        #[arg(long, value_parser = parse_month_arg)]
        month: Option<MonthCursor>,
    },
    /// Add an item from "<name> <calories>" text
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        #[arg(long, default_value = "1")]
        multiplier: String,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// List suggestions for a query
    Search { query: String },
    /// Add the n-th suggestion (1-based) for a query
    Pick {
        query: String,
        index: usize,
        #[arg(long, default_value = "1")]
        multiplier: String,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Edit name, calories or multiplier of an item
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        calories: Option<f64>,
        #[arg(long)]
        multiplier: Option<f64>,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Log one more serving of an item
    PlusOne {
        id: u64,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Delete an item
    Remove {
        id: u64,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Set metabolism or budget
    Conf {
        #[arg(value_parser = parse_conf_key)]
        key: ConfKey,
        value: String,
    },
    /// Record body weight for a day
    Weight {
        value: String,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Show recorded weights
    History,
}

fn parse_date_arg(raw: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got `{raw}`"))
}

fn parse_month_arg(raw: &str) -> std::result::Result<MonthCursor, String> {
    MonthCursor::parse(raw).ok_or_else(|| format!("expected YYYY-MM, got `{raw}`"))
}

fn parse_conf_key(raw: &str) -> std::result::Result<ConfKey, String> {
    ConfKey::parse(raw).ok_or_else(|| format!("expected metabolism|budget, got `{raw}`"))
}

/// Runs `cli` against its database, writing output to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| calorie_core::default_log_level());
        calorie_core::init_logging(level, log_dir).context("failed to start logging")?;
    }

    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let service = LocalCalorieService::open(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let options = SessionOptions {
        history_days: cli.history_days,
        ..SessionOptions::default()
    };
    let mut session = Session::new(Driver::new(ViewController::new(today, options), service));
    session.dispatch(Msg::Start)?;
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    match cli.command {
        Command::Day { date } => {
            session.select(date)?;
            render::day(&session.screen(), out)?;
        }
        Command::Calendar { month } => {
            if let Some(month) = month {
                session.show_month(month)?;
            }
            render::calendar(&session.screen(), out)?;
        }
        Command::Add {
            text,
            multiplier,
            date,
        } => {
            session.select(date)?;
            session.dispatch(Msg::MultiplierChanged(multiplier))?;
            session.dispatch(Msg::EntryTextChanged(text.join(" ")))?;
            session.dispatch(Msg::CloseSuggestions)?;
            session.commit()?;
            render::day(&session.screen(), out)?;
        }
        Command::Search { query } => {
            session.dispatch(Msg::EntryTextChanged(query))?;
            render::suggestions(&session.screen(), out)?;
        }
        Command::Pick {
            query,
            index,
            multiplier,
            date,
        } => {
            session.select(date)?;
            session.dispatch(Msg::MultiplierChanged(multiplier))?;
            session.dispatch(Msg::EntryTextChanged(query))?;
            let available = session.screen().entry.suggestions.len();
            if index == 0 || index > available {
                bail!("no suggestion #{index}; {available} available");
            }
            for _ in 0..index {
                session.dispatch(Msg::FocusNext)?;
            }
            session.commit()?;
            render::day(&session.screen(), out)?;
        }
        Command::Edit {
            id,
            name,
            calories,
            multiplier,
            date,
        } => {
            session.select(date)?;
            let patch = ItemPatch {
                name,
                calories,
                multiplier,
            };
            patch.validate().context("invalid edit")?;
            session.write(Msg::EditItem { id, patch })?;
            render::day(&session.screen(), out)?;
        }
        Command::PlusOne { id, date } => {
            session.select(date)?;
            session.write(Msg::PlusOne(id))?;
            render::day(&session.screen(), out)?;
        }
        Command::Remove { id, date } => {
            session.select(date)?;
            session.write(Msg::RemoveItem(id))?;
            render::day(&session.screen(), out)?;
        }
        Command::Conf { key, value } => {
            let executed = session.dispatch(Msg::ConfInputChanged { key, text: value })?;
            if executed == 0 {
                bail!("`{}` needs a number", key.as_str());
            }
            render::settings(&session.screen(), out)?;
        }
        Command::Weight { value, date } => {
            session.select(date)?;
            session.write(Msg::RecordWeight(value))?;
            render::day(&session.screen(), out)?;
        }
        Command::History => render::history(&session.screen(), out)?,
    }
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Day { .. } => "day",
        Command::Calendar { .. } => "calendar",
        Command::Add { .. } => "add",
        Command::Search { .. } => "search",
        Command::Pick { .. } => "pick",
        Command::Edit { .. } => "edit",
        Command::PlusOne { .. } => "plus-one",
        Command::Remove { .. } => "remove",
        Command::Conf { .. } => "conf",
        Command::Weight { .. } => "weight",
        Command::History => "history",
    }
}

/// Driver plus the checks every command shares.
struct Session {
    driver: Driver<LocalCalorieService>,
}

impl Session {
    fn new(driver: Driver<LocalCalorieService>) -> Self {
        Self { driver }
    }

    fn screen(&self) -> calorie_core::Screen {
        self.driver.controller().screen()
    }

    /// Dispatches `msg`; fails if a request failed along the way.
    fn dispatch(&mut self, msg: Msg) -> Result<usize> {
        let executed = self.driver.dispatch(msg);
        if let Some(banner) = self.driver.controller().banner() {
            bail!("{banner}");
        }
        Ok(executed)
    }

    /// Like `dispatch`, but the message must issue at least one request.
    fn write(&mut self, msg: Msg) -> Result<()> {
        if self.dispatch(msg)? == 0 {
            bail!("nothing to do; check the item id and value");
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.dispatch(Msg::Commit)? == 0 {
            bail!("expected \"<name> <calories>\" or a suggestion, and a numeric multiplier");
        }
        Ok(())
    }

    fn select(&mut self, date: Option<NaiveDate>) -> Result<()> {
        if let Some(date) = date {
            self.dispatch(Msg::SelectDate(date))?;
        }
        Ok(())
    }

    fn show_month(&mut self, target: MonthCursor) -> Result<()> {
        while self.driver.controller().view().month_cursor < target {
            let before = self.driver.controller().view().month_cursor;
            self.dispatch(Msg::NextMonth)?;
            if self.driver.controller().view().month_cursor == before {
                break;
            }
        }
        while self.driver.controller().view().month_cursor > target {
            let before = self.driver.controller().view().month_cursor;
            self.dispatch(Msg::PreviousMonth)?;
            if self.driver.controller().view().month_cursor == before {
                break;
            }
        }
        Ok(())
    }
}
