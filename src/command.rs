use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::config::Config;
use crate::error::ReminderError;
use crate::reminders::reminder::sort_by_due;
use crate::reminders::{Reminder, ReminderStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Count,
    List,
    Complete(String),
}

impl Command {
    /// No command means `count`.
    pub fn parse(command: Option<&str>, arg: Option<&str>) -> Result<Self, ReminderError> {
        match command.unwrap_or("count") {
            "count" => Ok(Command::Count),
            "list" => Ok(Command::List),
            "complete" => match arg {
                Some(id) if !id.is_empty() => Ok(Command::Complete(id.to_string())),
                _ => Err(ReminderError::MissingId),
            },
            other => Err(ReminderError::UnknownCommand(other.to_string())),
        }
    }
}

/// One entry of the `list` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(rename = "hasTime", skip_serializing_if = "Option::is_none")]
    pub has_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue: Option<bool>,
}

impl ListItem {
    pub fn from_reminder(reminder: Reminder, now: DateTime<Local>, untitled: &str) -> Self {
        let title = reminder.title.unwrap_or_else(|| untitled.to_string());
        match reminder.due {
            Some(due) => Self {
                id: reminder.id,
                title,
                due: Some(due.time_display()),
                has_time: Some(due.has_time),
                overdue: Some(due.is_overdue(now)),
            },
            None => Self {
                id: reminder.id,
                title,
                due: None,
                has_time: None,
                overdue: None,
            },
        }
    }
}

/// Request access, then run the command. Always yields exactly one line.
pub fn authorize_and_run<S: ReminderStore>(store: &S, command: &Command, config: &Config) -> String {
    match store.request_access() {
        Ok(true) => run(store, command, Local::now(), config),
        Ok(false) => ReminderError::AccessDenied.line(),
        Err(err) => format!("error: {}", err),
    }
}

/// Run one command against an authorized store and return the line to print.
pub fn run<S: ReminderStore>(
    store: &S,
    command: &Command,
    now: DateTime<Local>,
    config: &Config,
) -> String {
    match command {
        Command::Count => count(store, now).to_string(),
        Command::List => list(store, now, config),
        Command::Complete(id) => match complete(store, id) {
            Ok(()) => "ok".to_string(),
            Err(err) => err.line(),
        },
    }
}

/// Last second of the day `now` falls in.
pub fn end_of_today(now: DateTime<Local>) -> Option<DateTime<Local>> {
    let end = now.date_naive().and_hms_opt(23, 59, 59)?;
    Local.from_local_datetime(&end).earliest()
}

fn due_today<S: ReminderStore>(store: &S, now: DateTime<Local>) -> Option<Vec<Reminder>> {
    let end = end_of_today(now)?;
    log::debug!("Fetching incomplete reminders due until {}", end);
    let fetched = store.fetch_incomplete(Some(end))?;
    Some(fetched.into_iter().map(|f| f.reminder).collect())
}

pub fn count<S: ReminderStore>(store: &S, now: DateTime<Local>) -> usize {
    due_today(store, now).map(|r| r.len()).unwrap_or(0)
}

pub fn list_items<S: ReminderStore>(
    store: &S,
    now: DateTime<Local>,
    config: &Config,
) -> Vec<ListItem> {
    let mut reminders = due_today(store, now).unwrap_or_default();
    sort_by_due(&mut reminders);
    reminders
        .into_iter()
        .map(|r| ListItem::from_reminder(r, now, &config.untitled))
        .collect()
}

fn list<S: ReminderStore>(store: &S, now: DateTime<Local>, config: &Config) -> String {
    let items = list_items(store, now, config);
    serde_json::to_string(&items).unwrap_or_else(|err| {
        log::error!("Failed to serialize reminders: {}", err);
        "[]".to_string()
    })
}

pub fn complete<S: ReminderStore>(store: &S, id: &str) -> Result<(), ReminderError> {
    let fetched = store
        .fetch_incomplete(None)
        .ok_or(ReminderError::NoReminders)?;

    let target = fetched
        .into_iter()
        .find(|f| f.reminder.id == id)
        .ok_or(ReminderError::NotFound)?;

    store
        .save_completed(&target.handle)
        .map_err(ReminderError::Save)?;
    log::debug!("Completed reminder {}", id);
    Ok(())
}
