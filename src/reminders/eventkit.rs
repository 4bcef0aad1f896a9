use std::sync::mpsc;

use block2::RcBlock;
use chrono::{DateTime, Local, TimeZone};
use color_eyre::eyre::{eyre, Result};
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2_event_kit::{
    EKAuthorizationStatus, EKCalendar, EKEntityType, EKEventStore, EKReminder,
};
use objc2_foundation::{NSArray, NSCalendar, NSDate, NSError, NSInteger};

use super::reminder::{Due, Reminder};
use super::store::{Fetched, ReminderStore};

/// Seconds between Unix epoch (1970-01-01) and NSDate reference date (2001-01-01)
const NSDATE_UNIX_OFFSET: f64 = 978307200.0;

/// Value of an NSDateComponents field that was never set.
const DATE_COMPONENT_UNDEFINED: NSInteger = NSInteger::MAX;

pub struct EventKitStore {
    store: Retained<EKEventStore>,
    lists: Vec<String>,
}

impl EventKitStore {
    /// `lists` restricts every query to reminder lists with these titles;
    /// empty means all lists.
    pub fn new(lists: Vec<String>) -> Result<Self> {
        let store = unsafe { EKEventStore::new() };
        Ok(Self { store, lists })
    }

    pub fn authorization_status() -> EKAuthorizationStatus {
        unsafe { EKEventStore::authorizationStatusForEntityType(EKEntityType::Reminder) }
    }

    fn calendars(&self) -> Option<Retained<NSArray<EKCalendar>>> {
        if self.lists.is_empty() {
            return None;
        }

        let ek_calendars = unsafe { self.store.calendarsForEntityType(EKEntityType::Reminder) };
        let mut selected = Vec::new();
        let mut titles = Vec::new();

        for i in 0..ek_calendars.len() {
            let cal = ek_calendars.objectAtIndex(i);
            let title = unsafe { cal.title().to_string() };
            if self.lists.iter().any(|l| *l == title) {
                selected.push(cal);
            }
            titles.push(title);
        }

        for list in &self.lists {
            if !titles.contains(list) {
                log::warn!("Reminder list '{}' not found", list);
            }
        }

        log::debug!(
            "Restricting to {} of {} reminder lists",
            selected.len(),
            ek_calendars.len()
        );
        Some(NSArray::from_retained_slice(&selected))
    }
}

impl ReminderStore for EventKitStore {
    type Handle = Retained<EKReminder>;

    fn request_access(&self) -> Result<bool> {
        match Self::authorization_status() {
            EKAuthorizationStatus::FullAccess => return Ok(true),
            EKAuthorizationStatus::Denied | EKAuthorizationStatus::Restricted => {
                return Ok(false);
            }
            _ => {}
        }

        let (tx, rx) = mpsc::channel();
        let block = RcBlock::new(move |granted: Bool, _error: *mut NSError| {
            let _ = tx.send(granted.as_bool());
        });

        unsafe {
            if objc2::available!(macos = 14.0) {
                self.store
                    .requestFullAccessToRemindersWithCompletion(&*block as *const _ as *mut _);
            } else {
                #[allow(deprecated)]
                self.store.requestAccessToEntityType_completion(
                    EKEntityType::Reminder,
                    &*block as *const _ as *mut _,
                );
            }
        }

        let granted = rx
            .recv()
            .map_err(|_| eyre!("Failed to receive reminders access response"))?;
        Ok(granted)
    }

    fn fetch_incomplete(
        &self,
        due_until: Option<DateTime<Local>>,
    ) -> Option<Vec<Fetched<Retained<EKReminder>>>> {
        let ns_end = due_until.as_ref().map(datetime_to_nsdate);
        let calendars = self.calendars();

        let predicate = unsafe {
            self.store
                .predicateForIncompleteRemindersWithDueDateStarting_ending_calendars(
                    None,
                    ns_end.as_deref(),
                    calendars.as_deref(),
                )
        };

        let (tx, rx) = mpsc::channel();
        let block = RcBlock::new(move |reminders: *mut NSArray<EKReminder>| {
            let reminders = unsafe { Retained::retain(reminders) };
            let _ = tx.send(reminders);
        });

        unsafe {
            self.store
                .fetchRemindersMatchingPredicate_completion(&predicate, &block);
        }

        let ek_reminders = rx.recv().ok().flatten()?;
        let mut fetched = Vec::with_capacity(ek_reminders.len());

        for i in 0..ek_reminders.len() {
            let rem = ek_reminders.objectAtIndex(i);
            fetched.push(Fetched {
                reminder: convert_reminder(&rem),
                handle: rem,
            });
        }

        log::debug!("Fetched {} incomplete reminders", fetched.len());
        Some(fetched)
    }

    fn save_completed(&self, handle: &Retained<EKReminder>) -> std::result::Result<(), String> {
        unsafe {
            handle.setCompleted(true);
            self.store
                .saveReminder_commit_error(handle, true)
                .map_err(|err| err.localizedDescription().to_string())
        }
    }
}

fn convert_reminder(rem: &EKReminder) -> Reminder {
    let id = unsafe { rem.calendarItemIdentifier().to_string() };
    let title = unsafe { rem.title().to_string() };
    let title = if title.is_empty() { None } else { Some(title) };

    let due = unsafe {
        rem.dueDateComponents().and_then(|comps| {
            let has_time = comps.hour() != DATE_COMPONENT_UNDEFINED;
            comps
                .date()
                .or_else(|| NSCalendar::currentCalendar().dateFromComponents(&comps))
                .map(|date| Due {
                    at: nsdate_to_datetime(&date),
                    has_time,
                })
        })
    };

    Reminder { id, title, due }
}

fn datetime_to_nsdate(dt: &DateTime<Local>) -> Retained<NSDate> {
    let unix_ts = dt.timestamp() as f64;
    let nsdate_ts = unix_ts - NSDATE_UNIX_OFFSET;
    NSDate::dateWithTimeIntervalSinceReferenceDate(nsdate_ts)
}

fn nsdate_to_datetime(date: &NSDate) -> DateTime<Local> {
    let nsdate_ts = date.timeIntervalSinceReferenceDate();
    let unix_ts = (nsdate_ts + NSDATE_UNIX_OFFSET) as i64;
    Local
        .timestamp_opt(unix_ts, 0)
        .single()
        .unwrap_or_else(Local::now)
}
