use std::cell::RefCell;

use chrono::{DateTime, Local};
use color_eyre::Result;

use super::reminder::Reminder;
use super::store::{Fetched, ReminderStore};

#[derive(Debug, Clone)]
struct Entry {
    reminder: Reminder,
    completed: bool,
}

/// In-memory store applying the same due-window predicate as EventKit.
pub struct MemoryStore {
    entries: RefCell<Vec<Entry>>,
    pub granted: bool,
    pub unavailable: bool,
    pub save_error: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            granted: true,
            unavailable: false,
            save_error: None,
        }
    }

    pub fn push(&self, reminder: Reminder, completed: bool) {
        self.entries.borrow_mut().push(Entry {
            reminder,
            completed,
        });
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| e.reminder.id == id && e.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.entries.borrow().iter().filter(|e| e.completed).count()
    }
}

impl ReminderStore for MemoryStore {
    type Handle = usize;

    fn request_access(&self) -> Result<bool> {
        Ok(self.granted)
    }

    fn fetch_incomplete(&self, due_until: Option<DateTime<Local>>) -> Option<Vec<Fetched<usize>>> {
        if self.unavailable {
            return None;
        }

        let fetched = self
            .entries
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.completed)
            .filter(|(_, e)| match (due_until, e.reminder.due) {
                (None, _) => true,
                (Some(end), Some(due)) => due.at <= end,
                (Some(_), None) => false,
            })
            .map(|(i, e)| Fetched {
                reminder: e.reminder.clone(),
                handle: i,
            })
            .collect();

        Some(fetched)
    }

    fn save_completed(&self, handle: &usize) -> std::result::Result<(), String> {
        if let Some(ref err) = self.save_error {
            return Err(err.clone());
        }
        match self.entries.borrow_mut().get_mut(*handle) {
            Some(entry) => {
                entry.completed = true;
                Ok(())
            }
            None => Err("The reminder no longer exists.".to_string()),
        }
    }
}
