use chrono::{DateTime, Local};
use color_eyre::Result;

use super::reminder::Reminder;

/// A fetched snapshot together with the store object it was read from.
#[derive(Debug, Clone)]
pub struct Fetched<H> {
    pub reminder: Reminder,
    pub handle: H,
}

/// The Reminders capability: request access, fetch incomplete reminders by
/// due window, and persist a completion. Every call blocks until the store
/// answers.
pub trait ReminderStore {
    type Handle;

    fn request_access(&self) -> Result<bool>;

    /// Incomplete reminders due at or before `due_until`, or all incomplete
    /// reminders when it is `None`. `None` means the store returned nothing.
    fn fetch_incomplete(
        &self,
        due_until: Option<DateTime<Local>>,
    ) -> Option<Vec<Fetched<Self::Handle>>>;

    /// Marks the reminder completed and commits. The error is the store's
    /// own description of the failure.
    fn save_completed(&self, handle: &Self::Handle) -> std::result::Result<(), String>;
}
