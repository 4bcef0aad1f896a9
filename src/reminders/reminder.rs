use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: String,
    pub title: Option<String>,
    pub due: Option<Due>,
}

/// A due value as the store reports it. Date-only values sit at local
/// midnight of the due day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Due {
    pub at: DateTime<Local>,
    pub has_time: bool,
}

impl Due {
    pub fn timed(at: DateTime<Local>) -> Self {
        Self { at, has_time: true }
    }

    pub fn date_only(at: DateTime<Local>) -> Self {
        Self { at, has_time: false }
    }

    /// Timed reminders are overdue once their clock time passes, date-only
    /// ones only after their day is over.
    pub fn is_overdue(&self, now: DateTime<Local>) -> bool {
        if self.has_time {
            self.at < now
        } else {
            self.at.date_naive() < now.date_naive()
        }
    }

    pub fn time_display(&self) -> String {
        self.at.format("%H:%M").to_string()
    }
}

/// Stable sort by due instant; undated reminders keep their fetch order at the end.
pub fn sort_by_due(reminders: &mut [Reminder]) {
    reminders.sort_by_key(|r| match r.due {
        Some(due) => (false, Some(due.at)),
        None => (true, None),
    });
}
