use thiserror::Error;

/// Failures reported to the widget as a single `error: ...` line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderError {
    #[error("access denied")]
    AccessDenied,

    #[error("missing reminder id")]
    MissingId,

    #[error("unknown command '{0}'. Use: count, list, complete <id>")]
    UnknownCommand(String),

    #[error("no reminders found")]
    NoReminders,

    #[error("reminder not found")]
    NotFound,

    #[error("{0}")]
    Save(String),

    #[error("reminders store is only available on macOS")]
    Unavailable,
}

impl ReminderError {
    pub fn line(&self) -> String {
        format!("error: {}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_error_prefix() {
        assert_eq!(ReminderError::AccessDenied.line(), "error: access denied");
        assert_eq!(ReminderError::NotFound.line(), "error: reminder not found");
        assert_eq!(
            ReminderError::Save("The operation couldn’t be completed.".into()).line(),
            "error: The operation couldn’t be completed."
        );
    }

    #[test]
    fn unknown_command_lists_valid_commands() {
        assert_eq!(
            ReminderError::UnknownCommand("foo".into()).line(),
            "error: unknown command 'foo'. Use: count, list, complete <id>"
        );
    }
}
