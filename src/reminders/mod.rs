#[cfg(target_os = "macos")]
pub mod eventkit;
#[cfg(test)]
pub mod memory;
pub mod reminder;
pub mod store;

#[cfg(target_os = "macos")]
pub use eventkit::EventKitStore;
pub use reminder::{Due, Reminder};
pub use store::{Fetched, ReminderStore};
