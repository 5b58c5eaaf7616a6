//! Service layer: the notification handlers and their scheduling.

pub mod action_notifier;
pub mod notify_queue;
pub mod reminder_sweep;

pub use action_notifier::ActionNotifier;
pub use notify_queue::NotifyQueue;
pub use reminder_sweep::{ReminderSweep, SweepReport};
