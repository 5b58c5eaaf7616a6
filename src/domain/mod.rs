//! Domain layer: identifiers, events, profiles, messages, and the rules
//! that decide who is notified with what.
//!
//! Nothing here performs I/O. The store and push layers feed these types
//! in and carry the resulting [`PushMessage`]s out.

pub mod action;
pub mod event;
pub mod ids;
pub mod profile;
pub mod push_message;
pub mod reminder;

pub use action::{NotifyAction, NotifyCommand};
pub use event::{Event, EventSize, EventStatus};
pub use ids::{EventId, UserId};
pub use profile::{MemberContact, Profile, PushToken};
pub use push_message::{NotificationContent, PushData, PushMessage};
pub use reminder::ReminderWindow;
