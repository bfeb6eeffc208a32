mod email;
mod reminder;
mod shared;
mod user;
mod user_reminders;

pub use email::{ReminderEmail, DUE_REMINDERS_SUBJECT};
pub use reminder::{
    format_due_date, DueState, InvalidReminderError, RecordTimestamp, Reminder, ReminderRecord,
    MAX_DAYS_BETWEEN_REMINDERS, MILLIS_PER_DAY,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::User;
pub use user_reminders::UserReminders;
