/// Reminders are exposed as their flat record with the derived due fields
pub use nudge_domain::ReminderRecord as ReminderDTO;
