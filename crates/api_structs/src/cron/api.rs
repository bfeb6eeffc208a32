pub mod send_reminders {
    pub type APIResponse = crate::admin::api::RemindersSentResponse;
}
