use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Utc};
use nudge_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }

    fn find_due_by<F: Fn(&Reminder) -> bool>(&self, now: DateTime<Utc>, compare: F) -> Vec<Reminder> {
        let mut reminders = find_by(&self.reminders, |r| compare(r) && r.is_due(now));
        reminders.sort_by(|r1, r2| r1.created.cmp(&r2.created));
        reminders
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        if save(reminder, &self.reminders) {
            Ok(())
        } else {
            Err(anyhow::Error::msg(format!(
                "Reminder with id: {} not found",
                reminder.id
            )))
        }
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.user_id == *user_id);
        reminders.sort_by(|r1, r2| r2.created.cmp(&r1.created));
        Ok(reminders)
    }

    async fn find_due(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        Ok(self.find_due_by(now, |_| true))
    }

    async fn find_due_by_user(
        &self,
        user_id: &ID,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>> {
        Ok(self.find_due_by(now, |r| r.user_id == *user_id))
    }

    async fn update_last_reminder_date(
        &self,
        reminder_id: &ID,
        date: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let updated = update_one(reminder_id, &self.reminders, |r| {
            r.last_reminder_date = Some(date)
        });
        if updated {
            Ok(())
        } else {
            Err(anyhow::Error::msg(format!(
                "Reminder with id: {} not found",
                reminder_id
            )))
        }
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        delete(reminder_id, &self.reminders)
    }
}
