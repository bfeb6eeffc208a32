mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryReminderRepo;
use nudge_domain::{Reminder, ID};
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// Newest `Reminder`s first
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// Candidates for sending: every `Reminder` whose due date is at or before `now`,
    /// oldest first
    async fn find_due(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>>;
    /// Candidates for sending owned by a single `User`
    async fn find_due_by_user(
        &self,
        user_id: &ID,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>>;
    /// Records that the `Reminder` was sent or reset at `date`.
    /// Fails if the `Reminder` does not exist.
    async fn update_last_reminder_date(
        &self,
        reminder_id: &ID,
        date: DateTime<Utc>,
    ) -> anyhow::Result<()>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1709812800000).unwrap()
    }

    fn reminder_factory(user_id: &ID, days_since_last: Option<i64>, created: i64) -> Reminder {
        let mut reminder = Reminder::new(
            user_id.clone(),
            "acme".into(),
            "Acme".into(),
            10,
            now() - Duration::days(100 - created),
        )
        .unwrap();
        reminder.last_reminder_date = days_since_last.map(|days| now() - Duration::days(days));
        reminder
    }

    #[tokio::test]
    async fn finds_reminders_by_user() {
        let repo = InMemoryReminderRepo::new();
        let user = ID::default();
        let first = reminder_factory(&user, None, 1);
        let second = reminder_factory(&user, None, 2);
        let other = reminder_factory(&ID::default(), None, 3);
        for reminder in [&first, &second, &other] {
            repo.insert(reminder).await.expect("To insert reminder");
        }

        let reminders = repo.find_by_user(&user).await.expect("To find reminders");
        assert_eq!(reminders, vec![second, first.clone()]);

        assert_eq!(repo.delete(&first.id).await, Some(first.clone()));
        assert!(repo.find(&first.id).await.is_none());
        assert!(repo.delete(&first.id).await.is_none());
    }

    #[tokio::test]
    async fn finds_due_candidates() {
        let repo = InMemoryReminderRepo::new();
        let user = ID::default();
        let inert = reminder_factory(&user, None, 1);
        let overdue = reminder_factory(&user, Some(20), 2);
        let due_now = reminder_factory(&ID::default(), Some(10), 3);
        let pending = reminder_factory(&user, Some(3), 4);
        for reminder in [&inert, &due_now, &overdue, &pending] {
            repo.insert(reminder).await.expect("To insert reminder");
        }

        let due = repo.find_due(now()).await.expect("To find due reminders");
        assert_eq!(due, vec![overdue.clone(), due_now]);

        let due = repo
            .find_due_by_user(&user, now())
            .await
            .expect("To find due reminders");
        assert_eq!(due, vec![overdue]);
    }

    #[tokio::test]
    async fn updates_last_reminder_date() {
        let repo = InMemoryReminderRepo::new();
        let reminder = reminder_factory(&ID::default(), Some(20), 1);
        repo.insert(&reminder).await.expect("To insert reminder");

        repo.update_last_reminder_date(&reminder.id, now())
            .await
            .expect("To update reminder");
        let updated = repo.find(&reminder.id).await.expect("To find reminder");
        assert_eq!(updated.last_reminder_date, Some(now()));
        assert!(!updated.is_due(now()));

        assert!(repo
            .update_last_reminder_date(&ID::default(), now())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn save_requires_existing_reminder() {
        let repo = InMemoryReminderRepo::new();
        let mut reminder = reminder_factory(&ID::default(), None, 1);
        assert!(repo.save(&reminder).await.is_err());

        repo.insert(&reminder).await.expect("To insert reminder");
        reminder.days_between_reminders = 42;
        repo.save(&reminder).await.expect("To save reminder");
        assert_eq!(
            repo.find(&reminder.id).await.map(|r| r.days_between_reminders),
            Some(42)
        );
    }
}
