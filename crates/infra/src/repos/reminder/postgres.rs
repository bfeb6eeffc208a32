use super::IReminderRepo;
use chrono::{DateTime, Utc};
use nudge_domain::{InvalidReminderError, Reminder, ID};
use std::convert::TryFrom;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    company_id: String,
    company_name: String,
    company_user_id: Option<String>,
    days_between_reminders: i64,
    last_reminder_date: Option<DateTime<Utc>>,
    created: DateTime<Utc>,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = InvalidReminderError;

    fn try_from(raw: ReminderRaw) -> Result<Self, Self::Error> {
        let reminder = Self {
            id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            company_id: raw.company_id,
            company_name: raw.company_name,
            company_user_id: raw.company_user_id,
            days_between_reminders: raw.days_between_reminders,
            last_reminder_date: raw.last_reminder_date,
            created: raw.created,
        };
        reminder.validate()?;
        Ok(reminder)
    }
}

/// Rows that break the `Reminder` invariants are logged and left out
fn to_domain(raw: ReminderRaw) -> Option<Reminder> {
    let reminder_id = raw.reminder_uid;
    match Reminder::try_from(raw) {
        Ok(reminder) => Some(reminder),
        Err(e) => {
            error!("Stored reminder: {} is invalid. Error: {:?}", reminder_id, e);
            None
        }
    }
}

fn into_domain(reminders: Vec<ReminderRaw>) -> Vec<Reminder> {
    reminders.into_iter().filter_map(to_domain).collect()
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_uid, company_id, company_name, company_user_id, days_between_reminders, last_reminder_date, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(&reminder.company_id)
        .bind(&reminder.company_name)
        .bind(&reminder.company_user_id)
        .bind(reminder.days_between_reminders)
        .bind(reminder.last_reminder_date)
        .bind(reminder.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET company_id = $2,
            company_name = $3,
            company_user_id = $4,
            days_between_reminders = $5,
            last_reminder_date = $6
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.company_id)
        .bind(&reminder.company_name)
        .bind(&reminder.company_user_id)
        .bind(reminder.days_between_reminders)
        .bind(reminder.last_reminder_date)
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(anyhow::Error::msg(format!(
                "Reminder with id: {} not found",
                reminder.id
            )));
        }
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        match sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(reminder) => reminder.and_then(to_domain),
            Err(e) => {
                error!("Unable to find reminder with id: {}. Error: {:?}", reminder_id, e);
                None
            }
        }
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1
            ORDER BY r.created DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_domain(reminders))
    }

    async fn find_due(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.last_reminder_date IS NOT NULL
            AND r.last_reminder_date + r.days_between_reminders * INTERVAL '1 day' <= $1
            ORDER BY r.created ASC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_domain(reminders))
    }

    async fn find_due_by_user(
        &self,
        user_id: &ID,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1
            AND r.last_reminder_date IS NOT NULL
            AND r.last_reminder_date + r.days_between_reminders * INTERVAL '1 day' <= $2
            ORDER BY r.created ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_domain(reminders))
    }

    async fn update_last_reminder_date(
        &self,
        reminder_id: &ID,
        date: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET last_reminder_date = $2
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(date)
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(anyhow::Error::msg(format!(
                "Reminder with id: {} not found",
                reminder_id
            )));
        }
        Ok(())
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        match sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(reminder) => reminder.and_then(to_domain),
            Err(e) => {
                error!("Unable to delete reminder with id: {}. Error: {:?}", reminder_id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use nudge_domain::MAX_DAYS_BETWEEN_REMINDERS;

    fn raw_factory(days_between_reminders: i64) -> ReminderRaw {
        let created = Utc.timestamp_millis_opt(1709812800000).unwrap();
        ReminderRaw {
            reminder_uid: ID::default().inner(),
            user_uid: ID::default().inner(),
            company_id: "acme".into(),
            company_name: "Acme".into(),
            company_user_id: None,
            days_between_reminders,
            last_reminder_date: Some(created - Duration::days(1)),
            created,
        }
    }

    #[test]
    fn converts_valid_rows() {
        let raw = raw_factory(7);
        let reminder_uid = raw.reminder_uid;
        let reminder = Reminder::try_from(raw).expect("Valid row");
        assert_eq!(reminder.id, ID::from(reminder_uid));
        assert_eq!(reminder.days_between_reminders, 7);
    }

    #[test]
    fn leaves_out_rows_with_invalid_interval() {
        assert!(matches!(
            Reminder::try_from(raw_factory(i64::MAX)),
            Err(InvalidReminderError::InvalidInterval(i64::MAX))
        ));
        assert!(Reminder::try_from(raw_factory(0)).is_err());

        let reminders = into_domain(vec![
            raw_factory(1),
            raw_factory(MAX_DAYS_BETWEEN_REMINDERS + 1),
            raw_factory(MAX_DAYS_BETWEEN_REMINDERS),
        ]);
        assert_eq!(reminders.len(), 2);
    }
}
