use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every day is treated as a flat 24 hour bucket, no calendar or timezone arithmetic
pub const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Upper bound for `days_between_reminders` (100 years) so that due date
/// arithmetic can never overflow
pub const MAX_DAYS_BETWEEN_REMINDERS: i64 = 365 * 100;

/// A `Reminder` is a `User`s recurring obligation to take some action on an account
/// they hold at a company, e.g. logging in before the account is deactivated
/// because of inactivity.
///
/// The due state of a `Reminder` is never stored, it is derived from
/// `last_reminder_date` and `days_between_reminders` at the time it is asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `User` that owns this `Reminder` and receives the notifications
    pub user_id: ID,
    pub company_id: String,
    /// Denormalized display name of the company
    pub company_name: String,
    /// The identifier the `User` has at the company, if they told us
    pub company_user_id: Option<String>,
    /// Interval between notifications, always at least 1
    pub days_between_reminders: i64,
    /// When the `Reminder` was last sent or reset. `None` means it has never been
    /// sent and the `Reminder` stays inert until it is reset.
    pub last_reminder_date: Option<DateTime<Utc>>,
    pub created: DateTime<Utc>,
}

/// Where a `Reminder` is in its lifecycle at a given instant.
///
/// `DueToday` and `Overdue` are mutually exclusive and together make up
/// every state where `Reminder::is_due` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DueState {
    /// Never sent, no due date
    #[default]
    Inert,
    /// Due date is in the future
    Pending,
    /// Due date has arrived within the current day bucket
    DueToday,
    /// Due date passed before the current day bucket
    Overdue,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderError {
    #[error(
        "daysBetweenReminders must be between 1 and {}, got: {0}",
        MAX_DAYS_BETWEEN_REMINDERS
    )]
    InvalidInterval(i64),
    #[error("{0} can not be empty")]
    MissingField(&'static str),
    #[error("{0} is not a valid id: {1}")]
    MalformedId(&'static str, String),
    #[error("{0} is not a valid timestamp: {1}")]
    MalformedTimestamp(&'static str, String),
}

impl Reminder {
    pub fn new(
        user_id: ID,
        company_id: String,
        company_name: String,
        days_between_reminders: i64,
        now: DateTime<Utc>,
    ) -> Result<Self, InvalidReminderError> {
        let reminder = Self {
            id: Default::default(),
            user_id,
            company_id,
            company_name,
            company_user_id: None,
            days_between_reminders,
            last_reminder_date: None,
            created: now,
        };
        reminder.validate()?;
        Ok(reminder)
    }

    /// Checks the invariants that every stored `Reminder` must uphold
    pub fn validate(&self) -> Result<(), InvalidReminderError> {
        if self.days_between_reminders < 1
            || self.days_between_reminders > MAX_DAYS_BETWEEN_REMINDERS
        {
            return Err(InvalidReminderError::InvalidInterval(
                self.days_between_reminders,
            ));
        }
        if self.company_id.trim().is_empty() {
            return Err(InvalidReminderError::MissingField("companyId"));
        }
        if self.company_name.trim().is_empty() {
            return Err(InvalidReminderError::MissingField("companyName"));
        }
        Ok(())
    }

    /// `last_reminder_date` + `days_between_reminders` days, if it has ever been sent
    pub fn next_due_date(&self) -> Option<DateTime<Utc>> {
        let last_reminder_date = self.last_reminder_date?;
        last_reminder_date.checked_add_signed(Duration::days(self.days_between_reminders))
    }

    /// Due today or overdue
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_due_date() {
            Some(next_due_date) => next_due_date <= now,
            None => false,
        }
    }

    /// Whole days until the `Reminder` is due, rounded up. Negative when overdue,
    /// zero when due in the current day bucket. A `Reminder` due in a couple of hours
    /// reports 1.
    pub fn days_until_due(&self, now: DateTime<Utc>) -> Option<i64> {
        let next_due_date = self.next_due_date()?;
        let diff = next_due_date - now;
        let mut diff_millis = diff.num_milliseconds();
        // Sub millisecond remainders still count as not yet due
        if diff > Duration::milliseconds(diff_millis) {
            diff_millis += 1;
        }
        Some(ceil_div(diff_millis, MILLIS_PER_DAY))
    }

    pub fn due_state(&self, now: DateTime<Utc>) -> DueState {
        match self.days_until_due(now) {
            None => DueState::Inert,
            Some(_) if !self.is_due(now) => DueState::Pending,
            Some(days) if days < 0 => DueState::Overdue,
            Some(_) => DueState::DueToday,
        }
    }

    /// The line describing this `Reminder` in a notification email
    pub fn email_line(&self) -> String {
        let due = match self.next_due_date() {
            Some(date) => format_due_date(&date),
            None => "Not set".into(),
        };
        format!("- {} (Due: {})", self.company_name, due)
    }

    pub fn to_record(&self, now: DateTime<Utc>) -> ReminderRecord {
        ReminderRecord {
            id: self.id.to_string(),
            user_id: self.user_id.to_string(),
            company_id: self.company_id.clone(),
            company_name: self.company_name.clone(),
            company_user_id: self.company_user_id.clone(),
            days_between_reminders: self.days_between_reminders,
            last_reminder_date: self.last_reminder_date.as_ref().map(RecordTimestamp::new),
            created_at: RecordTimestamp::new(&self.created),
            next_due_date: self.next_due_date().as_ref().map(RecordTimestamp::new),
            is_due: self.is_due(now),
            days_until_due: self.days_until_due(now),
            due_state: self.due_state(now),
        }
    }

    /// Builds a `Reminder` from an untrusted flat record. Derived fields in the
    /// record are ignored, they are always recomputed.
    pub fn from_record(record: ReminderRecord) -> Result<Self, InvalidReminderError> {
        let id = parse_id("id", &record.id)?;
        let user_id = parse_id("userId", &record.user_id)?;
        let last_reminder_date = match &record.last_reminder_date {
            Some(ts) => Some(ts.parse("lastReminderDate")?),
            None => None,
        };
        let created = record.created_at.parse("createdAt")?;
        let company_user_id = record
            .company_user_id
            .filter(|company_user_id| !company_user_id.trim().is_empty());

        let reminder = Self {
            id,
            user_id,
            company_id: record.company_id,
            company_name: record.company_name,
            company_user_id,
            days_between_reminders: record.days_between_reminders,
            last_reminder_date,
            created,
        };
        reminder.validate()?;
        Ok(reminder)
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Ceiling of `a / b` for a positive `b`
fn ceil_div(a: i64, b: i64) -> i64 {
    -((-a).div_euclid(b))
}

pub fn format_due_date(date: &DateTime<Utc>) -> String {
    // e.g. 3/7/2024
    date.format("%-m/%-d/%Y").to_string()
}

fn parse_id(field: &'static str, value: &str) -> Result<ID, InvalidReminderError> {
    value
        .parse()
        .map_err(|_| InvalidReminderError::MalformedId(field, value.to_string()))
}

/// A timestamp in a `ReminderRecord`. Always written as a RFC 3339 string but
/// epoch millis are accepted as well when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordTimestamp {
    Millis(i64),
    Text(String),
}

impl RecordTimestamp {
    pub fn new(date: &DateTime<Utc>) -> Self {
        Self::Text(date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    fn parse(&self, field: &'static str) -> Result<DateTime<Utc>, InvalidReminderError> {
        match self {
            Self::Millis(millis) => Utc
                .timestamp_millis_opt(*millis)
                .single()
                .ok_or_else(|| InvalidReminderError::MalformedTimestamp(field, millis.to_string())),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|date| date.with_timezone(&Utc))
                .map_err(|_| InvalidReminderError::MalformedTimestamp(field, text.clone())),
        }
    }
}

/// Flat representation of a `Reminder` with the derived due state included.
/// This is the shape `Reminder`s have whenever they leave the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecord {
    pub id: String,
    pub user_id: String,
    pub company_id: String,
    pub company_name: String,
    #[serde(default)]
    pub company_user_id: Option<String>,
    pub days_between_reminders: i64,
    #[serde(default)]
    pub last_reminder_date: Option<RecordTimestamp>,
    pub created_at: RecordTimestamp,
    #[serde(default)]
    pub next_due_date: Option<RecordTimestamp>,
    #[serde(default)]
    pub is_due: bool,
    #[serde(default)]
    pub days_until_due: Option<i64>,
    #[serde(default)]
    pub due_state: DueState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        // Thu Mar 07 2024 12:00:00 UTC
        Utc.timestamp_millis_opt(1709812800000).unwrap()
    }

    fn reminder_factory(days: i64, last_reminder_date: Option<DateTime<Utc>>) -> Reminder {
        let mut reminder =
            Reminder::new(ID::default(), "acme".into(), "Acme".into(), days, now()).unwrap();
        reminder.last_reminder_date = last_reminder_date;
        reminder
    }

    #[test]
    fn rejects_invalid_intervals() {
        let create = |days| Reminder::new(ID::default(), "acme".into(), "Acme".into(), days, now());
        assert_eq!(
            create(0).unwrap_err(),
            InvalidReminderError::InvalidInterval(0)
        );
        assert!(create(-3).is_err());
        assert!(create(MAX_DAYS_BETWEEN_REMINDERS + 1).is_err());
        assert!(create(1).is_ok());
        assert!(create(MAX_DAYS_BETWEEN_REMINDERS).is_ok());
    }

    #[test]
    fn rejects_missing_company() {
        let res = Reminder::new(ID::default(), "".into(), "Acme".into(), 10, now());
        assert_eq!(
            res.unwrap_err(),
            InvalidReminderError::MissingField("companyId")
        );
        let res = Reminder::new(ID::default(), "acme".into(), "  ".into(), 10, now());
        assert_eq!(
            res.unwrap_err(),
            InvalidReminderError::MissingField("companyName")
        );
    }

    #[test]
    fn next_due_date_adds_interval() {
        let last = now() - Duration::days(3);
        let reminder = reminder_factory(14, Some(last));
        assert_eq!(reminder.next_due_date(), Some(last + Duration::days(14)));
    }

    #[test]
    fn never_sent_reminder_is_inert() {
        let reminder = reminder_factory(1, None);
        assert_eq!(reminder.next_due_date(), None);
        assert_eq!(reminder.days_until_due(now()), None);
        assert!(!reminder.is_due(now()));
        assert_eq!(reminder.due_state(now()), DueState::Inert);
    }

    #[test]
    fn due_exactly_now() {
        let reminder = reminder_factory(1, Some(now() - Duration::days(1)));
        assert!(reminder.is_due(now()));
        assert_eq!(reminder.days_until_due(now()), Some(0));
        assert_eq!(reminder.due_state(now()), DueState::DueToday);
    }

    #[test]
    fn due_a_few_hours_ago_is_still_due_today() {
        let reminder = reminder_factory(
            1,
            Some(now() - Duration::days(1) - Duration::hours(5)),
        );
        assert!(reminder.is_due(now()));
        assert_eq!(reminder.days_until_due(now()), Some(0));
        assert_eq!(reminder.due_state(now()), DueState::DueToday);
    }

    #[test]
    fn overdue() {
        let reminder = reminder_factory(2, Some(now() - Duration::days(5)));
        assert!(reminder.is_due(now()));
        assert_eq!(reminder.days_until_due(now()), Some(-3));
        assert_eq!(reminder.due_state(now()), DueState::Overdue);

        let reminder = reminder_factory(2, Some(now() - Duration::days(3) - Duration::hours(1)));
        assert_eq!(reminder.days_until_due(now()), Some(-1));
    }

    #[test]
    fn not_yet_due() {
        let reminder = reminder_factory(30, Some(now() - Duration::days(7)));
        assert!(!reminder.is_due(now()));
        assert_eq!(reminder.days_until_due(now()), Some(23));
        assert_eq!(reminder.due_state(now()), DueState::Pending);
    }

    #[test]
    fn fraction_of_a_day_rounds_up() {
        // Due in 0.1 days
        let last = now() - Duration::days(1) + Duration::milliseconds(MILLIS_PER_DAY / 10);
        let reminder = reminder_factory(1, Some(last));
        assert!(!reminder.is_due(now()));
        assert_eq!(reminder.days_until_due(now()), Some(1));
        assert_eq!(reminder.due_state(now()), DueState::Pending);
    }

    #[test]
    fn due_in_less_than_a_millisecond_is_not_due_yet() {
        let last = now() - Duration::days(1) + Duration::microseconds(500);
        let reminder = reminder_factory(1, Some(last));
        assert!(!reminder.is_due(now()));
        assert_eq!(reminder.days_until_due(now()), Some(1));
        assert_eq!(reminder.due_state(now()), DueState::Pending);

        let last = now() - Duration::days(1) - Duration::microseconds(500);
        let reminder = reminder_factory(1, Some(last));
        assert!(reminder.is_due(now()));
        assert_eq!(reminder.days_until_due(now()), Some(0));
        assert_eq!(reminder.due_state(now()), DueState::DueToday);
    }

    #[test]
    fn ceil_div_rounds_towards_positive_infinity() {
        assert_eq!(ceil_div(0, 10), 0);
        assert_eq!(ceil_div(1, 10), 1);
        assert_eq!(ceil_div(10, 10), 1);
        assert_eq!(ceil_div(11, 10), 2);
        assert_eq!(ceil_div(-1, 10), 0);
        assert_eq!(ceil_div(-10, 10), -1);
        assert_eq!(ceil_div(-11, 10), -1);
        assert_eq!(ceil_div(-20, 10), -2);
    }

    #[test]
    fn email_line() {
        let reminder = reminder_factory(1, Some(now() - Duration::days(1)));
        assert_eq!(reminder.email_line(), "- Acme (Due: 3/7/2024)");
        let reminder = reminder_factory(1, None);
        assert_eq!(reminder.email_line(), "- Acme (Due: Not set)");
    }

    #[test]
    fn record_includes_derived_fields() {
        let mut reminder = reminder_factory(1, Some(now() - Duration::days(1)));
        reminder.company_user_id = Some("jane.doe".into());
        let record = reminder.to_record(now());
        assert!(record.is_due);
        assert_eq!(record.days_until_due, Some(0));
        assert_eq!(
            record.next_due_date,
            Some(RecordTimestamp::Text("2024-03-07T12:00:00Z".into()))
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["companyUserId"], "jane.doe");
        assert_eq!(json["lastReminderDate"], "2024-03-06T12:00:00Z");
        assert_eq!(json["isDue"], true);
        assert_eq!(json["dueState"], "dueToday");

        let inert = reminder_factory(1, None).to_record(now());
        let json = serde_json::to_value(&inert).unwrap();
        assert!(json["lastReminderDate"].is_null());
        assert!(json["nextDueDate"].is_null());
        assert!(json["daysUntilDue"].is_null());
        assert_eq!(json["isDue"], false);
        assert_eq!(json["dueState"], "inert");
    }

    #[test]
    fn record_round_trip_keeps_stored_fields() {
        let mut reminder = reminder_factory(
            9,
            Some(now() - Duration::days(2) + Duration::nanoseconds(1234)),
        );
        reminder.company_user_id = Some("jane.doe".into());
        let parsed = Reminder::from_record(reminder.to_record(now())).unwrap();
        assert_eq!(parsed, reminder);
        assert_eq!(parsed.days_until_due(now()), reminder.days_until_due(now()));

        let inert = reminder_factory(3, None);
        assert_eq!(Reminder::from_record(inert.to_record(now())).unwrap(), inert);
    }

    #[test]
    fn record_accepts_millis_and_missing_derived_fields() {
        let id = ID::default();
        let user_id = ID::default();
        let json = serde_json::json!({
            "id": id.to_string(),
            "userId": user_id.to_string(),
            "companyId": "acme",
            "companyName": "Acme",
            "companyUserId": null,
            "daysBetweenReminders": 1,
            "lastReminderDate": 1709726400000i64,
            "createdAt": "2024-01-01T00:00:00.000Z"
        });
        let record: ReminderRecord = serde_json::from_value(json).unwrap();
        let reminder = Reminder::from_record(record).unwrap();
        assert_eq!(reminder.id, id);
        assert_eq!(reminder.user_id, user_id);
        assert_eq!(reminder.company_user_id, None);
        assert_eq!(reminder.next_due_date(), Some(now()));
        assert!(reminder.is_due(now()));
    }

    #[test]
    fn record_rejects_malformed_input() {
        let mut record = reminder_factory(1, None).to_record(now());
        record.user_id = "user-1".into();
        assert_eq!(
            Reminder::from_record(record).unwrap_err(),
            InvalidReminderError::MalformedId("userId", "user-1".into())
        );

        let mut record = reminder_factory(1, None).to_record(now());
        record.last_reminder_date = Some(RecordTimestamp::Text("yesterday".into()));
        assert!(matches!(
            Reminder::from_record(record),
            Err(InvalidReminderError::MalformedTimestamp("lastReminderDate", _))
        ));

        let mut record = reminder_factory(1, None).to_record(now());
        record.days_between_reminders = 0;
        assert_eq!(
            Reminder::from_record(record).unwrap_err(),
            InvalidReminderError::InvalidInterval(0)
        );
    }
}
