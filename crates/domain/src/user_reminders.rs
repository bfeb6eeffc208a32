use crate::{email::ReminderEmail, reminder::Reminder, shared::entity::ID};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// All the `Reminder`s of one `User` as seen at `date`.
///
/// This is never stored, it is built on demand when `Reminder`s are
/// about to be sent or inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct UserReminders {
    pub user_id: ID,
    /// Every `Reminder` of the group, due or not
    pub reminders: Vec<Reminder>,
    /// The instant due state is evaluated at
    pub date: DateTime<Utc>,
}

impl UserReminders {
    pub fn new(user_id: ID, reminders: Vec<Reminder>, date: DateTime<Utc>) -> Self {
        Self {
            user_id,
            reminders,
            date,
        }
    }

    /// Partitions the `Reminder`s by owner. Groups come in the order their
    /// owner first appears and every group keeps the input order.
    pub fn group_by_user(reminders: Vec<Reminder>, date: DateTime<Utc>) -> Vec<Self> {
        let mut groups: Vec<Self> = Vec::new();
        let mut group_index: HashMap<ID, usize> = HashMap::new();

        for reminder in reminders {
            match group_index.get(&reminder.user_id) {
                Some(&index) => groups[index].reminders.push(reminder),
                None => {
                    group_index.insert(reminder.user_id.clone(), groups.len());
                    groups.push(Self::new(reminder.user_id.clone(), vec![reminder], date));
                }
            }
        }

        groups
    }

    pub fn has_reminders(&self) -> bool {
        !self.reminders.is_empty()
    }

    pub fn due_reminders(&self) -> Vec<&Reminder> {
        self.reminders
            .iter()
            .filter(|reminder| reminder.is_due(self.date))
            .collect()
    }

    pub fn has_due_reminders(&self) -> bool {
        self.reminders
            .iter()
            .any(|reminder| reminder.is_due(self.date))
    }

    /// The email to send for this group, `None` if nothing is due
    pub fn compose_email(&self) -> Option<ReminderEmail> {
        let due_reminders = self.due_reminders();
        if due_reminders.is_empty() {
            return None;
        }
        Some(ReminderEmail::due_reminders(&due_reminders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1709812800000).unwrap()
    }

    fn reminder_factory(user_id: &ID, company_name: &str, due: bool) -> Reminder {
        let mut reminder = Reminder::new(
            user_id.clone(),
            company_name.to_lowercase(),
            company_name.into(),
            30,
            now(),
        )
        .unwrap();
        reminder.last_reminder_date = if due {
            Some(now() - Duration::days(31))
        } else {
            Some(now() - Duration::days(7))
        };
        reminder
    }

    #[test]
    fn groups_by_user_in_input_order() {
        let user1 = ID::default();
        let user2 = ID::default();
        let reminders = vec![
            reminder_factory(&user1, "A", true),
            reminder_factory(&user2, "B", true),
            reminder_factory(&user1, "C", false),
            reminder_factory(&user1, "D", true),
        ];

        let groups = UserReminders::group_by_user(reminders, now());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].user_id, user1);
        assert_eq!(groups[1].user_id, user2);
        let names = groups[0]
            .reminders
            .iter()
            .map(|r| r.company_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["A", "C", "D"]);
        assert_eq!(groups[1].reminders.len(), 1);
        assert!(groups.iter().all(|g| g.date == now()));
    }

    #[test]
    fn grouping_nothing_gives_no_groups() {
        assert!(UserReminders::group_by_user(Vec::new(), now()).is_empty());
    }

    #[test]
    fn filters_due_reminders() {
        let user = ID::default();
        let group = UserReminders::new(
            user.clone(),
            vec![
                reminder_factory(&user, "A", false),
                reminder_factory(&user, "B", true),
            ],
            now(),
        );
        assert!(group.has_reminders());
        assert!(group.has_due_reminders());
        let due = group.due_reminders();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].company_name, "B");

        let email = group.compose_email().expect("Email for due reminders");
        assert!(email.text.contains("- B (Due: 3/6/2024)"));
        assert!(!email.text.contains("- A"));
    }

    #[test]
    fn no_email_when_nothing_is_due() {
        let user = ID::default();
        let mut inert = reminder_factory(&user, "A", false);
        inert.last_reminder_date = None;
        let group = UserReminders::new(
            user.clone(),
            vec![inert, reminder_factory(&user, "B", false)],
            now(),
        );
        assert!(group.has_reminders());
        assert!(!group.has_due_reminders());
        assert!(group.compose_email().is_none());

        let empty = UserReminders::new(user, Vec::new(), now());
        assert!(!empty.has_reminders());
        assert!(empty.compose_email().is_none());
    }

    #[test]
    fn due_state_follows_group_date() {
        let user = ID::default();
        let reminder = reminder_factory(&user, "A", false);
        let later = now() + Duration::days(30);
        let group = UserReminders::new(user, vec![reminder], later);
        assert!(group.has_due_reminders());
    }
}
