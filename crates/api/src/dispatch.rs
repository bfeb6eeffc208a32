use nudge_domain::{Reminder, UserReminders, ID};
use nudge_infra::{EmailMessage, NudgeContext};
use std::collections::{HashMap, HashSet};
use tracing::{error, info, warn};

/// What happened to one `User` during a dispatch batch
#[derive(Debug, Clone, PartialEq)]
pub enum UserDispatchOutcome {
    /// One email was sent listing these `Reminder`s
    Sent { reminders: Vec<ID> },
    NothingDue,
    RecipientNotFound,
    SendFailed,
}

#[derive(Debug, Default)]
pub struct DispatchReport {
    /// `User`s that received an email
    pub notified: HashSet<ID>,
    pub outcomes: HashMap<ID, UserDispatchOutcome>,
}

impl DispatchReport {
    pub fn notified_count(&self) -> usize {
        self.notified.len()
    }

    fn record(&mut self, user_id: ID, outcome: UserDispatchOutcome) {
        if let UserDispatchOutcome::Sent { .. } = outcome {
            self.notified.insert(user_id.clone());
        }
        self.outcomes.insert(user_id, outcome);
    }
}

/// Sends at most one email per `User` listing all of their `Reminder`s that are due
/// and marks every listed `Reminder` as sent.
///
/// The given `Reminder`s are only candidates, due state is checked again here.
/// A failing `User` never stops the rest of the batch.
pub async fn dispatch_reminders(reminders: Vec<Reminder>, ctx: &NudgeContext) -> DispatchReport {
    let mut report = DispatchReport::default();
    if reminders.is_empty() {
        return report;
    }

    let now = ctx.sys.now();
    for user_reminders in UserReminders::group_by_user(reminders, now) {
        let outcome = dispatch_user_reminders(&user_reminders, ctx).await;
        report.record(user_reminders.user_id, outcome);
    }

    info!(
        "Dispatched reminders to {} of {} users",
        report.notified_count(),
        report.outcomes.len()
    );
    report
}

async fn dispatch_user_reminders(
    user_reminders: &UserReminders,
    ctx: &NudgeContext,
) -> UserDispatchOutcome {
    let email = match user_reminders.compose_email() {
        Some(email) => email,
        None => return UserDispatchOutcome::NothingDue,
    };

    let user = match ctx.repos.users.find(&user_reminders.user_id).await {
        Some(user) => user,
        None => {
            warn!(
                "Unable to find the recipient of due reminders, user id: {}",
                user_reminders.user_id
            );
            return UserDispatchOutcome::RecipientNotFound;
        }
    };

    let message = EmailMessage::new(user.email, email);
    if let Err(e) = ctx.email.send(&message).await {
        error!(
            "Unable to send due reminders to user: {}. Error: {:?}",
            user.id, e
        );
        return UserDispatchOutcome::SendFailed;
    }

    let sent_at = ctx.sys.now();
    let due_reminders = user_reminders.due_reminders();
    let mut sent = Vec::with_capacity(due_reminders.len());
    for reminder in due_reminders {
        // The email is already out, so a failed update is only logged
        if let Err(e) = ctx
            .repos
            .reminders
            .update_last_reminder_date(&reminder.id, sent_at)
            .await
        {
            error!(
                "Sent reminder: {} but was unable to record it. Error: {:?}",
                reminder.id, e
            );
        }
        sent.push(reminder.id.clone());
    }

    UserDispatchOutcome::Sent { reminders: sent }
}
