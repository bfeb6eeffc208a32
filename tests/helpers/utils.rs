use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use nudge_api::Claims;
use nudge_sdk::{CreateReminderInput, NudgeSDK, Reminder};

pub fn create_session_token(email: &str, secret: &str) -> String {
    let claims = Claims {
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        email: email.into(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("To encode session token")
}

/// Creates a `Reminder` that was last sent `days_ago` days ago
pub async fn create_reminder(
    sdk: &NudgeSDK,
    company_name: &str,
    days_between_reminders: i64,
    days_ago: Option<i64>,
) -> Reminder {
    let input = CreateReminderInput {
        company_id: company_name.to_lowercase(),
        company_name: company_name.into(),
        company_user_id: None,
        days_between_reminders,
        last_reminder_date: days_ago.map(|days| Utc::now() - Duration::days(days)),
    };
    sdk.reminder
        .create(input)
        .await
        .expect("To create reminder")
        .reminder
}
