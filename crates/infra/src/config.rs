use nudge_utils::create_random_secret;
use tracing::{info, warn};

const DEFAULT_EMAIL_FROM: &str = "Reminders App <onboarding@resend.dev>";

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Emails of the `User`s that are allowed to use the admin routes
    pub admin_emails: Vec<String>,
    /// Secret the scheduled job runner has to provide to trigger
    /// sending of all due reminders
    pub cron_secret: String,
    /// Shared secret used to verify the session tokens issued
    /// by the authentication provider
    pub session_secret: String,
    /// Sender of all notification emails
    pub email_from: String,
    /// Api key for the Resend email api. Emails are only kept in memory
    /// when this is not set.
    pub resend_api_key: Option<String>,
    /// How often the background job sends due reminders
    pub send_reminders_interval_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let cron_secret = match std::env::var("CRON_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find CRON_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(16);
                info!("Secret for triggering the cron route was generated and set to: {}", secret);
                secret
            }
        };
        let session_secret = match std::env::var("SESSION_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                warn!("Did not find SESSION_SECRET environment variable. Sessions issued by the authentication provider will be rejected.");
                create_random_secret(32)
            }
        };
        let admin_emails = parse_admin_emails(&std::env::var("ADMIN_EMAILS").unwrap_or_default());
        if admin_emails.is_empty() {
            info!("No ADMIN_EMAILS provided. The admin routes are disabled.");
        }
        let resend_api_key = std::env::var("RESEND_API_KEY").ok();
        if resend_api_key.is_none() {
            warn!("RESEND_API_KEY is not set. Emails will be kept in memory and not delivered.");
        }

        Self {
            port: parse_env_or_default("PORT", 5000),
            admin_emails,
            cron_secret,
            session_secret,
            email_from: std::env::var("EMAIL_FROM").unwrap_or_else(|_| DEFAULT_EMAIL_FROM.into()),
            resend_api_key,
            send_reminders_interval_secs: parse_env_or_default(
                "SEND_REMINDERS_INTERVAL_SECS",
                60 * 60 * 24,
            ),
        }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_admin_emails(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}

fn parse_env_or_default<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}
