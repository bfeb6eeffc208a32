use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};

/// A `User` of the service, identified by the email the authentication
/// provider vouches for. Notification emails for all of the `User`s
/// `Reminder`s go to this address.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            email,
            name: None,
            created: now,
            updated: now,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
