use chrono::{DateTime, Utc};
use nudge_domain::{User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub email: String,
    pub name: Option<String>,
    pub created: DateTime<Utc>,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created: user.created,
        }
    }
}
