use crate::dtos::UserDTO;
use nudge_domain::User;
use serde::{Deserialize, Serialize};

pub mod get_me {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user: UserDTO,
        pub is_admin: bool,
    }

    impl APIResponse {
        pub fn new(user: User, is_admin: bool) -> Self {
            Self {
                user: UserDTO::new(user),
                is_admin,
            }
        }
    }
}
