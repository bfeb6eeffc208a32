mod admin;
mod cron;
mod reminder;
mod status;
mod user;

pub mod dtos {
    pub use crate::admin::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::admin::api::*;
pub use crate::cron::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
