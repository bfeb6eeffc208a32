mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
use nudge_domain::{User, ID};
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    /// Newest `User`s first
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
}
