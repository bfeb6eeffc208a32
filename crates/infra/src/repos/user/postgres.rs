use super::IUserRepo;
use chrono::{DateTime, Utc};
use nudge_domain::{User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    email: String,
    name: Option<String>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        Self {
            id: raw.user_uid.into(),
            email: raw.email,
            name: raw.name,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, email, name, created, updated)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.created)
        .bind(user.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        match sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(user) => user.map(|u| u.into()),
            Err(e) => {
                error!("Unable to find user with id: {}. Error: {:?}", user_id, e);
                None
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        match sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(user) => user.map(|u| u.into()),
            Err(e) => {
                error!("Unable to find user by email. Error: {:?}", e);
                None
            }
        }
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            ORDER BY u.created DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(|u| u.into()).collect())
    }
}
