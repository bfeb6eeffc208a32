mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{IReminderRepo, IUserRepo, Repos};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::{info, warn};

#[derive(Clone)]
pub struct NudgeContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub email: Arc<dyn IEmailProvider>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl NudgeContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let config = Config::new();
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                warn!("DATABASE_URL is not set. Using inmemory database");
                Repos::create_inmemory()
            }
        };
        let email: Arc<dyn IEmailProvider> = match &config.resend_api_key {
            Some(api_key) => Arc::new(ResendEmailProvider::new(
                api_key.clone(),
                config.email_from.clone(),
            )?),
            None => Arc::new(InMemoryEmailProvider::new()),
        };

        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            email,
        })
    }

    /// Context backed by inmemory repositories and email provider
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::default(),
            sys: Arc::new(RealSys {}),
            email: Arc::new(InMemoryEmailProvider::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<NudgeContext> {
    NudgeContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).ok()
}

/// Applies the migrations when a database is configured
pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match get_psql_connection_string() {
        Some(connection_string) => connection_string,
        None => {
            info!("No database configured, skipping migrations");
            return Ok(());
        }
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}
