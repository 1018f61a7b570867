mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, MailRelayConfig};
pub use repos::{
    degraded_repos, IAssignmentRepo, ICourseRepo, IEnrollmentRepo, ISentReminderRepo, IUserRepo,
    Repos,
};
pub use services::{IMailer, NoopMailer, RelayMailer};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct Context {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl Context {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let mailer = create_mailer(&config);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer,
        }
    }

    /// In-memory context, used in tests and when no database is
    /// configured.
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let mailer = create_mailer(&config);
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            mailer,
        }
    }
}

fn create_mailer(config: &Config) -> Arc<dyn IMailer> {
    match &config.mail_relay {
        Some(relay) => Arc::new(RelayMailer::new(relay.clone())),
        None => Arc::new(NoopMailer),
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> Context {
    match get_psql_connection_string() {
        Some(connection_string) => {
            Context::create(ContextParams {
                postgres_connection_string: connection_string,
            })
            .await
        }
        None => {
            warn!("DATABASE_URL is not set. Falling back to in-memory repositories, nothing will be persisted.");
            Context::create_inmemory()
        }
    }
}

fn get_psql_connection_string() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string().expect("DATABASE_URL env var to be present."))
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
