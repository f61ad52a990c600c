use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use moneymap_core::{
    alerts::{
        BudgetAlertNotifierTrait, BudgetAlertService, BudgetAlertServiceTrait, BudgetAlertSettings,
    },
    budgets::{BudgetService, BudgetServiceTrait},
    users::UserRepositoryTrait,
    utils::time_utils::{Clock, SystemClock},
};
use moneymap_storage_sqlite::{
    accounts::AccountRepository,
    budgets::BudgetRepository,
    db::{self, write_actor},
    transactions::TransactionRepository,
    users::UserRepository,
};

use crate::config::Config;
use crate::email::{DisabledNotifier, ResendEmailNotifier};

pub struct AppState {
    pub budget_alert_service: Arc<dyn BudgetAlertServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub user_repository: Arc<dyn UserRepositoryTrait>,
    /// Held for the whole of a budget alert run; scheduled and manual runs
    /// never overlap.
    pub alert_run_guard: Mutex<()>,
}

pub fn init_tracing() {
    let log_format = std::env::var("MM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_notifier(config: &Config) -> anyhow::Result<Arc<dyn BudgetAlertNotifierTrait>> {
    match config.email.resend_api_key.clone() {
        Some(api_key) => {
            tracing::info!("Budget alert emails are sent through {}", config.email.resend_api_url);
            Ok(Arc::new(ResendEmailNotifier::new(&config.email, api_key)?))
        }
        None => {
            tracing::warn!("MM_RESEND_API_KEY is not set; budget alert emails are disabled");
            Ok(Arc::new(DisabledNotifier))
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone()));
    let account_repository = Arc::new(AccountRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let notifier = build_notifier(config)?;

    let budget_alert_service = Arc::new(BudgetAlertService::new(
        budget_repository.clone(),
        transaction_repository.clone(),
        notifier,
        clock.clone(),
        BudgetAlertSettings {
            timezone: config.budget_timezone,
            concurrency: config.alert_concurrency,
        },
    ));

    let budget_service = Arc::new(BudgetService::new(
        budget_repository,
        account_repository,
        transaction_repository,
        clock,
        config.budget_timezone,
    ));

    Ok(Arc::new(AppState {
        budget_alert_service,
        budget_service,
        user_repository,
        alert_run_guard: Mutex::new(()),
    }))
}
