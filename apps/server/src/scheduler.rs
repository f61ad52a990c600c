//! Background scheduler for the periodic budget alert check.

use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::config::AlertSchedule;
use crate::jobs::run_budget_alerts;
use crate::main_lib::AppState;

/// Starts the background budget alert scheduler.
///
/// After `initial_delay` the first run starts immediately; later runs follow
/// every `interval`. A run that overshoots the interval delays the next tick
/// instead of queueing extra runs.
pub fn start_budget_alert_scheduler(state: Arc<AppState>, schedule: AlertSchedule) {
    tokio::spawn(async move {
        info!(
            "Budget alert scheduler started ({}s interval)",
            schedule.interval.as_secs()
        );

        tokio::time::sleep(schedule.initial_delay).await;

        let mut ticker = interval(schedule.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            run_scheduled_check(&state).await;
        }
    });
}

async fn run_scheduled_check(state: &Arc<AppState>) {
    info!("Running scheduled budget alert check...");
    match run_budget_alerts(state).await {
        Ok(summary) => info!(
            "Scheduled budget alert check completed: {} alerted of {} evaluated",
            summary.alerted, summary.evaluated
        ),
        Err(e) => error!("Scheduled budget alert check failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use moneymap_core::alerts::{BudgetAlertRunSummary, BudgetAlertServiceTrait};
    use moneymap_core::budgets::{BudgetServiceTrait, CurrentBudget};
    use moneymap_core::errors::{Error, Result};
    use moneymap_core::users::{User, UserRepositoryTrait};
    use tokio::sync::Mutex;

    use crate::jobs::try_run_budget_alerts;

    /// Alert service whose runs take `run_time` and that tracks overlap.
    #[derive(Default)]
    struct TimedAlertService {
        run_time: Duration,
        started: AtomicUsize,
        finished: AtomicUsize,
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    #[async_trait]
    impl BudgetAlertServiceTrait for TimedAlertService {
        async fn run_budget_alert_check(&self) -> Result<BudgetAlertRunSummary> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(active, Ordering::SeqCst);
            tokio::time::sleep(self.run_time).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            self.finished.fetch_add(1, Ordering::SeqCst);
            Ok(BudgetAlertRunSummary::new(Utc::now()))
        }
    }

    struct NoBudgets;

    impl BudgetServiceTrait for NoBudgets {
        fn get_current_budget(&self, _: &str, _: Option<&str>) -> Result<CurrentBudget> {
            Err(Error::Unexpected("no budgets".to_string()))
        }
    }

    struct NoUsers;

    impl UserRepositoryTrait for NoUsers {
        fn get_by_external_id(&self, _: &str) -> Result<Option<User>> {
            Ok(None)
        }
    }

    fn state(run_time: Duration) -> (Arc<AppState>, Arc<TimedAlertService>) {
        let service = Arc::new(TimedAlertService {
            run_time,
            ..Default::default()
        });
        let state = Arc::new(AppState {
            budget_alert_service: service.clone(),
            budget_service: Arc::new(NoBudgets),
            user_repository: Arc::new(NoUsers),
            alert_run_guard: Mutex::new(()),
        });
        (state, service)
    }

    fn schedule() -> AlertSchedule {
        AlertSchedule {
            interval: Duration::from_secs(300),
            initial_delay: Duration::from_secs(60),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_run_waits_for_initial_delay_then_follows_interval() {
        let (state, service) = state(Duration::from_secs(10));
        start_budget_alert_scheduler(state, schedule());

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(service.started.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(service.started.load(Ordering::SeqCst), 1);

        // Second run starts at 360s and is still in progress at 361s.
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(service.started.load(Ordering::SeqCst), 2);
        assert_eq!(service.finished.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_and_manual_runs_never_overlap() {
        let (state, service) = state(Duration::from_secs(400));
        start_budget_alert_scheduler(state.clone(), schedule());

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(service.started.load(Ordering::SeqCst), 1);

        assert!(try_run_budget_alerts(&state).await.is_none());

        let waiting = tokio::spawn({
            let state = state.clone();
            async move { run_budget_alerts(&state).await }
        });

        // Scheduled run ends at 460s, the waiting run covers 460s..860s and
        // the overdue tick runs next.
        tokio::time::sleep(Duration::from_secs(1000)).await;
        assert!(waiting.is_finished());
        waiting.await.unwrap().unwrap();
        assert_eq!(service.started.load(Ordering::SeqCst), 3);
        assert_eq!(service.finished.load(Ordering::SeqCst), 2);
        assert_eq!(service.max_active.load(Ordering::SeqCst), 1);
    }
}
