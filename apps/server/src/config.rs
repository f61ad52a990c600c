use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use chrono_tz::Tz;
use moneymap_core::alerts::DEFAULT_ALERT_CONCURRENCY;
use moneymap_core::utils::time_utils::{parse_timezone, DEFAULT_BUDGET_TZ};

pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_EMAIL_FROM: &str = "Moneymap <onboarding@resend.dev>";
pub const DEFAULT_CURRENCY_PREFIX: &str = "Rs.";

/// Six hours between budget alert runs.
const DEFAULT_ALERT_INTERVAL_SECS: u64 = 6 * 60 * 60;

/// Lets the server finish starting before the first run.
const DEFAULT_ALERT_INITIAL_DELAY_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSchedule {
    pub interval: Duration,
    pub initial_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    /// `None` disables delivery.
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub from: String,
    pub currency_prefix: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub alert_schedule: AlertSchedule,
    pub alert_concurrency: usize,
    pub budget_timezone: Tz,
    pub email: EmailConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/app.db".to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            alert_schedule: AlertSchedule {
                interval: Duration::from_secs(DEFAULT_ALERT_INTERVAL_SECS),
                initial_delay: Duration::from_secs(DEFAULT_ALERT_INITIAL_DELAY_SECS),
            },
            alert_concurrency: DEFAULT_ALERT_CONCURRENCY,
            budget_timezone: DEFAULT_BUDGET_TZ,
            email: EmailConfig {
                resend_api_key: None,
                resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
                from: DEFAULT_EMAIL_FROM.to_string(),
                currency_prefix: DEFAULT_CURRENCY_PREFIX.to_string(),
            },
        }
    }
}

impl Config {
    /// Reads `MM_*` variables, honouring a `.env` file.
    ///
    /// Malformed numbers, addresses or timezones are reported instead of
    /// silently replaced by defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let listen_addr = parse_or(&var, "MM_LISTEN_ADDR", defaults.listen_addr)?;
        let db_path = var("MM_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow = match var("MM_CORS_ALLOW_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_allow,
        };
        let timeout_ms: u64 = parse_or(&var, "MM_REQUEST_TIMEOUT_MS", 30_000)?;
        let interval_secs: u64 =
            parse_or(&var, "MM_ALERT_INTERVAL_SECS", DEFAULT_ALERT_INTERVAL_SECS)?;
        anyhow::ensure!(interval_secs > 0, "MM_ALERT_INTERVAL_SECS must be positive");
        let initial_delay_secs: u64 = parse_or(
            &var,
            "MM_ALERT_INITIAL_DELAY_SECS",
            DEFAULT_ALERT_INITIAL_DELAY_SECS,
        )?;
        let alert_concurrency: usize =
            parse_or(&var, "MM_ALERT_CONCURRENCY", DEFAULT_ALERT_CONCURRENCY)?;
        anyhow::ensure!(alert_concurrency > 0, "MM_ALERT_CONCURRENCY must be at least 1");
        let budget_timezone = match var("MM_ALERT_TIMEZONE") {
            Some(name) => parse_timezone(&name).context("Invalid MM_ALERT_TIMEZONE")?,
            None => defaults.budget_timezone,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            alert_schedule: AlertSchedule {
                interval: Duration::from_secs(interval_secs),
                initial_delay: Duration::from_secs(initial_delay_secs),
            },
            alert_concurrency,
            budget_timezone,
            email: EmailConfig {
                resend_api_key: var("MM_RESEND_API_KEY"),
                resend_api_url: var("MM_RESEND_API_URL").unwrap_or(defaults.email.resend_api_url),
                from: var("MM_EMAIL_FROM").unwrap_or(defaults.email.from),
                currency_prefix: var("MM_CURRENCY_PREFIX")
                    .unwrap_or(defaults.email.currency_prefix),
            },
        })
    }
}

fn parse_or<T, V>(var: &V, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    V: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {} '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}
