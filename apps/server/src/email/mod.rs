//! Email delivery for budget alerts.

pub mod templates;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use moneymap_core::alerts::{BudgetAlert, BudgetAlertNotifierTrait};
use moneymap_core::errors::{Error, Result};

use crate::config::EmailConfig;
use templates::render_budget_alert;

const EMAIL_API_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Sends budget alerts through the Resend HTTP API.
pub struct ResendEmailNotifier {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
    currency_prefix: String,
}

impl ResendEmailNotifier {
    pub fn new(config: &EmailConfig, api_key: String) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(EMAIL_API_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.resend_api_url.trim_end_matches('/')),
            api_key,
            from: config.from.clone(),
            currency_prefix: config.currency_prefix.clone(),
        })
    }
}

#[async_trait]
impl BudgetAlertNotifierTrait for ResendEmailNotifier {
    async fn send_budget_alert(&self, alert: &BudgetAlert) -> Result<()> {
        let email = render_budget_alert(alert, &self.currency_prefix);
        let payload = SendEmailRequest {
            from: &self.from,
            to: [alert.user_email.as_str()],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Notification(format!("Email request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Notification(format!(
                "Email API returned {}: {}",
                status, body
            )));
        }

        debug!("Budget alert email accepted for {}", alert.user_email);
        Ok(())
    }
}

/// Used when no email API key is configured. Every send fails, so no
/// alert is marked as delivered.
pub struct DisabledNotifier;

#[async_trait]
impl BudgetAlertNotifierTrait for DisabledNotifier {
    async fn send_budget_alert(&self, alert: &BudgetAlert) -> Result<()> {
        Err(Error::Notification(format!(
            "Email delivery is disabled; alert for budget {} not sent",
            alert.budget_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Captured {
        requests: Mutex<Vec<(Option<String>, serde_json::Value)>>,
    }

    async fn spawn_email_api(status: StatusCode) -> (String, Arc<Captured>) {
        let captured = Arc::new(Captured::default());
        let app = Router::new()
            .route(
                "/emails",
                post(
                    move |State(captured): State<Arc<Captured>>,
                          headers: HeaderMap,
                          Json(body): Json<serde_json::Value>| async move {
                        let auth = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        captured.requests.lock().unwrap().push((auth, body));
                        (status, Json(serde_json::json!({ "id": "email-1" })))
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), captured)
    }

    fn email_config(url: &str) -> EmailConfig {
        EmailConfig {
            resend_api_key: Some("re_test".to_string()),
            resend_api_url: url.to_string(),
            from: "Moneymap <alerts@example.com>".to_string(),
            currency_prefix: "Rs.".to_string(),
        }
    }

    fn alert() -> BudgetAlert {
        BudgetAlert {
            budget_id: "b1".to_string(),
            user_name: "Asha".to_string(),
            user_email: "asha@example.com".to_string(),
            percentage_used: dec!(90),
            budget_amount: dec!(1000),
            total_expenses: dec!(900),
            remaining: dec!(100),
        }
    }

    #[tokio::test]
    async fn posts_rendered_alert_with_bearer_key() {
        let (url, captured) = spawn_email_api(StatusCode::OK).await;
        let notifier = ResendEmailNotifier::new(&email_config(&url), "re_test".to_string()).unwrap();

        notifier.send_budget_alert(&alert()).await.unwrap();

        let requests = captured.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (auth, body) = &requests[0];
        assert_eq!(auth.as_deref(), Some("Bearer re_test"));
        assert_eq!(body["from"], "Moneymap <alerts@example.com>");
        assert_eq!(body["to"][0], "asha@example.com");
        assert_eq!(body["subject"], "Budget Alert");
        assert!(body["text"].as_str().unwrap().contains("90.0%"));
    }

    #[tokio::test]
    async fn rejected_request_is_a_notification_error() {
        let (url, _) = spawn_email_api(StatusCode::UNPROCESSABLE_ENTITY).await;
        let notifier = ResendEmailNotifier::new(&email_config(&url), "re_test".to_string()).unwrap();

        let err = notifier.send_budget_alert(&alert()).await.unwrap_err();

        assert!(matches!(err, Error::Notification(msg) if msg.contains("422")));
    }

    #[tokio::test]
    async fn disabled_notifier_never_succeeds() {
        let err = DisabledNotifier.send_budget_alert(&alert()).await.unwrap_err();
        assert!(matches!(err, Error::Notification(_)));
    }
}
