//! SMTP notifier.
//!
//! Submits notifications through a STARTTLS relay using lettre's
//! `AsyncSmtpTransport`. Each notification opens its own connection; there
//! is no pooling and no retry.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use lettre::{
    transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport,
    Tokio1Executor,
};
use tracing::{error, info, warn};

use super::{compose_message, DeliveryOutcome, Notifier, NotifyError};
use crate::config::{MailConfig, SMTP_HOST, SMTP_PORT};
use crate::contact::ContactSubmission;

/// Mail relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpRelay {
    pub host: String,
    pub port: u16,
}

impl SmtpRelay {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for SmtpRelay {
    fn default() -> Self {
        Self::new(SMTP_HOST, SMTP_PORT)
    }
}

/// Notifier that submits mail to an SMTP relay.
pub struct SmtpNotifier {
    client: Option<RelayClient>,
    missing_settings: Vec<&'static str>,
    timeout: Duration,
}

struct RelayClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    relay: SmtpRelay,
    from: String,
    to: String,
}

impl SmtpNotifier {
    /// Create a notifier from the mail settings.
    ///
    /// When any setting is missing or a placeholder, no transport is built
    /// and every notification is skipped.
    pub fn new(
        mail: &MailConfig,
        relay: SmtpRelay,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let missing_settings = mail.missing_settings();

        let client = match (&mail.user, &mail.password, &mail.recipient) {
            (Some(user), Some(password), Some(recipient)) if missing_settings.is_empty() => {
                let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&relay.host)?
                    .port(relay.port)
                    .credentials(Credentials::new(user.clone(), password.clone()))
                    .timeout(Some(timeout))
                    .build();

                Some(RelayClient {
                    transport,
                    relay,
                    from: user.clone(),
                    to: recipient.clone(),
                })
            }
            _ => None,
        };

        Ok(Self {
            client,
            missing_settings,
            timeout,
        })
    }

    async fn deliver(
        &self,
        client: &RelayClient,
        submission: &ContactSubmission,
    ) -> Result<(), NotifyError> {
        let message = compose_message(submission, &client.from, &client.to)?;

        match tokio::time::timeout(self.timeout, client.transport.send(message)).await {
            Ok(result) => {
                result?;
                Ok(())
            }
            Err(_) => Err(NotifyError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, submission: &ContactSubmission) -> DeliveryOutcome {
        let Some(client) = &self.client else {
            warn!(
                missing_settings = ?self.missing_settings,
                "notification_skipped_mail_not_configured"
            );
            return DeliveryOutcome::Skipped;
        };

        let start = Instant::now();

        match self.deliver(client, submission).await {
            Ok(()) => {
                info!(
                    recipient = %client.to,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "notification_sent"
                );
                DeliveryOutcome::Sent
            }
            Err(e) => {
                error!(
                    error = %e,
                    error_kind = e.kind(),
                    relay_host = %client.relay.host,
                    relay_port = client.relay.port,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "notification_send_failed"
                );
                DeliveryOutcome::Failed
            }
        }
    }

    fn is_enabled(&self) -> bool {
        self.client.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLACEHOLDER_PASSWORD;
    use crate::contact::ContactForm;
    use tokio::net::TcpListener;
    use tracing_test::traced_test;

    fn mail_config() -> MailConfig {
        MailConfig {
            user: Some("ventas@example.com".to_string()),
            password: Some("app-password".to_string()),
            recipient: Some("equipo@example.com".to_string()),
        }
    }

    fn sample_submission() -> ContactSubmission {
        ContactSubmission::from_form(ContactForm {
            nombre: Some("Ana".to_string()),
            mensaje: Some("Hola".to_string()),
            ..Default::default()
        })
    }

    /// A local port with nothing listening on it.
    async fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn test_default_relay_is_gmail_submission() {
        assert_eq!(SmtpRelay::default(), SmtpRelay::new("smtp.gmail.com", 587));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_placeholder_password_skips_without_connecting() {
        // Would hang for the full timeout if a connection were attempted.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let mail = MailConfig {
            password: Some(PLACEHOLDER_PASSWORD.to_string()),
            ..mail_config()
        };
        let notifier = SmtpNotifier::new(
            &mail,
            SmtpRelay::new("127.0.0.1", port),
            Duration::from_secs(30),
        )
        .unwrap();

        assert!(!notifier.is_enabled());

        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            notifier.notify(&sample_submission()),
        )
        .await
        .unwrap();
        assert_eq!(outcome, DeliveryOutcome::Skipped);

        let accepted =
            tokio::time::timeout(Duration::from_millis(100), listener.accept()).await;
        assert!(accepted.is_err(), "notifier must not open a connection");
        assert!(logs_contain("notification_skipped_mail_not_configured"));
        assert!(logs_contain("EMAIL_PASS"));
    }

    #[tokio::test]
    async fn test_missing_recipient_skips() {
        let mail = MailConfig {
            recipient: None,
            ..mail_config()
        };
        let notifier =
            SmtpNotifier::new(&mail, SmtpRelay::default(), Duration::from_secs(1)).unwrap();

        assert_eq!(
            notifier.notify(&sample_submission()).await,
            DeliveryOutcome::Skipped
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_connection_refused_is_failed() {
        let port = closed_port().await;
        let notifier = SmtpNotifier::new(
            &mail_config(),
            SmtpRelay::new("127.0.0.1", port),
            Duration::from_secs(5),
        )
        .unwrap();

        assert!(notifier.is_enabled());
        assert_eq!(
            notifier.notify(&sample_submission()).await,
            DeliveryOutcome::Failed
        );
        assert!(logs_contain("notification_send_failed"));
        assert!(logs_contain("smtp transport error"));
    }

    #[tokio::test]
    async fn test_silent_relay_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // Accept and hold connections without ever sending a greeting.
        let holder = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let notifier = SmtpNotifier::new(
            &mail_config(),
            SmtpRelay::new("127.0.0.1", port),
            Duration::from_millis(200),
        )
        .unwrap();

        let outcome = tokio::time::timeout(
            Duration::from_secs(5),
            notifier.notify(&sample_submission()),
        )
        .await
        .expect("timeout must bound the smtp exchange");

        assert_eq!(outcome, DeliveryOutcome::Failed);
        holder.abort();
    }

    #[tokio::test]
    async fn test_invalid_sender_is_failed() {
        let mail = MailConfig {
            user: Some("not an address".to_string()),
            ..mail_config()
        };
        let port = closed_port().await;
        let notifier = SmtpNotifier::new(
            &mail,
            SmtpRelay::new("127.0.0.1", port),
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(
            notifier.notify(&sample_submission()).await,
            DeliveryOutcome::Failed
        );
    }
}
