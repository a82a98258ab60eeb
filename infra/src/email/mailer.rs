//! Transactional mail delivery over the provider's HTTP API.
//!
//! Implements the core Notifier port for recovery codes. Requests carry a
//! bearer token and a JSON payload; transient failures (network errors,
//! rate limiting, 5xx) are retried with exponential backoff, other client
//! errors fail immediately.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, error, info};

use pnr_core::errors::DomainResult;
use pnr_core::services::auth::Notifier;
use pnr_shared::config::mailer::MailerConfig;
use pnr_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// Initial backoff between delivery attempts
const RETRY_DELAY_MS: u64 = 500;

/// HTTP mail provider client
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailerConfig,
}

impl HttpMailer {
    /// Create a new mail client
    ///
    /// # Arguments
    /// * `config` - Mail provider settings (endpoint, credentials, sender)
    pub fn new(config: MailerConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(InfrastructureError::Http)?;

        info!(
            "Mail client initialized with sender: {}",
            mask_email(&config.from_address)
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(MailerConfig::from_env())
    }

    /// Build the provider payload for one message
    fn payload(&self, to: &str, subject: &str, text: &str) -> serde_json::Value {
        serde_json::json!({
            "from": {
                "email": self.config.from_address,
                "name": self.config.from_name,
            },
            "to": [{ "email": to }],
            "subject": subject,
            "text": text,
        })
    }

    /// Send one message with retry logic
    async fn send_with_retry(
        &self,
        to: &str,
        subject: &str,
        text: &str,
    ) -> Result<(), InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(RETRY_DELAY_MS);

        loop {
            attempts += 1;

            debug!(
                "Sending mail attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_email(to)
            );

            let result = self
                .client
                .post(&self.config.api_url)
                .bearer_auth(&self.config.api_key)
                .json(&self.payload(to, subject, text))
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    info!("Mail sent to {}", mask_email(to));
                    return Ok(());
                }
                Ok(response) => {
                    let status = response.status();
                    error!(
                        "Mail provider returned {} (attempt {}/{})",
                        status, attempts, self.config.max_retries
                    );

                    // Client errors other than rate limiting will not
                    // improve on retry
                    if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
                        return Err(InfrastructureError::Mail(format!(
                            "Mail provider rejected the request: {}",
                            status
                        )));
                    }

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Mail(format!(
                            "Mail provider failed after {} attempts: {}",
                            self.config.max_retries, status
                        )));
                    }
                }
                Err(e) => {
                    error!(
                        "Failed to reach mail provider (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Mail(format!(
                            "Failed to send mail after {} attempts: {}",
                            self.config.max_retries, e
                        )));
                    }
                }
            }

            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

/// Compose the recovery-code message body
fn recovery_body(code: &str) -> String {
    format!(
        "Olá,\n\n\
         Seu código de verificação é: {code}\n\n\
         Digite este código na página de recuperação para continuar. \
         Se você não solicitou a recuperação de senha, ignore este email.\n\n\
         Equipe Patas na Rua"
    )
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn send_recovery_code(&self, to_email: &str, code: &str) -> DomainResult<()> {
        self.send_with_retry(
            to_email,
            "Recuperação de senha - Patas na Rua",
            &recovery_body(code),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> HttpMailer {
        HttpMailer::new(MailerConfig::default()).unwrap()
    }

    #[test]
    fn test_payload_carries_recipient_and_sender() {
        let payload = mailer().payload("maria@example.com", "Assunto", "Corpo");

        assert_eq!(payload["to"][0]["email"], "maria@example.com");
        assert_eq!(payload["subject"], "Assunto");
        assert_eq!(payload["text"], "Corpo");
        assert_eq!(payload["from"]["email"], "nao-responda@patasnarua.org.br");
        assert_eq!(payload["from"]["name"], "Patas na Rua");
    }

    #[test]
    fn test_recovery_body_contains_the_code() {
        let body = recovery_body("483920");
        assert!(body.contains("483920"));
        assert!(body.contains("código de verificação"));
    }
}
