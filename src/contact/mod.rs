//! Contact form: validation, arithmetic human check, relay hand-off.

use std::sync::Arc;

use http::StatusCode;
use reqwest::Client;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::service::ContactConfig;
use crate::observability::metrics::Metrics;

pub mod form;
pub mod relay;

use form::{ContactForm, OutgoingMessage};
use relay::{MessageRelay, WebhookRelay};

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("name, email and message are required")]
    MissingFields,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("human check answer is missing or not a number")]
    InvalidCaptcha,
    #[error("human check answer is wrong")]
    CaptchaFailed,
    #[error("contact mail delivery is not configured")]
    NotConfigured,
    #[error("contact relay failed: {0}")]
    Relay(String),
    #[error("contact body is not readable: {0}")]
    UnreadableBody(String),
}

impl ContactError {
    /// Wire error code.
    pub fn code(&self) -> &'static str {
        match self {
            ContactError::MissingFields => "MISSING_FIELDS",
            ContactError::InvalidEmail => "INVALID_EMAIL",
            ContactError::InvalidCaptcha => "INVALID_CAPTCHA",
            ContactError::CaptchaFailed => "CAPTCHA_FAILED",
            ContactError::NotConfigured => "SERVER_EMAIL_NOT_CONFIGURED",
            ContactError::Relay(_) | ContactError::UnreadableBody(_) => "SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::MissingFields
            | ContactError::InvalidEmail
            | ContactError::InvalidCaptcha
            | ContactError::CaptchaFailed => StatusCode::BAD_REQUEST,
            ContactError::NotConfigured | ContactError::Relay(_) | ContactError::UnreadableBody(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug)]
pub struct ContactService<R> {
    config: Option<ContactConfig>,
    relay: Option<R>,
    metrics: Arc<Metrics>,
}

impl ContactService<WebhookRelay> {
    pub fn from_config(config: Option<&ContactConfig>, client: Client, metrics: Arc<Metrics>) -> Self {
        let relay = config
            .and_then(ContactConfig::relay_url)
            .map(|url| WebhookRelay::new(url.to_string(), client));
        if relay.is_none() {
            warn!("contact relay is not configured, submissions will be refused");
        }
        Self::new(config.cloned(), relay, metrics)
    }
}

impl<R> ContactService<R>
where
    R: MessageRelay + Sync,
{
    pub fn new(config: Option<ContactConfig>, relay: Option<R>, metrics: Arc<Metrics>) -> Self {
        Self { config, relay, metrics }
    }

    pub async fn submit(&self, form: &ContactForm) -> Result<(), ContactError> {
        let result = self.try_submit(form).await;
        let outcome = match &result {
            Ok(()) => "ok",
            Err(err) => err.code(),
        };
        self.metrics
            .contact_submissions
            .with_label_values(&[outcome])
            .inc();
        result
    }

    async fn try_submit(&self, form: &ContactForm) -> Result<(), ContactError> {
        let message = form.validate()?;

        let (Some(config), Some(relay)) = (&self.config, &self.relay) else {
            error!("contact credentials are not configured");
            return Err(ContactError::NotConfigured);
        };

        let outgoing = OutgoingMessage::compose(config, &message);
        relay.deliver(&outgoing).await?;
        info!("contact submission from {} accepted", message.email);
        Ok(())
    }
}
