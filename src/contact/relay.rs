use reqwest::Client;
use tracing::{error, info};

use crate::contact::form::OutgoingMessage;
use crate::contact::ContactError;

/// Delivery seam for composed contact mail.
pub trait MessageRelay {
    fn deliver(
        &self,
        message: &OutgoingMessage,
    ) -> impl std::future::Future<Output = Result<(), ContactError>> + Send;
}

/// Posts the composed message as JSON to a mail gateway.
#[derive(Debug, Clone)]
pub struct WebhookRelay {
    url: String,
    client: Client,
}

impl WebhookRelay {
    pub fn new(url: String, client: Client) -> Self {
        Self { url, client }
    }
}

impl MessageRelay for WebhookRelay {
    async fn deliver(&self, message: &OutgoingMessage) -> Result<(), ContactError> {
        let response = self
            .client
            .post(&self.url)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                error!("contact relay transport failure: {}", e);
                ContactError::Relay(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("contact relay responded with {}", status);
            return Err(ContactError::Relay(format!("relay responded with {}", status)));
        }
        info!("contact message relayed to {}", message.to);
        Ok(())
    }
}
