use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::service::ContactConfig;
use crate::contact::ContactError;

/// Body of `POST /api/contact`.
///
/// `human` is the visitor's answer to the arithmetic check, `expected` the
/// sum the form rendered. Both must be JSON numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub human: Option<Value>,
    #[serde(default)]
    pub expected: Option<Value>,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ContactError::MissingFields);
        }
        if !is_valid_email(email) {
            return Err(ContactError::InvalidEmail);
        }

        let (Some(human), Some(expected)) = (
            self.human.as_ref().and_then(Value::as_f64),
            self.expected.as_ref().and_then(Value::as_f64),
        ) else {
            return Err(ContactError::InvalidCaptcha);
        };
        if human != expected {
            return Err(ContactError::CaptchaFailed);
        }

        Ok(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

/// Mail handed to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
}

impl OutgoingMessage {
    pub fn compose(config: &ContactConfig, message: &ContactMessage) -> Self {
        Self {
            from: format!("\"{}\" <{}>", config.sender_name, config.sender),
            to: config.recipient.clone(),
            reply_to: message.email.clone(),
            subject: format!("New contact from {}", message.name),
            text: format!(
                "Name: {}\nEmail: {}\n\nMessage:\n{}\n",
                message.name, message.email, message.message
            ),
        }
    }
}
