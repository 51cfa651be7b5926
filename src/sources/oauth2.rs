use reqwest::Client;
use tracing::{debug, error};

use crate::cache::token::IssuedToken;
use crate::config::proc_validator::validate_identity;
use crate::config::service::IdentityConfig;
use crate::error::{ApiError, ApiResult};
use crate::sources::ExchangeCredentials;
use crate::utils::constants::GRANT_TYPE_CLIENT_CREDENTIALS;

/// Client-credentials exchange against the identity provider token endpoint.
#[derive(Debug, Clone)]
pub struct OAuth2Source {
    token_url: String,
    identity: IdentityConfig,
    client: Client,
}

impl OAuth2Source {
    /// Fails fast when any credential or the scope is empty.
    pub fn new(identity: IdentityConfig, client: Client) -> ApiResult<Self> {
        let mut errors = Vec::new();
        validate_identity(&identity, &mut errors);
        if !errors.is_empty() {
            return Err(ApiError::Configuration(errors.join("; ")));
        }
        Ok(Self {
            token_url: identity.token_url(),
            identity,
            client,
        })
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

impl ExchangeCredentials for OAuth2Source {
    async fn exchange_credentials(&self) -> ApiResult<IssuedToken> {
        let form = [
            ("client_id", self.identity.client_id.as_str()),
            ("client_secret", self.identity.client_secret.as_str()),
            ("scope", self.identity.scope.as_str()),
            ("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS),
        ];

        debug!("requesting token from {}", self.token_url);
        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .inspect_err(|e| error!("token request transport failure: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            error!("token request failed: {}", status);
            return Err(ApiError::AuthenticationFailed { status });
        }

        let body = response.text().await?;
        let issued: IssuedToken = serde_json::from_str(&body)?;
        if issued.access_token.is_empty() {
            return Err(ApiError::MalformedResponse(
                "token response carries an empty access_token".to_string(),
            ));
        }
        debug!(
            "token issued, type {:?}, expires in {}s",
            issued.token_type, issued.expires_in
        );
        Ok(issued)
    }
}
