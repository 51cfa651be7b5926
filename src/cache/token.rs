use serde::Deserialize;

/// Token response body of the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    /// lifetime declared by the server, seconds
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: i64, // UNIX TIMESTAMP
}

impl CachedToken {
    pub fn new(value: String, expires_at: i64) -> Self {
        Self { value, expires_at }
    }

    /// Effective expiry is pulled forward by the safety margin so a token
    /// handed out is never within `safety_margin_seconds` of the server expiry.
    pub fn from_issued(issued: IssuedToken, now: i64, safety_margin_seconds: u64) -> Self {
        let margin = i64::try_from(safety_margin_seconds).unwrap_or(i64::MAX);
        let lifetime = i64::try_from(issued.expires_in)
            .unwrap_or(i64::MAX)
            .saturating_sub(margin);
        Self {
            value: issued.access_token,
            expires_at: now.saturating_add(lifetime),
        }
    }

    pub fn is_valid_at(&self, now: i64) -> bool {
        now < self.expires_at
    }
}
