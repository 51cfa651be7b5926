use crate::cache::token::IssuedToken;
use crate::error::ApiResult;

pub mod oauth2;

/// Something that can trade configured credentials for a fresh token.
pub trait ExchangeCredentials {
    fn exchange_credentials(&self) -> impl std::future::Future<Output = ApiResult<IssuedToken>> + Send;
}
