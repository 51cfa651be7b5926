use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use httpmock::Method::POST;
use httpmock::{Mock, MockServer};
use reqwest::Client;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::cache::token_cache::TokenCache;
use crate::catalog::CatalogClient;
use crate::config::service::{CatalogConfig, IdentityConfig};
use crate::observability::metrics::Metrics;
use crate::sources::oauth2::OAuth2Source;

pub const TENANT: &str = "tenant-1";
pub const TOKEN_PATH: &str = "/tenant-1/oauth2/v2.0/token";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn metrics() -> Arc<Metrics> {
    Metrics::new().expect("metrics registry")
}

pub fn identity_config(authority_url: &str) -> IdentityConfig {
    IdentityConfig {
        authority_url: authority_url.to_string(),
        tenant_id: TENANT.to_string(),
        client_id: "client-1".to_string(),
        client_secret: "secret-1".to_string(),
        scope: "api://catalog/.default".to_string(),
    }
}

pub fn catalog_config(base_url: &str) -> CatalogConfig {
    CatalogConfig {
        base_url: base_url.to_string(),
        default_page_size: 12,
        max_page_size: 48,
    }
}

/// Catalog client whose identity provider is `identity` and commerce API is `api_base`.
pub fn build_catalog_with(identity: &str, api_base: &str, client: Client) -> CatalogClient {
    let metrics = metrics();
    let auth = OAuth2Source::new(identity_config(identity), client.clone()).expect("identity config");
    let tokens = TokenCache::new(300, metrics.clone());
    CatalogClient::new(&catalog_config(api_base), client, tokens, auth, metrics).expect("catalog config")
}

/// Identity provider and commerce API both served by `server`, API under `/api`.
pub fn build_catalog(server: &MockServer) -> CatalogClient {
    build_catalog_with(&server.base_url(), &server.url("/api"), build_reqwest_client())
}

pub async fn mock_token<'a>(server: &'a MockServer, access_token: &str, expires_in: u64) -> Mock<'a> {
    let body = json!({
        "access_token": access_token,
        "expires_in": expires_in,
        "token_type": "Bearer"
    });
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .form_urlencoded_tuple("grant_type", "client_credentials");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body);
        })
        .await
}
