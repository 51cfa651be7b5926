#[cfg(test)]
mod test {
    use http::StatusCode;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    use crate::error::ApiError;
    use crate::sources::oauth2::OAuth2Source;
    use crate::sources::ExchangeCredentials;
    use crate::tests::common::{build_reqwest_client, identity_config, mock_token, TOKEN_PATH};

    #[tokio::test]
    async fn posts_client_credentials_form() {
        let server = MockServer::start_async().await;
        let token_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .header("content-type", "application/x-www-form-urlencoded")
                    .form_urlencoded_tuple("client_id", "client-1")
                    .form_urlencoded_tuple("client_secret", "secret-1")
                    .form_urlencoded_tuple("scope", "api://catalog/.default")
                    .form_urlencoded_tuple("grant_type", "client_credentials");
                then.status(200).json_body(json!({
                    "access_token": "tok-abc",
                    "expires_in": 3599,
                    "token_type": "Bearer"
                }));
            })
            .await;

        let source = OAuth2Source::new(identity_config(&server.base_url()), build_reqwest_client()).unwrap();
        let issued = source.exchange_credentials().await.unwrap();

        assert_eq!(issued.access_token, "tok-abc");
        assert_eq!(issued.expires_in, 3599);
        assert_eq!(issued.token_type.as_deref(), Some("Bearer"));
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn token_url_is_built_from_authority_and_tenant() {
        let source = OAuth2Source::new(
            identity_config("https://login.example.com/"),
            build_reqwest_client(),
        )
        .unwrap();
        assert_eq!(source.token_url(), "https://login.example.com/tenant-1/oauth2/v2.0/token");
    }

    #[tokio::test]
    async fn non_success_status_is_authentication_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(401).body("invalid_client");
            })
            .await;

        let source = OAuth2Source::new(identity_config(&server.base_url()), build_reqwest_client()).unwrap();
        let err = source.exchange_credentials().await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::AuthenticationFailed { status } if status == StatusCode::UNAUTHORIZED
        ));
    }

    #[tokio::test]
    async fn unreachable_provider_is_transport_error() {
        let source = OAuth2Source::new(identity_config("http://127.0.0.1:1"), build_reqwest_client()).unwrap();
        let err = source.exchange_credentials().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn unexpected_body_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(json!({"token": "nope"}));
            })
            .await;

        let source = OAuth2Source::new(identity_config(&server.base_url()), build_reqwest_client()).unwrap();
        let err = source.exchange_credentials().await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)), "got {:?}", err);
    }

    #[test]
    fn missing_credentials_fail_fast() {
        let mut identity = identity_config("https://login.example.com");
        identity.client_secret = "  ".to_string();
        identity.scope = String::new();

        let err = OAuth2Source::new(identity, build_reqwest_client()).unwrap_err();
        match err {
            ApiError::Configuration(msg) => {
                assert!(msg.contains("identity.client_secret is required"));
                assert!(msg.contains("identity.scope is required"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn shared_helper_mock_matches_exchange() {
        let server = MockServer::start_async().await;
        let token_mock = mock_token(&server, "tok-helper", 3600).await;

        let source = OAuth2Source::new(identity_config(&server.base_url()), build_reqwest_client()).unwrap();
        assert_eq!(source.exchange_credentials().await.unwrap().access_token, "tok-helper");
        assert_eq!(token_mock.hits_async().await, 1);
    }
}
