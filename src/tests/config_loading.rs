#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use serial_test::serial;

    use crate::config::proc_loader::{expand_env_vars, file_to_config, parse_config};
    use crate::config::settings::LogFormat;

    const MINIMAL: &str = r#"
settings:
  server:
    host: "127.0.0.1"
    port: "8080"
identity:
  tenant_id: "tenant-1"
  client_id: "client-1"
  client_secret: "secret-1"
  scope: "api://catalog/.default"
catalog:
  base_url: "https://commerce.example.net/api"
"#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse_config(MINIMAL).unwrap();

        assert_eq!(config.settings.safety_margin_seconds, Some(300));
        assert_eq!(config.settings.http_timeout_ms, 5000);
        assert!(!config.settings.metrics.is_enabled);
        assert_eq!(config.settings.metrics.path, "/metrics");
        let logging = config.settings.logging.unwrap();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Compact);

        assert_eq!(config.identity.authority_url, "https://login.microsoftonline.com");
        assert_eq!(
            config.identity.token_url(),
            "https://login.microsoftonline.com/tenant-1/oauth2/v2.0/token"
        );
        assert_eq!(config.catalog.default_page_size, 12);
        assert_eq!(config.catalog.max_page_size, 48);
        assert!(config.contact.is_none());
    }

    #[test]
    fn missing_secret_fails_fast() {
        let content = MINIMAL.replace("client_secret: \"secret-1\"", "client_secret: \"\"");
        let err = parse_config(&content).unwrap_err().to_string();
        assert!(err.starts_with("configuration error:"), "{}", err);
        assert!(err.contains("identity.client_secret is required"), "{}", err);
    }

    #[test]
    fn all_problems_are_reported_together() {
        let content = MINIMAL
            .replace("port: \"8080\"", "port: \"http\"")
            .replace("scope: \"api://catalog/.default\"", "scope: \" \"")
            .replace("https://commerce.example.net/api", "commerce.example.net");
        let err = parse_config(&content).unwrap_err().to_string();
        assert!(err.contains("settings.server.port"), "{}", err);
        assert!(err.contains("identity.scope is required"), "{}", err);
        assert!(err.contains("catalog.base_url"), "{}", err);
    }

    #[test]
    fn page_size_bounds_are_checked() {
        let content = format!("{}  default_page_size: 24\n  max_page_size: 12\n", MINIMAL);
        let err = parse_config(&content).unwrap_err().to_string();
        assert!(err.contains("catalog.max_page_size (12)"), "{}", err);
    }

    #[test]
    fn debug_output_redacts_client_secret() {
        let config = parse_config(MINIMAL).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-1"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    #[serial]
    fn env_placeholders_are_expanded() {
        std::env::set_var("KAHRAMANI_TEST_SECRET", "from-env");
        std::env::remove_var("KAHRAMANI_TEST_UNSET");

        let expanded = expand_env_vars(
            "secret: ${KAHRAMANI_TEST_SECRET}\nscope: ${KAHRAMANI_TEST_UNSET:api://fallback}\nempty: \"${KAHRAMANI_TEST_UNSET}\"",
        )
        .unwrap();

        assert_eq!(
            expanded,
            "secret: from-env\nscope: api://fallback\nempty: \"\""
        );
        std::env::remove_var("KAHRAMANI_TEST_SECRET");
    }

    #[test]
    #[serial]
    fn file_config_reads_secret_from_environment() {
        std::env::set_var("KAHRAMANI_TEST_CLIENT_SECRET", "s3cr3t");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let content = MINIMAL.replace("\"secret-1\"", "\"${KAHRAMANI_TEST_CLIENT_SECRET}\"");
        file.write_all(content.as_bytes()).unwrap();

        let config = file_to_config(file.path()).unwrap();
        assert_eq!(config.identity.client_secret, "s3cr3t");
        std::env::remove_var("KAHRAMANI_TEST_CLIENT_SECRET");
    }

    #[test]
    #[serial]
    fn unset_secret_in_file_is_a_configuration_error() {
        std::env::remove_var("KAHRAMANI_TEST_CLIENT_SECRET");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let content = MINIMAL.replace("\"secret-1\"", "\"${KAHRAMANI_TEST_CLIENT_SECRET}\"");
        file.write_all(content.as_bytes()).unwrap();

        let err = file_to_config(file.path()).unwrap_err().to_string();
        assert!(err.contains("identity.client_secret is required"), "{}", err);
    }

    #[test]
    #[serial]
    fn bundled_config_is_valid() {
        std::env::set_var("AZURE_TENANT_ID", "tenant-1");
        std::env::set_var("AZURE_CLIENT_ID", "client-1");
        std::env::set_var("AZURE_CLIENT_SECRET", "secret-1");

        let config = file_to_config(Path::new("config/kahramani-catalog.yaml"))
            .expect("config/kahramani-catalog.yaml must exist in repo root for tests");

        assert_eq!(config.settings.logging.unwrap().format, LogFormat::Json);
        let contact = config.contact.expect("contact section");
        assert_eq!(contact.relay_url(), None);

        for var in ["AZURE_TENANT_ID", "AZURE_CLIENT_ID", "AZURE_CLIENT_SECRET"] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = file_to_config(Path::new("config/does-not-exist.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
