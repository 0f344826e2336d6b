use devfolio::api::ListScope;
use devfolio::config::{AppConfig, ConfigArgs, LogFormat};
use serial_test::serial;
use std::env;
use std::fs;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("DEVFOLIO_API__BASE_URL");
        env::remove_var("DEVFOLIO_STORE__SCOPE");
        env::remove_var("DEVFOLIO_LOGGING__FORMAT");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load(&ConfigArgs::default()).expect("defaults load");
    assert_eq!(config.api.base_url, "http://localhost:3003/api");
    assert_eq!(config.api.token, None);
    assert_eq!(config.store.scope, ListScope::Featured);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.logging.level, "info");
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("DEVFOLIO_API__BASE_URL", "https://example.com/api");
        env::set_var("DEVFOLIO_STORE__SCOPE", "all");
    }

    let config = AppConfig::load(&ConfigArgs::default()).expect("Failed to load config");
    assert_eq!(config.api.base_url, "https://example.com/api");
    assert_eq!(config.store.scope, ListScope::All);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("site.yaml");
    fs::write(
        &file_path,
        r#"
api:
  base_url: "http://backend:3003/api"
logging:
  format: json
    "#,
    )
    .expect("Failed to write temp config");

    let args = ConfigArgs {
        config: Some(file_path.to_string_lossy().into_owned()),
        ..ConfigArgs::default()
    };
    let config = AppConfig::load(&args).expect("Failed to load config from file");
    assert_eq!(config.api.base_url, "http://backend:3003/api");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.store.scope, ListScope::Featured);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let args = ConfigArgs {
        config: Some("/definitely/not/here.yaml".into()),
        ..ConfigArgs::default()
    };
    assert!(AppConfig::load(&args).is_err());
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("DEVFOLIO_API__BASE_URL", "https://from-env.example/api");
    }

    let args = ConfigArgs {
        base_url: Some("https://from-cli.example/api".into()),
        token: Some("abc".into()),
        scope: Some("ALL".into()),
        log_json: Some(true),
        ..ConfigArgs::default()
    };
    let config = AppConfig::load(&args).expect("Failed to load config");

    assert_eq!(config.api.base_url, "https://from-cli.example/api");
    assert_eq!(config.api.token.as_deref(), Some("abc"));
    assert_eq!(config.store.scope, ListScope::All);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(!format!("{:?}", config.api).contains("abc"));

    clear_env_vars();
}

#[test]
#[serial]
fn test_unknown_scope_is_rejected() {
    clear_env_vars();

    let args = ConfigArgs {
        scope: Some("recent".into()),
        ..ConfigArgs::default()
    };
    assert!(AppConfig::load(&args).is_err());
}
