//! Integration tests for the eisen-config crate.

use std::fs;

use eisen_config::{Config, ConfigError, ServerConfig, UiConfig};
use tempfile::TempDir;

#[test]
fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("eisen.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Configuration for eisen
            server: {
                url: "http://localhost:5000/",
                username: "ada",
                password: "hunter2",
                timeout_secs: 30,
            },
            ui: {
                show_completed_count: false,
                background: [30, 30, 46],
            },
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.server.base_url(), Some("http://localhost:5000"));
    assert_eq!(config.server.username.as_deref(), Some("ada"));
    assert_eq!(config.server.timeout().as_secs(), 30);
    assert!(!config.ui.show_completed_count);
    assert_eq!(config.ui.background, [30, 30, 46]);
}

#[test]
fn config_save_and_reload_drops_the_password() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");

    let original = Config {
        server: ServerConfig {
            username: Some("ada".to_string()),
            password: Some("hunter2".to_string()),
            ..ServerConfig::with_url("https://tasks.example.com")
        },
        ui: UiConfig {
            show_completed_count: false,
            background: [255, 255, 255],
        },
    };

    original.save_to(&config_path).unwrap();
    let written = fs::read_to_string(&config_path).unwrap();
    assert!(!written.contains("hunter2"));

    let loaded = Config::load_from(&config_path).unwrap();
    assert_eq!(loaded.server.url, original.server.url);
    assert_eq!(loaded.server.username, original.server.username);
    assert_eq!(loaded.server.password, None);
    assert_eq!(loaded.ui, original.ui);
}

#[test]
fn config_empty_file_is_demo_mode() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("eisen.json5");
    fs::write(&config_path, "{}").unwrap();

    let config = Config::load_from(&config_path).unwrap();
    assert!(config.server.is_demo());
    assert_eq!(config, Config::default());
}

#[test]
fn config_rejects_non_http_urls() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("eisen.json5");
    fs::write(&config_path, r#"{ server: { url: "ftp://tasks.example.com" } }"#).unwrap();

    let result = Config::load_from(&config_path);
    assert!(matches!(result, Err(ConfigError::InvalidServerUrl(_))));
}

#[test]
fn config_reports_parse_errors() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("eisen.json5");
    fs::write(&config_path, "{ server: ").unwrap();

    let result = Config::load_from(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseJson5(_))));
}

#[test]
fn config_missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::load_from(dir.path().join("missing.json5"));
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn environment_overrides_file_values() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("eisen.json5");
    fs::write(
        &config_path,
        r#"{ server: { url: "http://file.example.com", timeout_secs: 10 } }"#,
    )
    .unwrap();

    let mut config = Config::load_from(&config_path).unwrap();
    config
        .apply_env_overrides(|name| match name {
            "EISEN_SERVER_URL" => Some("http://env.example.com".to_string()),
            "EISEN_PASSWORD" => Some("from-env".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.server.base_url(), Some("http://env.example.com"));
    assert_eq!(config.server.password.as_deref(), Some("from-env"));
    assert_eq!(config.server.timeout().as_secs(), 10);
}
