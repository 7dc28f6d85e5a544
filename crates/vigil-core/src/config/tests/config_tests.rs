use std::fs;
use std::path::Path;

use tempfile::tempdir;

use crate::config::error::ConfigSystemError;
use crate::config::{AppConfig, ConfigFormat};

#[test]
fn test_defaults() {
    let config = AppConfig::default();

    assert!(config.capture.capture_soft_fails);
    assert!(config.router.catch_faults);
    assert_eq!(config.messenger.receivers, vec!["async".to_string()]);
}

#[test]
fn test_format_from_path() {
    assert_eq!(
        ConfigFormat::from_path(Path::new("app.json")),
        Some(ConfigFormat::Json)
    );
    assert_eq!(
        ConfigFormat::from_path(Path::new("app.yaml")),
        Some(ConfigFormat::Yaml)
    );
    assert_eq!(
        ConfigFormat::from_path(Path::new("app.yml")),
        Some(ConfigFormat::Yaml)
    );
    assert_eq!(
        ConfigFormat::from_path(Path::new("app.toml")),
        Some(ConfigFormat::Toml)
    );
    assert_eq!(ConfigFormat::from_path(Path::new("app.ini")), None);
    assert_eq!(ConfigFormat::from_path(Path::new("app")), None);
}

#[test]
fn test_parse_json() {
    let config = AppConfig::parse(
        r#"{"capture": {"capture_soft_fails": false}}"#,
        ConfigFormat::Json,
    )
    .unwrap();

    assert!(!config.capture.capture_soft_fails);
    // Untouched sections keep their defaults.
    assert!(config.router.catch_faults);
}

#[test]
fn test_parse_yaml() {
    let data = "\
capture:
  capture_soft_fails: false
router:
  catch_faults: false
messenger:
  receivers: [async, priority]
";
    let config = AppConfig::parse(data, ConfigFormat::Yaml).unwrap();

    assert!(!config.capture.capture_soft_fails);
    assert!(!config.router.catch_faults);
    assert_eq!(
        config.messenger.receivers,
        vec!["async".to_string(), "priority".to_string()]
    );
}

#[test]
fn test_parse_toml() {
    let data = "\
[router]
catch_faults = false
";
    let config = AppConfig::parse(data, ConfigFormat::Toml).unwrap();

    assert!(!config.router.catch_faults);
    assert!(config.capture.capture_soft_fails);
}

#[test]
fn test_parse_error_is_typed() {
    let result = AppConfig::parse("{not json", ConfigFormat::Json);
    assert!(matches!(result, Err(ConfigSystemError::Parse { .. })));
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vigil.yaml");
    fs::write(&path, "capture:\n  capture_soft_fails: false\n").unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert!(!config.capture.capture_soft_fails);
}

#[test]
fn test_load_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vigil.ini");
    fs::write(&path, "").unwrap();

    let result = AppConfig::load(&path);

    assert!(matches!(
        result,
        Err(ConfigSystemError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_load_missing_file() {
    let result = AppConfig::load(Path::new("/nonexistent/vigil.yaml"));
    assert!(matches!(result, Err(ConfigSystemError::Io { .. })));
}
