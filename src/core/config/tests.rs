use super::data::{Config, SettingError, DEFAULT_GRID_COLUMNS, DEFAULT_SCROLL_THRESHOLD};
use super::io::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.scroll_threshold(), DEFAULT_SCROLL_THRESHOLD);
    assert_eq!(config.grid_columns(), DEFAULT_GRID_COLUMNS);
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.set_value("endpoint", "http://localhost:9000").unwrap();
    config.set_value("catalog", "/tmp/cast.toml").unwrap();
    config.set_value("request-timeout", "30").unwrap();
    config.save_to_path(&config_path).expect("save failed");

    let loaded = Config::load_from_path(&config_path).expect("load failed");
    assert_eq!(loaded.endpoint.as_deref(), Some("http://localhost:9000"));
    assert_eq!(loaded.catalog, Some(PathBuf::from("/tmp/cast.toml")));
    assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(30)));

    let mut loaded = loaded;
    loaded.unset_value("endpoint").unwrap();
    loaded.unset_value("request-timeout").unwrap();
    loaded.save_to_path(&config_path).expect("second save failed");

    let reloaded = Config::load_from_path(&config_path).expect("reload failed");
    assert_eq!(reloaded.endpoint, None);
    assert_eq!(reloaded.request_timeout_secs, None);
    assert_eq!(reloaded.catalog, Some(PathBuf::from("/tmp/cast.toml")));
}

#[test]
fn test_invalid_toml_reports_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "endpoint = [").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn test_set_value_rejects_bad_input() {
    let mut config = Config::default();
    assert_eq!(
        config.set_value("volume", "11"),
        Err(SettingError::UnknownKey("volume".into()))
    );
    assert!(matches!(
        config.set_value("scroll-threshold", "lots"),
        Err(SettingError::InvalidNumber { .. })
    ));
    assert!(matches!(
        config.set_value("grid-columns", "0"),
        Err(SettingError::InvalidNumber { .. })
    ));
    assert!(matches!(
        config.set_value("endpoint", "   "),
        Err(SettingError::MissingValue { .. })
    ));
    assert_eq!(config, Config::default());
}

#[test]
fn test_grid_columns_never_zero() {
    let config = Config {
        grid_columns: Some(0),
        ..Default::default()
    };
    assert_eq!(config.grid_columns(), 1);
}
