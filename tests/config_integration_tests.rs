//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - Default configuration when no file exists
//! - Configuration saving and reloading
//! - Partial YAML files layered over defaults
//! - Session snapshot persistence across manager instances

use camino::Utf8PathBuf;
use sitecraft::models::{AppConfig, DisplayMode, Phase};
use sitecraft::{ConfigManager, ControllerSnapshot};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
}

#[test]
fn test_load_default_app_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    // Config file doesn't exist, should return defaults
    let config = manager.load_app_config().unwrap();

    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_save_and_reload_app_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut config = AppConfig::default();
    config.bus.capacity = 8;
    config.demo.title = "Garden Notes".to_string();
    config.demo.fail_at = Some(Phase::SetTheme);
    config.demo.teardown_after = None;

    manager.save_app_config(&config).unwrap();
    assert!(config_path.join("sitecraft.yaml").exists());

    let loaded = manager.load_app_config().unwrap();
    assert_eq!(loaded.bus.capacity, 8);
    assert_eq!(loaded.demo.title, "Garden Notes");
    assert_eq!(loaded.demo.fail_at, Some(Phase::SetTheme));
    assert_eq!(loaded.demo.teardown_after, None);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(
        config_path.join("sitecraft.yaml"),
        "logging:\n  debug: true\ndemo:\n  step_delay_ms: 5\n",
    )
    .unwrap();

    let config = manager.load_app_config().unwrap();
    assert!(config.logging.debug);
    assert_eq!(config.logging.prefix, "sitecraft");
    assert_eq!(config.demo.step_delay_ms, 5);
    assert_eq!(config.bus.capacity, 64);
}

#[test]
fn test_invalid_yaml_reports_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(config_path.join("sitecraft.yaml"), "bus: [not, a, map").unwrap();

    assert!(manager.load_app_config().is_err());
}

#[test]
fn test_snapshot_survives_new_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let snapshot = ControllerSnapshot {
        display_mode: DisplayMode::Modal,
        finished: false,
    };

    ConfigManager::new(&config_path)
        .unwrap()
        .save_snapshot(&snapshot)
        .unwrap();

    let reopened = ConfigManager::new(&config_path).unwrap();
    assert_eq!(reopened.load_snapshot().unwrap(), Some(snapshot));
}
