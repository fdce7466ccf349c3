//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use serial_test::serial;
use whorl::config::AppConfig;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("WHORL_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("WHORL_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_point_count() {
    std::env::set_var("WHORL_SIMULATION__POINT_COUNT", "500");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.simulation.point_count, 500);
    std::env::remove_var("WHORL_SIMULATION__POINT_COUNT");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("WHORL_WINDOW__TITLE");
    std::env::remove_var("WHORL_SIMULATION__POINT_COUNT");

    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Whorl");
    assert_eq!(config.simulation.point_count, 100_000);
}

#[test]
#[serial]
fn test_missing_config_dir_falls_back_to_defaults() {
    let config = AppConfig::load_from("does-not-exist").unwrap();
    assert_eq!(config.window.width, 1280);
}
