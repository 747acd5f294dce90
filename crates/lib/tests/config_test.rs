//! # Configuration Tests
//!
//! Environment variables are a shared, global resource, so every test that
//! touches them takes `ENV_LOCK` first.

use contentgen::config::{DEFAULT_API_ORIGIN, DEFAULT_API_URL};
use contentgen::load_config;
use std::env;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env_vars() {
    env::remove_var("API_URL");
    env::remove_var("API_ORIGIN");
}

#[test]
fn test_load_config_defaults() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let config = load_config().expect("Configuration should load with defaults");

    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.api_origin, DEFAULT_API_ORIGIN);
    assert_eq!(
        config.generate_url().unwrap().as_str(),
        "http://localhost:8000/api/generate"
    );
}

#[test]
fn test_load_config_from_env() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("API_URL", "https://content.example.com/backend");
    env::set_var("API_ORIGIN", "http://ignored.example.com");

    let config = load_config().expect("Configuration should load from env");

    assert_eq!(config.api_url, "https://content.example.com/backend");
    assert_eq!(
        config.generate_url().unwrap().as_str(),
        "https://content.example.com/backend/generate"
    );

    clear_env_vars();
}

#[test]
fn test_load_config_relative_base_from_env() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("API_URL", "/proxy/api");
    env::set_var("API_ORIGIN", "https://app.example.com");

    let config = load_config().unwrap();

    assert_eq!(
        config.generate_url().unwrap().as_str(),
        "https://app.example.com/proxy/api/generate"
    );

    clear_env_vars();
}

#[test]
fn test_load_config_empty_api_url_uses_default() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("API_URL", "");

    let config = load_config().unwrap();

    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(
        config.generate_url().unwrap().as_str(),
        "http://localhost:8000/api/generate"
    );

    clear_env_vars();
}
