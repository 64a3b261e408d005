// tests/config_env.rs
//
// ApiConfig load order: file (ANALYSIS_CONFIG_PATH) → env override for the
// base URL → sanitization. Env-mutating tests run serially.

use political_bias_analyzer::config::{
    ApiConfig, ENV_ANALYSIS_API_BASE_URL, ENV_ANALYSIS_CONFIG_PATH,
};
use serial_test::serial;
use std::{env, fs};

fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
    let path = env::temp_dir().join(format!("pba-config-{name}-{}.toml", std::process::id()));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
#[serial]
fn missing_file_falls_back_to_defaults() {
    env::remove_var(ENV_ANALYSIS_API_BASE_URL);
    env::set_var(ENV_ANALYSIS_CONFIG_PATH, "/nonexistent/analysis.toml");

    let cfg = ApiConfig::load();
    assert_eq!(cfg.base_url, "http://localhost:8001");
    assert_eq!(cfg.request_timeout_secs, 120);

    env::remove_var(ENV_ANALYSIS_CONFIG_PATH);
}

#[test]
#[serial]
fn file_values_are_read_and_sanitized() {
    let path = temp_config(
        "file",
        "base_url = \"https://council.example.com/\"\nrequest_timeout_secs = 30\n",
    );
    env::remove_var(ENV_ANALYSIS_API_BASE_URL);
    env::set_var(ENV_ANALYSIS_CONFIG_PATH, &path);

    let cfg = ApiConfig::load();
    assert_eq!(cfg.base_url, "https://council.example.com");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.connect_timeout_secs, 5);

    env::remove_var(ENV_ANALYSIS_CONFIG_PATH);
    let _ = fs::remove_file(path);
}

#[test]
#[serial]
fn env_base_url_overrides_the_file() {
    let path = temp_config("override", "base_url = \"https://from-file.example.com\"\n");
    env::set_var(ENV_ANALYSIS_CONFIG_PATH, &path);
    env::set_var(ENV_ANALYSIS_API_BASE_URL, "https://from-env.example.com/");

    let cfg = ApiConfig::load();
    assert_eq!(cfg.base_url, "https://from-env.example.com");

    env::remove_var(ENV_ANALYSIS_CONFIG_PATH);
    env::remove_var(ENV_ANALYSIS_API_BASE_URL);
    let _ = fs::remove_file(path);
}

#[test]
#[serial]
fn blank_env_override_is_ignored() {
    env::remove_var(ENV_ANALYSIS_CONFIG_PATH);
    env::set_var(ENV_ANALYSIS_API_BASE_URL, "   ");

    let cfg = ApiConfig::load();
    assert_eq!(cfg.base_url, "http://localhost:8001");

    env::remove_var(ENV_ANALYSIS_API_BASE_URL);
}
