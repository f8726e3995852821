//! # Configuration Loading Tests
//!
//! Validates the layered configuration: `${VAR}` substitution in the YAML
//! file, the `GEMINI_API_KEY` environment fallback, defaults, and the
//! fatal missing-key condition at state-build time.

use listify_server::config::{get_config, ConfigError};
use listify_server::state::build_app_state;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const GEMINI_CONFIG: &str = r#"
provider:
  provider: "gemini"
  api_key: "${GEMINI_API_KEY}"
  model_name: "gemini-2.5-pro"
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp config");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
#[serial]
fn substitutes_the_api_key_from_the_environment() {
    env::set_var("GEMINI_API_KEY", "test-secret");
    let file = write_config(GEMINI_CONFIG);

    let config = get_config(file.path().to_str()).expect("Failed to load config");
    assert_eq!(config.provider.api_key.as_deref(), Some("test-secret"));
    assert_eq!(config.provider.provider, "gemini");
    assert_eq!(config.provider.model_name, "gemini-2.5-pro");

    env::remove_var("GEMINI_API_KEY");
}

#[test]
#[serial]
fn falls_back_to_the_environment_when_the_file_omits_the_key() {
    env::set_var("GEMINI_API_KEY", "env-only-secret");
    let file = write_config(
        r#"
provider:
  provider: "gemini"
  model_name: "gemini-2.5-pro"
"#,
    );

    let config = get_config(file.path().to_str()).expect("Failed to load config");
    assert_eq!(config.provider.api_key.as_deref(), Some("env-only-secret"));

    env::remove_var("GEMINI_API_KEY");
}

#[test]
#[serial]
fn an_unset_variable_resolves_to_no_key() {
    env::remove_var("GEMINI_API_KEY");
    let file = write_config(GEMINI_CONFIG);

    let config = get_config(file.path().to_str()).expect("Failed to load config");
    assert_eq!(config.provider.api_key, None);
}

#[test]
#[serial]
fn defaults_apply_when_the_file_is_minimal() {
    env::remove_var("GEMINI_API_KEY");
    let file = write_config(
        r#"
provider:
  provider: "local"
  api_url: "http://localhost:1234/v1/chat/completions"
  model_name: "mock-model"
"#,
    );

    let config = get_config(file.path().to_str()).expect("Failed to load config");
    assert_eq!(config.port, 9090);
    assert!(config.meta_prompting);
}

#[test]
#[serial]
fn meta_prompting_can_be_disabled_in_the_file() {
    env::remove_var("GEMINI_API_KEY");
    let file = write_config(
        r#"
meta_prompting: false
provider:
  provider: "local"
  api_url: "http://localhost:1234/v1/chat/completions"
  model_name: "mock-model"
"#,
    );

    let config = get_config(file.path().to_str()).expect("Failed to load config");
    assert!(!config.meta_prompting);
}

#[test]
fn a_missing_config_file_is_reported_as_not_found() {
    let result = get_config(Some("/definitely/not/a/real/config.yml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
#[serial]
fn a_gemini_provider_without_a_key_is_fatal_at_startup() {
    env::remove_var("GEMINI_API_KEY");
    let file = write_config(GEMINI_CONFIG);
    let config = get_config(file.path().to_str()).expect("Failed to load config");

    let error = build_app_state(config).expect_err("state build should fail without a key");
    assert!(error.to_string().contains("api_key is required"));
}
