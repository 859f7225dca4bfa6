//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;
use std::path::PathBuf;

use linkreach_domain::{DelayBounds, LinkReachError, ResourceKind};
use linkreach_infra::config;
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    (temp_file, path)
}

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
[pagination]
delivery_chunk_size = 50
connections_batch = 80

[dispatcher.action_delay]
min_secs = 20
max_secs = 60

[continuation]
max_cycles = 12

[continuation.search]
min_secs = 2
max_secs = 4

[logging]
level = "linkreach_core=debug,info"
json = true
"#;

    let (_temp, path) = write_config(toml_content, "toml");
    let config = config::load_from_file(Some(path.clone())).expect("Failed to load TOML config");

    assert_eq!(config.pagination.delivery_chunk_size, 50);
    assert_eq!(config.pagination.batch_cap(ResourceKind::Connections), 80);
    assert_eq!(config.pagination.batch_cap(ResourceKind::Invitations), 100);
    assert_eq!(config.dispatcher.action_delay, DelayBounds::new(20, 60));
    assert_eq!(config.continuation.max_cycles, Some(12));
    assert_eq!(config.continuation.delay_for(ResourceKind::Search), DelayBounds::new(2, 4));
    assert_eq!(config.continuation.delay_for(ResourceKind::Connections), DelayBounds::new(7, 10));
    assert_eq!(config.logging.level, "linkreach_core=debug,info");
    assert!(config.logging.json);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "pagination": { "messages_batch": 10 },
        "continuation": {
            "conversations": { "min_secs": 1, "max_secs": 2 }
        }
    }"#;

    let (_temp, path) = write_config(json_content, "json");
    let config = config::load_from_file(Some(path.clone())).expect("Failed to load JSON config");

    assert_eq!(config.pagination.batch_cap(ResourceKind::Messages), 10);
    assert_eq!(config.pagination.batch_cap(ResourceKind::Conversations), 10);
    assert_eq!(config.pagination.delivery_chunk_size, 25);
    assert_eq!(config.continuation.delay_for(ResourceKind::Conversations), DelayBounds::new(1, 2));
    assert_eq!(config.dispatcher.action_delay, DelayBounds::new(15, 45));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_inverted_continuation_delay_is_rejected() {
    let (_temp, path) = write_config(
        "[continuation.invitations]\nmin_secs = 9\nmax_secs = 3\n",
        "toml",
    );

    let err = config::load_from_file(Some(path.clone())).unwrap_err();
    match err {
        LinkReachError::Config(msg) => assert!(msg.contains("invitations")),
        other => panic!("expected config error, got {other:?}"),
    }

    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_toml_is_config_error() {
    let (_temp, path) = write_config("[pagination\ndelivery_chunk_size = 5", "toml");

    let err = config::load_from_file(Some(path.clone())).unwrap_err();
    assert!(matches!(err, LinkReachError::Config(msg) if msg.contains("TOML")));

    std::fs::remove_file(path).ok();
}
