//! # Core Layer Tests: FlowRecConfig
//!
//! Validates defaults, TOML parsing and validation of the merge and logging
//! configuration.

use flowrec::{FlowRecConfig, FlowRecError, MissingPermissionsPolicy};

/// Verifies that `FlowRecConfig::default()` returns sane values.
#[test]
fn test_config_defaults() {
    let config = FlowRecConfig::default();

    assert_eq!(config.merge.missing_permissions, MissingPermissionsPolicy::Reject);
    assert_eq!(config.merge.max_nodes, None, "max_nodes should default to unbounded");
    assert_eq!(config.log.level, "info");
    assert!(!config.log.json, "json logging should default to false");
    assert!(config.validate().is_ok());
}

/// Verifies that every TOML key is honoured.
#[test]
fn test_config_from_toml() {
    let config = FlowRecConfig::from_toml_str(
        r#"
        [merge]
        missing_permissions = "deny"
        max_nodes = 8

        [log]
        level = "debug"
        json = true
        "#,
    )
    .unwrap();

    assert_eq!(config.merge.missing_permissions, MissingPermissionsPolicy::Deny);
    assert_eq!(config.merge.max_nodes, Some(8));
    assert_eq!(config.log.level, "debug");
    assert!(config.log.json);
}

/// Verifies that missing sections and keys fall back to defaults.
#[test]
fn test_partial_toml_keeps_defaults() {
    let config = FlowRecConfig::from_toml_str("[log]\nlevel = \"warn\"\n").unwrap();

    assert_eq!(config.merge.max_nodes, None);
    assert_eq!(config.merge.missing_permissions, MissingPermissionsPolicy::Reject);
    assert_eq!(config.log.level, "warn");

    let empty = FlowRecConfig::from_toml_str("").unwrap();
    assert_eq!(empty.merge.max_nodes, None);
}

/// Verifies validation and parse errors for bad values.
#[test]
fn test_invalid_values_rejected() {
    let err = FlowRecConfig::from_toml_str("[merge]\nmax_nodes = 0\n").unwrap_err();
    assert!(matches!(err, FlowRecError::Config(_)));

    let err = FlowRecConfig::from_toml_str("[log]\nlevel = \"loud\"\n").unwrap_err();
    assert!(matches!(err, FlowRecError::Config(_)));

    let err = FlowRecConfig::from_toml_str("[merge]\nmissing_permissions = \"allow\"\n").unwrap_err();
    assert!(matches!(err, FlowRecError::ConfigParse(_)));
}

/// Verifies that an unreadable file surfaces as an I/O error.
#[test]
fn test_load_missing_file_is_io_error() {
    let err = FlowRecConfig::load("/nonexistent/flowrec.toml").unwrap_err();
    assert!(matches!(err, FlowRecError::Io(_)));
}
