#![forbid(unsafe_code)]

//! Loading `ReorderConfig` from TOML and JSON.
//!
//! Run:
//!   cargo test -p dragsort --features config-file --test config_file

use std::io::Write;

use dragsort::{Axis, ConfigError, ConfigLoadError, ReorderConfig, ReorderEngine};

#[test]
fn toml_overrides_selected_fields() {
    let config = ReorderConfig::from_toml_str(
        r#"
axis = "horizontal"
hysteresis_band = 48.0

[autoscroll]
edge_band = 40.0
speed = 6.0
"#,
    )
    .unwrap();

    assert_eq!(config.axis, Axis::Horizontal);
    assert_eq!(config.hysteresis_band, 48.0);
    assert_eq!(config.autoscroll.edge_band, 40.0);
    assert_eq!(config.autoscroll.speed, 6.0);
    // Unset fields keep their defaults.
    assert_eq!(config.autoscroll.interval_ms, 10);
    assert!(config.autoscroll.enabled);
    assert_eq!(config.coordinate_space, "reorderable");
    assert_eq!(config.settle, ReorderConfig::default().settle);
}

#[test]
fn empty_toml_is_default() {
    let config = ReorderConfig::from_toml_str("").unwrap();
    assert_eq!(config, ReorderConfig::default());
}

#[test]
fn json_round_trip() {
    let config = ReorderConfig::default()
        .with_coordinate_space("board")
        .with_drag_disabled(true);
    let json = serde_json::to_string(&config).unwrap();
    let loaded = ReorderConfig::from_json_str(&json).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn invalid_values_are_rejected_after_parse() {
    let err = ReorderConfig::from_toml_str("[autoscroll]\nspeed = 0.0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigLoadError::Invalid(ConfigError::InvalidScrollSpeed(_))
    ));
    assert!(err.to_string().contains("autoscroll.speed"));
}

#[test]
fn malformed_input_reports_format() {
    assert!(matches!(
        ReorderConfig::from_toml_str("axis = ["),
        Err(ConfigLoadError::Toml(_))
    ));
    assert!(matches!(
        ReorderConfig::from_json_str("{\"axis\": 3}"),
        Err(ConfigLoadError::Json(_))
    ));
}

#[test]
fn loads_from_files() {
    let mut toml_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(toml_file, "hysteresis_band = 12.0").unwrap();
    let config = ReorderConfig::from_toml_file(toml_file.path()).unwrap();
    assert_eq!(config.hysteresis_band, 12.0);

    let mut json_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(json_file, "{{\"settle\": {{\"animate\": false}}}}").unwrap();
    let config = ReorderConfig::from_json_file(json_file.path()).unwrap();
    assert!(!config.settle.animate);

    let engine = ReorderEngine::<u32>::new(config).unwrap();
    assert!(!engine.config().settle.animate);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReorderConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigLoadError::Io(_)));
}
