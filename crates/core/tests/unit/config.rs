//! Run configuration tests.

use fpsig_core::config::{RoundingMode, RunConfig};

#[test]
fn test_default_config() {
    let config = RunConfig::default();
    assert_eq!(config.rounding, RoundingMode::NearestEven);
    assert!(!config.flush_to_zero);
    assert!(!config.denormals_are_zero);
    assert_eq!(config.pin_core, None);
    assert_eq!(config.passes, 3);
}

#[test]
fn test_json_deserialization() {
    let config: RunConfig = serde_json::from_str(
        r#"{"rounding": "toward-zero", "flush_to_zero": true, "pin_core": 2, "passes": 5}"#,
    )
    .expect("valid config JSON");
    assert_eq!(config.rounding, RoundingMode::TowardZero);
    assert!(config.flush_to_zero);
    assert!(!config.denormals_are_zero, "omitted field keeps its default");
    assert_eq!(config.pin_core, Some(2));
    assert_eq!(config.passes, 5);
}

#[test]
fn test_effective_passes_floor() {
    let config = RunConfig {
        passes: 0,
        ..RunConfig::default()
    };
    assert_eq!(config.effective_passes(), 1, "zero passes still runs once");
}
