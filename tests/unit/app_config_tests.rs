/*!
 * Tests for configuration loading and validation
 */

use std::fs;
use std::str::FromStr;
use anyhow::Result;
use ytcm::app_config::{Config, LogLevel, SelectionPolicy};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_shouldUseCanonicalPolicyAndDedupWindow() {
    let config = Config::default();

    assert_eq!(config.selection_policy, SelectionPolicy::LineProximity);
    assert!((config.marker.dedup_threshold_percent - 0.2).abs() < 1e-9);
    assert_eq!(config.marker.max_tooltip_chars, 0);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test JSON round-trip through a config file
#[test]
fn test_config_serialization_withRoundTrip_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let mut config = Config::default();
    config.selection_policy = SelectionPolicy::AnchorBoundary;
    config.marker.max_tooltip_chars = 80;
    config.log_level = LogLevel::Debug;

    let path = temp_dir.path().join("conf.json");
    fs::write(&path, serde_json::to_string_pretty(&config)?)?;

    let loaded: Config = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(loaded.selection_policy, SelectionPolicy::AnchorBoundary);
    assert_eq!(loaded.marker.max_tooltip_chars, 80);
    assert_eq!(loaded.log_level, LogLevel::Debug);

    Ok(())
}

/// Test that missing fields fall back to defaults
#[test]
fn test_config_deserialization_withEmptyObject_shouldApplyDefaults() -> Result<()> {
    let config: Config = serde_json::from_str("{}")?;

    assert_eq!(config.selection_policy, SelectionPolicy::LineProximity);
    assert!((config.marker.dedup_threshold_percent - 0.2).abs() < 1e-9);
    assert_eq!(config.log_level, LogLevel::Info);

    Ok(())
}

#[test]
fn test_config_deserialization_withPolicyName_shouldSelectVariant() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"selection_policy": "anchor_boundary"}"#)?;
    assert_eq!(config.selection_policy, SelectionPolicy::AnchorBoundary);

    Ok(())
}

/// Test policy string conversions
#[test]
fn test_selection_policy_withFromStrAndDisplay_shouldRoundTrip() {
    for policy in [SelectionPolicy::LineProximity, SelectionPolicy::AnchorBoundary] {
        let name = policy.to_string();
        assert_eq!(SelectionPolicy::from_str(&name).unwrap(), policy);
    }

    assert!(SelectionPolicy::from_str("nearest_vibe").is_err());
}

/// Test validation rejections
#[test]
fn test_validate_withNegativeDedupThreshold_shouldFail() {
    let mut config = Config::default();
    config.marker.dedup_threshold_percent = -0.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withThresholdAboveFullTimeline_shouldFail() {
    let mut config = Config::default();
    config.marker.dedup_threshold_percent = 150.0;
    assert!(config.validate().is_err());
}
