//! Tests for settings parsing and bounds

use std::time::Duration;

use fakeping::config::{Settings, SharedSettings, MAX_BASE_DELAY_MS, MAX_JITTER_MS};
use fakeping::core::{Category, SettingsSource};

#[test]
fn test_settings_from_full_file() {
    let json = r#"{
  "enabled": true,
  "baseDelayMs": 180,
  "jitterMs": 25,
  "delayAttacks": true,
  "delayMovement": false,
  "delayInteractions": true,
  "delayBlockBreaking": false,
  "delayItemUse": true,
  "showHud": false
}"#;
    let s = Settings::from_json_str(json).unwrap();
    assert!(s.enabled);
    assert_eq!(s.base_delay(), Duration::from_millis(180));
    assert_eq!(s.jitter(), Duration::from_millis(25));
    assert!(s.is_category_enabled(Category::Attack));
    assert!(!s.is_category_enabled(Category::Movement));
    assert!(!s.is_category_enabled(Category::BlockBreak));
    assert!(!s.show_hud);
}

#[test]
fn test_settings_empty_object_is_default() {
    assert_eq!(Settings::from_json_str("{}").unwrap(), Settings::default());
}

#[test]
fn test_settings_rejects_non_object() {
    assert!(Settings::from_json_str("[1, 2]").is_err());
    assert!(Settings::from_json_str("not json").is_err());
}

#[test]
fn test_settings_clamped_on_load() {
    let s = Settings::from_json_str(r#"{"baseDelayMs": 99999, "jitterMs": -5}"#).unwrap();
    assert_eq!(s.base_delay_ms, MAX_BASE_DELAY_MS);
    assert_eq!(s.jitter_ms, 0);
    assert!(s.jitter_ms <= MAX_JITTER_MS);
}

#[test]
fn test_shared_settings_replace() {
    let shared = SharedSettings::default();
    shared.replace(Settings {
        enabled: true,
        jitter_ms: 500,
        ..Settings::default()
    });
    assert!(shared.is_enabled());
    assert_eq!(shared.jitter(), Duration::from_millis(100));
}
