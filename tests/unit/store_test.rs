//! Tests for settings stores

use std::path::PathBuf;

use fakeping::builders::FakePingBuilder;
use fakeping::config::{Settings, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use fakeping::core::SchedulerError;
use fakeping::infra::{FileSettingsStore, InMemorySettingsStore, SettingsStore};
use parking_lot::Mutex;

// The process environment is shared by every test in this binary.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("fakeping-test-{}", std::process::id()))
        .join(name)
        .join("fakeping.json")
}

#[test]
fn test_file_store_creates_defaults_when_missing() {
    let path = temp_path("missing");
    let _ = std::fs::remove_file(&path);
    let store = FileSettingsStore::new(&path);

    let loaded = store.load().unwrap();
    assert_eq!(loaded, Settings::default());
    assert!(path.exists());
}

#[test]
fn test_file_store_save_then_load() {
    let path = temp_path("roundtrip");
    let store = FileSettingsStore::new(&path);
    let settings = Settings {
        enabled: true,
        base_delay_ms: 333,
        delay_item_use: false,
        ..Settings::default()
    };

    store.save(&settings).unwrap();
    assert_eq!(store.load().unwrap(), settings);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"baseDelayMs\": 333"));
}

#[test]
fn test_file_store_reports_malformed_file() {
    let path = temp_path("malformed");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ enabled: yes").unwrap();

    let err = FileSettingsStore::new(&path).load().unwrap_err();
    assert!(matches!(err, SchedulerError::Serde(_)));
}

#[test]
fn test_memory_store_counts_saves() {
    let store = InMemorySettingsStore::new();
    assert_eq!(store.load().unwrap(), Settings::default());

    store.save(&Settings::default()).unwrap();
    store.save(&Settings::default()).unwrap();
    assert_eq!(store.save_count(), 2);
    assert_eq!(store.stored(), Some(Settings::default()));
}

#[test]
fn test_from_env_uses_config_variable() {
    let _env = ENV_LOCK.lock();
    let path = temp_path("from-env");
    std::env::set_var(CONFIG_PATH_ENV, &path);

    let store = FileSettingsStore::from_env();
    std::env::remove_var(CONFIG_PATH_ENV);
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn test_from_env_falls_back_to_default_path() {
    let _env = ENV_LOCK.lock();
    std::env::remove_var(CONFIG_PATH_ENV);

    let store = FileSettingsStore::from_env();
    assert_eq!(store.path(), std::path::Path::new(DEFAULT_CONFIG_PATH));
}

#[test]
fn test_builder_uses_defaults_when_file_is_unreadable() {
    // A directory at the settings path exists but cannot be read as a file.
    let path = temp_path("unreadable");
    std::fs::create_dir_all(&path).unwrap();

    let ctx = FakePingBuilder::new()
        .with_store(FileSettingsStore::new(&path))
        .build()
        .unwrap();
    assert_eq!(ctx.settings().snapshot(), Settings::default());
}

#[test]
fn test_builder_rejects_malformed_file() {
    let path = temp_path("malformed-build");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[1, 2").unwrap();

    let err = FakePingBuilder::new()
        .with_store(FileSettingsStore::new(&path))
        .build()
        .unwrap_err();
    assert!(matches!(err, SchedulerError::Serde(_)));
}
