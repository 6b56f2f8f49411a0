/*!
 * Tests for application configuration functionality
 */

use gnome_l10n::app_config::{CACHE_TTL_OPTIONS, Config, LogLevel};
use gnome_l10n::stats::{FilterMode, SortKey};

use crate::common::create_temp_dir;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.api_base, "https://l10n.gnome.org/api/v1");
    assert_eq!(config.default_release, "gnome-49");
    assert_eq!(config.default_language, "sv");
    assert_eq!(config.cache_ttl, 3600);
    assert_eq!(config.request_timeout_secs, 15);
    assert_eq!(config.request_delay_ms, 100);
    assert_eq!(config.sort, SortKey::PercentAsc);
    assert_eq!(config.filter_mode, FilterMode::All);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.api_base = "not a url".to_string();
    assert!(config.validate().is_err());
    config.api_base = "http://localhost:8000/api/v1".to_string();
    assert!(config.validate().is_ok());

    config.default_language = "xx".to_string();
    assert!(config.validate().is_err());
    config.default_language = "pt_BR".to_string();
    assert!(config.validate().is_ok());

    config.default_release = " ".to_string();
    assert!(config.validate().is_err());
    config.default_release = "gnome-48".to_string();

    config.cache_ttl = 0;
    assert!(config.validate().is_err());
    config.cache_ttl = 1800;

    config.request_timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() {
    let config: Config = serde_json::from_str(r#"{"default_language": "de", "cache_ttl": 7200, "sort": "name_asc"}"#).unwrap();

    assert_eq!(config.default_language, "de");
    assert_eq!(config.cache_ttl, 7200);
    assert_eq!(config.sort, SortKey::NameAsc);
    assert_eq!(config.default_release, "gnome-49");
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("gnome-l10n").join("settings.json");

    let created = Config::load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let mut changed = created.clone();
    changed.default_language = "fi".to_string();
    changed.save(&path).unwrap();

    assert_eq!(Config::load_or_create(&path).unwrap(), changed);
}

#[test]
fn test_config_load_withInvalidJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load(&path).is_err());
}

#[test]
fn test_cacheTtlOptions_shouldIncludeOneHour() {
    assert!(CACHE_TTL_OPTIONS.iter().any(|(secs, label)| *secs == 3600 && *label == "1 hour"));
}
