use std::path::PathBuf;

use h2mm_tui::config::{CliSource, Config, ConfigError, ConfigStore};
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert!(!config.onboarding.complete);
}

#[test]
fn save_and_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.cli.source = CliSource::Custom;
    config.cli.custom_path = Some(PathBuf::from("/opt/h2mm-cli"));
    config.onboarding.complete = true;
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn custom_source_without_path_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[cli]\nsource = \"custom\"\n").unwrap();

    match Config::load_from(&path) {
        Err(ConfigError::ValidationError { message }) => {
            assert!(message.contains("custom_path"));
        }
        Err(other) => panic!("expected validation error, got {:?}", other),
        Ok(_) => panic!("expected validation error, got a config"),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "cli = not valid toml").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn store_update_persists_to_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let store = ConfigStore::new(Config::default(), path.clone());

    store
        .update(|config| config.onboarding.complete = true)
        .unwrap();

    assert!(store.get().onboarding.complete);
    let reloaded = Config::load_from(&path).unwrap();
    assert!(reloaded.onboarding.complete);
}

#[test]
fn store_keeps_old_value_when_update_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let store = ConfigStore::new(Config::default(), path.clone());

    let result = store.update(|config| {
        config.cli.source = CliSource::Custom;
        config.cli.custom_path = None;
    });
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));

    assert_eq!(store.get().cli.source, CliSource::Bundled);
    assert!(!path.exists(), "failed update must not touch the file");
}
