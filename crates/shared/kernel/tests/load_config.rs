use anymod_kernel::config::{load_config, load_config_or_env};
use anymod_kernel::domain::HandlerSet;
use anymod_kernel::domain::config::AnymodConfig;
use serial_test::serial;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("anymod.toml");
    std::fs::write(&path, body).expect("write config");
    path
}

#[test]
#[serial]
fn loads_file_sections() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[resolver]
search_paths = ["units", "vendor/units"]
handlers = ["ini", "json"]

[logging]
level = "debug"
"#,
    );

    let cfg: AnymodConfig = load_config(Some(&path)).expect("load config");
    assert_eq!(cfg.resolver.search_paths, [Path::new("units"), Path::new("vendor/units")]);
    assert_eq!(cfg.resolver.handlers, HandlerSet::INI | HandlerSet::JSON);
    assert_eq!(cfg.logging.level, "debug");
}

#[test]
#[serial]
fn optional_file_falls_back_to_defaults() {
    let cfg: AnymodConfig = load_config_or_env(None::<&Path>).expect("env config");
    assert_eq!(cfg.resolver.search_paths, [Path::new(".")]);
    assert_eq!(cfg.resolver.handlers, HandlerSet::ALL);
}

#[test]
#[serial]
fn missing_file_is_an_error_with_context() {
    let dir = TempDir::new().unwrap();
    let err = load_config::<AnymodConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();

    assert_eq!(err.kind(), "Config");
    assert!(err.to_string().contains("Failed to build config"));
}
