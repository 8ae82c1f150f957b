use std::{fs, sync::Mutex};

use sectionflow_config::{
    BoundaryRelease, ConfigLoad, ConfigSource, NavigatorConfig,
    loader::{CONFIG_JSON_ENV, CONFIG_PATH_ENV},
};
use tempfile::tempdir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_overrides() {
    unsafe {
        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::remove_var(CONFIG_JSON_ENV);
    }
}

#[test]
fn env_path_takes_precedence_over_inline_json() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_overrides();

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("stage.toml");
    fs::write(
        &path,
        "[gesture]\nwheel_threshold = 45.0\n\n[lock]\nboundary_release = \"await_timeout\"\n",
    )
    .unwrap();

    unsafe {
        std::env::set_var(CONFIG_PATH_ENV, &path);
        std::env::set_var(CONFIG_JSON_ENV, r#"{"lock": {"timeout_ms": 1}}"#);
    }

    let ConfigLoad {
        config: cfg,
        source,
    } = NavigatorConfig::load_from_env().expect("load");
    clear_overrides();

    assert_eq!(source, ConfigSource::EnvPath(path));
    assert_eq!(cfg.gesture.wheel_threshold, 45.0);
    assert_eq!(cfg.lock.boundary_release, BoundaryRelease::AwaitTimeout);
    assert_eq!(cfg.lock.timeout_ms, 700);
}

#[test]
fn inline_json_is_used_without_a_path() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_overrides();

    unsafe {
        std::env::set_var(
            CONFIG_JSON_ENV,
            r#"{"viewport": {"settle_delay_ms": 150}}"#,
        );
    }

    let ConfigLoad {
        config: cfg,
        source,
    } = NavigatorConfig::load_from_env().expect("load");
    clear_overrides();

    assert_eq!(source, ConfigSource::EnvInline);
    assert_eq!(cfg.viewport.settle_delay_ms, 150);
}

#[test]
fn json_file_by_extension() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("stage.json");
    fs::write(&path, r#"{"rate_limit": {"wheel_debounce_ms": 80}}"#).unwrap();

    let load = NavigatorConfig::load_from_file(&path).expect("load");
    let cfg = load.config;

    assert_eq!(load.source, ConfigSource::File(path));
    assert_eq!(cfg.rate_limit.wheel_debounce_ms, 80);
    assert_eq!(cfg.rate_limit.touch_move_throttle_ms, 16);
}

#[test]
fn inline_json_failing_guard_rails_is_a_load_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_overrides();

    unsafe {
        std::env::set_var(
            CONFIG_JSON_ENV,
            r#"{"viewport": {"enter_ratio": 0.2, "exit_ratio": 0.6}}"#,
        );
    }

    let err = NavigatorConfig::load_from_env().unwrap_err();
    clear_overrides();

    let message = format!("{err:#}");
    assert!(message.contains("EnvInline"), "{message}");
    assert!(message.contains("viewport ratios"), "{message}");
}

#[test]
fn file_failing_guard_rails_is_a_load_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("stage.toml");
    fs::write(&path, "[lock]\ntimeout_ms = 50\n").unwrap();

    let err = NavigatorConfig::load_from_file(&path).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("stage.toml"), "{message}");
    assert!(message.contains("exceeds lock.timeout_ms"), "{message}");
}

#[test]
fn missing_file_mentions_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");

    let err = NavigatorConfig::load_from_file(&path).unwrap_err();

    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn default_file_discovery_prefers_toml() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(dir.path().join("config/sectionflow.json"), "{}").unwrap();
    fs::write(dir.path().join("sectionflow.toml"), "").unwrap();

    let found = NavigatorConfig::find_default_file(dir.path());

    assert_eq!(found, Some(dir.path().join("sectionflow.toml")));
}
