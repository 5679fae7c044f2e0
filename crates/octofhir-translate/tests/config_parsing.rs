use std::{env, fs};

use octofhir_translate::config::{AppConfig, loader::load_config};

#[test]
fn config_parsing_and_env_overrides_and_validation() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("octofhir-tx.toml");

    let toml_content = r#"
[logging]
level = "debug"

[mappings]
files = ["maps/gender.json", "maps/bundle.json"]

[output]
format = "table"
"#;
    fs::write(&path, toml_content).expect("write toml");

    // 1) Valid config parses
    let cfg = load_config(path.to_str()).expect("should parse config");
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.mappings.files.len(), 2);
    assert_eq!(cfg.output.format, "table");

    // 2) Env override should win over file
    unsafe {
        env::set_var("OCTOFHIR_TX__LOGGING__LEVEL", "trace");
    }
    let cfg_env = load_config(path.to_str()).expect("should parse config with env overrides");
    assert_eq!(cfg_env.logging.level, "trace");
    unsafe {
        env::remove_var("OCTOFHIR_TX__LOGGING__LEVEL");
    }

    // 3) Invalid values are rejected by validation
    let bad_path = dir.path().join("bad.toml");
    fs::write(&bad_path, "[output]\nformat = \"xml\"\n").expect("write bad toml");
    let err = load_config(bad_path.to_str()).expect_err("xml is not a valid format");
    assert!(err.contains("output.format"), "{err}");
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("absent.toml");
    let err = load_config(path.to_str()).expect_err("file does not exist");
    assert!(err.contains("not found"), "{err}");
}

#[test]
fn config_round_trips_through_toml() {
    let mut cfg = AppConfig::default();
    cfg.mappings.files.push("maps/gender.json".into());

    let text = toml::to_string(&cfg).expect("serialize");
    let parsed: AppConfig = toml::from_str(&text).expect("deserialize");
    assert_eq!(parsed.mappings.files, cfg.mappings.files);
    assert_eq!(parsed.logging.level, "warn");
    assert!(parsed.validate().is_ok());
}
