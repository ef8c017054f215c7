// tests/config_load.rs
use contribution_router::config::{load_config_default, load_config_from, ENV_CONFIG_PATH};
use std::{env, fs};

#[test]
fn parse_toml_and_json_paths() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("contribution.toml");
    fs::write(
        &p_toml,
        r#"
[wallet]
linked = true
balance = 4.0

[processors]
external_outcome = false
"#,
    )
    .unwrap();
    let t = load_config_from(&p_toml).unwrap();
    assert!(t.wallet.linked);
    assert_eq!(t.wallet.balance, 4.0);
    assert!(t.processors.token_outcome);
    assert!(!t.processors.external_outcome);

    let p_json = dir.path().join("contribution.json");
    fs::write(&p_json, r#"{"tokens":{"vg":7.0,"sku":-2.0}}"#).unwrap();
    let j = load_config_from(&p_json).unwrap();
    assert_eq!(j.tokens.vg, 7.0);
    assert_eq!(j.tokens.sku, 0.0);
    assert!(!j.wallet.linked);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = load_config_from(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("nope.toml"));
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ is not picked up.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    env::remove_var(ENV_CONFIG_PATH);

    // 1) Nothing on disk -> defaults
    let d = load_config_default().unwrap();
    assert!(!d.wallet.linked);
    assert_eq!(d.tokens.vg, 0.0);

    // 2) Fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("contribution.toml"), "[tokens]\nvg = 3.5\n").unwrap();
    let t = load_config_default().unwrap();
    assert_eq!(t.tokens.vg, 3.5);

    // 3) Env var wins
    let p_env = tmp.path().join("override.json");
    fs::write(&p_env, r#"{"wallet":{"linked":true,"balance":1.0}}"#).unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    let e = load_config_default().unwrap();
    assert!(e.wallet.linked);
    assert_eq!(e.tokens.vg, 0.0);

    // 4) Env var pointing nowhere is an error
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(load_config_default().is_err());
    env::remove_var(ENV_CONFIG_PATH);

    env::set_current_dir(&old).unwrap();
}
