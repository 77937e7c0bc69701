use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_when_nothing_is_configured() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("server.toml"), env_from(&[]));
    assert_eq!(settings.server_bind, "127.0.0.1:5000");
    assert_eq!(settings.assets_dir(), PathBuf::from("docs").join("assets"));
    assert_eq!(settings.broadcast_capacity, 256);
    assert_eq!(settings.config_policy, ConfigPolicy::Lenient);
}

#[test]
fn file_values_apply_and_env_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
bind_addr = "0.0.0.0:8080"
static_dir = "/srv/slideshow"
assets_subdir = "backgrounds"
broadcast_capacity = "64"
config_policy = "strict"
"#,
    )
    .expect("write settings");

    let settings = load_settings_from(&path, env_from(&[]));
    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(
        settings.assets_dir(),
        PathBuf::from("/srv/slideshow").join("backgrounds")
    );
    assert_eq!(settings.broadcast_capacity, 64);
    assert_eq!(settings.config_policy, ConfigPolicy::Strict);

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:9000"),
            ("APP__CONFIG_POLICY", "lenient"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:9000");
    assert_eq!(settings.config_policy, ConfigPolicy::Lenient);
}

#[test]
fn invalid_overrides_are_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(
        &dir.path().join("server.toml"),
        env_from(&[
            ("APP__BROADCAST_CAPACITY", "0"),
            ("APP__CONFIG_POLICY", "sometimes"),
        ]),
    );
    assert_eq!(settings.broadcast_capacity, 256);
    assert_eq!(settings.config_policy, ConfigPolicy::Lenient);
}

#[test]
fn malformed_settings_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "bind_addr = [not valid").expect("write settings");

    let settings = load_settings_from(&path, env_from(&[]));
    assert_eq!(settings.server_bind, "127.0.0.1:5000");
}

#[test]
fn static_layout_requires_a_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = Settings {
        static_dir: dir.path().to_path_buf(),
        ..Settings::default()
    };
    check_static_layout(&settings).expect("assets may be missing");

    settings.static_dir = dir.path().join("absent");
    let err = check_static_layout(&settings).expect_err("should fail");
    assert!(err.to_string().contains("is not accessible"));

    let file = dir.path().join("index.html");
    fs::write(&file, "<html></html>").expect("write index");
    settings.static_dir = file;
    let err = check_static_layout(&settings).expect_err("should fail");
    assert!(err.to_string().contains("is not a directory"));
}
