use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use server_api::ConfigPolicy;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub static_dir: PathBuf,
    pub assets_subdir: String,
    pub broadcast_capacity: usize,
    pub config_policy: ConfigPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5000".into(),
            static_dir: PathBuf::from("docs"),
            assets_subdir: "assets".into(),
            broadcast_capacity: 256,
            config_policy: ConfigPolicy::Lenient,
        }
    }
}

impl Settings {
    /// Directory the image catalog is scanned from.
    pub fn assets_dir(&self) -> PathBuf {
        self.static_dir.join(&self.assets_subdir)
    }

    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new("server.toml"), |key| std::env::var(key).ok())
}

/// Defaults, then the flat key/value `server.toml`, then environment
/// overrides. Values that do not parse are ignored.
pub fn load_settings_from(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("static_dir") {
                    settings.static_dir = PathBuf::from(v);
                }
                if let Some(v) = file_cfg.get("assets_subdir") {
                    settings.assets_subdir = v.clone();
                }
                if let Some(v) = file_cfg.get("broadcast_capacity") {
                    apply_capacity(&mut settings, v);
                }
                if let Some(v) = file_cfg.get("config_policy") {
                    apply_policy(&mut settings, v);
                }
            }
            Err(error) => {
                tracing::warn!(path = %config_path.display(), %error, "ignoring malformed settings file");
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("STATIC_DIR") {
        settings.static_dir = PathBuf::from(v);
    }
    if let Some(v) = env("APP__STATIC_DIR") {
        settings.static_dir = PathBuf::from(v);
    }

    if let Some(v) = env("APP__ASSETS_SUBDIR") {
        settings.assets_subdir = v;
    }

    if let Some(v) = env("APP__BROADCAST_CAPACITY") {
        apply_capacity(&mut settings, &v);
    }

    if let Some(v) = env("APP__CONFIG_POLICY") {
        apply_policy(&mut settings, &v);
    }

    settings
}

fn apply_capacity(settings: &mut Settings, raw: &str) {
    match raw.trim().parse::<usize>() {
        Ok(parsed) if parsed > 0 => settings.broadcast_capacity = parsed,
        _ => tracing::warn!(value = raw, "ignoring invalid broadcast capacity"),
    }
}

fn apply_policy(settings: &mut Settings, raw: &str) {
    match ConfigPolicy::parse(raw) {
        Some(policy) => settings.config_policy = policy,
        None => tracing::warn!(value = raw, "ignoring unknown config policy"),
    }
}

/// The static root must be a directory. A missing assets directory only
/// warns since catalog queries report it per request.
pub fn check_static_layout(settings: &Settings) -> anyhow::Result<()> {
    let metadata = fs::metadata(&settings.static_dir).with_context(|| {
        format!(
            "static directory '{}' is not accessible",
            settings.static_dir.display()
        )
    })?;
    if !metadata.is_dir() {
        bail!(
            "static directory '{}' is not a directory",
            settings.static_dir.display()
        );
    }

    let assets_dir = settings.assets_dir();
    if !assets_dir.is_dir() {
        tracing::warn!(
            assets_dir = %assets_dir.display(),
            "assets directory missing; image catalog requests will fail until it exists"
        );
    }
    if !settings.index_file().is_file() {
        tracing::warn!(
            index = %settings.index_file().display(),
            "index.html missing from static directory"
        );
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
