use anyhow::Context;
use directories::ProjectDirs;
use gridsync_core::Config;
use std::path::{Path, PathBuf};

pub(crate) fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridsync")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// An explicit `--config` file must exist; the default one is optional.
pub(crate) fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path)
            .with_context(|| format!("failed to load config file {}", path.display()));
    }
    match default_config_path() {
        Some(path) if path.is_file() => Config::load(&path)
            .with_context(|| format!("failed to load config file {}", path.display())),
        _ => Ok(Config::default()),
    }
}
