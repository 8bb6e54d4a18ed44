use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    pub storage_dir: Option<PathBuf>,
}

impl CliConfig {
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(default_storage_dir)
    }
}

const APP_DIR: &str = "gbcc";

/// Per-user `gbcc` directory: `%APPDATA%` on Windows, else `$<xdg_var>`, else
/// `$HOME/<home_rel>`.
fn app_dir(xdg_var: &str, home_rel: &[&str]) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata).join(APP_DIR));
        }
    }

    if let Some(xdg) = std::env::var_os(xdg_var) {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = PathBuf::from(std::env::var_os("HOME")?);
    Some(home_rel.iter().fold(home, |p, part| p.join(part)).join(APP_DIR))
}

pub fn default_cli_config_path() -> PathBuf {
    app_dir("XDG_CONFIG_HOME", &[".config"])
        .map_or_else(|| PathBuf::from("cli.toml"), |dir| dir.join("cli.toml"))
}

pub fn default_storage_dir() -> PathBuf {
    app_dir("XDG_DATA_HOME", &[".local", "share"]).unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_from_file(path: &Path) -> CliConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return CliConfig::default(),
    };

    match toml::from_str::<CliConfig>(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(
                "Failed to parse CLI settings {}: {e}; using defaults",
                path.display()
            );
            CliConfig::default()
        }
    }
}
