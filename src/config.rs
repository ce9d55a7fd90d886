use std::fs;
use std::path::{Path, PathBuf};
use chrono::Local;
use iced::Theme;
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_STORAGE_FILE: &str = "local_storage.json";
pub const DEFAULT_BACKUP_FOLDER: &str = "backup";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub theme_name: String,
    #[serde(default)]
    pub storage_path: Option<String>,
    #[serde(default)]
    pub backup_folder: Option<String>,
    /// Default log filter, e.g. `"info"` or `"debug"`. `RUST_LOG` wins.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_name: theme_to_str(&Theme::Light).to_string(),
            storage_path: None,
            backup_folder: None,
            log_level: None,
        }
    }
}

impl Config {
    pub fn theme(&self) -> Theme {
        theme_from_str(&self.theme_name).unwrap_or(Theme::Light)
    }

    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(self.storage_path.as_deref().unwrap_or(DEFAULT_STORAGE_FILE))
    }

    pub fn backup_folder(&self) -> PathBuf {
        PathBuf::from(self.backup_folder.as_deref().unwrap_or(DEFAULT_BACKUP_FOLDER))
    }
}

/// Absent or unreadable config falls back to defaults.
pub fn load_config() -> Config {
    load_config_from(Path::new(CONFIG_FILE))
}

pub fn load_config_from(path: &Path) -> Config {
    let Ok(contents) = fs::read_to_string(path) else {
        return Config::default();
    };
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "config is malformed, using defaults");
        Config::default()
    })
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(config, Path::new(CONFIG_FILE))
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json).map_err(|e| Error::storage(path, e))?;
    Ok(())
}

/// Copies the storage file into `backup_dir` under a timestamped name.
pub fn backup_storage_now(storage_path: &Path, backup_dir: &Path) -> Result<PathBuf> {
    if !backup_dir.exists() {
        fs::create_dir_all(backup_dir).map_err(|e| Error::storage(backup_dir, e))?;
    }

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let backup_path = backup_dir.join(format!("backup_{}.json", timestamp));

    fs::copy(storage_path, &backup_path).map_err(|e| Error::storage(storage_path, e))?;
    Ok(backup_path)
}

pub fn theme_from_str(name: &str) -> Option<Theme> {
    Theme::ALL
        .iter()
        .find(|t| theme_to_str(t).eq_ignore_ascii_case(name))
        .cloned()
}

pub fn theme_to_str(theme: &Theme) -> &'static str {
    match theme {
        Theme::Light => "Light",
        Theme::Dark => "Dark",
        Theme::Dracula => "Dracula",
        Theme::Nord => "Nord",
        Theme::SolarizedLight => "SolarizedLight",
        Theme::SolarizedDark => "SolarizedDark",
        Theme::GruvboxLight => "GruvboxLight",
        Theme::GruvboxDark => "GruvboxDark",
        Theme::CatppuccinLatte => "CatppuccinLatte",
        Theme::CatppuccinFrappe => "CatppuccinFrappe",
        Theme::CatppuccinMacchiato => "CatppuccinMacchiato",
        Theme::CatppuccinMocha => "CatppuccinMocha",
        Theme::TokyoNight => "TokyoNight",
        Theme::TokyoNightStorm => "TokyoNightStorm",
        Theme::TokyoNightLight => "TokyoNightLight",
        Theme::KanagawaWave => "KanagawaWave",
        Theme::KanagawaDragon => "KanagawaDragon",
        Theme::KanagawaLotus => "KanagawaLotus",
        Theme::Moonfly => "Moonfly",
        Theme::Nightfly => "Nightfly",
        Theme::Oxocarbon => "Oxocarbon",
        Theme::Ferra => "Ferra",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_path(), PathBuf::from(DEFAULT_STORAGE_FILE));
        assert_eq!(config.theme(), Theme::Light);
    }

    #[test]
    fn test_malformed_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "theme = dark").unwrap();
        assert_eq!(load_config_from(&path), Config::default());
    }

    #[test]
    fn test_old_config_without_new_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"theme_name":"Dracula"}"#).unwrap();
        let config = load_config_from(&path);
        assert_eq!(config.theme(), Theme::Dracula);
        assert_eq!(config.backup_folder(), PathBuf::from(DEFAULT_BACKUP_FOLDER));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            theme_name: "Nord".to_string(),
            storage_path: Some("data/store.json".to_string()),
            backup_folder: None,
            log_level: Some("debug".to_string()),
        };
        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(theme_from_str("dark"), Some(Theme::Dark));
        assert_eq!(theme_from_str("nope"), None);
        assert_eq!(theme_to_str(&Theme::Ferra), "Ferra");
    }

    #[test]
    fn test_backup_copies_storage() {
        let dir = TempDir::new().unwrap();
        let storage = dir.path().join("local_storage.json");
        fs::write(&storage, r#"{"courses":"[]"}"#).unwrap();
        let backup = backup_storage_now(&storage, &dir.path().join("backup")).unwrap();
        assert!(backup.file_name().unwrap().to_string_lossy().starts_with("backup_"));
        assert_eq!(fs::read_to_string(backup).unwrap(), r#"{"courses":"[]"}"#);
    }

    #[test]
    fn test_backup_without_storage_fails() {
        let dir = TempDir::new().unwrap();
        let result = backup_storage_now(&dir.path().join("missing.json"), &dir.path().join("backup"));
        assert!(matches!(result, Err(Error::Storage { .. })));
    }
}
