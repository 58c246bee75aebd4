use anyhow::{Context, Result};
#[cfg(not(target_os = "android"))]
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::platform::PlatformProfile;

pub struct Conf {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub settings_file: PathBuf,
}

/// User-editable settings, stored as JSON next to the other config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Android-style API level to model. Unset means "this desktop".
    pub api_level: Option<u32>,
    /// `env_logger` filter, e.g. `info` or `wallpick_core=debug`.
    pub log_level: Option<String>,
}

impl Conf {
    pub fn new() -> Result<Self> {
        let (config_dir, cache_dir) = {
            #[cfg(target_os = "android")]
            {
                (
                    PathBuf::from("/data/data/com.example.mywallpaper1/files"),
                    PathBuf::from("/data/data/com.example.mywallpaper1/cache"),
                )
            }

            #[cfg(not(target_os = "android"))]
            {
                let proj_dirs = ProjectDirs::from("com", "wallpick", "wallpick")
                    .context("Failed to get project directories")?;
                (
                    proj_dirs.config_dir().to_path_buf(),
                    proj_dirs.cache_dir().to_path_buf(),
                )
            }
        };

        Self::with_dirs(config_dir, cache_dir)
    }

    /// Lay out the config tree under explicit directories, creating them.
    pub fn with_dirs(config_dir: PathBuf, cache_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;
        fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create {}", cache_dir.display()))?;

        let settings_file = config_dir.join("settings.json");

        Ok(Conf {
            config_dir,
            cache_dir,
            settings_file,
        })
    }

    /// Read settings, writing a default file on first run.
    pub fn load_settings(&self) -> Result<Settings> {
        if !self.settings_file.exists() {
            let settings = Settings::default();
            save_settings(&self.settings_file, &settings)?;
            return Ok(settings);
        }

        let content = fs::read_to_string(&self.settings_file)
            .with_context(|| format!("Failed to read {}", self.settings_file.display()))?;
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings in {}", self.settings_file.display()))
    }
}

fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

impl Settings {
    /// Pick the platform strategy once, at startup.
    pub fn profile(&self, desktop_env: &str) -> PlatformProfile {
        match self.api_level {
            Some(level) => PlatformProfile::for_api_level(level),
            None => PlatformProfile::desktop(desktop_env),
        }
    }

    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MediaPermission, WallpaperApi};
    use tempfile::TempDir;

    fn conf(dir: &TempDir) -> Conf {
        Conf::with_dirs(dir.path().join("config"), dir.path().join("cache")).unwrap()
    }

    #[test]
    fn first_load_writes_default_settings() {
        let dir = TempDir::new().unwrap();
        let conf = conf(&dir);

        assert!(!conf.settings_file.exists());
        assert_eq!(conf.load_settings().unwrap(), Settings::default());
        assert!(conf.settings_file.exists());
        assert!(conf.cache_dir.is_dir());
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let dir = TempDir::new().unwrap();
        let conf = conf(&dir);
        fs::write(&conf.settings_file, r#"{ "api_level": 23 }"#).unwrap();

        let settings = conf.load_settings().unwrap();
        assert_eq!(settings.api_level, Some(23));
        assert_eq!(settings.log_filter(), "info");

        let profile = settings.profile("gnome");
        assert_eq!(profile.media_permission, MediaPermission::ReadExternalStorage);
        assert_eq!(profile.wallpaper_api, WallpaperApi::Undifferentiated);
    }

    #[test]
    fn malformed_settings_are_an_error() {
        let dir = TempDir::new().unwrap();
        let conf = conf(&dir);
        fs::write(&conf.settings_file, "api_level = 33").unwrap();

        assert!(conf.load_settings().is_err());
    }

    #[test]
    fn missing_api_level_uses_desktop_profile() {
        let settings = Settings::default();
        assert_eq!(settings.profile("gnome").wallpaper_api, WallpaperApi::Targeted);
        assert_eq!(settings.profile("xfce4").wallpaper_api, WallpaperApi::Undifferentiated);
    }
}
