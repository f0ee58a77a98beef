// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Quake Explorer GUI config
//!

use crate::app_colours::ColourTheme;
use directories_next::ProjectDirs;
use log::info;
use quake_explorer_timeline::TimelineSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_QUALIFIER: &str = "org";
const ORG_NAME: &str = "QuakeExplorer";
const APPLICATION_NAME: &str = "QuakeExplorer";
const CONFIG_FILE_NAME: &str = "config.json";

/// Errors that can arise when loading or saving the [`Config`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to determine the config directory")]
    NoConfigDirectory,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The config that's saved to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The CSV file loaded on start up (if any)
    data_path: Option<PathBuf>,

    /// GUI colour theme
    pub colour_theme: ColourTheme,

    /// Timeline dimensions and playback duration
    pub timeline: TimelineSettings,
}

impl Default for Config {
    fn default() -> Self {
        info!("Creating default config");
        Self {
            data_path: None,
            colour_theme: ColourTheme::System,
            timeline: TimelineSettings::default(),
        }
    }
}

impl Config {
    /// Load the config from disk.  [`Config::ensure_setup()`] should have been
    /// called first.
    pub fn load() -> Result<Self, ConfigError> {
        info!("Loading config");
        Self::load_from(&config_file_path()?)
    }

    /// Load the config from a file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&data)?;
        info!("Config loaded = {config:?}");
        Ok(config)
    }

    pub fn colour_theme(&self) -> ColourTheme {
        self.colour_theme
    }

    pub fn set_colour_theme(&mut self, colour_theme: ColourTheme) {
        self.colour_theme = colour_theme;
    }

    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }

    pub fn set_data_path(&mut self, path: Option<PathBuf>) {
        self.data_path = path;
    }

    /// Create the default config file if there isn't one yet
    pub fn ensure_setup() -> Result<(), ConfigError> {
        info!("Ensuring config exists");
        let config_file_path = config_file_path()?;
        if !config_file_path.exists() {
            info!("No config file found");
            let new_config = Config::default();
            new_config.save_to(&config_file_path)?;
            info!("Config created = {new_config:?}");
        };
        info!("Config is setup");
        Ok(())
    }

    /// Save the config to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path()?)
    }

    /// Save the config to a file (creating its directory if need be)
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("Saving config to {path:?}");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Config saved");
        Ok(())
    }
}

/// Get the project directories (e.g. where the config is stored)
#[cfg(debug_assertions)]
fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    info!("Getting project directories (dev build)");
    ProjectDirs::from(
        PROJECT_QUALIFIER,
        ORG_NAME,
        &format!("{APPLICATION_NAME} Dev"),
    )
    .ok_or(ConfigError::NoConfigDirectory)
}

/// Get the project directories (e.g. where the config is stored)
#[cfg(not(debug_assertions))]
fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    info!("Getting project directories");
    ProjectDirs::from(PROJECT_QUALIFIER, ORG_NAME, APPLICATION_NAME)
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Get the path to the config
fn config_file_path() -> Result<PathBuf, ConfigError> {
    let config_file = project_dirs()?.config_dir().join(CONFIG_FILE_NAME);
    info!("Config file path = {config_file:?}");
    Ok(config_file)
}

#[cfg(test)]
mod test {
    use super::*;
    use quake_explorer_timeline::TrackLayout;
    use tempdir::TempDir;

    #[test]
    fn save_and_load() {
        let dir = TempDir::new("quake-explorer-config").unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.set_data_path(Some(PathBuf::from("/data/quakes.csv")));
        config.set_colour_theme(ColourTheme::Dark);
        config.timeline.layout = TrackLayout::from(500.0, 20.0, 8.0).unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.data_path(), Some(Path::new("/data/quakes.csv")));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"colour_theme": "Light"}"#).unwrap();
        assert_eq!(config.colour_theme(), ColourTheme::Light);
        assert_eq!(config.data_path(), None);
        assert_eq!(config.timeline, TimelineSettings::default());
    }

    #[test]
    fn load_errors() {
        let dir = TempDir::new("quake-explorer-config").unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(Config::load_from(&missing), Err(ConfigError::Io(_))));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(Config::load_from(&bad), Err(ConfigError::Json(_))));
    }
}
