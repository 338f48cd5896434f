use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{AppError, PATH, SETTINGS};
use crate::models::Settings;

const SETTINGS_FILE: &str = "calc_settings.json";
const DIR_ENV: &str = "ESTIMATE_CALC_DIR";

pub fn resolve_config_dir() -> Result<PathBuf, AppError> {
  if let Ok(path) = std::env::var(DIR_ENV) {
    if !path.trim().is_empty() {
      return Ok(PathBuf::from(path));
    }
  }

  let base = dirs_next::config_dir()
    .ok_or_else(|| AppError::new(PATH, "config directory not found"))?;
  Ok(base.join("EstimateCalc"))
}

pub fn settings_path(dir: &Path) -> PathBuf {
  dir.join(SETTINGS_FILE)
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings(dir: &Path) -> Settings {
  let path = settings_path(dir);
  let contents = match fs::read_to_string(&path) {
    Ok(contents) => contents,
    Err(err) if err.kind() == ErrorKind::NotFound => {
      debug!("no settings at {}, using defaults", path.display());
      return Settings::default();
    }
    Err(err) => {
      warn!("failed to read settings {}: {}. Using defaults.", path.display(), err);
      return Settings::default();
    }
  };

  match serde_json::from_str::<Settings>(&contents) {
    Ok(settings) => {
      debug!("loaded settings from {}", path.display());
      settings
    }
    Err(err) => {
      warn!("invalid settings {}: {}. Using defaults.", path.display(), err);
      Settings::default()
    }
  }
}

pub fn update_settings(dir: &Path, settings: &Settings) -> Result<(), AppError> {
  fs::create_dir_all(dir)?;
  let contents = serde_json::to_string_pretty(settings)
    .map_err(|err| AppError::new(SETTINGS, err.to_string()))?;
  fs::write(settings_path(dir), contents)?;
  Ok(())
}
