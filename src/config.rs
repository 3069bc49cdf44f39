//! Viewer configuration, loaded from a TOML file with defaults as fallback.

use crate::viewer::ProjectionMode;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/viewer.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Distance of the menu from the viewer, in world units.
    pub menu_distance: f32,
    /// Vertical gap between stacked menu widgets.
    pub menu_spacing: f32,
    /// Angular gaze tolerance for menu buttons, in degrees.
    pub gaze_tolerance_deg: f32,
    /// Projection mode at startup.
    pub start_mode: ProjectionMode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 100.0,
            menu_distance: 20.0,
            menu_spacing: 0.5,
            gaze_tolerance_deg: 3.0,
            start_mode: ProjectionMode::Equirectangular,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on
    /// errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ViewerConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ViewerConfig::default()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Viewer config not found at {}. Using defaults",
                        path.display()
                    );
                }
                ViewerConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}
