// config.rs — navigator settings
//
// Settings live in a JSON file; every field is optional:
//   { "min_fov_radians": 0.1, "max_fov_radians": 2.0, "initial_fov_degrees": 60.0,
//     "initial_orientation": [0, 0, 0, 1], "initial_mode": "gesture",
//     "pan_sensitivity": 1.0, "zoom_in_device_motion_mode": false }
//
// File selection:
// - CLI: --config <path>
// - Env: CELESTIAL_NAV_CONFIG
// - ./celestial-navigator.json if present
// - otherwise built-in defaults

use crate::camera_state::{
    CameraState, FovBounds, ViewSize, DEFAULT_MAX_FOV_RADIANS, DEFAULT_MIN_FOV_RADIANS,
};
use crate::error::{NavigatorError, Result};
use crate::navigator::NavigationMode;
use glam::Quat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "CELESTIAL_NAV_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "celestial-navigator.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub min_fov_radians: f32,
    pub max_fov_radians: f32,
    pub initial_fov_degrees: f32,
    /// `[x, y, z, w]`
    pub initial_orientation: [f32; 4],
    pub initial_mode: NavigationMode,
    /// Multiplier on the radians-per-pixel pan mapping.
    pub pan_sensitivity: f32,
    /// Keep pinch zoom active while device motion drives the orientation.
    pub zoom_in_device_motion_mode: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            min_fov_radians: DEFAULT_MIN_FOV_RADIANS,
            max_fov_radians: DEFAULT_MAX_FOV_RADIANS,
            initial_fov_degrees: 60.0,
            initial_orientation: Quat::IDENTITY.to_array(),
            initial_mode: NavigationMode::Gesture,
            pan_sensitivity: 1.0,
            zoom_in_device_motion_mode: false,
        }
    }
}

impl NavigatorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| NavigatorError::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| NavigatorError::FileParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file chosen from the command line / environment, or returns defaults.
    pub fn resolve() -> Result<Self> {
        match resolve_config_path() {
            Some(path) => {
                log::info!("loading navigator config from {}", path.display());
                Self::load(&path)
            }
            None => {
                log::debug!("no navigator config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn bounds(&self) -> Result<FovBounds> {
        FovBounds::new(self.min_fov_radians, self.max_fov_radians)
    }

    pub fn initial_orientation(&self) -> Quat {
        Quat::from_array(self.initial_orientation)
    }

    pub fn initial_state(&self, view_size: ViewSize) -> Result<CameraState> {
        CameraState::new(
            self.initial_orientation(),
            self.initial_fov_degrees,
            view_size,
            self.bounds()?,
        )
    }

    pub fn checked_pan_sensitivity(&self) -> Result<f32> {
        let value = self.pan_sensitivity;
        if !(value.is_finite() && value > 0.0) {
            return Err(NavigatorError::InvalidSensitivity { value });
        }
        Ok(value)
    }
}

/// Pick the config path from explicit arguments and an environment value.
pub fn config_path_from(
    args: impl IntoIterator<Item = String>,
    env_value: Option<String>,
) -> Option<PathBuf> {
    let mut it = args.into_iter();
    while let Some(a) = it.next() {
        if a == "--config" {
            if let Some(v) = it.next() {
                return Some(PathBuf::from(v));
            }
        }
    }

    if let Some(v) = env_value {
        if !v.trim().is_empty() {
            return Some(PathBuf::from(v));
        }
    }

    None
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = config_path_from(std::env::args(), std::env::var(CONFIG_ENV_VAR).ok()) {
        return Some(p);
    }

    let p = PathBuf::from(DEFAULT_CONFIG_FILE);
    if p.exists() {
        return Some(p);
    }

    None
}
