// replay.rs — scripted navigation sessions, for headless runs and debugging
//
// A script is a JSON array of steps, e.g.
//   [ {"gesture": {"gesture": "pan", "dx": 40, "dy": 0}},
//     {"enter_device_motion_mode": [0, 0.7071, 0, 0.7071]},
//     {"motion": [0, 0, 0, 1]},
//     "enter_gesture_mode",
//     {"set_fov_degrees": 45},
//     "reset" ]

use crate::error::{NavigatorError, Result};
use crate::gesture::GestureEvent;
use crate::navigator::Navigator;
use crate::observer::NavigationObserver;
use glam::Quat;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    Gesture(GestureEvent),
    EnterGestureMode,
    /// `[x, y, z, w]`
    EnterDeviceMotionMode([f32; 4]),
    /// `[x, y, z, w]`
    Motion([f32; 4]),
    SetFovDegrees(f32),
    Reset,
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let text = std::fs::read_to_string(path).map_err(|source| NavigatorError::FileIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| NavigatorError::FileParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies one step. Steps that the current mode ignores succeed without effect.
pub fn apply_step<O: NavigationObserver>(
    navigator: &mut Navigator<O>,
    step: &ScriptStep,
) -> Result<()> {
    match step {
        ScriptStep::Gesture(event) => navigator.apply(*event),
        ScriptStep::EnterGestureMode => {
            navigator.enter_gesture_mode();
            Ok(())
        }
        ScriptStep::EnterDeviceMotionMode(q) => {
            navigator.enter_device_motion_mode(Quat::from_array(*q))
        }
        ScriptStep::Motion(q) => navigator.set_motion_orientation(Quat::from_array(*q)),
        ScriptStep::SetFovDegrees(d) => navigator.set_fov_degrees(*d),
        ScriptStep::Reset => {
            navigator.reset();
            Ok(())
        }
    }
}

/// Runs every step in order, stopping at the first rejected one.
pub fn run_script<O: NavigationObserver>(
    navigator: &mut Navigator<O>,
    steps: &[ScriptStep],
) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        apply_step(navigator, step).inspect_err(|err| {
            log::error!("script step {index} ({step:?}) failed: {err}");
        })?;
    }
    Ok(())
}
