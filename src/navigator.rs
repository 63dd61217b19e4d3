// navigator.rs — gesture / device-motion state machine driving a CameraState

use crate::camera_state::{checked_orientation, CameraState, FovBounds, ViewSize};
use crate::config::NavigatorConfig;
use crate::error::{NavigatorError, Result};
use crate::gesture::GestureEvent;
use crate::observer::NavigationObserver;
use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    #[default]
    Gesture,
    DeviceMotion,
}

/// Owns the camera state and translates input into rotations and zoom.
///
/// In [`NavigationMode::Gesture`] pan, rotate and pinch events are applied
/// and motion updates are dropped; in [`NavigationMode::DeviceMotion`] it is
/// the other way round. Dropped input is not an error. Input containing
/// NaN or infinities is rejected before anything is modified.
///
/// The observer hears about every accepted change once, after the state
/// holds its final value.
#[derive(Debug)]
pub struct Navigator<O: NavigationObserver> {
    state: CameraState,
    mode: NavigationMode,
    observer: O,
    pan_sensitivity: f32,
    zoom_in_device_motion_mode: bool,
    home_orientation: Quat,
    home_fov_radians: f32,
}

impl<O: NavigationObserver> Navigator<O> {
    pub fn new(state: CameraState, mode: NavigationMode, observer: O) -> Self {
        Self {
            home_orientation: state.orientation(),
            home_fov_radians: state.fov_radians(),
            state,
            mode,
            observer,
            pan_sensitivity: 1.0,
            zoom_in_device_motion_mode: false,
        }
    }

    // default zoom range
    pub fn with_view(
        initial_orientation: Quat,
        vertical_fov_degrees: f32,
        view_size: ViewSize,
        mode: NavigationMode,
        observer: O,
    ) -> Result<Self> {
        let state = CameraState::new(
            initial_orientation,
            vertical_fov_degrees,
            view_size,
            FovBounds::default(),
        )?;
        Ok(Self::new(state, mode, observer))
    }

    pub fn from_config(config: &NavigatorConfig, view_size: ViewSize, observer: O) -> Result<Self> {
        let state = config.initial_state(view_size)?;
        Self::new(state, config.initial_mode, observer).configured(config)
    }

    pub fn configured(mut self, config: &NavigatorConfig) -> Result<Self> {
        self.pan_sensitivity = config.checked_pan_sensitivity()?;
        self.zoom_in_device_motion_mode = config.zoom_in_device_motion_mode;
        Ok(self)
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn orientation(&self) -> Quat {
        self.state.orientation()
    }

    pub fn fov_degrees(&self) -> f32 {
        self.state.fov_degrees()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn enter_gesture_mode(&mut self) {
        if self.mode == NavigationMode::Gesture {
            return;
        }
        log::debug!("navigation mode: device motion -> gesture");
        self.mode = NavigationMode::Gesture;
    }

    // `initial` becomes the new absolute orientation
    pub fn enter_device_motion_mode(&mut self, initial: Quat) -> Result<()> {
        let orientation = checked_orientation(initial, "device motion orientation")?;
        if self.mode != NavigationMode::DeviceMotion {
            log::debug!("navigation mode: gesture -> device motion");
            self.mode = NavigationMode::DeviceMotion;
        }
        self.replace_and_notify(orientation);
        Ok(())
    }

    // ignored in gesture mode
    pub fn set_motion_orientation(&mut self, orientation: Quat) -> Result<()> {
        let orientation = checked_orientation(orientation, "device motion orientation")?;
        if self.mode != NavigationMode::DeviceMotion {
            log::trace!("motion update ignored in gesture mode");
            return Ok(());
        }
        self.replace_and_notify(orientation);
        Ok(())
    }

    pub fn apply(&mut self, event: GestureEvent) -> Result<()> {
        match event {
            GestureEvent::Pan { dx, dy } => self.on_pan(Vec2::new(dx, dy)),
            GestureEvent::Rotate { radians } => self.on_rotate(radians),
            GestureEvent::Scale { ratio } => self.on_scale(ratio),
        }
    }

    /// Drag-to-look: one view height of drag turns the camera by one vertical field of view.
    pub fn on_pan(&mut self, delta: Vec2) -> Result<()> {
        if !delta.is_finite() {
            return Err(reject(NavigatorError::NonFiniteInput { what: "pan delta" }));
        }
        if self.mode != NavigationMode::Gesture {
            return Ok(());
        }
        let angle_per_distance = self.state.angle_per_distance() * self.pan_sensitivity;
        let horizontal_angle = -delta.x * angle_per_distance;
        let vertical_angle = -delta.y * angle_per_distance;
        // a tiny view height or a huge delta can overflow the angle
        if !(horizontal_angle.is_finite() && vertical_angle.is_finite()) {
            return Err(reject(NavigatorError::NonFiniteInput { what: "pan angle" }));
        }
        let horizontal = Quat::from_axis_angle(Vec3::Y, horizontal_angle);
        let vertical = Quat::from_axis_angle(Vec3::X, vertical_angle);
        log::trace!("pan {delta} -> yaw {horizontal_angle} rad, pitch {vertical_angle} rad");
        // horizontal outer, vertical inner
        self.compose_and_notify(horizontal * vertical)
    }

    pub fn on_rotate(&mut self, angle: f32) -> Result<()> {
        if !angle.is_finite() {
            return Err(reject(NavigatorError::NonFiniteInput {
                what: "rotation angle",
            }));
        }
        if self.mode != NavigationMode::Gesture {
            return Ok(());
        }
        log::trace!("rotate {angle} rad");
        self.compose_and_notify(Quat::from_axis_angle(Vec3::Z, -angle))
    }

    /// Pinch zoom: spreading the fingers (`ratio > 1`) narrows the field of view.
    pub fn on_scale(&mut self, ratio: f32) -> Result<()> {
        if !ratio.is_finite() {
            return Err(reject(NavigatorError::NonFiniteInput { what: "scale ratio" }));
        }
        if ratio <= 0.0 {
            return Err(reject(NavigatorError::NonPositiveScale { ratio }));
        }
        if self.mode != NavigationMode::Gesture && !self.zoom_in_device_motion_mode {
            return Ok(());
        }
        let target = self.state.fov_radians() / ratio;
        log::trace!("scale {ratio} -> fov {target} rad");
        self.set_fov_and_notify(target);
        Ok(())
    }

    // works in either mode
    pub fn set_fov_degrees(&mut self, degrees: f32) -> Result<()> {
        if !degrees.is_finite() {
            return Err(reject(NavigatorError::NonFiniteInput {
                what: "field of view",
            }));
        }
        self.set_fov_and_notify(degrees.to_radians());
        Ok(())
    }

    pub fn set_fov_radians(&mut self, radians: f32) -> Result<()> {
        if !radians.is_finite() {
            return Err(reject(NavigatorError::NonFiniteInput {
                what: "field of view",
            }));
        }
        self.set_fov_and_notify(radians);
        Ok(())
    }

    /// Back to the orientation and zoom the navigator was created with. The mode is kept.
    pub fn reset(&mut self) {
        log::debug!("navigator reset");
        self.replace_and_notify(self.home_orientation);
        self.set_fov_and_notify(self.home_fov_radians);
    }

    fn compose_and_notify(&mut self, rotation: Quat) -> Result<()> {
        self.state.compose_rotation(rotation).map_err(reject)?;
        self.observer.on_orientation_changed(self.state.orientation());
        Ok(())
    }

    fn replace_and_notify(&mut self, orientation: Quat) {
        self.state.replace_orientation(orientation);
        self.observer.on_orientation_changed(self.state.orientation());
    }

    fn set_fov_and_notify(&mut self, radians: f32) {
        if self.state.set_fov_radians(radians) {
            self.observer.on_field_of_view_changed(self.state.fov_degrees());
        }
    }
}

fn reject(err: NavigatorError) -> NavigatorError {
    log::warn!("rejected input: {err}");
    err
}
