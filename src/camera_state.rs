// camera_state.rs — orientation / vertical field of view and the rules that keep them valid

use crate::error::{NavigatorError, Result};
use glam::Quat;

pub const DEFAULT_MIN_FOV_RADIANS: f32 = 0.1;
pub const DEFAULT_MAX_FOV_RADIANS: f32 = 2.0;

// Inputs further than this from unit norm are logged before being normalized.
const NORM_TOLERANCE: f32 = 1e-3;

// radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovBounds {
    min_radians: f32,
    max_radians: f32,
}

impl FovBounds {
    pub fn new(min_radians: f32, max_radians: f32) -> Result<Self> {
        let valid = min_radians.is_finite()
            && max_radians.is_finite()
            && min_radians > 0.0
            && min_radians <= max_radians;
        if !valid {
            return Err(NavigatorError::InvalidFovBounds {
                min: min_radians,
                max: max_radians,
            });
        }
        Ok(Self {
            min_radians,
            max_radians,
        })
    }

    pub fn min_radians(&self) -> f32 {
        self.min_radians
    }

    pub fn max_radians(&self) -> f32 {
        self.max_radians
    }

    pub fn clamp(&self, radians: f32) -> f32 {
        radians.clamp(self.min_radians, self.max_radians)
    }
}

impl Default for FovBounds {
    fn default() -> Self {
        Self {
            min_radians: DEFAULT_MIN_FOV_RADIANS,
            max_radians: DEFAULT_MAX_FOV_RADIANS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSize {
    width: f32,
    height: f32,
}

impl ViewSize {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !valid {
            return Err(NavigatorError::InvalidViewSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Normalizes an externally supplied orientation, rejecting values that cannot represent a rotation.
pub fn checked_orientation(q: Quat, what: &'static str) -> Result<Quat> {
    if !q.is_finite() {
        return Err(NavigatorError::NonFiniteInput { what });
    }
    let length = q.length();
    if length <= f32::EPSILON {
        return Err(NavigatorError::DegenerateOrientation {
            components: q.to_array(),
        });
    }
    if (length - 1.0).abs() > NORM_TOLERANCE {
        log::warn!("{what} has norm {length}, normalizing");
    }
    Ok(q.normalize())
}

/// Camera rotation and zoom.
///
/// Mutators report whether the change has to be announced; notifying
/// observers is the caller's job, so a notification always sees the final
/// value.
#[derive(Debug, Clone)]
pub struct CameraState {
    orientation: Quat,
    vertical_fov: f32,
    bounds: FovBounds,
    view_size: ViewSize,
}

impl CameraState {
    // initial field of view in degrees, clamped into `bounds`
    pub fn new(
        orientation: Quat,
        vertical_fov_degrees: f32,
        view_size: ViewSize,
        bounds: FovBounds,
    ) -> Result<Self> {
        if !vertical_fov_degrees.is_finite() {
            return Err(NavigatorError::NonFiniteInput {
                what: "initial field of view",
            });
        }
        let orientation = checked_orientation(orientation, "initial orientation")?;
        let requested = vertical_fov_degrees.to_radians();
        let vertical_fov = bounds.clamp(requested);
        if vertical_fov != requested {
            log::warn!(
                "initial field of view {vertical_fov_degrees}° outside [{}, {}] rad, clamped",
                bounds.min_radians(),
                bounds.max_radians()
            );
        }
        Ok(Self {
            orientation,
            vertical_fov,
            bounds,
            view_size,
        })
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn fov_radians(&self) -> f32 {
        self.vertical_fov
    }

    pub fn fov_degrees(&self) -> f32 {
        self.vertical_fov.to_degrees()
    }

    pub fn bounds(&self) -> FovBounds {
        self.bounds
    }

    pub fn view_size(&self) -> ViewSize {
        self.view_size
    }

    // radians per unit of pan distance at the current zoom
    pub fn angle_per_distance(&self) -> f32 {
        self.vertical_fov / self.view_size.height
    }

    // true when the clamped value differs from the current one
    pub(crate) fn set_fov_radians(&mut self, radians: f32) -> bool {
        let clamped = self.bounds.clamp(radians);
        if clamped == self.vertical_fov {
            return false;
        }
        self.vertical_fov = clamped;
        true
    }

    pub(crate) fn set_fov_degrees(&mut self, degrees: f32) -> bool {
        self.set_fov_radians(degrees.to_radians())
    }

    /// `orientation ← rotation × orientation`: the new rotation acts in the world frame.
    /// A non-finite product is refused and the orientation is left as it was.
    pub(crate) fn compose_rotation(&mut self, rotation: Quat) -> Result<()> {
        // keep unit norm under repeated composition
        let composed = (rotation * self.orientation).normalize();
        if !composed.is_finite() {
            return Err(NavigatorError::NonFiniteInput {
                what: "composed orientation",
            });
        }
        self.orientation = composed;
        Ok(())
    }

    pub(crate) fn replace_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn state(fov_degrees: f32) -> CameraState {
        CameraState::new(
            Quat::IDENTITY,
            fov_degrees,
            ViewSize::new(800.0, 1000.0).unwrap(),
            FovBounds::default(),
        )
        .unwrap()
    }

    #[test]
    fn view_size_rejects_non_positive_height() {
        assert!(matches!(
            ViewSize::new(800.0, 0.0),
            Err(NavigatorError::InvalidViewSize { .. })
        ));
        assert!(ViewSize::new(800.0, -1.0).is_err());
        assert!(ViewSize::new(800.0, f32::NAN).is_err());
        assert!(ViewSize::new(0.0, 600.0).is_err());
    }

    #[test]
    fn bounds_must_be_ordered() {
        assert!(FovBounds::new(0.5, 0.2).is_err());
        assert!(FovBounds::new(0.0, 1.0).is_err());
        assert!(FovBounds::new(0.2, f32::INFINITY).is_err());
        assert!(FovBounds::new(0.3, 0.3).is_ok());
    }

    #[test]
    fn initial_fov_is_clamped() {
        let wide = state(170.0);
        assert_eq!(wide.fov_radians(), DEFAULT_MAX_FOV_RADIANS);
        let narrow = state(1.0);
        assert_eq!(narrow.fov_radians(), DEFAULT_MIN_FOV_RADIANS);
    }

    #[test]
    fn initial_orientation_is_normalized() {
        let s = CameraState::new(
            Quat::from_xyzw(0.0, 0.0, 0.0, 2.0),
            60.0,
            ViewSize::new(10.0, 10.0).unwrap(),
            FovBounds::default(),
        )
        .unwrap();
        assert!((s.orientation().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_orientation_is_rejected() {
        let err = checked_orientation(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0), "test").unwrap_err();
        assert!(matches!(err, NavigatorError::DegenerateOrientation { .. }));
        let err = checked_orientation(Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0), "test").unwrap_err();
        assert!(matches!(err, NavigatorError::NonFiniteInput { what: "test" }));
    }

    #[test]
    fn set_fov_reports_only_real_changes() {
        let mut s = state(60.0);
        assert!(!s.set_fov_degrees(60.0));
        assert!(s.set_fov_radians(0.5));
        assert_eq!(s.fov_radians(), 0.5);
        assert!(s.set_fov_radians(10.0));
        assert_eq!(s.fov_radians(), DEFAULT_MAX_FOV_RADIANS);
        // already at the upper bound
        assert!(!s.set_fov_radians(11.0));
    }

    #[test]
    fn degrees_round_trip() {
        let mut s = state(60.0);
        s.set_fov_degrees(42.5);
        assert!((s.fov_degrees() - 42.5).abs() < 1e-4);
    }

    #[test]
    fn angle_per_distance_follows_zoom() {
        let mut s = state(60.0);
        let before = s.angle_per_distance();
        assert!((before - PI / 3.0 / 1000.0).abs() < 1e-7);
        s.set_fov_radians(1.0);
        assert!((s.angle_per_distance() - 0.001).abs() < 1e-7);
    }

    #[test]
    fn composition_applies_new_rotation_in_world_frame() {
        let mut s = state(60.0);
        let yaw = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let pitch = Quat::from_axis_angle(Vec3::X, FRAC_PI_2);
        s.compose_rotation(yaw).unwrap();
        s.compose_rotation(pitch).unwrap();
        let expected = pitch * yaw;
        assert!(s.orientation().abs_diff_eq(expected, 1e-5));
        assert!(!s.orientation().abs_diff_eq(yaw * pitch, 1e-3));
    }

    #[test]
    fn non_finite_composition_keeps_previous_orientation() {
        let mut s = state(60.0);
        let before = s.orientation();
        let err = s
            .compose_rotation(Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, NavigatorError::NonFiniteInput { .. }));
        assert_eq!(s.orientation(), before);
    }
}
