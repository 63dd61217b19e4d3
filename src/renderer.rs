// renderer.rs — camera data as the renderer consumes it (GPU uniform + matrices)

use crate::observer::NavigationObserver;
use glam::{Mat4, Quat, Vec3};

/// Laid out for a std140 uniform buffer: 32 bytes, no implicit padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub orientation: [f32; 4], // x, y, z, w
    pub fov_rad: f32,
    pub aspect: f32,
    pad1: f32,
    pad2: f32,
}

impl CameraUniform {
    pub fn new(orientation: Quat, fov_degrees: f32, aspect: f32) -> Self {
        Self {
            orientation: orientation.to_array(),
            fov_rad: fov_degrees.to_radians(),
            aspect,
            pad1: 0.0,
            pad2: 0.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_array(self.orientation)
    }

    /// The camera sits at the sphere's centre, so the view matrix is the inverse rotation only.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation().conjugate())
    }

    pub fn projection_matrix(&self, z_near: f32, z_far: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_rad, self.aspect, z_near, z_far)
    }

    pub fn view_projection(&self, z_near: f32, z_far: f32) -> Mat4 {
        self.projection_matrix(z_near, z_far) * self.view_matrix()
    }

    /// World-space direction at the centre of the screen (camera looks down -Z).
    pub fn view_direction(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Keeps a [`CameraUniform`] in step with the navigator; `dirty` tells the
/// render loop a buffer upload is due.
#[derive(Debug, Clone)]
pub struct UniformObserver {
    uniform: CameraUniform,
    dirty: bool,
}

impl UniformObserver {
    /// Seeded with the navigator's initial values, which are never announced.
    pub fn new(orientation: Quat, fov_degrees: f32, aspect: f32) -> Self {
        Self {
            uniform: CameraUniform::new(orientation, fov_degrees, aspect),
            dirty: true,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 && aspect != self.uniform.aspect {
            self.uniform.aspect = aspect;
            self.dirty = true;
        }
    }

    pub fn uniform(&self) -> &CameraUniform {
        &self.uniform
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the uniform if it changed since the last call.
    pub fn take_dirty(&mut self) -> Option<CameraUniform> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.uniform)
    }
}

impl NavigationObserver for UniformObserver {
    fn on_orientation_changed(&mut self, orientation: Quat) {
        self.uniform.orientation = orientation.to_array();
        self.dirty = true;
    }

    fn on_field_of_view_changed(&mut self, vfov_degrees: f32) {
        self.uniform.fov_rad = vfov_degrees.to_radians();
        self.dirty = true;
    }
}
