// observer.rs — who gets told when the camera moves

use glam::Quat;
use serde::Serialize;

/// Receives every accepted orientation or zoom change, synchronously.
pub trait NavigationObserver {
    fn on_orientation_changed(&mut self, orientation: Quat);
    fn on_field_of_view_changed(&mut self, vfov_degrees: f32);
}

/// A recorded change. Orientation is stored as `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Notification {
    Orientation([f32; 4]),
    FieldOfView(f32),
}

impl Notification {
    pub fn orientation(&self) -> Option<Quat> {
        match self {
            Notification::Orientation(q) => Some(Quat::from_array(*q)),
            Notification::FieldOfView(_) => None,
        }
    }

    pub fn field_of_view(&self) -> Option<f32> {
        match self {
            Notification::FieldOfView(v) => Some(*v),
            Notification::Orientation(_) => None,
        }
    }
}

impl NavigationObserver for () {
    fn on_orientation_changed(&mut self, _orientation: Quat) {}
    fn on_field_of_view_changed(&mut self, _vfov_degrees: f32) {}
}

impl NavigationObserver for Vec<Notification> {
    fn on_orientation_changed(&mut self, orientation: Quat) {
        self.push(Notification::Orientation(orientation.to_array()));
    }

    fn on_field_of_view_changed(&mut self, vfov_degrees: f32) {
        self.push(Notification::FieldOfView(vfov_degrees));
    }
}

impl<O: NavigationObserver + ?Sized> NavigationObserver for &mut O {
    fn on_orientation_changed(&mut self, orientation: Quat) {
        (**self).on_orientation_changed(orientation);
    }

    fn on_field_of_view_changed(&mut self, vfov_degrees: f32) {
        (**self).on_field_of_view_changed(vfov_degrees);
    }
}

impl<O: NavigationObserver + ?Sized> NavigationObserver for Box<O> {
    fn on_orientation_changed(&mut self, orientation: Quat) {
        (**self).on_orientation_changed(orientation);
    }

    fn on_field_of_view_changed(&mut self, vfov_degrees: f32) {
        (**self).on_field_of_view_changed(vfov_degrees);
    }
}
