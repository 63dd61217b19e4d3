// input.rs — winit window events -> GestureEvent
//
// Translation only: a left-button drag or a single-finger drag becomes a pan,
// trackpad magnify/rotate map to pinch/twist, the mouse wheel zooms in steps.

use crate::gesture::GestureEvent;
use glam::Vec2;
use std::collections::HashMap;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};

/// Pinch ratio produced by one wheel line (scrolling up zooms in).
pub const WHEEL_STEP_RATIO: f32 = 1.1;
/// Pixel-precise scroll deltas are converted to lines with this factor.
pub const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Debug, Default)]
pub struct WinitGestureSource {
    dragging: bool,
    last_cursor: Option<Vec2>,
    touches: HashMap<u64, Vec2>,
}

impl WinitGestureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &WindowEvent<'_>) -> Option<GestureEvent> {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_button(*button, *state);
                None
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position),
            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                self.dragging = false;
                self.last_cursor = None;
                None
            }
            WindowEvent::MouseWheel { delta, .. } => self.mouse_wheel(*delta),
            WindowEvent::TouchpadMagnify { delta, .. } => self.magnify(*delta),
            WindowEvent::TouchpadRotate { delta, .. } => self.rotate_degrees(*delta),
            WindowEvent::Touch(touch) => self.touch(touch.id, touch.phase, touch.location),
            _ => None,
        }
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
            if !self.dragging {
                self.last_cursor = None;
            }
        }
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<GestureEvent> {
        if !self.dragging {
            return None;
        }
        let position = to_vec2(position);
        let previous = self.last_cursor.replace(position)?;
        Some(GestureEvent::pan(position - previous))
    }

    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta) -> Option<GestureEvent> {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
        };
        if lines == 0.0 || !lines.is_finite() {
            return None;
        }
        Some(GestureEvent::Scale {
            ratio: WHEEL_STEP_RATIO.powf(lines),
        })
    }

    /// `delta` is the relative magnification reported by the trackpad, 0 meaning no change.
    pub fn magnify(&mut self, delta: f64) -> Option<GestureEvent> {
        let ratio = 1.0 + delta as f32;
        if !(ratio.is_finite() && ratio > 0.0) || ratio == 1.0 {
            return None;
        }
        Some(GestureEvent::Scale { ratio })
    }

    /// winit reports degrees, counter-clockwise positive.
    pub fn rotate_degrees(&mut self, delta: f32) -> Option<GestureEvent> {
        if delta == 0.0 || !delta.is_finite() {
            return None;
        }
        Some(GestureEvent::Rotate {
            radians: -delta.to_radians(),
        })
    }

    pub fn touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
    ) -> Option<GestureEvent> {
        let location = to_vec2(location);
        match phase {
            TouchPhase::Started => {
                self.touches.insert(id, location);
                None
            }
            TouchPhase::Moved => {
                let single = self.touches.len() == 1;
                let previous = self.touches.get_mut(&id)?;
                let delta = location - *previous;
                *previous = location;
                // multi-finger input belongs to a recognizer upstream
                single.then(|| GestureEvent::pan(delta))
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
                None
            }
        }
    }
}

fn to_vec2(position: PhysicalPosition<f64>) -> Vec2 {
    Vec2::new(position.x as f32, position.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition::new(x, y)
    }

    #[test]
    fn drag_produces_pan_deltas() {
        let mut source = WinitGestureSource::new();
        assert_eq!(source.cursor_moved(at(10.0, 10.0)), None);

        source.mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(source.cursor_moved(at(10.0, 10.0)), None);
        assert_eq!(
            source.cursor_moved(at(25.0, 4.0)),
            Some(GestureEvent::Pan { dx: 15.0, dy: -6.0 })
        );

        source.mouse_button(MouseButton::Left, ElementState::Released);
        assert_eq!(source.cursor_moved(at(40.0, 4.0)), None);
    }

    #[test]
    fn right_button_does_not_drag() {
        let mut source = WinitGestureSource::new();
        source.mouse_button(MouseButton::Right, ElementState::Pressed);
        source.cursor_moved(at(0.0, 0.0));
        assert_eq!(source.cursor_moved(at(5.0, 5.0)), None);
    }

    #[test]
    fn wheel_up_zooms_in() {
        let mut source = WinitGestureSource::new();
        match source.mouse_wheel(MouseScrollDelta::LineDelta(0.0, 1.0)) {
            Some(GestureEvent::Scale { ratio }) => assert!((ratio - WHEEL_STEP_RATIO).abs() < 1e-6),
            other => panic!("unexpected {other:?}"),
        }
        match source.mouse_wheel(MouseScrollDelta::PixelDelta(at(0.0, -40.0))) {
            Some(GestureEvent::Scale { ratio }) => assert!(ratio < 1.0),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(source.mouse_wheel(MouseScrollDelta::LineDelta(1.0, 0.0)), None);
    }

    #[test]
    fn trackpad_gestures_map_to_pinch_and_twist() {
        let mut source = WinitGestureSource::new();
        assert_eq!(source.magnify(0.25), Some(GestureEvent::Scale { ratio: 1.25 }));
        assert_eq!(source.magnify(-1.5), None);
        assert_eq!(source.magnify(0.0), None);
        match source.rotate_degrees(90.0) {
            Some(GestureEvent::Rotate { radians }) => {
                assert!((radians + std::f32::consts::FRAC_PI_2).abs() < 1e-6)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn only_single_touch_pans() {
        let mut source = WinitGestureSource::new();
        source.touch(1, TouchPhase::Started, at(0.0, 0.0));
        assert_eq!(
            source.touch(1, TouchPhase::Moved, at(3.0, 4.0)),
            Some(GestureEvent::Pan { dx: 3.0, dy: 4.0 })
        );

        source.touch(2, TouchPhase::Started, at(50.0, 50.0));
        assert_eq!(source.touch(1, TouchPhase::Moved, at(6.0, 8.0)), None);

        source.touch(2, TouchPhase::Ended, at(50.0, 50.0));
        assert_eq!(
            source.touch(1, TouchPhase::Moved, at(7.0, 8.0)),
            Some(GestureEvent::Pan { dx: 1.0, dy: 0.0 })
        );
        assert_eq!(source.touch(9, TouchPhase::Moved, at(1.0, 1.0)), None);
    }
}
