//! Orientation and zoom control for a camera at the centre of a celestial sphere.
//!
//! A [`Navigator`] owns the [`CameraState`] (unit quaternion + vertical field
//! of view) and is fed either gesture deltas or absolute device-motion
//! orientations, depending on its [`NavigationMode`]. Every accepted change is
//! pushed to a [`NavigationObserver`], typically a renderer.
//!
//! ```text
//! winit events ─► WinitGestureSource ─► GestureEvent ─┐
//!                                                     ├─► Navigator ─► CameraState
//! motion sensor ─► Quat ──────────────────────────────┘        │
//!                                                              ▼
//!                                                  NavigationObserver (UniformObserver, ...)
//! ```

pub mod camera_state;
pub mod config;
pub mod error;
pub mod gesture;
pub mod input;
pub mod navigator;
pub mod observer;
pub mod renderer;
pub mod replay;

pub use camera_state::{CameraState, FovBounds, ViewSize};
pub use config::NavigatorConfig;
pub use error::{NavigatorError, Result};
pub use gesture::GestureEvent;
pub use input::WinitGestureSource;
pub use navigator::{NavigationMode, Navigator};
pub use observer::{NavigationObserver, Notification};
pub use renderer::{CameraUniform, UniformObserver};
pub use replay::ScriptStep;
