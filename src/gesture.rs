// gesture.rs — normalized gesture deltas delivered by the input layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One gesture delta, already recognized upstream.
///
/// - `Pan`: drag distance since the previous event, in view units, y pointing down.
/// - `Rotate`: twist since the previous event, radians, positive clockwise on screen.
/// - `Scale`: pinch ratio since the previous event; `> 1` means the fingers spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum GestureEvent {
    Pan { dx: f32, dy: f32 },
    Rotate { radians: f32 },
    Scale { ratio: f32 },
}

impl GestureEvent {
    pub fn pan(delta: Vec2) -> Self {
        GestureEvent::Pan {
            dx: delta.x,
            dy: delta.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_script_entries() {
        let events: Vec<GestureEvent> = serde_json::from_str(
            r#"[
                {"gesture": "pan", "dx": 12.0, "dy": -3.5},
                {"gesture": "rotate", "radians": 0.25},
                {"gesture": "scale", "ratio": 1.5}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            events,
            vec![
                GestureEvent::pan(Vec2::new(12.0, -3.5)),
                GestureEvent::Rotate { radians: 0.25 },
                GestureEvent::Scale { ratio: 1.5 },
            ]
        );
    }
}
