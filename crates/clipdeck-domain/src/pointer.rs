use clipdeck_core::Point;
use serde::{Deserialize, Serialize};

/// Window-level pointer events delivered through the pointer hub.
///
/// Presses are routed by the widget under the pointer instead, since only
/// that widget knows which clip was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
}

impl PointerEvent {
    pub fn point(&self) -> Point {
        match *self {
            PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => Point::new(x, y),
        }
    }
}
