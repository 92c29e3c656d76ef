use serde::{Deserialize, Serialize};

/// Minimum swipe power (|offset| * velocity) for a flick to count
pub const CONFIDENCE_THRESHOLD: f64 = 10_000.0;
/// Minimum drag distance, in pixels, for a slow drag to count
pub const OFFSET_THRESHOLD: f64 = 100.0;

/// A decision taken on the active card
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Pass,
    Interest,
    Save,
    Undo,
}

/// 2D pointer vector: displacement in pixels or velocity in pixels/ms
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GestureThresholds {
    pub confidence: f64,
    pub offset: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            confidence: CONFIDENCE_THRESHOLD,
            offset: OFFSET_THRESHOLD,
        }
    }
}

/// Swipe power along one axis. The sign follows the velocity.
pub fn swipe_power(offset: f64, velocity: f64) -> f64 {
    offset.abs() * velocity
}

impl GestureThresholds {
    /// Classify a pointer release. `None` means the card springs back.
    ///
    /// Up swipes save, right swipes show interest, left swipes undo.
    /// Down swipes are not bound to anything.
    pub fn classify(&self, offset: Vector, velocity: Vector) -> Option<Decision> {
        let power_h = swipe_power(offset.x, velocity.x);
        let power_v = swipe_power(offset.y, velocity.y);

        if offset.y.abs() > offset.x.abs() {
            if power_v < -self.confidence || offset.y < -self.offset {
                return Some(Decision::Save);
            }
            return None;
        }

        if power_h < -self.confidence || offset.x < -self.offset {
            Some(Decision::Undo)
        } else if power_h > self.confidence || offset.x > self.offset {
            Some(Decision::Interest)
        } else {
            None
        }
    }
}

/// Classify with the default thresholds.
pub fn classify(offset: Vector, velocity: Vector) -> Option<Decision> {
    GestureThresholds::default().classify(offset, velocity)
}
