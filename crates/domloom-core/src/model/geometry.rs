//! Element geometry.

use serde::{Deserialize, Serialize};

/// Bounding rectangle of a rendered element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Build from a snapshot bounds entry `[x, y, width, height, ...]`.
    pub fn from_bounds(bounds: &[f64]) -> Option<Self> {
        match bounds {
            [x, y, width, height, ..] => Some(Self {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }

    /// Both dimensions are positive.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
