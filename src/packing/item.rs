use serde::{Deserialize, Serialize};

use super::Bounds;

/// A floor footprint waiting to be placed inside a container.
///
/// Dimensions are in meters. `x`/`y` address the lower-left corner and stay at
/// zero until a bin places the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackableItem {
    /// Stable identity of the object this footprint was projected from
    pub id: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// True when width and height are swapped relative to the source object
    #[serde(default)]
    pub rotated: bool,
}

impl PackableItem {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            x: 0.0,
            y: 0.0,
            rotated: false,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Swap width and height and flip the rotated flag.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.width, &mut self.height);
        self.rotated = !self.rotated;
    }

    /// Lower-left and upper-right corners of the placed footprint.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x_min: self.x,
            y_min: self.y,
            x_max: self.x + self.width,
            y_max: self.y + self.height,
        }
    }

    /// Check if the item fits in a `width` x `height` region, optionally turned 90 degrees
    pub fn fits_within(&self, width: f64, height: f64, rotated: bool) -> bool {
        if rotated {
            self.height <= width && self.width <= height
        } else {
            self.width <= width && self.height <= height
        }
    }
}
