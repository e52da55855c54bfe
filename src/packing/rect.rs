use super::PackableItem;

/// An axis-aligned box given by its lower-left and upper-right corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// An empty region of a bin, addressed by its lower-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FreeRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x_min: self.x,
            y_min: self.y,
            x_max: self.x + self.width,
            y_max: self.y + self.height,
        }
    }

    /// Check if this rectangle intersects a box. Shared edges do not count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        other.x_min < self.x + self.width
            && other.x_max > self.x
            && other.y_min < self.y + self.height
            && other.y_max > self.y
    }

    /// Intersection of this rectangle with a box already known to intersect it
    pub fn overlap(&self, other: &Bounds) -> Bounds {
        Bounds {
            x_min: self.x.max(other.x_min),
            y_min: self.y.max(other.y_min),
            x_max: (self.x + self.width).min(other.x_max),
            y_max: (self.y + self.height).min(other.y_max),
        }
    }

    /// Maximal rectangles covering this one minus `overlap`.
    ///
    /// Emits the left, right, bottom and top slabs in that order, skipping any
    /// with zero extent. The slabs overlap each other at the corners.
    pub fn clip_around(&self, overlap: &Bounds) -> Vec<FreeRect> {
        let right_edge = self.x + self.width;
        let top_edge = self.y + self.height;
        let mut results = Vec::with_capacity(4);

        // Left
        if overlap.x_min > self.x {
            results.push(FreeRect::new(
                self.x,
                self.y,
                overlap.x_min - self.x,
                self.height,
            ));
        }

        // Right
        if overlap.x_max < right_edge {
            results.push(FreeRect::new(
                overlap.x_max,
                self.y,
                right_edge - overlap.x_max,
                self.height,
            ));
        }

        // Bottom
        if overlap.y_min > self.y {
            results.push(FreeRect::new(
                self.x,
                self.y,
                self.width,
                overlap.y_min - self.y,
            ));
        }

        // Top
        if overlap.y_max < top_edge {
            results.push(FreeRect::new(
                self.x,
                overlap.y_max,
                self.width,
                top_edge - overlap.y_max,
            ));
        }

        results
    }

    /// Check if this rectangle fully contains another, edges included
    pub fn encapsulates(&self, other: &FreeRect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.x + self.width >= other.x + other.width
            && self.y + self.height >= other.y + other.height
    }

    /// Maximal remainders after `item` has been put in the lower-left corner.
    ///
    /// The right remainder keeps the full height and the top remainder the full
    /// width, so the two may overlap.
    pub fn split(&self, item: &PackableItem) -> Vec<FreeRect> {
        let mut results = Vec::with_capacity(2);

        if item.width < self.width {
            results.push(FreeRect::new(
                self.x + item.width,
                self.y,
                self.width - item.width,
                self.height,
            ));
        }

        if item.height < self.height {
            results.push(FreeRect::new(
                self.x,
                self.y + item.height,
                self.width,
                self.height - item.height,
            ));
        }

        results
    }
}

/// Check if `item` fits in `rect`, with its sides swapped when `rotated` is set
pub fn item_fits(item: &PackableItem, rect: &FreeRect, rotated: bool) -> bool {
    item.fits_within(rect.width, rect.height, rotated)
}
