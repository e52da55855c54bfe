use log::debug;

use super::heuristic::{Score, compare_scores};
use super::{Bounds, FreeRect, Heuristic, PackableItem, item_fits};

/// Best placement found for an item in one bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub score: Score,
    /// Index of the chosen rectangle in the bin's free list
    pub rect_index: usize,
    pub rect: FreeRect,
    /// True when the item has to be turned to fit
    pub rotated: bool,
}

/// MaxRects bin: the free space of one container and what was put in it
#[derive(Debug, Clone)]
pub struct MaxRectsBin {
    bin_width: f64,
    bin_height: f64,
    rotation: bool,
    heuristic: Heuristic,
    free_area: f64,
    free_rects: Vec<FreeRect>,
    items: Vec<PackableItem>,
}

impl MaxRectsBin {
    pub fn new(width: f64, height: f64, rotation: bool, heuristic: Heuristic) -> Self {
        let free_rects = if width == 0.0 || height == 0.0 {
            Vec::new()
        } else {
            vec![FreeRect::new(0.0, 0.0, width, height)]
        };

        Self {
            bin_width: width,
            bin_height: height,
            rotation,
            heuristic,
            free_area: width * height,
            free_rects,
            items: Vec::new(),
        }
    }

    /// Find the lowest-scoring free rectangle and orientation for `item`.
    ///
    /// Ties go to the earlier rectangle, and to the unrotated orientation.
    pub fn find_best_score(&self, item: &PackableItem) -> Option<Fit> {
        let mut best: Option<Fit> = None;
        let mut turned = item.clone();
        turned.rotate();

        for (rect_index, rect) in self.free_rects.iter().enumerate() {
            let mut consider = |candidate: &PackableItem, rotated: bool| {
                let score = self.heuristic.score(rect, candidate);
                let better = best
                    .as_ref()
                    .is_none_or(|b| compare_scores(&score, &b.score).is_lt());
                if better {
                    best = Some(Fit {
                        score,
                        rect_index,
                        rect: *rect,
                        rotated,
                    });
                }
            };

            if item_fits(item, rect, false) {
                consider(item, false);
            }
            if self.rotation && item_fits(item, rect, true) {
                consider(&turned, true);
            }
        }

        best
    }

    /// Try to place `item`. Returns false if no free rectangle can hold it.
    pub fn insert(&mut self, item: &PackableItem) -> bool {
        let Some(fit) = self.find_best_score(item) else {
            return false;
        };

        let mut placed = item.clone();
        if fit.rotated {
            placed.rotate();
        }
        placed.x = fit.rect.x;
        placed.y = fit.rect.y;

        debug!(
            "Placed '{}' ({}x{}) at ({}, {}){} with {:?} score {:?}",
            placed.id,
            placed.width,
            placed.height,
            placed.x,
            placed.y,
            if fit.rotated { " rotated" } else { "" },
            self.heuristic,
            fit.score
        );

        self.free_area -= placed.area();
        let remainders = fit.rect.split(&placed);
        self.free_rects.remove(fit.rect_index);
        self.free_rects.extend(remainders);

        let bounds = placed.bounds();
        self.items.push(placed);
        self.prune_overlaps(&bounds);
        true
    }

    /// Record an item that cannot be placed at all. It keeps its origin at (0, 0)
    /// and does not touch the free space.
    pub(crate) fn push_unplaced(&mut self, item: &PackableItem) {
        self.items.push(item.clone());
    }

    /// Replace every free rectangle overlapping `bounds` with the parts outside it
    fn prune_overlaps(&mut self, bounds: &Bounds) {
        let mut result = Vec::with_capacity(self.free_rects.len() + 4);

        for rect in &self.free_rects {
            if rect.intersects(bounds) {
                result.extend(rect.clip_around(&rect.overlap(bounds)));
            } else {
                result.push(*rect);
            }
        }

        self.free_rects = result;
        self.remove_redundant();
    }

    /// Remove rectangles that are fully contained within others
    fn remove_redundant(&mut self) {
        let mut i = 0;
        while i < self.free_rects.len() {
            let mut j = i + 1;
            let mut removed_i = false;
            while j < self.free_rects.len() {
                if self.free_rects[j].encapsulates(&self.free_rects[i]) {
                    self.free_rects.remove(i);
                    removed_i = true;
                    break;
                }
                if self.free_rects[i].encapsulates(&self.free_rects[j]) {
                    self.free_rects.remove(j);
                } else {
                    j += 1;
                }
            }
            // Re-examine the rectangle that slid into slot i
            if !removed_i {
                i += 1;
            }
        }
    }

    pub fn width(&self) -> f64 {
        self.bin_width
    }

    pub fn height(&self) -> f64 {
        self.bin_height
    }

    pub fn free_rects(&self) -> &[FreeRect] {
        &self.free_rects
    }

    pub fn items(&self) -> &[PackableItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<PackableItem> {
        self.items
    }

    /// Area not yet taken by placed items
    pub fn free_area(&self) -> f64 {
        self.free_area
    }

    /// Get packing efficiency as a ratio (0.0 to 1.0)
    pub fn occupancy(&self) -> f64 {
        let total_area = self.bin_width * self.bin_height;
        if total_area <= 0.0 {
            return 0.0;
        }
        (total_area - self.free_area) / total_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, width: f64, height: f64) -> PackableItem {
        PackableItem::new(id, width, height)
    }

    fn assert_no_redundant(bin: &MaxRectsBin) {
        let rects = bin.free_rects();
        for (i, a) in rects.iter().enumerate() {
            for (j, b) in rects.iter().enumerate() {
                if i != j {
                    assert!(!a.encapsulates(b), "{:?} encapsulates {:?}", a, b);
                }
            }
        }
    }

    fn assert_free_space_clear(bin: &MaxRectsBin) {
        for rect in bin.free_rects() {
            assert!(rect.width > 0.0 && rect.height > 0.0);
            assert!(rect.x >= 0.0 && rect.y >= 0.0);
            assert!(rect.x + rect.width <= bin.width());
            assert!(rect.y + rect.height <= bin.height());
            for placed in bin.items() {
                assert!(
                    !rect.intersects(&placed.bounds()),
                    "free {:?} overlaps '{}'",
                    rect,
                    placed.id
                );
            }
        }
    }

    #[test]
    fn test_single_insert() {
        let mut bin = MaxRectsBin::new(8.0, 4.0, false, Heuristic::BottomLeft);
        assert!(bin.insert(&item("a", 2.0, 2.0)));

        let placed = &bin.items()[0];
        assert_eq!((placed.x, placed.y), (0.0, 0.0));
        assert_eq!(
            bin.free_rects(),
            &[
                FreeRect::new(2.0, 0.0, 6.0, 4.0),
                FreeRect::new(0.0, 2.0, 8.0, 2.0),
            ]
        );
        assert_eq!(bin.free_area(), 28.0);
    }

    #[test]
    fn test_bottom_left_fills_row_first() {
        let mut bin = MaxRectsBin::new(8.0, 4.0, false, Heuristic::BottomLeft);
        for id in ["a", "b", "c", "d"] {
            assert!(bin.insert(&item(id, 2.0, 2.0)));
        }

        let origins: Vec<_> = bin.items().iter().map(|i| (i.x, i.y)).collect();
        assert_eq!(origins, [(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (6.0, 0.0)]);
        assert_eq!(bin.free_rects(), &[FreeRect::new(0.0, 2.0, 8.0, 2.0)]);
        assert_free_space_clear(&bin);
    }

    #[test]
    fn test_multiple_inserts_never_overlap() {
        for heuristic in Heuristic::ALL {
            let mut bin = MaxRectsBin::new(10.0, 10.0, true, heuristic);
            let sizes = [(3.0, 4.0), (5.0, 2.0), (2.0, 2.0), (4.0, 4.0), (1.0, 6.0), (3.0, 3.0)];
            for (i, (w, h)) in sizes.iter().enumerate() {
                bin.insert(&item(&format!("i{}", i), *w, *h));
                assert_free_space_clear(&bin);
                assert_no_redundant(&bin);
            }

            let items = bin.items();
            for (i, a) in items.iter().enumerate() {
                for b in &items[i + 1..] {
                    let (ab, bb) = (a.bounds(), b.bounds());
                    let apart = ab.x_max <= bb.x_min
                        || bb.x_max <= ab.x_min
                        || ab.y_max <= bb.y_min
                        || bb.y_max <= ab.y_min;
                    assert!(apart, "{:?}: '{}' overlaps '{}'", heuristic, a.id, b.id);
                }
            }
        }
    }

    #[test]
    fn test_too_large() {
        let mut bin = MaxRectsBin::new(4.0, 4.0, true, Heuristic::BottomLeft);
        assert!(bin.find_best_score(&item("a", 5.0, 1.0)).is_none());
        assert!(!bin.insert(&item("a", 5.0, 1.0)));
        assert!(bin.items().is_empty());
        assert_eq!(bin.free_area(), 16.0);
    }

    #[test]
    fn test_rotated_fit() {
        // Only the turned orientation fits a 2x1 space
        let mut bin = MaxRectsBin::new(2.0, 1.0, true, Heuristic::BottomLeft);
        let fit = bin.find_best_score(&item("a", 1.0, 2.0)).unwrap();
        assert!(fit.rotated);

        assert!(bin.insert(&item("a", 1.0, 2.0)));
        let placed = &bin.items()[0];
        assert!(placed.rotated);
        assert_eq!((placed.width, placed.height), (2.0, 1.0));
        assert!(bin.free_rects().is_empty());
    }

    #[test]
    fn test_rotation_disabled() {
        let mut bin = MaxRectsBin::new(2.0, 1.0, false, Heuristic::BottomLeft);
        assert!(!bin.insert(&item("a", 1.0, 2.0)));
    }

    #[test]
    fn test_rotation_tie_prefers_unrotated() {
        let bin = MaxRectsBin::new(4.0, 4.0, true, Heuristic::BestShortSide);
        let fit = bin.find_best_score(&item("a", 2.0, 2.0)).unwrap();
        assert!(!fit.rotated);
    }

    #[test]
    fn test_rotation_chosen_when_it_scores_better() {
        // 2x3 in 5x3 leaves (3, 0); turned to 3x2 it leaves (2, 1)
        let bin = MaxRectsBin::new(5.0, 3.0, true, Heuristic::BestLongSide);
        let fit = bin.find_best_score(&item("a", 2.0, 3.0)).unwrap();
        assert!(fit.rotated);
        assert_eq!(fit.score, (2.0, 1.0));
    }

    #[test]
    fn test_degenerate_bin_has_no_free_space() {
        let bin = MaxRectsBin::new(0.0, 4.0, true, Heuristic::BottomLeft);
        assert!(bin.free_rects().is_empty());
        assert!(bin.find_best_score(&item("a", 0.5, 0.5)).is_none());
        assert_eq!(bin.occupancy(), 0.0);
    }

    #[test]
    fn test_remove_redundant_drops_contained() {
        let mut bin = MaxRectsBin::new(10.0, 10.0, false, Heuristic::BottomLeft);
        bin.free_rects = vec![
            FreeRect::new(1.0, 1.0, 2.0, 2.0),
            FreeRect::new(0.0, 0.0, 5.0, 5.0),
            FreeRect::new(2.0, 2.0, 1.0, 1.0),
            FreeRect::new(6.0, 0.0, 4.0, 10.0),
            FreeRect::new(0.0, 0.0, 5.0, 5.0),
        ];
        bin.remove_redundant();

        assert_eq!(
            bin.free_rects(),
            &[
                FreeRect::new(6.0, 0.0, 4.0, 10.0),
                FreeRect::new(0.0, 0.0, 5.0, 5.0),
            ]
        );
        assert_no_redundant(&bin);
    }

    #[test]
    fn test_occupancy_full_bin() {
        let mut bin = MaxRectsBin::new(4.0, 4.0, false, Heuristic::BestArea);
        for id in ["a", "b", "c", "d"] {
            assert!(bin.insert(&item(id, 2.0, 2.0)));
        }

        assert!((bin.occupancy() - 1.0).abs() < 1e-9);
        assert!(bin.free_rects().is_empty());
    }

    #[test]
    fn test_push_unplaced_keeps_free_space() {
        let mut bin = MaxRectsBin::new(4.0, 4.0, false, Heuristic::BottomLeft);
        bin.push_unplaced(&item("huge", 9.0, 9.0));

        assert_eq!(bin.items().len(), 1);
        assert_eq!(bin.free_rects(), &[FreeRect::new(0.0, 0.0, 4.0, 4.0)]);
        assert_eq!(bin.occupancy(), 0.0);
    }
}
