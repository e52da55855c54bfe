use log::{debug, info};
use rayon::prelude::*;

use super::{Admission, Arrangement};
use crate::error::PackError;
use crate::packing::{BinAlgo, BoxPacker, Heuristic, PackOutcome, PackableItem};

/// Configuration for arranging items on a container floor
#[derive(Debug, Clone)]
pub struct Arranger {
    pub width: f64,
    pub height: f64,
    pub bin_algo: BinAlgo,
    pub heuristic: Heuristic,
    pub rotation: bool,
    pub sorting: bool,
    /// Try every heuristic and keep the best layout
    pub best: bool,
}

impl Arranger {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            bin_algo: BinAlgo::FirstFit,
            heuristic: Heuristic::BottomLeft,
            rotation: false,
            sorting: true,
            best: false,
        }
    }

    pub fn bin_algo(mut self, bin_algo: BinAlgo) -> Self {
        self.bin_algo = bin_algo;
        self
    }

    pub fn heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn rotation(mut self, rotation: bool) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn sorting(mut self, sorting: bool) -> Self {
        self.sorting = sorting;
        self
    }

    pub fn best(mut self, best: bool) -> Self {
        self.best = best;
        self
    }

    /// Arrange the items with the configured heuristic, or the best one when searching
    pub fn arrange(&self, items: Vec<PackableItem>) -> Result<Arrangement, PackError> {
        if self.best {
            return self.find_best_heuristic(items);
        }

        let outcome = self.try_pack(items, self.heuristic)?;
        Ok(Arrangement {
            outcome,
            heuristic: self.heuristic,
        })
    }

    /// Check whether `candidate` can join `existing` without anything overflowing
    pub fn admit(&self, existing: &[PackableItem], candidate: PackableItem) -> Admission {
        let mut items = existing.to_vec();
        items.push(candidate.clone());

        match self.arrange(items) {
            Ok(arrangement) if arrangement.fits_all() => Admission::Fits(arrangement),
            Ok(arrangement) => Admission::NoSpace {
                overlapped: arrangement.overlapped().to_vec(),
            },
            Err(e) => {
                debug!("Admission of '{}' failed: {}", candidate.id, e);
                Admission::NoSpace {
                    overlapped: vec![candidate],
                }
            }
        }
    }

    fn try_pack(
        &self,
        items: Vec<PackableItem>,
        heuristic: Heuristic,
    ) -> Result<PackOutcome, PackError> {
        BoxPacker::new(self.width, self.height, items)
            .bin_algo(self.bin_algo)
            .heuristic(heuristic)
            .rotation(self.rotation)
            .sorting(self.sorting)
            .pack()
    }

    /// Try every heuristic and keep the best result. Ties go to the earlier heuristic.
    fn find_best_heuristic(&self, items: Vec<PackableItem>) -> Result<Arrangement, PackError> {
        let results: Vec<_> = Heuristic::ALL
            .par_iter()
            .map(|&heuristic| {
                self.try_pack(items.clone(), heuristic)
                    .map(|outcome| Arrangement { outcome, heuristic })
            })
            .collect();

        let mut best: Option<Arrangement> = None;
        let mut first_error = None;

        for result in results {
            match result {
                Ok(arrangement) => {
                    debug!(
                        "Heuristic {:?}: fitted {}, overlapped {}, occupancy {:.1}%",
                        arrangement.heuristic,
                        arrangement.outcome.fitted.len(),
                        arrangement.outcome.overlapped.len(),
                        arrangement.outcome.occupancy * 100.0
                    );
                    let dominated = best.as_ref().is_some_and(|b| !arrangement.is_better_than(b));
                    if !dominated {
                        best = Some(arrangement);
                    }
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match best {
            Some(arrangement) => {
                info!("Best heuristic: {}", arrangement.heuristic.title());
                Ok(arrangement)
            }
            None => Err(first_error.unwrap_or(PackError::General)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(sizes: &[(f64, f64)]) -> Vec<PackableItem> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, (w, h))| PackableItem::new(format!("box_{}", i), *w, *h))
            .collect()
    }

    #[test]
    fn test_arrange_uses_configured_heuristic() {
        let arrangement = Arranger::new(8.0, 4.0)
            .heuristic(Heuristic::BestArea)
            .arrange(items(&[(2.0, 2.0); 4]))
            .unwrap();

        assert_eq!(arrangement.heuristic, Heuristic::BestArea);
        assert_eq!(arrangement.outcome.fitted.len(), 4);
        assert!(arrangement.fits_all());
    }

    #[test]
    fn test_best_is_at_least_as_good_as_each_heuristic() {
        let sizes = [(3.0, 2.0), (2.5, 1.5), (4.0, 1.0), (1.5, 3.5), (2.0, 2.0), (1.0, 1.0)];
        let best = Arranger::new(6.0, 5.0)
            .rotation(true)
            .best(true)
            .arrange(items(&sizes))
            .unwrap();

        for heuristic in Heuristic::ALL {
            let single = Arranger::new(6.0, 5.0)
                .rotation(true)
                .heuristic(heuristic)
                .arrange(items(&sizes))
                .unwrap();

            assert!(
                best.outcome.fitted.len() >= single.outcome.fitted.len(),
                "best ({}) should fit at least as many as {:?} ({})",
                best.outcome.fitted.len(),
                heuristic,
                single.outcome.fitted.len()
            );
        }
    }

    #[test]
    fn test_best_surfaces_error_when_every_heuristic_fails() {
        let result = Arranger::new(2.0, 2.0)
            .bin_algo(BinAlgo::BestFit)
            .best(true)
            .arrange(items(&[(3.0, 3.0)]));

        assert!(matches!(result, Err(PackError::ItemTooBig(_))));
    }

    #[test]
    fn test_overlapped_lists_items_left_out() {
        let arrangement = Arranger::new(4.0, 4.0)
            .arrange(items(&[(3.0, 3.0), (3.0, 3.0)]))
            .unwrap();

        assert!(!arrangement.fits_all());
        assert_eq!(arrangement.outcome.fitted[0].id, "box_0");
        let left_out: Vec<_> = arrangement.overlapped().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(left_out, vec!["box_1"]);
    }

    #[test]
    fn test_admit_fits() {
        let arranger = Arranger::new(4.0, 4.0);
        let existing = items(&[(2.0, 2.0), (2.0, 2.0)]);

        let admission = arranger.admit(&existing, PackableItem::new("new", 4.0, 2.0));
        assert!(admission.is_fits());
    }

    #[test]
    fn test_admit_no_space() {
        let arranger = Arranger::new(4.0, 4.0);
        let existing = items(&[(3.0, 3.0)]);

        match arranger.admit(&existing, PackableItem::new("new", 3.0, 3.0)) {
            Admission::NoSpace { overlapped } => {
                assert_eq!(overlapped.len(), 1);
                assert_eq!(overlapped[0].id, "new");
            }
            other => panic!("expected NoSpace, got {:?}", other),
        }
    }

    #[test]
    fn test_admit_error_lists_candidate() {
        let arranger = Arranger::new(2.0, 2.0).bin_algo(BinAlgo::BestFit);

        match arranger.admit(&[], PackableItem::new("crate", 3.0, 3.0)) {
            Admission::NoSpace { overlapped } => assert_eq!(overlapped[0].id, "crate"),
            other => panic!("expected NoSpace, got {:?}", other),
        }
    }
}
