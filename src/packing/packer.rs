use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::heuristic::{Score, compare_scores};
use super::{Heuristic, MaxRectsBin, PackableItem};
use crate::error::PackError;

/// How an item that does not fit the current bins picks its bin
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinAlgo {
    /// First bin that accepts the item
    #[default]
    #[value(name = "first-fit")]
    FirstFit,
    /// Bin offering the lowest heuristic score
    #[value(name = "best-fit")]
    BestFit,
}

impl BinAlgo {
    pub fn name(self) -> &'static str {
        match self {
            BinAlgo::FirstFit => "first-fit",
            BinAlgo::BestFit => "best-fit",
        }
    }

    pub fn from_name(s: &str) -> Option<BinAlgo> {
        match s {
            "first-fit" => Some(BinAlgo::FirstFit),
            "best-fit" => Some(BinAlgo::BestFit),
            _ => None,
        }
    }
}

/// Items that ended up in the real container, and the ones that did not
#[derive(Debug, Clone, PartialEq)]
pub struct PackOutcome {
    pub fitted: Vec<PackableItem>,
    pub overlapped: Vec<PackableItem>,
    /// Share of the container floor covered by `fitted`
    pub occupancy: f64,
}

/// Multi-bin packer. Bin 0 is the real container; later bins collect overflow.
pub struct BoxPacker {
    bin_width: f64,
    bin_height: f64,
    bin_algo: BinAlgo,
    heuristic: Heuristic,
    rotation: bool,
    sorting: bool,
    items: Vec<PackableItem>,
}

impl BoxPacker {
    pub fn new(width: f64, height: f64, items: Vec<PackableItem>) -> Self {
        Self {
            bin_width: width,
            bin_height: height,
            bin_algo: BinAlgo::FirstFit,
            heuristic: Heuristic::BottomLeft,
            rotation: false,
            sorting: true,
            items,
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

    /// Sort items by ascending area before packing (on by default)
    pub fn sorting(mut self, sorting: bool) -> Self {
        self.sorting = sorting;
        self
    }

    /// Pack every item and split the result into fitted and overflow items
    pub fn pack(mut self) -> Result<PackOutcome, PackError> {
        let mut items = std::mem::take(&mut self.items);
        if self.sorting {
            // Smallest first. Existing saved layouts depend on this order.
            items.sort_by(|a, b| a.area().total_cmp(&b.area()));
        }

        let mut bins = vec![self.new_bin()];
        for item in &items {
            match self.bin_algo {
                BinAlgo::FirstFit => self.insert_first_fit(&mut bins, item),
                BinAlgo::BestFit => self.insert_best_fit(&mut bins, item)?,
            }
        }

        let mut bins = bins.into_iter();
        let container = bins.next().ok_or(PackError::General)?;
        if container.items().is_empty() {
            return Err(PackError::NothingToPack);
        }

        let occupancy = container.occupancy();
        let fitted = container.into_items();
        let overlapped: Vec<_> = bins.flat_map(MaxRectsBin::into_items).collect();

        info!(
            "Packed {} item(s) into {}x{} ({:.1}% occupancy), {} could not be organized",
            fitted.len(),
            self.bin_width,
            self.bin_height,
            occupancy * 100.0,
            overlapped.len()
        );

        Ok(PackOutcome {
            fitted,
            overlapped,
            occupancy,
        })
    }

    fn new_bin(&self) -> MaxRectsBin {
        MaxRectsBin::new(
            self.bin_width,
            self.bin_height,
            self.rotation,
            self.heuristic,
        )
    }

    /// Check if the item fits an empty container in any allowed orientation
    fn fits_container(&self, item: &PackableItem) -> bool {
        item.fits_within(self.bin_width, self.bin_height, false)
            || (self.rotation && item.fits_within(self.bin_width, self.bin_height, true))
    }

    /// Insert into the first bin that fits the item
    fn insert_first_fit(&self, bins: &mut Vec<MaxRectsBin>, item: &PackableItem) {
        if bins.iter_mut().any(|bin| bin.insert(item)) {
            return;
        }

        let mut bin = self.new_bin();
        if !bin.insert(item) {
            warn!(
                "Item '{}' ({}x{}) does not fit an empty {}x{} container",
                item.id, item.width, item.height, self.bin_width, self.bin_height
            );
            bin.push_unplaced(item);
        }
        debug!("Opened overflow bin {} for '{}'", bins.len(), item.id);
        bins.push(bin);
    }

    /// Insert into the bin that best fits the item
    fn insert_best_fit(
        &self,
        bins: &mut Vec<MaxRectsBin>,
        item: &PackableItem,
    ) -> Result<(), PackError> {
        if !self.fits_container(item) {
            return Err(PackError::ItemTooBig(item.clone()));
        }

        let mut best: Option<(Score, usize)> = None;
        for (index, bin) in bins.iter().enumerate() {
            if let Some(fit) = bin.find_best_score(item) {
                let better = best
                    .as_ref()
                    .is_none_or(|(score, _)| compare_scores(&fit.score, score).is_lt());
                if better {
                    best = Some((fit.score, index));
                }
            }
        }

        if let Some((_, index)) = best {
            let bin = bins.get_mut(index).ok_or(PackError::General)?;
            if !bin.insert(item) {
                return Err(PackError::General);
            }
            return Ok(());
        }

        let mut bin = self.new_bin();
        if !bin.insert(item) {
            return Err(PackError::General);
        }
        debug!("Opened overflow bin {} for '{}'", bins.len(), item.id);
        bins.push(bin);
        Ok(())
    }
}
