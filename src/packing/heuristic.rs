use std::cmp::Ordering;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{FreeRect, PackableItem};

/// Placement score. Lower wins, compared lexicographically.
pub type Score = (f64, f64);

/// Free rectangle selection rule used by a bin
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// Bottom Left - lowest top edge, then leftmost
    #[default]
    #[value(name = "bottom-left")]
    BottomLeft,
    /// Best Area - smallest leftover area
    #[value(name = "best-area")]
    BestArea,
    /// Best Short Side - smallest shorter leftover side
    #[value(name = "best-short-side")]
    BestShortSide,
    /// Best Long Side - smallest longer leftover side
    #[value(name = "best-long-side")]
    BestLongSide,
    /// Worst Area - largest leftover area
    #[value(name = "worst-area")]
    WorstArea,
    /// Worst Short Side - largest shorter leftover side
    #[value(name = "worst-short-side")]
    WorstShortSide,
    /// Worst Long Side - largest longer leftover side
    #[value(name = "worst-long-side")]
    WorstLongSide,
}

impl Heuristic {
    /// Every heuristic, in the order searches try them
    pub const ALL: [Heuristic; 7] = [
        Heuristic::BestArea,
        Heuristic::BestShortSide,
        Heuristic::BestLongSide,
        Heuristic::WorstArea,
        Heuristic::WorstShortSide,
        Heuristic::WorstLongSide,
        Heuristic::BottomLeft,
    ];

    /// The subset offered in the auto-organize menu
    pub const MENU: [Heuristic; 3] = [
        Heuristic::BestArea,
        Heuristic::BestLongSide,
        Heuristic::BottomLeft,
    ];

    /// Score placing `item`, as currently oriented, in the lower-left corner of `rect`.
    pub fn score(self, rect: &FreeRect, item: &PackableItem) -> Score {
        let leftover_w = rect.width - item.width;
        let leftover_h = rect.height - item.height;
        let short = leftover_w.min(leftover_h);
        let long = leftover_w.max(leftover_h);

        match self {
            Heuristic::BottomLeft => (rect.y + item.height, rect.x),
            Heuristic::BestArea => (rect.area() - item.area(), short),
            Heuristic::BestShortSide => (short, long),
            Heuristic::BestLongSide => (long, short),
            Heuristic::WorstArea => (-(rect.area() - item.area()), -short),
            Heuristic::WorstShortSide => (-short, -long),
            Heuristic::WorstLongSide => (-long, -short),
        }
    }

    /// Kebab-case name used on the command line and in config files
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::BottomLeft => "bottom-left",
            Heuristic::BestArea => "best-area",
            Heuristic::BestShortSide => "best-short-side",
            Heuristic::BestLongSide => "best-long-side",
            Heuristic::WorstArea => "worst-area",
            Heuristic::WorstShortSide => "worst-short-side",
            Heuristic::WorstLongSide => "worst-long-side",
        }
    }

    pub fn from_name(s: &str) -> Option<Heuristic> {
        Heuristic::ALL.into_iter().find(|h| h.name() == s)
    }

    /// Human-readable title shown to users
    pub fn title(self) -> &'static str {
        match self {
            Heuristic::BottomLeft => "Bottom Left",
            Heuristic::BestArea => "Best Area",
            Heuristic::BestShortSide => "Best Shortside",
            Heuristic::BestLongSide => "Best Longside",
            Heuristic::WorstArea => "Worst Area",
            Heuristic::WorstShortSide => "Worst Shortside",
            Heuristic::WorstLongSide => "Worst Longside",
        }
    }
}

/// Lexicographic ordering of two scores
pub fn compare_scores(a: &Score, b: &Score) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.total_cmp(&b.1))
}
