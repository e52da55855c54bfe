use crate::packing::{Heuristic, PackOutcome, PackableItem};

/// A finished layout and the heuristic that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    pub outcome: PackOutcome,
    pub heuristic: Heuristic,
}

impl Arrangement {
    /// Returns true if this arrangement is better than another.
    /// Priority: 1) more items fitted, 2) higher occupancy.
    pub fn is_better_than(&self, other: &Arrangement) -> bool {
        let self_fitted = self.outcome.fitted.len();
        let other_fitted = other.outcome.fitted.len();

        if self_fitted != other_fitted {
            return self_fitted > other_fitted;
        }

        self.outcome.occupancy > other.outcome.occupancy
    }

    /// Items left out of the container
    pub fn overlapped(&self) -> &[PackableItem] {
        &self.outcome.overlapped
    }

    pub fn fits_all(&self) -> bool {
        self.overlapped().is_empty()
    }
}

/// Answer to "can one more object go into this container?"
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// Everything, candidate included, still fits
    Fits(Arrangement),
    /// These items would have to stay outside
    NoSpace { overlapped: Vec<PackableItem> },
}

impl Admission {
    pub fn is_fits(&self) -> bool {
        matches!(self, Admission::Fits(_))
    }
}
