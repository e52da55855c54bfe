mod heuristic;
mod item;
mod maxrects;
mod packer;
mod rect;

pub use heuristic::{Heuristic, Score, compare_scores};
pub use item::PackableItem;
pub use maxrects::{Fit, MaxRectsBin};
pub use packer::{BinAlgo, BoxPacker, PackOutcome};
pub use rect::{Bounds, FreeRect, item_fits};
