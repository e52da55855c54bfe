pub mod arrange;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod packing;
pub mod request;
pub mod worker;

pub use arrange::{Admission, Arrangement, Arranger};
pub use error::{BoxpackError, PackError};
pub use packing::{BinAlgo, BoxPacker, Heuristic, PackOutcome, PackableItem};
pub use request::LayoutRequest;
