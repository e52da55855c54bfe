use std::path::PathBuf;
use thiserror::Error;

use crate::packing::PackableItem;

/// Terminal outcome of a failed `BoxPacker::pack` call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackError {
    #[error("Unexpected packing failure")]
    General,

    #[error("Nothing could be organized in the container")]
    NothingToPack,

    #[error("Item '{}' ({}x{}) is larger than the container", .0.id, .0.width, .0.height)]
    ItemTooBig(PackableItem),
}

#[derive(Error, Debug)]
pub enum BoxpackError {
    #[error("Failed to read layout request '{path}': {source}")]
    RequestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse layout request '{path}': {source}")]
    RequestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No layout requests found in input")]
    NoRequests,

    #[error("Item '{id}' has invalid dimensions {width}x{length}")]
    InvalidItem { id: String, width: f64, length: f64 },

    #[error("Container has invalid dimensions {width}x{length}")]
    InvalidContainer { width: f64, length: f64 },

    #[error("Unknown item '{0}'")]
    UnknownItem(String),

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Packing worker stopped before reporting a result")]
    WorkerDisconnected,
}
