use serde::Serialize;

use crate::arrange::{Arrangement, Arranger};
use crate::error::PackError;
use crate::packing::PackableItem;
use crate::request::LayoutRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Ok,
    NothingToPack,
    ItemTooBig,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct Meta {
    pub app: &'static str,
    pub version: &'static str,
    pub unit: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Container {
    pub width: f64,
    pub length: f64,
}

#[derive(Debug, Serialize)]
pub struct FittedItem {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub length: f64,
    pub rotated: bool,
}

#[derive(Debug, Serialize)]
pub struct OverlappedItem {
    pub id: String,
    pub name: String,
    pub width: f64,
    pub length: f64,
}

/// Everything written for one layout request
#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub meta: Meta,
    pub container: Container,
    pub heuristic: &'static str,
    pub algorithm: &'static str,
    pub rotation: bool,
    pub occupancy: f64,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub fitted: Vec<FittedItem>,
    pub overlapped: Vec<OverlappedItem>,
}

impl LayoutReport {
    /// Build the report for `request` from the result of arranging it.
    ///
    /// Positions and sizes are in meters, in the container's floor coordinates.
    pub fn new(
        request: &LayoutRequest,
        arranger: &Arranger,
        result: &Result<Arrangement, PackError>,
    ) -> Self {
        let fitted_item = |item: &PackableItem| FittedItem {
            id: item.id.clone(),
            name: request.label_for(&item.id).to_string(),
            x: item.x,
            y: item.y,
            width: item.width,
            length: item.height,
            rotated: item.rotated,
        };
        let overlapped_item = |item: &PackableItem| OverlappedItem {
            id: item.id.clone(),
            name: request.label_for(&item.id).to_string(),
            width: item.width,
            length: item.height,
        };

        let (heuristic, status, message, occupancy, fitted, overlapped) = match result {
            Ok(arrangement) => {
                let outcome = &arrangement.outcome;
                let overlapped: Vec<_> =
                    outcome.overlapped.iter().map(overlapped_item).collect();
                let message =
                    cannot_organize_message(overlapped.iter().map(|o| o.name.as_str()));
                (
                    arrangement.heuristic,
                    Status::Ok,
                    message,
                    outcome.occupancy,
                    outcome.fitted.iter().map(fitted_item).collect(),
                    overlapped,
                )
            }
            Err(e) => {
                let (status, overlapped, message) = match e {
                    PackError::NothingToPack => (
                        Status::NothingToPack,
                        Vec::new(),
                        "cannot organize boxes".to_string(),
                    ),
                    PackError::ItemTooBig(item) => {
                        let too_big = overlapped_item(item);
                        let message = format!("cannot organize: {}", too_big.name);
                        (Status::ItemTooBig, vec![too_big], message)
                    }
                    PackError::General => (Status::Failed, Vec::new(), e.to_string()),
                };
                (
                    arranger.heuristic,
                    status,
                    Some(message),
                    0.0,
                    Vec::new(),
                    overlapped,
                )
            }
        };

        Self {
            meta: Meta {
                app: "boxpack",
                version: env!("CARGO_PKG_VERSION"),
                unit: "m",
            },
            container: Container {
                width: arranger.width,
                length: arranger.height,
            },
            heuristic: heuristic.name(),
            algorithm: arranger.bin_algo.name(),
            rotation: arranger.rotation,
            occupancy,
            status,
            message,
            fitted,
            overlapped,
        }
    }
}

/// "cannot organize: a, b" for a non-empty list of labels
pub fn cannot_organize_message<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let labels: Vec<_> = labels.into_iter().collect();
    if labels.is_empty() {
        None
    } else {
        Some(format!("cannot organize: {}", labels.join(", ")))
    }
}
