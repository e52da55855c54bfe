use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::LayoutReport;
use crate::error::BoxpackError;

/// File name of the layout written for a request
pub fn layout_filename(base_name: &str) -> String {
    format!("{}.layout.json", base_name)
}

/// Write a layout report as pretty JSON, returning the written path
pub fn write_layout_json(report: &LayoutReport, output_dir: &Path, base_name: &str) -> Result<PathBuf> {
    let json_path = output_dir.join(layout_filename(base_name));
    let content = serde_json::to_string_pretty(report)?;

    fs::write(&json_path, content).map_err(|e| BoxpackError::OutputWrite {
        path: json_path.clone(),
        source: e,
    })?;

    Ok(json_path)
}
