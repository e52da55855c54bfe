mod json;
mod report;

pub use json::{layout_filename, write_layout_json};
pub use report::{LayoutReport, Status, cannot_organize_message};
