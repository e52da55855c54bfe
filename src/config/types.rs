use serde::{Deserialize, Serialize};

/// Saved organizer preferences (`.boxpack` file).
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxpackConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Layout request files, directories or glob patterns
    pub input: Vec<String>,
    /// Output directory for layout files
    pub output_dir: String,
    /// Placement heuristic name
    pub heuristic: String,
    /// Bin selection: "first-fit" or "best-fit"
    pub algorithm: String,
    /// Allow turning items 90 degrees
    pub rotation: bool,
    /// Sort items by ascending area before packing
    pub sorting: bool,
    /// Organize automatically when a new item is added
    pub autosort: bool,
    /// Try every heuristic and keep the best layout
    pub best: bool,
}

impl Default for BoxpackConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input: Vec::new(),
            output_dir: ".".to_string(),
            heuristic: "bottom-left".to_string(),
            algorithm: "first-fit".to_string(),
            rotation: false,
            sorting: true,
            autosort: true,
            best: false,
        }
    }
}
