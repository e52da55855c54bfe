use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::types::BoxpackConfig;
use crate::packing::{BinAlgo, Heuristic};

/// A loaded configuration file with its associated directory.
///
/// Paths in the config are relative to the config file location,
/// so we need to track where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: BoxpackConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: BoxpackConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Resolve input patterns to actual file paths.
    ///
    /// Glob patterns are expanded, and all paths are resolved relative
    /// to the config file directory.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut results = Vec::new();

        for pattern in &self.config.input {
            if is_glob_pattern(pattern) {
                let full_pattern = self.config_dir.join(pattern);
                let pattern_str = full_pattern.to_string_lossy();

                let paths = glob::glob(&pattern_str)
                    .with_context(|| format!("invalid glob pattern: {}", pattern))?;

                for entry in paths {
                    let path =
                        entry.with_context(|| format!("failed to read glob entry: {}", pattern))?;
                    results.push(path);
                }
            } else {
                results.push(self.config_dir.join(pattern));
            }
        }

        Ok(results)
    }

    /// Resolve the output directory relative to the config file directory.
    pub fn resolve_output_dir(&self) -> PathBuf {
        self.config_dir.join(&self.config.output_dir)
    }

    /// The configured heuristic, rejecting unknown names
    pub fn heuristic(&self) -> Result<Heuristic> {
        Heuristic::from_name(&self.config.heuristic).ok_or_else(|| {
            let valid: Vec<_> = Heuristic::ALL.iter().map(|h| h.name()).collect();
            anyhow!(
                "unknown heuristic '{}' in config file. Valid values: {}",
                self.config.heuristic,
                valid.join(", ")
            )
        })
    }

    /// The configured bin selection algorithm, rejecting unknown names
    pub fn algorithm(&self) -> Result<BinAlgo> {
        BinAlgo::from_name(&self.config.algorithm).ok_or_else(|| {
            anyhow!(
                "unknown algorithm '{}' in config file. Valid values: first-fit, best-fit",
                self.config.algorithm
            )
        })
    }
}

/// Check if a pattern contains glob characters.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(config: BoxpackConfig, dir: &str) -> LoadedConfig {
        LoadedConfig {
            config,
            config_dir: PathBuf::from(dir),
        }
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("*.json"));
        assert!(is_glob_pattern("closets/**/*.json"));
        assert!(is_glob_pattern("shelf?.json"));
        assert!(is_glob_pattern("shelf[0-9].json"));
        assert!(!is_glob_pattern("shelf.json"));
        assert!(!is_glob_pattern("closets/garage.json"));
    }

    #[test]
    fn test_defaults_parse() {
        let lc = loaded(BoxpackConfig::default(), "/project");
        assert_eq!(lc.heuristic().unwrap(), Heuristic::BottomLeft);
        assert_eq!(lc.algorithm().unwrap(), BinAlgo::FirstFit);
        assert_eq!(lc.resolve_output_dir(), PathBuf::from("/project/."));
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        let config = BoxpackConfig {
            heuristic: "contact-point".to_string(),
            algorithm: "next-fit".to_string(),
            ..BoxpackConfig::default()
        };
        let lc = loaded(config, ".");

        let err = lc.heuristic().unwrap_err().to_string();
        assert!(err.contains("contact-point"));
        assert!(err.contains("bottom-left"));
        assert!(lc.algorithm().is_err());
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("boxpack_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prefs.boxpack");
        std::fs::write(&path, r#"{ "heuristic": "best-area", "rotation": true, "input": ["a.json"] }"#)
            .unwrap();

        let lc = LoadedConfig::load(&path).unwrap();
        assert_eq!(lc.heuristic().unwrap(), Heuristic::BestArea);
        assert!(lc.config.rotation);
        assert!(lc.config.sorting);
        assert_eq!(lc.config_dir, dir);
        assert_eq!(lc.resolve_inputs().unwrap(), vec![dir.join("a.json")]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
