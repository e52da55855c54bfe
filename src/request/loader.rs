use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use rayon::prelude::*;

use super::LayoutRequest;
use crate::error::BoxpackError;

const REQUEST_EXTENSION: &str = "json";

/// A parsed request and where it came from
#[derive(Debug, Clone)]
pub struct LoadedRequest {
    pub path: PathBuf,
    /// Base name for output files
    pub name: String,
    pub request: LayoutRequest,
}

/// Load layout requests from input paths (files or directories).
///
/// Directories are searched recursively for `.json` files. Results keep a
/// stable order (sorted by path) so batch output is reproducible.
pub fn load_requests(inputs: &[impl AsRef<Path>]) -> Result<Vec<LoadedRequest>> {
    let mut paths = collect_request_paths(inputs)?;
    paths.sort();
    paths.dedup();

    if paths.is_empty() {
        return Err(BoxpackError::NoRequests.into());
    }

    info!("Loading {} layout request(s)...", paths.len());

    paths
        .par_iter()
        .map(|path| load_single_request(path))
        .collect()
}

fn collect_request_paths(inputs: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = input.as_ref();
        if !path.exists() {
            return Err(BoxpackError::InputNotFound(path.to_path_buf()).into());
        }

        if path.is_file() {
            paths.push(path.to_path_buf());
        } else if path.is_dir() {
            collect_from_directory(path, &mut paths)?;
        }
    }

    Ok(paths)
}

fn collect_from_directory(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();

        if path.is_file() && is_request_file(&path) {
            paths.push(path);
        } else if path.is_dir() {
            collect_from_directory(&path, paths)?;
        }
    }

    Ok(())
}

fn is_request_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(REQUEST_EXTENSION))
}

fn load_single_request(path: &Path) -> Result<LoadedRequest> {
    let content = std::fs::read_to_string(path).map_err(|e| BoxpackError::RequestRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let request: LayoutRequest =
        serde_json::from_str(&content).map_err(|e| BoxpackError::RequestParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let name = request.name.clone().unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("layout")
            .to_string()
    });

    debug!(
        "Loaded '{}' from {} ({} items)",
        name,
        path.display(),
        request.items.len()
    );

    Ok(LoadedRequest {
        path: path.to_path_buf(),
        name,
        request,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("boxpack_loader_{}_{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    const REQUEST: &str = r#"{
        "container": { "width": 80, "length": 40 },
        "items": [ { "id": "a", "width": 20, "length": 20 } ]
    }"#;

    #[test]
    fn test_is_request_file() {
        assert!(is_request_file(Path::new("closet.json")));
        assert!(is_request_file(Path::new("shelf/CLOSET.JSON")));
        assert!(!is_request_file(Path::new("closet.boxpack")));
        assert!(!is_request_file(Path::new("closet")));
    }

    #[test]
    fn test_load_directory_recursively() {
        let dir = scratch_dir("dir");
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("b.json"), REQUEST).unwrap();
        std::fs::write(dir.join("nested/a.json"), REQUEST).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = load_requests(&[&dir]).unwrap();
        let names: Vec<_> = loaded.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(loaded[0].request.items.len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_input() {
        let err = load_requests(&[Path::new("/definitely/not/here.json")]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BoxpackError>(),
            Some(BoxpackError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = scratch_dir("bad");
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_requests(&[&path]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BoxpackError>(),
            Some(BoxpackError::RequestParse { .. })
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_directory() {
        let dir = scratch_dir("empty");
        let err = load_requests(&[&dir]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BoxpackError>(),
            Some(BoxpackError::NoRequests)
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
