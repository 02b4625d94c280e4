//! Input discovery for the command line front end

use std::path::{Path, PathBuf};
use log::debug;
use walkdir::WalkDir;
use crate::error::{SaverError, Result};
use crate::processing::ConversionRequest;

/// Expand directory arguments into the `.wav` files inside them.
///
/// Plain file arguments are kept as given (made absolute), so anything that
/// is not a WAV still reaches the batch and is skipped there.
pub fn collect_inputs(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for path in paths {
        let path = absolute(path)?;
        if !path.is_dir() {
            inputs.push(path);
            continue;
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let before = inputs.len();
        for entry in WalkDir::new(&path).min_depth(1).max_depth(max_depth).sort_by_file_name() {
            let entry = entry.map_err(|e| SaverError::io(format!(
                "Cannot scan {}: {}", path.display(), e
            )))?;
            if entry.file_type().is_file() && ConversionRequest::is_wav(entry.path()) {
                inputs.push(entry.into_path());
            }
        }
        debug!("Found {} WAV files in {}", inputs.len() - before, path.display());
    }

    Ok(inputs)
}

/// First directory among the arguments, used as the default base directory.
pub fn first_directory(paths: &[PathBuf]) -> Option<PathBuf> {
    paths.iter()
        .find(|p| p.is_dir())
        .and_then(|p| absolute(p).ok())
}

pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| SaverError::io(format!("Cannot resolve {}: {}", path.display(), e)))
}
