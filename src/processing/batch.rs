//! Sequential batch conversion

use std::path::{Path, PathBuf};
use std::time::Instant;
use log::{debug, info, warn};
use crate::audio::AudioTransformer;
use crate::error::{SaverError, Result};
use crate::naming::NameResolver;
use super::{ConversionRequest, ProgressEvent, ProgressObserver};

/// A source file that was attempted but not converted.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: SaverError,
}

#[derive(Debug, Clone, Default)]
pub struct ConversionResult {
    /// Output file names (not paths), in input order.
    pub outputs: Vec<String>,
    /// Sum of source sizes of the converted files only.
    pub total_original_size: u64,
    pub total_converted_size: u64,
    pub failures: Vec<FileFailure>,
}

impl ConversionResult {
    pub fn converted_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Relative size change in percent; negative means the batch shrank.
    pub fn size_change_percent(&self) -> Option<f64> {
        if self.total_original_size == 0 {
            return None;
        }
        let original = self.total_original_size as f64;
        Some((self.total_converted_size as f64 - original) / original * 100.0)
    }
}

/// Converts every WAV in a [`ConversionRequest`], one file at a time.
#[derive(Debug)]
pub struct BatchConverter {
    request: ConversionRequest,
    transformer: AudioTransformer,
}

impl BatchConverter {
    pub fn new(request: ConversionRequest) -> Self {
        let transformer = AudioTransformer::new(request.target);
        Self { request, transformer }
    }

    /// Runs the whole batch.
    ///
    /// Decode and encode failures skip the file and are listed in
    /// [`ConversionResult::failures`]; any other error aborts the batch.
    pub fn run<O: ProgressObserver + ?Sized>(&self, observer: &mut O) -> Result<ConversionResult> {
        let mut result = ConversionResult::default();
        let inputs = &self.request.inputs;
        if inputs.is_empty() {
            return Ok(result);
        }
        self.request.naming.validate()?;

        let start = Instant::now();
        let total = inputs.len();
        let mut resolver = NameResolver::new(&self.request.output_dir, self.request.naming.clone());

        for (i, path) in inputs.iter().enumerate() {
            if !ConversionRequest::is_wav(path) {
                debug!("Skipping non-WAV input {}", path.display());
                continue;
            }

            observer.on_progress(&ProgressEvent {
                index: i + 1,
                total,
                file_name: file_name_of(path),
            });

            let original_size = std::fs::metadata(path)
                .map_err(|e| SaverError::engine(format!(
                    "Cannot read size of {}: {}", path.display(), e
                )))?
                .len();

            match self.convert_one(path, &mut resolver) {
                Ok((name, converted_size)) => {
                    info!("Converted: {} -> {} ({} -> {} bytes)",
                          path.display(), name, original_size, converted_size);
                    result.total_original_size += original_size;
                    result.total_converted_size += converted_size;
                    result.outputs.push(name);
                }
                Err(reason) if reason.is_per_file() => {
                    warn!("Skipped {}: {}", path.display(), reason);
                    result.failures.push(FileFailure { path: path.clone(), reason });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Batch finished in {:.2}s: {} converted, {} failed",
            start.elapsed().as_secs_f64(), result.converted_count(), result.failures.len()
        );
        Ok(result)
    }

    /// Transform, name and write one file; returns the name and written size.
    fn convert_one(&self, path: &Path, resolver: &mut NameResolver) -> Result<(String, u64)> {
        let bytes = self.transformer.transform(path)?;
        let name = resolver.resolve(path)?;

        let output_path = self.request.output_dir.join(&name);
        std::fs::write(&output_path, &bytes)
            .map_err(|e| SaverError::encode(format!(
                "Cannot write {}: {}", output_path.display(), e
            )))?;

        let converted_size = std::fs::metadata(&output_path)
            .map_err(|e| SaverError::engine(format!(
                "Cannot read size of {}: {}", output_path.display(), e
            )))?
            .len();

        Ok((name, converted_size))
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
