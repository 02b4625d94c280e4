//! Conversion request value

use std::path::{Path, PathBuf};
use crate::audio::TargetFormat;
use crate::error::{SaverError, Result};
use crate::naming::NamingOptions;

/// Everything one batch needs, fixed before the batch starts.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub inputs: Vec<PathBuf>,
    pub target: TargetFormat,
    /// Must already exist; the engine never creates it.
    pub output_dir: PathBuf,
    pub naming: NamingOptions,
}

impl ConversionRequest {
    pub fn new(inputs: Vec<PathBuf>, target: TargetFormat, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            target,
            output_dir: output_dir.into(),
            naming: NamingOptions::default(),
        }
    }

    pub fn with_naming(mut self, naming: NamingOptions) -> Self {
        self.naming = naming;
        self
    }

    /// Checks made before any processing starts.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(SaverError::input_selection("No files selected"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(SaverError::input_selection("No output folder selected"));
        }
        if !self.output_dir.is_dir() {
            return Err(SaverError::input_selection(format!(
                "Output folder does not exist: {}", self.output_dir.display()
            )));
        }
        self.naming.validate()
    }

    /// Case-sensitive `.wav` suffix test; everything else is skipped.
    pub fn is_wav(path: &Path) -> bool {
        path.to_string_lossy().ends_with(".wav")
    }
}
