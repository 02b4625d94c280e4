//! Configuration management for batch conversion

use crate::audio::{ChannelLayout, SampleWidth, TargetFormat, SAMPLE_RATE_PRESETS};
use crate::error::{SaverError, Result};
use crate::input::{absolute, collect_inputs, first_directory};
use crate::naming::NamingOptions;
use crate::processing::ConversionRequest;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
    /// Files or directories to convert.
    pub inputs: Vec<PathBuf>,
    /// Descend into subdirectories of directory inputs.
    pub recursive: bool,
    pub audio: AudioConfig,
    pub naming: NamingOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub channels: u16,
    pub sample_rate: u32,
    /// Bytes per sample: 1 = 8-bit, 2 = 16-bit.
    pub sample_width: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: SAMPLE_RATE_PRESETS[0],
            sample_width: 2,
        }
    }
}

impl Config {
    /// Typed output format for the current audio settings.
    pub fn target(&self) -> Result<TargetFormat> {
        TargetFormat::new(
            ChannelLayout::try_from(self.audio.channels)?,
            self.audio.sample_rate,
            SampleWidth::try_from(self.audio.sample_width)?,
        )
    }

    /// Validate configuration parameter validity
    pub fn validate(&self) -> Result<()> {
        self.target()?;
        self.naming.validate()
    }

    /// Build the request for one batch run.
    ///
    /// Directory inputs are expanded here. With folder-structure naming on and
    /// no base directory configured, the first directory input becomes the base.
    pub fn into_request(self) -> Result<ConversionRequest> {
        let target = self.target()?;
        let output_dir = self.output_dir
            .ok_or_else(|| SaverError::input_selection("No output folder selected"))?;
        let inputs = collect_inputs(&self.inputs, self.recursive)?;

        let mut naming = self.naming;
        if naming.folder_structure && naming.base_dir.is_none() {
            naming.base_dir = first_directory(&self.inputs);
        }
        if let Some(base_dir) = naming.base_dir.take() {
            naming.base_dir = Some(absolute(&base_dir)?);
        }

        let request = ConversionRequest::new(inputs, target, output_dir).with_naming(naming);
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "memsaver", about = "Shrink WAV samples by re-encoding them at a lower rate, depth and channel count", version, author)]
pub struct Args {
    #[arg(help = "WAV files or directories containing WAV files")]
    pub inputs: Vec<PathBuf>,

    #[arg(short = 'o', long = "output-dir", help = "Directory the converted files are written to (must exist)")]
    pub output_dir: Option<PathBuf>,

    #[arg(short = 'c', long = "channels", value_parser = clap::value_parser!(u16).range(1..=2), help = "Output channels: 1 = mono, 2 = stereo [default: 1]")]
    pub channels: Option<u16>,

    #[arg(short = 'r', long = "sample-rate", help = "Output sample rate in Hz, e.g. 44100, 32000, 22050 [default: 44100]")]
    pub sample_rate: Option<u32>,

    #[arg(short = 'w', long = "sample-width", value_parser = clap::value_parser!(u16).range(1..=2), help = "Output bytes per sample: 1 = 8-bit, 2 = 16-bit [default: 2]")]
    pub sample_width: Option<u16>,

    #[arg(short = 'p', long = "prefix", help = "Prefix added to every output file name")]
    pub prefix: Option<String>,

    #[arg(long = "folder-structure", help = "Prefix output names with the source folder path")]
    pub folder_structure: bool,

    #[arg(long = "base-dir", help = "Folder paths are taken relative to this directory")]
    pub base_dir: Option<PathBuf>,

    #[arg(short = 'R', long = "recursive", help = "Search directory inputs recursively")]
    pub recursive: bool,

    #[arg(long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,

    #[arg(long = "init-config", help = "Write a default config file to this path and exit")]
    pub init_config: Option<PathBuf>,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output mode")]
    pub verbose: bool,
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: Args) -> Result<Self> {
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Only flags that were given override the file
        if !args.inputs.is_empty() {
            config.inputs = args.inputs;
        }
        if args.output_dir.is_some() {
            config.output_dir = args.output_dir;
        }
        if let Some(channels) = args.channels {
            config.audio.channels = channels;
        }
        if let Some(sample_rate) = args.sample_rate {
            config.audio.sample_rate = sample_rate;
        }
        if let Some(sample_width) = args.sample_width {
            config.audio.sample_width = sample_width;
        }
        if let Some(prefix) = args.prefix {
            config.naming.prefix = prefix;
        }
        if args.folder_structure {
            config.naming.folder_structure = true;
        }
        if args.base_dir.is_some() {
            config.naming.base_dir = args.base_dir;
        }
        if args.recursive {
            config.recursive = true;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SaverError::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SaverError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SaverError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SaverError::config(format!("Failed to write config file: {}", e)))
    }

    pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        Self::default().save_to_file(path)
    }
}
