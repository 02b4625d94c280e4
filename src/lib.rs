//! EP-133 Memory Saver - batch WAV re-encoder
//!
//! Converts a set of WAV files to a lower sample rate, sample width and
//! channel count, writing them to an output directory under collision-free
//! names and reporting how much space was saved.

pub mod audio;
pub mod config;
pub mod error;
pub mod input;
pub mod naming;
pub mod processing;

pub use config::{Config, Args};
pub use error::{SaverError, Result};
pub use processing::{BatchConverter, ConversionRequest, ConversionResult, ProgressEvent};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init()
        .ok();
}

pub fn get_library_info() -> LibraryInfo {
    LibraryInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl std::fmt::Display for LibraryInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} - {}", self.name, self.version, self.description)
    }
}
