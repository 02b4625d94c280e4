//! Error Types

use thiserror::Error;

/// Main error type
#[derive(Debug, Clone, Error)]
pub enum SaverError {
    /// Nothing to convert, or nowhere to put it.
    #[error("Input selection error: {message}")]
    InputSelection { message: String },
    #[error("Decode error: {message}")]
    Decode { message: String },
    #[error("Encode error: {message}")]
    Encode { message: String },
    /// Failure outside the per-file handling; aborts the whole batch.
    #[error("Engine error: {message}")]
    Engine { message: String },
    #[error("Config error: {message}")]
    Config { message: String },
    #[error("IO error: {message}")]
    Io { message: String },
}

impl SaverError {
    pub fn input_selection<S: Into<String>>(msg: S) -> Self { Self::InputSelection { message: msg.into() } }
    pub fn decode<S: Into<String>>(msg: S) -> Self { Self::Decode { message: msg.into() } }
    pub fn encode<S: Into<String>>(msg: S) -> Self { Self::Encode { message: msg.into() } }
    pub fn engine<S: Into<String>>(msg: S) -> Self { Self::Engine { message: msg.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }
    pub fn io<S: Into<String>>(msg: S) -> Self { Self::Io { message: msg.into() } }

    /// Errors the batch engine absorbs by skipping the offending file.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Encode { .. })
    }
}

pub type Result<T> = std::result::Result<T, SaverError>;

impl From<std::io::Error> for SaverError {
    fn from(err: std::io::Error) -> Self { Self::io(err.to_string()) }
}
