//! Batch Conversion Pipeline

pub mod batch;
pub mod progress;
pub mod request;
pub mod worker;

pub use batch::{BatchConverter, ConversionResult, FileFailure};
pub use progress::{NoProgress, ProgressEvent, ProgressObserver};
pub use request::ConversionRequest;
pub use worker::{spawn_batch, BatchEvent, BatchHandle, BatchPoll};
