//! Audio Processing Module
//!
//! Reads PCM WAV files, converts sample rate, sample width and channel count,
//! and writes the result back as WAV.

pub mod wav;
pub mod converter;
pub mod target;
pub mod transform;

pub use wav::{WavAudio, AudioFormat, AudioHeader, AudioData};
pub use converter::AudioConverter;
pub use target::{ChannelLayout, SampleWidth, TargetFormat, SAMPLE_RATE_PRESETS};
pub use transform::AudioTransformer;
