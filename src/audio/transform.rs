//! Decode, re-sample, re-quantise and re-encode a single WAV file

use std::path::Path;
use log::debug;
use crate::audio::{AudioConverter, TargetFormat, WavAudio};
use crate::error::Result;

/// Applies one [`TargetFormat`] to any number of source files.
#[derive(Debug, Clone)]
pub struct AudioTransformer {
    target: TargetFormat,
}

impl AudioTransformer {
    pub fn new(target: TargetFormat) -> Self {
        Self { target }
    }

    /// Returns the converted file as WAV bytes; nothing is written to disk.
    ///
    /// Frame rate is converted first, then sample width, then channel count.
    pub fn transform(&self, source: &Path) -> Result<Vec<u8>> {
        let audio = self.transform_audio(WavAudio::from_file(source)?);
        debug!(
            "{}: {:.2}s, {} frames -> {}",
            source.display(), audio.duration(), audio.total_frames(), self.target
        );
        audio.to_wav_bytes()
    }

    pub fn transform_audio(&self, audio: WavAudio) -> WavAudio {
        let audio = AudioConverter::convert_sample_rate(&audio, self.target.sample_rate);
        let audio = AudioConverter::convert_sample_width(&audio, self.target.sample_width);
        AudioConverter::convert_channels(&audio, self.target.channels)
    }
}
