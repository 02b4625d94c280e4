//! Target output parameters for a conversion

use std::fmt;
use crate::audio::AudioFormat;
use crate::error::{SaverError, Result};

/// Sample rates offered by the desktop front end.
pub const SAMPLE_RATE_PRESETS: [u32; 3] = [44100, 32000, 22050];

/// Upper bound accepted for a target sample rate.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

impl ChannelLayout {
    pub fn count(&self) -> u16 {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

impl TryFrom<u16> for ChannelLayout {
    type Error = SaverError;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            1 => Ok(ChannelLayout::Mono),
            2 => Ok(ChannelLayout::Stereo),
            n => Err(SaverError::config(format!("Channel count must be 1 or 2, got {}", n))),
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelLayout::Mono => write!(f, "mono"),
            ChannelLayout::Stereo => write!(f, "stereo"),
        }
    }
}

/// Bytes per output sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    Eight,
    Sixteen,
}

impl SampleWidth {
    pub fn bytes(&self) -> u16 {
        match self {
            SampleWidth::Eight => 1,
            SampleWidth::Sixteen => 2,
        }
    }

    pub fn to_audio_format(self) -> AudioFormat {
        match self {
            SampleWidth::Eight => AudioFormat::UInt8,
            SampleWidth::Sixteen => AudioFormat::Int16,
        }
    }
}

impl TryFrom<u16> for SampleWidth {
    type Error = SaverError;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            1 => Ok(SampleWidth::Eight),
            2 => Ok(SampleWidth::Sixteen),
            n => Err(SaverError::config(format!("Sample width must be 1 or 2 bytes, got {}", n))),
        }
    }
}

impl fmt::Display for SampleWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bytes() * 8)
    }
}

/// Channel count, sample rate and sample width every output file gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetFormat {
    pub channels: ChannelLayout,
    pub sample_rate: u32,
    pub sample_width: SampleWidth,
}

impl TargetFormat {
    pub fn new(channels: ChannelLayout, sample_rate: u32, sample_width: SampleWidth) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SaverError::config("Sample rate must be greater than 0"));
        }
        if sample_rate > MAX_SAMPLE_RATE {
            return Err(SaverError::config(format!(
                "Sample rate cannot exceed {} Hz", MAX_SAMPLE_RATE
            )));
        }
        if !SAMPLE_RATE_PRESETS.contains(&sample_rate) {
            log::debug!("Sample rate {} Hz is not one of the presets {:?}", sample_rate, SAMPLE_RATE_PRESETS);
        }

        Ok(Self { channels, sample_rate, sample_width })
    }
}

impl Default for TargetFormat {
    fn default() -> Self {
        Self {
            channels: ChannelLayout::Mono,
            sample_rate: SAMPLE_RATE_PRESETS[0],
            sample_width: SampleWidth::Sixteen,
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz, {}, {}", self.sample_rate, self.sample_width, self.channels)
    }
}
