//! Audio Format Converter

use ndarray::{Array1, Array2, ArrayView1};
use crate::audio::{AudioData, ChannelLayout, SampleWidth, WavAudio};

pub struct AudioConverter;

impl AudioConverter {
    /// Convert sample rate using linear interpolation
    pub fn convert_sample_rate(audio: &WavAudio, target_sample_rate: u32) -> WavAudio {
        if audio.sample_rate() == target_sample_rate {
            return audio.clone();
        }

        let ratio = target_sample_rate as f64 / audio.sample_rate() as f64;
        let new_length = (audio.data().len() as f64 * ratio) as usize;

        let new_data = match audio.data() {
            AudioData::Mono(data) => {
                AudioData::Mono(Self::resample_channel(data.view(), new_length, ratio))
            }
            AudioData::Stereo(data) => {
                let new_left = Self::resample_channel(data.column(0), new_length, ratio);
                let new_right = Self::resample_channel(data.column(1), new_length, ratio);
                let mut stereo = Array2::zeros((new_length, 2));
                stereo.column_mut(0).assign(&new_left);
                stereo.column_mut(1).assign(&new_right);
                AudioData::Stereo(stereo)
            }
        };

        let mut new_audio = audio.clone();
        new_audio.header.sample_rate = target_sample_rate;
        new_audio.set_data(new_data);
        new_audio
    }

    /// Change the quantisation used when the audio is next encoded.
    pub fn convert_sample_width(audio: &WavAudio, width: SampleWidth) -> WavAudio {
        let mut new_audio = audio.clone();
        new_audio.header.format = width.to_audio_format();
        new_audio
    }

    /// Mix down to mono by averaging, or duplicate mono onto both sides.
    pub fn convert_channels(audio: &WavAudio, layout: ChannelLayout) -> WavAudio {
        if audio.channels() == layout.count() {
            return audio.clone();
        }

        let new_data = match layout {
            ChannelLayout::Mono => AudioData::Mono(audio.data().to_mono()),
            ChannelLayout::Stereo => AudioData::Stereo(audio.data().to_stereo()),
        };

        let mut new_audio = audio.clone();
        new_audio.set_data(new_data);
        new_audio
    }

    fn resample_channel(data: ArrayView1<f32>, new_length: usize, ratio: f64) -> Array1<f32> {
        let old_length = data.len();
        if old_length == 0 {
            return Array1::zeros(0);
        }

        let mut new_data = Array1::zeros(new_length);

        for i in 0..new_length {
            let old_pos = i as f64 / ratio;
            let old_index = old_pos.floor() as usize;
            let fraction = old_pos - old_index as f64;

            new_data[i] = if old_index >= old_length - 1 {
                data[old_length - 1]
            } else {
                data[old_index] + (data[old_index + 1] - data[old_index]) * fraction as f32
            };
        }

        new_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioFormat;

    #[test]
    fn test_resample_same_rate() {
        let audio = WavAudio::new_mono(16000, Array1::from(vec![0.1, 0.2, 0.3]), AudioFormat::Int16);
        let result = AudioConverter::convert_sample_rate(&audio, 16000);
        assert_eq!(result.sample_rate(), 16000);
        assert_eq!(result.total_frames(), 3);
    }

    #[test]
    fn test_resample_upsample() {
        let audio = WavAudio::new_mono(8000, Array1::from(vec![0.0, 1.0]), AudioFormat::Int16);
        let result = AudioConverter::convert_sample_rate(&audio, 16000);
        assert_eq!(result.sample_rate(), 16000);
        assert_eq!(result.data().len(), 4);
        assert_eq!(result.total_frames(), 4);
        match result.data() {
            AudioData::Mono(data) => assert!((data[1] - 0.5).abs() < 1e-6),
            _ => panic!("expected mono data"),
        }
    }

    #[test]
    fn test_resample_downsample_stereo() {
        let data = Array2::from_shape_fn((44100, 2), |(_, c)| if c == 0 { 0.25 } else { -0.25 });
        let audio = WavAudio::new_stereo(44100, data, AudioFormat::Int16).unwrap();
        let result = AudioConverter::convert_sample_rate(&audio, 22050);
        assert_eq!(result.total_frames(), 22050);
        assert_eq!(result.channels(), 2);
        assert!((result.duration() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_resample_empty_stays_empty() {
        let audio = WavAudio::new_mono(48000, Array1::zeros(0), AudioFormat::Int16);
        let result = AudioConverter::convert_sample_rate(&audio, 22050);
        assert!(result.data().is_empty());
        assert_eq!(result.sample_rate(), 22050);
    }

    #[test]
    fn test_sample_width() {
        let audio = WavAudio::new_mono(8000, Array1::from(vec![0.5]), AudioFormat::Float32);
        let eight = AudioConverter::convert_sample_width(&audio, SampleWidth::Eight);
        assert_eq!(eight.format(), AudioFormat::UInt8);
        let sixteen = AudioConverter::convert_sample_width(&audio, SampleWidth::Sixteen);
        assert_eq!(sixteen.format(), AudioFormat::Int16);
    }

    #[test]
    fn test_channel_conversion() {
        let stereo = WavAudio::new_stereo(8000, Array2::from(vec![[1.0, 0.0], [0.5, 0.5]]), AudioFormat::Int16).unwrap();
        let mono = AudioConverter::convert_channels(&stereo, ChannelLayout::Mono);
        assert_eq!(mono.channels(), 1);
        assert_eq!(mono.header.channels, 1);
        match mono.data() {
            AudioData::Mono(data) => assert_eq!(data.to_vec(), vec![0.5, 0.5]),
            _ => panic!("expected mono data"),
        }

        let back = AudioConverter::convert_channels(&mono, ChannelLayout::Stereo);
        assert_eq!(back.channels(), 2);
        assert_eq!(back.total_frames(), 2);
    }
}
