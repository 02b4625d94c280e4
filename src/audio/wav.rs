//! WAV audio file processing

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use hound::{SampleFormat, WavReader, WavWriter};
use ndarray::{Array1, Array2};
use crate::error::{SaverError, Result};

/// PCM sample encodings a WAV container may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// 8-bit PCM, stored unsigned in the container.
    UInt8,
    Int16,
    Int24,
    Int32,
    Float32,
}

impl AudioFormat {
    pub fn name(&self) -> &'static str {
        match self {
            AudioFormat::UInt8 => "uint8",
            AudioFormat::Int16 => "int16",
            AudioFormat::Int24 => "int24",
            AudioFormat::Int32 => "int32",
            AudioFormat::Float32 => "float32",
        }
    }

    pub fn bytes_per_sample(&self) -> u16 {
        match self {
            AudioFormat::UInt8 => 1,
            AudioFormat::Int16 => 2,
            AudioFormat::Int24 => 3,
            AudioFormat::Int32 | AudioFormat::Float32 => 4,
        }
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bytes_per_sample() * 8
    }

    pub fn to_sample_format(self) -> SampleFormat {
        match self {
            AudioFormat::Float32 => SampleFormat::Float,
            _ => SampleFormat::Int,
        }
    }

    pub fn from_spec(spec: &hound::WavSpec) -> Result<Self> {
        match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 8) => Ok(AudioFormat::UInt8),
            (SampleFormat::Int, 16) => Ok(AudioFormat::Int16),
            (SampleFormat::Int, 24) => Ok(AudioFormat::Int24),
            (SampleFormat::Int, 32) => Ok(AudioFormat::Int32),
            (SampleFormat::Float, 32) => Ok(AudioFormat::Float32),
            (format, bits) => Err(SaverError::decode(format!(
                "Unsupported sample encoding: {:?} {}-bit", format, bits
            ))),
        }
    }

    /// Full-scale magnitude used to map integer samples onto [-1.0, 1.0].
    fn full_scale(&self) -> f32 {
        match self {
            AudioFormat::UInt8 => 128.0,
            AudioFormat::Int16 => 32768.0,
            AudioFormat::Int24 => 8_388_608.0,
            AudioFormat::Int32 => 2_147_483_648.0,
            AudioFormat::Float32 => 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AudioHeader {
    pub sample_rate: u32,
    pub channels: u16,
    pub format: AudioFormat,
    /// Number of frames (samples per channel).
    pub total_frames: u32,
    pub duration: f64,
}

impl AudioHeader {
    pub fn new(sample_rate: u32, channels: u16, format: AudioFormat, total_frames: u32) -> Self {
        let duration = if sample_rate > 0 {
            total_frames as f64 / sample_rate as f64
        } else {
            0.0
        };

        Self {
            sample_rate,
            channels,
            format,
            total_frames,
            duration,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SaverError::decode("Sample rate cannot be 0"));
        }

        if self.channels == 0 || self.channels > 2 {
            return Err(SaverError::decode(format!(
                "Only mono or stereo audio supported, got {} channels", self.channels
            )));
        }

        Ok(())
    }

    pub fn to_wav_spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.format.bits_per_sample(),
            sample_format: self.format.to_sample_format(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WavAudio {
    pub header: AudioHeader,
    pub data: AudioData,
}

/// Normalised samples in [-1.0, 1.0]; stereo is laid out frames x 2.
#[derive(Debug, Clone)]
pub enum AudioData {
    Mono(Array1<f32>),
    Stereo(Array2<f32>),
}

impl AudioData {
    pub fn len(&self) -> usize {
        match self {
            AudioData::Mono(data) => data.len(),
            AudioData::Stereo(data) => data.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channels(&self) -> u16 {
        match self {
            AudioData::Mono(_) => 1,
            AudioData::Stereo(_) => 2,
        }
    }

    pub fn to_mono(&self) -> Array1<f32> {
        match self {
            AudioData::Mono(data) => data.clone(),
            AudioData::Stereo(data) => {
                (&data.column(0) + &data.column(1)).mapv(|x| x * 0.5)
            }
        }
    }

    pub fn to_stereo(&self) -> Array2<f32> {
        match self {
            AudioData::Mono(data) => {
                let mut stereo = Array2::zeros((data.len(), 2));
                stereo.column_mut(0).assign(data);
                stereo.column_mut(1).assign(data);
                stereo
            }
            AudioData::Stereo(data) => data.clone(),
        }
    }
}

impl WavAudio {
    /// Decode a WAV file. The file handle is released before returning.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path)
            .map_err(|e| SaverError::decode(format!(
                "Cannot open audio file {}: {}", path.display(), e
            )))?;

        Self::from_reader(BufReader::new(file))
            .map_err(|e| match e {
                SaverError::Decode { message } => SaverError::decode(format!(
                    "{}: {}", path.display(), message
                )),
                other => other,
            })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = WavReader::new(reader)
            .map_err(|e| SaverError::decode(format!("Cannot create WAV reader: {}", e)))?;

        let spec = reader.spec();
        let format = AudioFormat::from_spec(&spec)?;
        let mut header = AudioHeader::new(spec.sample_rate, spec.channels, format, reader.duration());
        header.validate()?;

        let samples: Vec<f32> = match format {
            AudioFormat::Float32 => reader.samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| SaverError::decode(format!("Failed to read sample: {}", e)))?,
            _ => {
                let scale = format.full_scale();
                reader.samples::<i32>()
                    .map(|sample| sample.map(|s| s as f32 / scale))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| SaverError::decode(format!("Failed to read sample: {}", e)))?
            }
        };

        let data = if spec.channels == 1 {
            AudioData::Mono(Array1::from(samples))
        } else {
            let frames = samples.len() / 2;
            let mut stereo = Array2::zeros((frames, 2));
            for (i, chunk) in samples.chunks_exact(2).enumerate() {
                stereo[[i, 0]] = chunk[0];
                stereo[[i, 1]] = chunk[1];
            }
            AudioData::Stereo(stereo)
        };

        header.total_frames = data.len() as u32;

        Ok(WavAudio { header, data })
    }

    /// Serialise into a complete in-memory WAV file.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    pub fn write_to<W: Write + Seek>(&self, out: W) -> Result<()> {
        self.header.validate().map_err(|e| match e {
            SaverError::Decode { message } => SaverError::encode(message),
            other => other,
        })?;

        let spec = self.header.to_wav_spec();
        let format = self.header.format;
        let mut writer = WavWriter::new(out, spec)
            .map_err(|e| SaverError::encode(format!("Cannot create WAV writer: {}", e)))?;

        match &self.data {
            AudioData::Mono(data) => {
                for &sample in data.iter() {
                    write_sample(&mut writer, sample, format)?;
                }
            }
            AudioData::Stereo(data) => {
                for row in data.rows() {
                    for &sample in row.iter() {
                        write_sample(&mut writer, sample, format)?;
                    }
                }
            }
        }

        writer.finalize()
            .map_err(|e| SaverError::encode(format!("Failed to finalize WAV writing: {}", e)))
    }

    pub fn new_mono(sample_rate: u32, data: Array1<f32>, format: AudioFormat) -> Self {
        let header = AudioHeader::new(sample_rate, 1, format, data.len() as u32);

        WavAudio {
            header,
            data: AudioData::Mono(data),
        }
    }

    pub fn new_stereo(sample_rate: u32, data: Array2<f32>, format: AudioFormat) -> Result<Self> {
        if data.ncols() != 2 {
            return Err(SaverError::decode("Stereo data must have 2 columns"));
        }

        let header = AudioHeader::new(sample_rate, 2, format, data.nrows() as u32);

        Ok(WavAudio {
            header,
            data: AudioData::Stereo(data),
        })
    }

    /// Replace the sample data and keep the header in step with it.
    pub fn set_data(&mut self, data: AudioData) {
        self.header.channels = data.channels();
        self.header.total_frames = data.len() as u32;
        self.header.duration = data.len() as f64 / self.header.sample_rate.max(1) as f64;
        self.data = data;
    }

    pub fn data(&self) -> &AudioData {
        &self.data
    }

    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.header.channels
    }

    pub fn total_frames(&self) -> u32 {
        self.header.total_frames
    }

    pub fn duration(&self) -> f64 {
        self.header.duration
    }

    pub fn format(&self) -> AudioFormat {
        self.header.format
    }
}

fn write_sample<W: Write + Seek>(writer: &mut WavWriter<W>, sample: f32, format: AudioFormat) -> Result<()> {
    let clamped = if sample.is_finite() { sample.clamp(-1.0, 1.0) } else { 0.0 };
    let written = match format {
        AudioFormat::UInt8 => writer.write_sample((clamped * 127.0).round() as i8),
        AudioFormat::Int16 => writer.write_sample((clamped * 32767.0).round() as i16),
        AudioFormat::Int24 => writer.write_sample((clamped * 8_388_607.0).round() as i32),
        AudioFormat::Int32 => writer.write_sample((clamped as f64 * 2_147_483_647.0).round() as i32),
        AudioFormat::Float32 => writer.write_sample(clamped),
    };
    written.map_err(|e| SaverError::encode(format!("Failed to write sample: {}", e)))
}
