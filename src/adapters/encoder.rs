//! Default audio encoder
//!
//! Normalizes sample width to 16-bit, resamples by linear interpolation, and
//! writes the container: WAV through the hound crate, FLAC by piping the WAV
//! bytes through the system `flac` binary.

use crate::domain::AudioData;
use crate::error::{RecognitionError, Result};
use crate::ports::encoder::{AudioCodec, AudioEncoderPort};
use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

/// Encoder implementation for raw PCM input
pub struct PcmEncoder {
    flac_command: String,
}

impl PcmEncoder {
    pub fn new() -> Self {
        Self {
            flac_command: "flac".to_string(),
        }
    }

    /// Use a specific flac executable instead of the one on PATH
    pub fn with_flac_command(command: impl Into<String>) -> Self {
        Self {
            flac_command: command.into(),
        }
    }

    fn flac_encode(&self, wav_data: &[u8]) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.flac_command)
            .args(["--totally-silent", "--best", "--stdout", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                RecognitionError::Encoding(format!(
                    "failed to run '{}': {}",
                    self.flac_command, e
                ))
            })?;

        // stdin must be dropped before waiting so the encoder sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(wav_data).map_err(|e| {
                RecognitionError::Encoding(format!("failed to feed flac encoder: {}", e))
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            RecognitionError::Encoding(format!("flac encoder did not finish: {}", e))
        })?;

        if !output.status.success() {
            return Err(RecognitionError::Encoding(format!(
                "'{}' exited with {}",
                self.flac_command, output.status
            )));
        }

        Ok(output.stdout)
    }
}

impl Default for PcmEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEncoderPort for PcmEncoder {
    fn encode(
        &self,
        audio: &AudioData,
        codec: AudioCodec,
        convert_rate: Option<u32>,
        convert_width: Option<u16>,
    ) -> Result<Vec<u8>> {
        if let Some(width) = convert_width {
            if width != 2 {
                return Err(RecognitionError::Encoding(format!(
                    "unsupported target sample width: {} bytes",
                    width
                )));
            }
        }

        let mut samples = to_i16_samples(audio)?;
        let mut sample_rate = audio.sample_rate;

        if let Some(target_rate) = convert_rate {
            if target_rate != sample_rate {
                samples = resample(&samples, sample_rate, target_rate);
                sample_rate = target_rate;
            }
        }

        match codec {
            AudioCodec::RawPcm => Ok(samples
                .iter()
                .flat_map(|s| s.to_le_bytes())
                .collect()),
            AudioCodec::Wav => wav_bytes(&samples, sample_rate),
            AudioCodec::Flac => {
                let wav_data = wav_bytes(&samples, sample_rate)?;
                self.flac_encode(&wav_data)
            }
        }
    }
}

/// Convert the raw buffer to signed 16-bit samples
fn to_i16_samples(audio: &AudioData) -> Result<Vec<i16>> {
    if audio.sample_width > 0 && audio.data.len() % usize::from(audio.sample_width) != 0 {
        return Err(RecognitionError::Encoding(format!(
            "audio buffer of {} bytes is not a whole number of {}-byte samples",
            audio.data.len(),
            audio.sample_width
        )));
    }

    match audio.sample_width {
        1 => Ok(audio
            .data
            .iter()
            .map(|&b| (b as i8 as i16) << 8)
            .collect()),
        2 => Ok(audio
            .data
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect()),
        4 => Ok(audio
            .data
            .chunks_exact(4)
            .map(|c| (i32::from_le_bytes([c[0], c[1], c[2], c[3]]) >> 16) as i16)
            .collect()),
        width => Err(RecognitionError::Encoding(format!(
            "unsupported source sample width: {} bytes",
            width
        ))),
    }
}

/// Linear-interpolation resampler, mono
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let output_len = (samples.len() as f64 * ratio).round() as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let position = i as f64 / ratio;
        let index = position.floor() as usize;
        let fraction = position - index as f64;

        let current = samples[index.min(samples.len() - 1)] as f64;
        let next = samples[(index + 1).min(samples.len() - 1)] as f64;

        output.push((current + (next - current) * fraction).round() as i16);
    }

    output
}

/// Write samples into an in-memory WAV container
fn wav_bytes(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)
        .map_err(|e| RecognitionError::Encoding(format!("failed to create WAV writer: {}", e)))?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| RecognitionError::Encoding(format!("failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| RecognitionError::Encoding(format!("failed to finalize WAV data: {}", e)))?;

    Ok(cursor.into_inner())
}
