/// Audio encoder port trait
///
/// Re-encoding the audio buffer into a vendor's codec is a collaborator
/// concern; adapters only decide the target codec and the rate/width
/// conversion policy and observe the encoded bytes.
use crate::domain::AudioData;
use crate::error::Result;

/// Target codec for an encoded payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCodec {
    /// FLAC container (lossless compressed)
    Flac,
    /// WAV container (16-bit PCM)
    Wav,
    /// Headerless little-endian PCM
    RawPcm,
}

/// Port trait for audio re-encoding
pub trait AudioEncoderPort: Send + Sync {
    /// Encode the audio into `codec`, optionally resampling to
    /// `convert_rate` Hz and normalizing to `convert_width` bytes per sample.
    fn encode(
        &self,
        audio: &AudioData,
        codec: AudioCodec,
        convert_rate: Option<u32>,
        convert_width: Option<u16>,
    ) -> Result<Vec<u8>>;
}
