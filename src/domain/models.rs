/// Domain models for the recognition client
///
/// These models represent the audio payload, tunable recognizer settings, and
/// normalized recognition output. They are service-agnostic; wire formats live
/// with the individual adapters.
use crate::error::{RecognitionError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A decoded audio buffer with its format metadata.
///
/// Immutable once constructed: adapters only ever borrow it, and every
/// recognition call is a pure function of the audio and its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    /// Raw PCM bytes (little-endian, mono)
    pub data: Vec<u8>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bytes per sample (1, 2, or 4)
    pub sample_width: u16,
}

impl AudioData {
    /// Creates an audio buffer from raw PCM bytes
    pub fn new(data: Vec<u8>, sample_rate: u32, sample_width: u16) -> Self {
        Self {
            data,
            sample_rate,
            sample_width,
        }
    }
}

/// Tunable recognizer settings
///
/// Thresholds mirror the live-capture collaborators; only `operation_timeout`
/// affects the HTTP adapters directly. Defaults are fixed and documented.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerConfig {
    /// Minimum audio energy to consider for recording
    pub energy_threshold: f64,
    /// Automatically adjust the energy threshold based on ambient noise
    pub dynamic_energy_threshold: bool,
    /// Damping factor for dynamic threshold adjustment
    pub dynamic_energy_adjustment_damping: f64,
    /// Ratio between speech energy and ambient energy
    pub dynamic_energy_ratio: f64,
    /// Seconds of non-speaking audio before a phrase is considered complete
    pub pause_threshold: f64,
    /// Per-request timeout for service calls; `None` means wait indefinitely
    pub operation_timeout: Option<Duration>,
    /// Minimum seconds of speaking audio to count as a phrase
    pub phrase_threshold: f64,
    /// Seconds of non-speaking audio kept on both sides of a phrase
    pub non_speaking_duration: f64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            energy_threshold: 300.0,
            dynamic_energy_threshold: true,
            dynamic_energy_adjustment_damping: 0.15,
            dynamic_energy_ratio: 1.5,
            pause_threshold: 0.8,
            operation_timeout: None,
            phrase_threshold: 0.3,
            non_speaking_duration: 0.5,
        }
    }
}

/// One candidate transcript with an optional confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    /// The hypothesized text
    pub transcript: String,
    /// Confidence score (0.0 to 1.0); absent when the service omits it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Requested output shape for a recognition call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Return the single best transcript (default)
    Best,
    /// Return every alternative plus the final flag, unmodified in structure
    ShowAll,
    /// Return the best transcript together with its confidence score
    WithConfidence,
}

impl OutputMode {
    /// Resolves the two request flags into a mode.
    ///
    /// Selecting both show-all and with-confidence is a configuration error;
    /// the combination has no defined output shape.
    pub fn from_flags(show_all: bool, with_confidence: bool) -> Result<Self> {
        match (show_all, with_confidence) {
            (true, true) => Err(RecognitionError::InvalidOptions(
                "show_all and with_confidence are mutually exclusive".to_string(),
            )),
            (true, false) => Ok(OutputMode::ShowAll),
            (false, true) => Ok(OutputMode::WithConfidence),
            (false, false) => Ok(OutputMode::Best),
        }
    }
}

/// Normalized result of a recognition call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecognitionResult {
    /// Plain transcript of the best hypothesis
    Transcript(String),
    /// Every alternative the service returned, plus its final flag
    Alternatives {
        #[serde(rename = "alternative")]
        alternatives: Vec<Alternative>,
        #[serde(rename = "final")]
        is_final: bool,
    },
    /// Best transcript paired with its confidence score
    TranscriptWithConfidence { transcript: String, confidence: f32 },
    /// The service's raw response document, for show-all on services whose
    /// responses carry more than an alternative list (entities, intents)
    Document(serde_json::Value),
}

impl RecognitionResult {
    /// Normalizes a list of alternatives into the requested output shape.
    ///
    /// Best-hypothesis selection: the highest-confidence alternative when any
    /// alternative carries a confidence score, otherwise the first one. A
    /// missing confidence in with-confidence mode falls back to 0.5.
    pub fn from_alternatives(
        alternatives: Vec<Alternative>,
        is_final: bool,
        mode: OutputMode,
    ) -> Result<Self> {
        if let OutputMode::ShowAll = mode {
            return Ok(RecognitionResult::Alternatives {
                alternatives,
                is_final,
            });
        }

        let best = Self::best_hypothesis(&alternatives)?;
        match mode {
            OutputMode::Best => Ok(RecognitionResult::Transcript(best.transcript.clone())),
            OutputMode::WithConfidence => Ok(RecognitionResult::TranscriptWithConfidence {
                transcript: best.transcript.clone(),
                confidence: best.confidence.unwrap_or(0.5),
            }),
            OutputMode::ShowAll => unreachable!("handled above"),
        }
    }

    fn best_hypothesis(alternatives: &[Alternative]) -> Result<&Alternative> {
        if alternatives.is_empty() {
            return Err(RecognitionError::UnknownValue);
        }

        let scored = alternatives
            .iter()
            .filter(|a| a.confidence.is_some())
            .max_by(|a, b| {
                a.confidence
                    .partial_cmp(&b.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        // No confidence anywhere: the service's own ordering wins.
        Ok(scored.unwrap_or(&alternatives[0]))
    }

    /// The transcript text, when the result carries a single hypothesis
    pub fn text(&self) -> Option<&str> {
        match self {
            RecognitionResult::Transcript(text) => Some(text),
            RecognitionResult::TranscriptWithConfidence { transcript, .. } => Some(transcript),
            RecognitionResult::Alternatives { .. } | RecognitionResult::Document(_) => None,
        }
    }
}
