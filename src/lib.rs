//! Speech recognition client library
//!
//! Dispatches recorded audio to third-party speech-to-text services and
//! normalizes their responses into plain text or structured transcripts. The
//! library is a thin adapter layer: re-encode the audio, build the
//! service-specific HTTP request, parse the JSON response, and return a
//! [`RecognitionResult`].
//!
//! Supported services: Google Speech API, Wit.ai, IBM Watson Speech to Text,
//! Microsoft Bing Voice Recognition, Houndify, and the OpenAI Whisper API.
//! Each service takes its own typed options
//! struct; audio capture and decoding are collaborator concerns behind the
//! port traits in [`ports`].
//!
//! ```no_run
//! use hearsay::adapters::services::GoogleOptions;
//! use hearsay::{AudioData, Recognizer};
//!
//! # async fn run() -> hearsay::Result<()> {
//! let recognizer = Recognizer::new();
//! let audio = AudioData::new(vec![0u8; 32_000], 16_000, 2);
//! let transcript = recognizer
//!     .recognize_google(&audio, &GoogleOptions::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod recognizer;

pub use domain::{Alternative, AudioData, OutputMode, RecognitionResult, RecognizerConfig};
pub use error::{RecognitionError, Result};
pub use recognizer::Recognizer;
