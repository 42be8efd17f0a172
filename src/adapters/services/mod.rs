//! ASR (Automatic Speech Recognition) service adapters
//!
//! This module provides adapters for different ASR providers:
//! - Google Speech API v2: FLAC body, newline-delimited JSON response
//! - Wit.ai: WAV body, single JSON document
//! - IBM Watson Speech to Text: FLAC body with Basic auth
//! - OpenAI Whisper: WAV as multipart form data
//! - Microsoft Bing Voice Recognition: token exchange, then WAV body
//! - Houndify: WAV body with HMAC-signed headers

pub mod bing;
pub mod google;
pub mod houndify;
pub mod ibm;
pub mod whisper_api;
pub mod wit;

pub use bing::{BingOptions, BingService};
pub use google::{GoogleOptions, GoogleService};
pub use houndify::{HoundifyOptions, HoundifyService};
pub use ibm::{IbmOptions, IbmService};
pub use whisper_api::{WhisperApiOptions, WhisperApiService};
pub use wit::{WitOptions, WitService};
