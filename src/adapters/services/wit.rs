//! Wit.ai service adapter
//!
//! Implements the RecognitionServicePort for Wit.ai's speech endpoint.
//! Single request: POST the audio as WAV with a Bearer token and read the
//! transcript from the `_text` field of the JSON response. Show-all hands
//! back the whole response document, entities and intents included.

use crate::domain::{AudioData, RecognitionResult};
use crate::error::{RecognitionError, Result};
use crate::ports::encoder::{AudioCodec, AudioEncoderPort};
use crate::ports::http::{HttpMethod, HttpTransportPort, RequestBody, ServiceRequest};
use crate::ports::recognition::RecognitionServicePort;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

const WIT_API_URL: &str = "https://api.wit.ai/speech?v=20170307";
const MIN_SAMPLE_RATE: u32 = 8000;

/// Options for a Wit.ai recognition call
#[derive(Debug, Clone, Default)]
pub struct WitOptions {
    /// Server access token from the Wit.ai app settings
    pub key: String,
    /// Return the raw response document instead of plain text
    pub show_all: bool,
}

/// Wit.ai service implementation
pub struct WitService {
    transport: Arc<dyn HttpTransportPort>,
    encoder: Arc<dyn AudioEncoderPort>,
    timeout: Option<Duration>,
}

impl WitService {
    pub fn new(
        transport: Arc<dyn HttpTransportPort>,
        encoder: Arc<dyn AudioEncoderPort>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            transport,
            encoder,
            timeout,
        }
    }
}

#[async_trait]
impl RecognitionServicePort for WitService {
    type Options = WitOptions;

    async fn recognize(
        &self,
        audio: &AudioData,
        options: &WitOptions,
    ) -> Result<RecognitionResult> {
        if options.key.is_empty() {
            return Err(RecognitionError::InvalidOptions(
                "a Wit.ai server access token is required".to_string(),
            ));
        }

        let convert_rate = if audio.sample_rate < MIN_SAMPLE_RATE {
            Some(MIN_SAMPLE_RATE)
        } else {
            None
        };
        let wav_data = self
            .encoder
            .encode(audio, AudioCodec::Wav, convert_rate, Some(2))?;

        let request = ServiceRequest {
            method: HttpMethod::Post,
            url: WIT_API_URL.to_string(),
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", options.key),
                ),
                ("Content-Type".to_string(), "audio/wav".to_string()),
            ],
            body: RequestBody::Raw(wav_data),
            timeout: self.timeout,
        };

        log::info!("submitting {} Hz audio to Wit.ai", audio.sample_rate);

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(RecognitionError::Request(format!(
                "Wit.ai error ({}): {}",
                response.status,
                response.text()
            )));
        }

        let parsed: serde_json::Value = serde_json::from_slice(&response.body)
            .map_err(|e| RecognitionError::MalformedResponse(format!("bad JSON body: {}", e)))?;

        // Show-all hands over the document untouched; Wit's entities and
        // intents have no place in the normalized alternative list
        if options.show_all {
            return Ok(RecognitionResult::Document(parsed));
        }

        let text = parsed
            .get("_text")
            .and_then(|value| value.as_str())
            .ok_or(RecognitionError::UnknownValue)?;

        Ok(RecognitionResult::Transcript(text.to_string()))
    }

    fn service_name(&self) -> &str {
        "Wit.ai"
    }

    fn is_configured(&self, options: &WitOptions) -> bool {
        !options.key.is_empty()
    }
}
