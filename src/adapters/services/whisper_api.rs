//! OpenAI Whisper API service adapter
//!
//! Implements the RecognitionServicePort for the hosted Whisper transcription
//! endpoint. The audio goes out as a WAV file in a multipart form together
//! with the model name and any decoding parameters.

use crate::domain::{AudioData, RecognitionResult};
use crate::error::{RecognitionError, Result};
use crate::ports::encoder::{AudioCodec, AudioEncoderPort};
use crate::ports::http::{
    HttpMethod, HttpTransportPort, MultipartPart, PartValue, RequestBody, ServiceRequest,
};
use crate::ports::recognition::RecognitionServicePort;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
const DEFAULT_MODEL: &str = "whisper-1";

/// Options for a Whisper API transcription call
#[derive(Debug, Clone)]
pub struct WhisperApiOptions {
    /// OpenAI API key
    pub api_key: String,
    /// Model name; defaults to "whisper-1"
    pub model: String,
    /// ISO-639-1 language hint (e.g. "en")
    pub language: Option<String>,
    /// Optional text to guide the decoding style
    pub prompt: Option<String>,
    /// Sampling temperature between 0 and 1
    pub temperature: Option<f32>,
}

impl Default for WhisperApiOptions {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            language: None,
            prompt: None,
            temperature: None,
        }
    }
}

/// OpenAI Whisper API service implementation
pub struct WhisperApiService {
    transport: Arc<dyn HttpTransportPort>,
    encoder: Arc<dyn AudioEncoderPort>,
    timeout: Option<Duration>,
}

impl WhisperApiService {
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

    fn build_form(&self, wav_data: Vec<u8>, options: &WhisperApiOptions) -> Vec<MultipartPart> {
        let mut parts = vec![
            MultipartPart {
                name: "file".to_string(),
                value: PartValue::File {
                    data: wav_data,
                    filename: "audio.wav".to_string(),
                    content_type: "audio/wav".to_string(),
                },
            },
            MultipartPart {
                name: "model".to_string(),
                value: PartValue::Text(options.model.clone()),
            },
        ];

        if let Some(language) = &options.language {
            parts.push(MultipartPart {
                name: "language".to_string(),
                value: PartValue::Text(language.clone()),
            });
        }
        if let Some(prompt) = &options.prompt {
            parts.push(MultipartPart {
                name: "prompt".to_string(),
                value: PartValue::Text(prompt.clone()),
            });
        }
        if let Some(temperature) = options.temperature {
            parts.push(MultipartPart {
                name: "temperature".to_string(),
                value: PartValue::Text(temperature.to_string()),
            });
        }

        parts
    }
}

#[async_trait]
impl RecognitionServicePort for WhisperApiService {
    type Options = WhisperApiOptions;

    async fn recognize(
        &self,
        audio: &AudioData,
        options: &WhisperApiOptions,
    ) -> Result<RecognitionResult> {
        if options.api_key.is_empty() {
            return Err(RecognitionError::InvalidOptions(
                "an OpenAI API key is required".to_string(),
            ));
        }

        let wav_data = self.encoder.encode(audio, AudioCodec::Wav, None, Some(2))?;

        let request = ServiceRequest {
            method: HttpMethod::Post,
            url: OPENAI_API_URL.to_string(),
            headers: vec![(
                "Authorization".to_string(),
                format!("Bearer {}", options.api_key),
            )],
            body: RequestBody::Multipart(self.build_form(wav_data, options)),
            timeout: self.timeout,
        };

        log::info!(
            "submitting {} Hz audio to the Whisper API ({})",
            audio.sample_rate,
            options.model
        );

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(RecognitionError::Request(format!(
                "Whisper API error ({}): {}",
                response.status,
                response.text()
            )));
        }

        let parsed: WhisperResponse = serde_json::from_slice(&response.body)
            .map_err(|e| RecognitionError::MalformedResponse(format!("bad JSON body: {}", e)))?;

        if parsed.text.is_empty() {
            return Err(RecognitionError::UnknownValue);
        }

        Ok(RecognitionResult::Transcript(parsed.text))
    }

    fn service_name(&self) -> &str {
        "OpenAI Whisper API"
    }

    fn is_configured(&self, options: &WhisperApiOptions) -> bool {
        !options.api_key.is_empty()
    }
}

// ===== API Response Types =====

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
}
