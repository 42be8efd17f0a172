//! Microsoft Bing Voice Recognition service adapter
//!
//! Implements the RecognitionServicePort for the Cognitive Services speech
//! endpoint. Each call makes two requests: exchange the subscription key for
//! a short-lived access token, then POST the audio with that token. The
//! token is fetched fresh every call so the adapter stays stateless and
//! concurrent invocations need no coordination.

use crate::domain::{AudioData, RecognitionResult};
use crate::error::{RecognitionError, Result};
use crate::ports::encoder::{AudioCodec, AudioEncoderPort};
use crate::ports::http::{HttpMethod, HttpTransportPort, RequestBody, ServiceRequest};
use crate::ports::recognition::RecognitionServicePort;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const TOKEN_URL: &str = "https://api.cognitive.microsoft.com/sts/v1.0/issueToken";
const BING_API_URL: &str =
    "https://speech.platform.bing.com/speech/recognition/interactive/cognitiveservices/v1";
const DEFAULT_LANGUAGE: &str = "en-US";

/// The interactive endpoint expects 16 kHz, 16-bit mono input.
const TARGET_SAMPLE_RATE: u32 = 16000;

/// Options for a Bing Voice Recognition call
#[derive(Debug, Clone, Default)]
pub struct BingOptions {
    /// Cognitive Services subscription key
    pub key: String,
    /// Language tag; defaults to "en-US"
    pub language: Option<String>,
    /// Return the raw response document instead of the display text
    pub show_all: bool,
}

/// Bing Voice Recognition service implementation
pub struct BingService {
    transport: Arc<dyn HttpTransportPort>,
    encoder: Arc<dyn AudioEncoderPort>,
    timeout: Option<Duration>,
}

impl BingService {
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

    /// Exchange the subscription key for a bearer token
    async fn fetch_access_token(&self, key: &str) -> Result<String> {
        let request = ServiceRequest {
            method: HttpMethod::Post,
            url: TOKEN_URL.to_string(),
            headers: vec![
                (
                    "Content-Type".to_string(),
                    "application/x-www-form-urlencoded".to_string(),
                ),
                ("Content-Length".to_string(), "0".to_string()),
                ("Ocp-Apim-Subscription-Key".to_string(), key.to_string()),
            ],
            body: RequestBody::Raw(Vec::new()),
            timeout: self.timeout,
        };

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(RecognitionError::Request(format!(
                "Bing token request failed ({}): {}",
                response.status,
                response.text()
            )));
        }

        // The token endpoint answers with the bare JWT text
        Ok(response.text())
    }
}

#[async_trait]
impl RecognitionServicePort for BingService {
    type Options = BingOptions;

    async fn recognize(
        &self,
        audio: &AudioData,
        options: &BingOptions,
    ) -> Result<RecognitionResult> {
        if options.key.is_empty() {
            return Err(RecognitionError::InvalidOptions(
                "a Bing Voice Recognition subscription key is required".to_string(),
            ));
        }

        let access_token = self.fetch_access_token(&options.key).await?;

        let wav_data =
            self.encoder
                .encode(audio, AudioCodec::Wav, Some(TARGET_SAMPLE_RATE), Some(2))?;

        let language = options.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
        let url = format!(
            "{}?language={}&locale={}&requestid={}",
            BING_API_URL,
            language,
            language,
            Uuid::new_v4()
        );

        let request = ServiceRequest {
            method: HttpMethod::Post,
            url,
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", access_token),
                ),
                (
                    "Content-Type".to_string(),
                    "audio/wav; codec=\"audio/pcm\"; samplerate=16000".to_string(),
                ),
            ],
            body: RequestBody::Raw(wav_data),
            timeout: self.timeout,
        };

        log::info!(
            "submitting {} Hz audio to Bing Voice Recognition ({})",
            audio.sample_rate,
            language
        );

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(RecognitionError::Request(format!(
                "Bing Voice Recognition error ({}): {}",
                response.status,
                response.text()
            )));
        }

        if options.show_all {
            let document: serde_json::Value = serde_json::from_slice(&response.body)
                .map_err(|e| {
                    RecognitionError::MalformedResponse(format!("bad JSON body: {}", e))
                })?;
            return Ok(RecognitionResult::Document(document));
        }

        let parsed: BingResponse = serde_json::from_slice(&response.body)
            .map_err(|e| RecognitionError::MalformedResponse(format!("bad JSON body: {}", e)))?;

        match (parsed.recognition_status.as_deref(), parsed.display_text) {
            (Some("Success"), Some(text)) => Ok(RecognitionResult::Transcript(text)),
            _ => Err(RecognitionError::UnknownValue),
        }
    }

    fn service_name(&self) -> &str {
        "Bing Voice Recognition"
    }

    fn is_configured(&self, options: &BingOptions) -> bool {
        !options.key.is_empty()
    }
}

// ===== API Response Types =====

#[derive(Debug, Deserialize)]
struct BingResponse {
    #[serde(rename = "RecognitionStatus")]
    recognition_status: Option<String>,
    #[serde(rename = "DisplayText")]
    display_text: Option<String>,
}
