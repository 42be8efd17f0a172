//! IBM Watson Speech to Text service adapter
//!
//! Implements the RecognitionServicePort for the Watson recognize endpoint.
//! The audio is posted as FLAC with HTTP Basic credentials; the response
//! carries one utterance per detected phrase, each with its own alternatives.

use crate::domain::{Alternative, AudioData, OutputMode, RecognitionResult};
use crate::error::{RecognitionError, Result};
use crate::ports::encoder::{AudioCodec, AudioEncoderPort};
use crate::ports::http::{HttpMethod, HttpTransportPort, RequestBody, ServiceRequest};
use crate::ports::recognition::RecognitionServicePort;
use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const IBM_API_URL: &str = "https://stream.watsonplatform.net/speech-to-text/api/v1/recognize";
const DEFAULT_LANGUAGE: &str = "en-US";

/// Watson's broadband models expect at least 16 kHz input.
const MIN_SAMPLE_RATE: u32 = 16000;

/// Options for an IBM Watson recognition call
#[derive(Debug, Clone, Default)]
pub struct IbmOptions {
    /// Service instance username
    pub username: String,
    /// Service instance password
    pub password: String,
    /// Language tag selecting the broadband model; defaults to "en-US"
    pub language: Option<String>,
    /// Return the first utterance's alternatives instead of joined text
    pub show_all: bool,
}

/// IBM Watson service implementation
pub struct IbmService {
    transport: Arc<dyn HttpTransportPort>,
    encoder: Arc<dyn AudioEncoderPort>,
    timeout: Option<Duration>,
}

impl IbmService {
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
impl RecognitionServicePort for IbmService {
    type Options = IbmOptions;

    async fn recognize(
        &self,
        audio: &AudioData,
        options: &IbmOptions,
    ) -> Result<RecognitionResult> {
        if options.username.is_empty() || options.password.is_empty() {
            return Err(RecognitionError::InvalidOptions(
                "IBM Watson credentials (username and password) are required".to_string(),
            ));
        }
        let mode = OutputMode::from_flags(options.show_all, false)?;

        let convert_rate = if audio.sample_rate < MIN_SAMPLE_RATE {
            Some(MIN_SAMPLE_RATE)
        } else {
            None
        };
        let flac_data = self
            .encoder
            .encode(audio, AudioCodec::Flac, convert_rate, Some(2))?;

        let language = options.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
        let url = format!(
            "{}?model={}_BroadbandModel&profanity_filter=false&inactivity_timeout=-1",
            IBM_API_URL, language
        );

        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", options.username, options.password));

        let request = ServiceRequest {
            method: HttpMethod::Post,
            url,
            headers: vec![
                ("Authorization".to_string(), format!("Basic {}", credentials)),
                ("Content-Type".to_string(), "audio/x-flac".to_string()),
                ("X-Watson-Learning-Opt-Out".to_string(), "true".to_string()),
            ],
            body: RequestBody::Raw(flac_data),
            timeout: self.timeout,
        };

        log::info!(
            "submitting {} Hz audio to IBM Watson ({} model)",
            audio.sample_rate,
            language
        );

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(RecognitionError::Request(format!(
                "IBM Watson error ({}): {}",
                response.status,
                response.text()
            )));
        }

        let parsed: IbmResponse = serde_json::from_slice(&response.body)
            .map_err(|e| RecognitionError::MalformedResponse(format!("bad JSON body: {}", e)))?;

        let first = parsed
            .results
            .first()
            .filter(|utterance| !utterance.alternatives.is_empty())
            .ok_or(RecognitionError::UnknownValue)?;

        if let OutputMode::ShowAll = mode {
            return Ok(RecognitionResult::Alternatives {
                alternatives: first.alternatives.clone(),
                is_final: first.is_final,
            });
        }

        // Default output joins the top hypothesis of every utterance
        let transcription: Vec<&str> = parsed
            .results
            .iter()
            .filter_map(|utterance| utterance.alternatives.first())
            .map(|hypothesis| hypothesis.transcript.as_str())
            .collect();
        if transcription.is_empty() {
            return Err(RecognitionError::UnknownValue);
        }

        Ok(RecognitionResult::Transcript(transcription.join("\n")))
    }

    fn service_name(&self) -> &str {
        "IBM Watson Speech to Text"
    }

    fn is_configured(&self, options: &IbmOptions) -> bool {
        !options.username.is_empty() && !options.password.is_empty()
    }
}

// ===== API Response Types =====

#[derive(Debug, Deserialize)]
struct IbmResponse {
    #[serde(default)]
    results: Vec<IbmUtterance>,
}

#[derive(Debug, Deserialize)]
struct IbmUtterance {
    #[serde(default)]
    alternatives: Vec<Alternative>,
    #[serde(rename = "final", default)]
    is_final: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{MockEncoder, MockTransport};

    const RESPONSE_BODY: &[u8] = b"{\"results\":[{\"alternatives\":[{\"transcript\":\"one two three \",\"confidence\":0.93}],\"final\":true}],\"result_index\":0}";

    fn service(body: &[u8]) -> (IbmService, MockTransport, MockEncoder) {
        let transport = MockTransport::with_response(body);
        let encoder = MockEncoder::new(b"flac-bytes");
        let service = IbmService::new(
            Arc::new(transport.clone()),
            Arc::new(encoder.clone()),
            None,
        );
        (service, transport, encoder)
    }

    fn options() -> IbmOptions {
        IbmOptions {
            username: "user".to_string(),
            password: "pass".to_string(),
            language: None,
            show_all: false,
        }
    }

    fn audio(sample_rate: u32) -> AudioData {
        AudioData::new(vec![0u8; 64], sample_rate, 2)
    }

    #[tokio::test]
    async fn test_default_call_joins_top_hypotheses() {
        let (service, transport, encoder) = service(RESPONSE_BODY);

        let result = service.recognize(&audio(16_000), &options()).await.unwrap();

        assert_eq!(
            result,
            RecognitionResult::Transcript("one two three ".to_string())
        );
        assert_eq!(encoder.single_call().codec, AudioCodec::Flac);

        let request = transport.single_request();
        assert_eq!(
            request.url,
            "https://stream.watsonplatform.net/speech-to-text/api/v1/recognize?model=en-US_BroadbandModel&profanity_filter=false&inactivity_timeout=-1"
        );
        // user:pass
        assert!(request
            .headers
            .contains(&("Authorization".to_string(), "Basic dXNlcjpwYXNz".to_string())));
        assert!(request
            .headers
            .contains(&("X-Watson-Learning-Opt-Out".to_string(), "true".to_string())));
    }

    #[tokio::test]
    async fn test_language_selects_broadband_model() {
        let (service, transport, _encoder) = service(RESPONSE_BODY);
        let options = IbmOptions {
            language: Some("fr-FR".to_string()),
            ..options()
        };

        let _ = service.recognize(&audio(16_000), &options).await.unwrap();

        assert!(transport
            .single_request()
            .url
            .contains("model=fr-FR_BroadbandModel"));
    }

    #[tokio::test]
    async fn test_below_broadband_rate_is_upconverted() {
        let (service, _transport, encoder) = service(RESPONSE_BODY);

        let _ = service.recognize(&audio(8_000), &options()).await.unwrap();

        assert_eq!(encoder.single_call().convert_rate, Some(16000));
    }

    #[tokio::test]
    async fn test_multiple_utterances_are_joined_with_newlines() {
        let body = b"{\"results\":[{\"alternatives\":[{\"transcript\":\"hello \"}],\"final\":true},{\"alternatives\":[{\"transcript\":\"world \"}],\"final\":true}]}";
        let (service, _transport, _encoder) = service(body);

        let result = service.recognize(&audio(16_000), &options()).await.unwrap();

        assert_eq!(
            result,
            RecognitionResult::Transcript("hello \nworld ".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_results_is_unknown_value() {
        let (service, _transport, _encoder) = service(b"{\"results\":[]}");

        let result = service.recognize(&audio(16_000), &options()).await;

        assert!(matches!(result, Err(RecognitionError::UnknownValue)));
    }

    #[tokio::test]
    async fn test_missing_credentials_are_rejected() {
        let (service, transport, _encoder) = service(RESPONSE_BODY);

        let result = service
            .recognize(&audio(16_000), &IbmOptions::default())
            .await;

        assert!(matches!(result, Err(RecognitionError::InvalidOptions(_))));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_show_all_returns_first_utterance_alternatives() {
        let (service, _transport, _encoder) = service(RESPONSE_BODY);
        let options = IbmOptions {
            show_all: true,
            ..options()
        };

        let result = service.recognize(&audio(16_000), &options).await.unwrap();

        assert_eq!(
            result,
            RecognitionResult::Alternatives {
                alternatives: vec![Alternative {
                    transcript: "one two three ".to_string(),
                    confidence: Some(0.93),
                }],
                is_final: true,
            }
        );
    }
}
