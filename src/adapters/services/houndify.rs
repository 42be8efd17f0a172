//! Houndify service adapter
//!
//! Implements the RecognitionServicePort for Houndify's audio endpoint.
//! Single request: POST the audio as WAV with three authentication headers.
//! Every call is signed with an HMAC-SHA256 over freshly generated user and
//! request identifiers plus a unix timestamp, keyed with the decoded client
//! key, so no credential material ever travels in the clear.

use crate::domain::{AudioData, RecognitionResult};
use crate::error::{RecognitionError, Result};
use crate::ports::encoder::{AudioCodec, AudioEncoderPort};
use crate::ports::http::{HttpMethod, HttpTransportPort, RequestBody, ServiceRequest};
use crate::ports::recognition::RecognitionServicePort;
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const HOUNDIFY_API_URL: &str = "https://api.houndify.com/v1/audio";

type HmacSha256 = Hmac<Sha256>;

/// Options for a Houndify recognition call
#[derive(Debug, Clone, Default)]
pub struct HoundifyOptions {
    /// Client ID from the Houndify dashboard
    pub client_id: String,
    /// Client key from the Houndify dashboard, URL-safe base64
    pub client_key: String,
    /// Return the raw response document instead of plain text
    pub show_all: bool,
}

/// Houndify service implementation
pub struct HoundifyService {
    transport: Arc<dyn HttpTransportPort>,
    encoder: Arc<dyn AudioEncoderPort>,
    timeout: Option<Duration>,
}

impl HoundifyService {
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

    /// Signs `user_id;request_id` + `request_time` with the decoded client key
    fn sign(client_key: &str, user_id: &str, request_id: &str, request_time: u64) -> Result<String> {
        let key_bytes = URL_SAFE.decode(client_key).map_err(|_| {
            RecognitionError::InvalidOptions(
                "the Houndify client key is not valid URL-safe base64".to_string(),
            )
        })?;

        let mut mac = HmacSha256::new_from_slice(&key_bytes).map_err(|_| {
            RecognitionError::InvalidOptions("the Houndify client key is unusable".to_string())
        })?;
        mac.update(format!("{};{}{}", user_id, request_id, request_time).as_bytes());

        Ok(URL_SAFE.encode(mac.finalize().into_bytes()))
    }
}

#[async_trait]
impl RecognitionServicePort for HoundifyService {
    type Options = HoundifyOptions;

    async fn recognize(
        &self,
        audio: &AudioData,
        options: &HoundifyOptions,
    ) -> Result<RecognitionResult> {
        if options.client_id.is_empty() || options.client_key.is_empty() {
            return Err(RecognitionError::InvalidOptions(
                "a Houndify client ID and client key are required".to_string(),
            ));
        }

        // The endpoint takes 8 or 16 kHz input natively; everything else is
        // resampled to 16 kHz
        let convert_rate = match audio.sample_rate {
            8000 | 16000 => None,
            _ => Some(16000),
        };
        let wav_data = self
            .encoder
            .encode(audio, AudioCodec::Wav, convert_rate, Some(2))?;

        let user_id = Uuid::new_v4().to_string();
        let request_id = Uuid::new_v4().to_string();
        let request_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let signature = Self::sign(&options.client_key, &user_id, &request_id, request_time)?;

        let request_info = serde_json::json!({
            "ClientID": options.client_id,
            "UserID": user_id,
        });

        let request = ServiceRequest {
            method: HttpMethod::Post,
            url: HOUNDIFY_API_URL.to_string(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Hound-Request-Info".to_string(), request_info.to_string()),
                (
                    "Hound-Request-Authentication".to_string(),
                    format!("{};{}", user_id, request_id),
                ),
                (
                    "Hound-Client-Authentication".to_string(),
                    format!("{};{};{}", options.client_id, request_time, signature),
                ),
            ],
            body: RequestBody::Raw(wav_data),
            timeout: self.timeout,
        };

        log::info!("submitting {} Hz audio to Houndify", audio.sample_rate);

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(RecognitionError::Request(format!(
                "Houndify error ({}): {}",
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

        let parsed: HoundifyResponse = serde_json::from_slice(&response.body)
            .map_err(|e| RecognitionError::MalformedResponse(format!("bad JSON body: {}", e)))?;

        parsed
            .disambiguation
            .and_then(|d| d.choice_data.into_iter().next())
            .map(|choice| RecognitionResult::Transcript(choice.transcription))
            .ok_or(RecognitionError::UnknownValue)
    }

    fn service_name(&self) -> &str {
        "Houndify"
    }

    fn is_configured(&self, options: &HoundifyOptions) -> bool {
        !options.client_id.is_empty() && !options.client_key.is_empty()
    }
}

// ===== API Response Types =====

#[derive(Debug, Deserialize)]
struct HoundifyResponse {
    #[serde(rename = "Disambiguation")]
    disambiguation: Option<Disambiguation>,
}

#[derive(Debug, Deserialize)]
struct Disambiguation {
    #[serde(rename = "ChoiceData", default)]
    choice_data: Vec<DisambiguationChoice>,
}

#[derive(Debug, Deserialize)]
struct DisambiguationChoice {
    #[serde(rename = "Transcription")]
    transcription: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{MockEncoder, MockTransport};

    const RESPONSE_BODY: &[u8] = b"{\"Disambiguation\":{\"ChoiceData\":[{\"Transcription\":\"one two three\"}]},\"Status\":\"OK\"}";

    fn service(body: &[u8]) -> (HoundifyService, MockTransport, MockEncoder) {
        let transport = MockTransport::with_response(body);
        let encoder = MockEncoder::new(b"wav-bytes");
        let service = HoundifyService::new(
            Arc::new(transport.clone()),
            Arc::new(encoder.clone()),
            None,
        );
        (service, transport, encoder)
    }

    fn options() -> HoundifyOptions {
        HoundifyOptions {
            client_id: "hound-client".to_string(),
            // "secret-key" in URL-safe base64
            client_key: "c2VjcmV0LWtleQ==".to_string(),
            show_all: false,
        }
    }

    fn audio(sample_rate: u32) -> AudioData {
        AudioData::new(vec![0u8; 64], sample_rate, 2)
    }

    fn header<'a>(request: &'a crate::ports::http::ServiceRequest, name: &str) -> &'a str {
        request
            .headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .expect("header present")
    }

    #[tokio::test]
    async fn test_transcript_comes_from_first_choice() {
        let (service, transport, _encoder) = service(RESPONSE_BODY);

        let result = service.recognize(&audio(16_000), &options()).await.unwrap();

        assert_eq!(
            result,
            RecognitionResult::Transcript("one two three".to_string())
        );
        assert_eq!(
            transport.single_request().url,
            "https://api.houndify.com/v1/audio"
        );
    }

    #[tokio::test]
    async fn test_request_carries_signed_authentication_headers() {
        let (service, transport, _encoder) = service(RESPONSE_BODY);

        let _ = service.recognize(&audio(16_000), &options()).await.unwrap();

        let request = transport.single_request();
        assert_eq!(header(&request, "Content-Type"), "application/json");

        let info: serde_json::Value =
            serde_json::from_str(header(&request, "Hound-Request-Info")).unwrap();
        assert_eq!(info["ClientID"], serde_json::json!("hound-client"));
        let user_id = info["UserID"].as_str().unwrap().to_string();

        let request_auth = header(&request, "Hound-Request-Authentication");
        let (auth_user, request_id) = request_auth.split_once(';').unwrap();
        assert_eq!(auth_user, user_id);

        let client_auth = header(&request, "Hound-Client-Authentication");
        let parts: Vec<&str> = client_auth.split(';').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "hound-client");
        let request_time: u64 = parts[1].parse().unwrap();

        // The signature is reproducible from the header material
        let expected =
            HoundifyService::sign("c2VjcmV0LWtleQ==", &user_id, request_id, request_time)
                .unwrap();
        assert_eq!(parts[2], expected);
    }

    #[tokio::test]
    async fn test_native_sample_rates_pass_through() {
        for rate in [8_000u32, 16_000] {
            let (service, _transport, encoder) = service(RESPONSE_BODY);
            let _ = service.recognize(&audio(rate), &options()).await.unwrap();
            assert_eq!(encoder.single_call().convert_rate, None);
        }
    }

    #[tokio::test]
    async fn test_other_sample_rates_are_resampled() {
        let (service, _transport, encoder) = service(RESPONSE_BODY);

        let _ = service.recognize(&audio(44_100), &options()).await.unwrap();

        let call = encoder.single_call();
        assert_eq!(call.codec, AudioCodec::Wav);
        assert_eq!(call.convert_rate, Some(16000));
    }

    #[tokio::test]
    async fn test_show_all_keeps_the_whole_document() {
        let (service, _transport, _encoder) = service(RESPONSE_BODY);
        let options = HoundifyOptions {
            show_all: true,
            ..options()
        };

        let result = service.recognize(&audio(16_000), &options).await.unwrap();

        let expected: serde_json::Value = serde_json::from_slice(RESPONSE_BODY).unwrap();
        assert_eq!(result, RecognitionResult::Document(expected));
    }

    #[tokio::test]
    async fn test_missing_disambiguation_is_unknown_value() {
        let (service, _transport, _encoder) = service(b"{\"Status\":\"NoResultsFound\"}");

        let result = service.recognize(&audio(16_000), &options()).await;

        assert!(matches!(result, Err(RecognitionError::UnknownValue)));
    }

    #[tokio::test]
    async fn test_missing_credentials_are_rejected_before_any_request() {
        let (service, transport, _encoder) = service(RESPONSE_BODY);

        let result = service
            .recognize(&audio(16_000), &HoundifyOptions::default())
            .await;

        assert!(matches!(result, Err(RecognitionError::InvalidOptions(_))));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_base64_client_key_is_rejected() {
        let (service, transport, _encoder) = service(RESPONSE_BODY);
        let options = HoundifyOptions {
            client_key: "not base64 at all!".to_string(),
            ..options()
        };

        let result = service.recognize(&audio(16_000), &options).await;

        assert!(matches!(result, Err(RecognitionError::InvalidOptions(_))));
        assert!(transport.requests().is_empty());
    }
}
