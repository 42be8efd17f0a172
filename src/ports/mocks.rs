//! Mock implementations for testing

use crate::domain::AudioData;
use crate::error::{RecognitionError, Result};
use crate::ports::encoder::{AudioCodec, AudioEncoderPort};
use crate::ports::http::{HttpTransportPort, ServiceRequest, ServiceResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock transport that records requests and replays canned responses
#[derive(Clone, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<ServiceRequest>>>,
    queued: Arc<Mutex<VecDeque<ServiceResponse>>>,
    default_response: Arc<Mutex<Option<ServiceResponse>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport that answers every request with a 200 and the given body
    pub fn with_response(body: &[u8]) -> Self {
        let transport = Self::new();
        transport.set_default_response(200, body);
        transport
    }

    pub fn set_default_response(&self, status: u16, body: &[u8]) {
        *self.default_response.lock().unwrap() = Some(ServiceResponse {
            status,
            body: body.to_vec(),
        });
    }

    /// Queue a one-shot response, consumed before the default one
    pub fn queue_response(&self, status: u16, body: &[u8]) {
        self.queued.lock().unwrap().push_back(ServiceResponse {
            status,
            body: body.to_vec(),
        });
    }

    /// Every request executed so far, in order
    pub fn requests(&self) -> Vec<ServiceRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request executed so far; panics if there was not exactly one
    pub fn single_request(&self) -> ServiceRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl HttpTransportPort for MockTransport {
    async fn execute(&self, request: ServiceRequest) -> Result<ServiceResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(response) = self.queued.lock().unwrap().pop_front() {
            return Ok(response);
        }
        self.default_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| RecognitionError::Request("no canned response queued".to_string()))
    }
}

/// One recorded call to the mock encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCall {
    pub codec: AudioCodec,
    pub convert_rate: Option<u32>,
    pub convert_width: Option<u16>,
}

/// Mock encoder that records conversion parameters and returns fixed bytes
#[derive(Clone)]
pub struct MockEncoder {
    calls: Arc<Mutex<Vec<EncodeCall>>>,
    payload: Vec<u8>,
}

impl MockEncoder {
    pub fn new(payload: &[u8]) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            payload: payload.to_vec(),
        }
    }

    pub fn calls(&self) -> Vec<EncodeCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The single encode call recorded so far; panics if there was not exactly one
    pub fn single_call(&self) -> EncodeCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one encode call");
        calls.into_iter().next().unwrap()
    }
}

impl AudioEncoderPort for MockEncoder {
    fn encode(
        &self,
        _audio: &AudioData,
        codec: AudioCodec,
        convert_rate: Option<u32>,
        convert_width: Option<u16>,
    ) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(EncodeCall {
            codec,
            convert_rate,
            convert_width,
        });
        Ok(self.payload.clone())
    }
}
