/// HTTP transport port trait
///
/// Service adapters build a [`ServiceRequest`] deterministically and hand it
/// to the transport, which performs the one blocking step of a recognition
/// call: submit the request and read the full response body. Status handling
/// stays with the adapters, which know each vendor's error conventions.
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// HTTP method for a service request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Request payload: raw encoded audio, or multipart form fields
#[derive(Debug, Clone)]
pub enum RequestBody {
    Raw(Vec<u8>),
    Multipart(Vec<MultipartPart>),
}

/// One field of a multipart form body
#[derive(Debug, Clone)]
pub struct MultipartPart {
    pub name: String,
    pub value: PartValue,
}

/// Value of a multipart field
#[derive(Debug, Clone)]
pub enum PartValue {
    Text(String),
    File {
        data: Vec<u8>,
        filename: String,
        content_type: String,
    },
}

/// A fully constructed, service-specific request
#[derive(Debug, Clone)]
pub struct ServiceRequest {
    pub method: HttpMethod,
    /// Full URL including query parameters in their fixed order
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

/// Response returned by the transport, success or not
#[derive(Debug, Clone)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Response body as text, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Port trait for executing service requests
#[async_trait]
pub trait HttpTransportPort: Send + Sync {
    /// Submit the request and read the full response body
    async fn execute(&self, request: ServiceRequest) -> Result<ServiceResponse>;
}
