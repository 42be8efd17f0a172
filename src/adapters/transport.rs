//! Reqwest-backed HTTP transport
//!
//! Executes the service requests built by the adapters. Raw bodies are sent
//! as-is; multipart bodies are assembled with reqwest's multipart support.

use crate::error::Result;
use crate::ports::http::{
    HttpMethod, HttpTransportPort, PartValue, RequestBody, ServiceRequest, ServiceResponse,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// Transport implementation over a shared reqwest client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with no client-level timeout; per-request timeouts
    /// come from the `ServiceRequest` itself.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransportPort for ReqwestTransport {
    async fn execute(&self, request: ServiceRequest) -> Result<ServiceResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match request.body {
            RequestBody::Raw(bytes) => {
                log::debug!("sending {} byte payload to {}", bytes.len(), request.url);
                builder.body(bytes)
            }
            RequestBody::Multipart(parts) => {
                let mut form = Form::new();
                for part in parts {
                    form = match part.value {
                        PartValue::Text(text) => form.text(part.name, text),
                        PartValue::File {
                            data,
                            filename,
                            content_type,
                        } => form.part(
                            part.name,
                            Part::bytes(data)
                                .file_name(filename)
                                .mime_str(&content_type)?,
                        ),
                    };
                }
                log::debug!("sending multipart payload to {}", request.url);
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        log::debug!("received {} with {} byte body", status, body.len());

        Ok(ServiceResponse { status, body })
    }
}
