/// Port trait definitions (interfaces)
///
/// These traits define the contracts for adapters to implement.
/// Following the ports-and-adapters (hexagonal) architecture pattern.
pub mod encoder;
pub mod http;
pub mod recognition;

#[cfg(test)]
pub mod mocks;

pub use encoder::{AudioCodec, AudioEncoderPort};
pub use http::{
    HttpMethod, HttpTransportPort, MultipartPart, PartValue, RequestBody, ServiceRequest,
    ServiceResponse,
};
pub use recognition::RecognitionServicePort;
