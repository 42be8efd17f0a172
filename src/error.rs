/// Error types for the recognition client
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use thiserror::Error;

/// Main error type for recognition operations
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The service answered, but no usable transcript was found in the response.
    #[error("recognition produced no usable transcript")]
    UnknownValue,

    /// The service rejected the request or reported a failure status.
    #[error("recognition request failed: {0}")]
    Request(String),

    /// Network-level failure, including per-call timeouts.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be parsed into the expected wire format.
    #[error("malformed service response: {0}")]
    MalformedResponse(String),

    /// Conflicting or incomplete options were supplied for a recognition call.
    #[error("invalid recognition options: {0}")]
    InvalidOptions(String),

    /// Re-encoding the audio payload failed.
    #[error("audio encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RecognitionError>;
