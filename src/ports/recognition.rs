/// Recognition service port trait
///
/// Defines the interface for ASR (Automatic Speech Recognition) services.
/// Implementations: Google Speech API, Wit.ai, IBM Watson, OpenAI Whisper.
/// Each service carries its own strongly typed options struct; a recognition
/// call is a pure function of the audio and those options.
use crate::domain::{AudioData, RecognitionResult};
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for recognition services (ASR)
#[async_trait]
pub trait RecognitionServicePort: Send + Sync {
    /// Service-specific options (credentials, language tag, output flags)
    type Options: Send + Sync;

    /// Recognize speech in the audio buffer
    async fn recognize(
        &self,
        audio: &AudioData,
        options: &Self::Options,
    ) -> Result<RecognitionResult>;

    /// Get the service name
    fn service_name(&self) -> &str;

    /// Check if the service has everything it needs to issue requests
    fn is_configured(&self, options: &Self::Options) -> bool;
}
