/// Domain models shared across service adapters
pub mod models;

pub use models::{
    Alternative, AudioData, OutputMode, RecognitionResult, RecognizerConfig,
};
