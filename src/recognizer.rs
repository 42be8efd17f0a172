//! Recognizer facade
//!
//! Bundles the tunable configuration with the shared transport and encoder,
//! and exposes one recognition method per supported service. Every method is
//! a pure function of the audio and its options; the recognizer itself holds
//! no per-call state, so concurrent calls from independent tasks are safe.

use crate::adapters::encoder::PcmEncoder;
use crate::adapters::services::{
    BingOptions, BingService, GoogleOptions, GoogleService, HoundifyOptions, HoundifyService,
    IbmOptions, IbmService, WhisperApiOptions, WhisperApiService, WitOptions, WitService,
};
use crate::adapters::transport::ReqwestTransport;
use crate::domain::{AudioData, RecognitionResult, RecognizerConfig};
use crate::error::Result;
use crate::ports::encoder::AudioEncoderPort;
use crate::ports::http::HttpTransportPort;
use crate::ports::recognition::RecognitionServicePort;
use std::sync::Arc;

/// Entry point for dispatching audio to recognition services
pub struct Recognizer {
    config: RecognizerConfig,
    transport: Arc<dyn HttpTransportPort>,
    encoder: Arc<dyn AudioEncoderPort>,
}

impl Recognizer {
    /// Recognizer with default configuration, a reqwest transport, and the
    /// built-in PCM encoder
    pub fn new() -> Self {
        Self::with_ports(
            RecognizerConfig::default(),
            Arc::new(ReqwestTransport::new()),
            Arc::new(PcmEncoder::new()),
        )
    }

    /// Recognizer with custom configuration and default ports
    pub fn with_config(config: RecognizerConfig) -> Self {
        Self::with_ports(
            config,
            Arc::new(ReqwestTransport::new()),
            Arc::new(PcmEncoder::new()),
        )
    }

    /// Recognizer with explicit port implementations
    pub fn with_ports(
        config: RecognizerConfig,
        transport: Arc<dyn HttpTransportPort>,
        encoder: Arc<dyn AudioEncoderPort>,
    ) -> Self {
        Self {
            config,
            transport,
            encoder,
        }
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Mutable access for explicit tuning; recognition calls never touch it
    pub fn config_mut(&mut self) -> &mut RecognizerConfig {
        &mut self.config
    }

    /// Recognize speech using the Google Speech API
    pub async fn recognize_google(
        &self,
        audio: &AudioData,
        options: &GoogleOptions,
    ) -> Result<RecognitionResult> {
        GoogleService::new(
            self.transport.clone(),
            self.encoder.clone(),
            self.config.operation_timeout,
        )
        .recognize(audio, options)
        .await
    }

    /// Recognize speech using Wit.ai
    pub async fn recognize_wit(
        &self,
        audio: &AudioData,
        options: &WitOptions,
    ) -> Result<RecognitionResult> {
        WitService::new(
            self.transport.clone(),
            self.encoder.clone(),
            self.config.operation_timeout,
        )
        .recognize(audio, options)
        .await
    }

    /// Recognize speech using IBM Watson Speech to Text
    pub async fn recognize_ibm(
        &self,
        audio: &AudioData,
        options: &IbmOptions,
    ) -> Result<RecognitionResult> {
        IbmService::new(
            self.transport.clone(),
            self.encoder.clone(),
            self.config.operation_timeout,
        )
        .recognize(audio, options)
        .await
    }

    /// Recognize speech using Microsoft Bing Voice Recognition
    pub async fn recognize_bing(
        &self,
        audio: &AudioData,
        options: &BingOptions,
    ) -> Result<RecognitionResult> {
        BingService::new(
            self.transport.clone(),
            self.encoder.clone(),
            self.config.operation_timeout,
        )
        .recognize(audio, options)
        .await
    }

    /// Recognize speech using Houndify
    pub async fn recognize_houndify(
        &self,
        audio: &AudioData,
        options: &HoundifyOptions,
    ) -> Result<RecognitionResult> {
        HoundifyService::new(
            self.transport.clone(),
            self.encoder.clone(),
            self.config.operation_timeout,
        )
        .recognize(audio, options)
        .await
    }

    /// Recognize speech using the OpenAI Whisper API
    pub async fn recognize_whisper_api(
        &self,
        audio: &AudioData,
        options: &WhisperApiOptions,
    ) -> Result<RecognitionResult> {
        WhisperApiService::new(
            self.transport.clone(),
            self.encoder.clone(),
            self.config.operation_timeout,
        )
        .recognize(audio, options)
        .await
    }
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::new()
    }
}
