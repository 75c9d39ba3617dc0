//! # voice-studio-rs
//!
//! A Rust library that turns text into playable WAV audio using a remote
//! text-to-speech API.
//!
//! ## Features
//!
//! - **PCM to WAV**: Wrap base64 raw PCM from a speech API in a valid RIFF/WAVE container
//! - **Pluggable engines**: Any speech backend implementing [`SpeechEngine`]
//! - **Gemini TTS**: Built-in HTTP engine behind the `gemini` feature
//! - **Multilingual**: English, Urdu and Arabic messages, with right-to-left detection
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! voice-studio-rs = { version = "2026.10", features = ["gemini"] }
//! ```
//!
//! ```ignore
//! use std::path::Path;
//! use voice_studio_rs::engines::gemini::{GeminiEngine, GeminiParams};
//! use voice_studio_rs::studio::{GenerationRequest, Studio};
//! use voice_studio_rs::voices::default_voice;
//!
//! let engine = GeminiEngine::new(GeminiParams::from_env())?;
//! let mut studio = Studio::new(engine);
//!
//! let request = GenerationRequest::text_to_audio("Hello, world!", default_voice());
//! let audio = studio.generate(&request)?;
//! audio.wav.write_to(Path::new(audio.filename()))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Without any engine, the encoder alone is available:
//!
//! ```rust
//! let wav = voice_studio_rs::encode_pcm_to_wav("AQIDBA==")?;
//! assert_eq!(wav.len(), 48);
//! assert_eq!(wav.media_type(), "audio/wav");
//! # Ok::<(), voice_studio_rs::WavError>(())
//! ```

pub mod engines;
pub mod i18n;
pub mod studio;
pub mod voices;
pub mod wav;

pub use studio::StudioError;
pub use wav::{encode_pcm_to_wav, WavContainer, WavError, WavFormat};

/// Failure of the upstream speech-generation service.
///
/// When this occurs no audio payload exists, so the encoder is never invoked.
#[derive(thiserror::Error, Debug)]
pub enum SpeechGenerationError {
    #[error("Speech API key is not configured.")]
    MissingApiKey,
    #[error("Failed to communicate with the speech service: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Speech service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("No audio data received from the API.")]
    NoAudioData,
    #[error("Invalid response from the speech service: {0}")]
    InvalidResponse(String),
}

/// Common interface for remote text-to-speech backends.
///
/// An engine takes text plus a prebuilt voice identifier and returns raw PCM
/// (24 kHz, mono, 16-bit little-endian) encoded as standard base64. Engines
/// are passed to [`studio::Studio`] explicitly rather than looked up globally.
pub trait SpeechEngine {
    /// Generate speech and return the base64 PCM payload.
    fn generate_speech(&self, text: &str, voice_id: &str) -> Result<String, SpeechGenerationError>;

    /// Generate speech and wrap it in a WAV container.
    ///
    /// Default implementation calls `generate_speech()` then [`encode_pcm_to_wav`].
    fn generate_wav(&self, text: &str, voice_id: &str) -> Result<WavContainer, StudioError> {
        let pcm = self.generate_speech(text, voice_id)?;
        Ok(encode_pcm_to_wav(&pcm)?)
    }
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for &E {
    fn generate_speech(
        &self,
        text: &str,
        voice_id: &str,
    ) -> Result<String, SpeechGenerationError> {
        (**self).generate_speech(text, voice_id)
    }

    fn generate_wav(&self, text: &str, voice_id: &str) -> Result<WavContainer, StudioError> {
        (**self).generate_wav(text, voice_id)
    }
}
