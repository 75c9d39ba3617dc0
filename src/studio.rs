//! Request validation and the generate-then-encode flow.
//!
//! A [`Studio`] owns one speech engine and at most one generated result.
//! Each successful generation replaces the previous result, which is dropped
//! before the engine is called so two audio buffers are never held at once.
//!
//! "Voice cloning" is simulated: the uploaded sample is validated but never
//! sent anywhere, and the request is synthesized with
//! [`CLONE_STAND_IN_VOICE`] instead.

use crate::i18n::Language;
use crate::voices::{default_voice, VoiceOption, CLONE_STAND_IN_VOICE};
use crate::wav::{WavContainer, WavError};
use crate::{SpeechEngine, SpeechGenerationError};

/// Largest accepted voice sample (10 MiB).
pub const MAX_SAMPLE_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted for a voice sample upload.
pub const ALLOWED_SAMPLE_TYPES: [&str; 3] = ["audio/mpeg", "audio/wav", "audio/x-wav"];

/// Suggested filename when the generated audio is downloaded.
pub const DOWNLOAD_FILENAME: &str = "sarwar-voice-studio-output.wav";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("Unsupported voice sample type '{0}'")]
    InvalidFileType(String),
    #[error("Voice sample is {0} bytes, the limit is 10 MiB")]
    FileTooLarge(u64),
}

impl SampleError {
    pub fn localized_message(&self, language: Language) -> &'static str {
        let messages = language.messages();
        match self {
            SampleError::InvalidFileType(_) => messages.invalid_file_type,
            SampleError::FileTooLarge(_) => messages.file_too_large,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    #[error("No text to synthesize")]
    EmptyText,
    #[error("No voice sample uploaded for cloning")]
    MissingCloneSample,
    #[error("Consent to voice cloning was not given")]
    MissingConsent,
    #[error(transparent)]
    Speech(#[from] SpeechGenerationError),
    #[error(transparent)]
    Audio(#[from] WavError),
}

impl StudioError {
    /// Message for the end user in the given interface language.
    ///
    /// Validation failures map to a fixed sentence. Speech and encoding
    /// failures are prefixed with the "generation failed" text followed by
    /// the underlying error.
    pub fn localized_message(&self, language: Language) -> String {
        let messages = language.messages();
        match self {
            StudioError::EmptyText => messages.no_text.to_string(),
            StudioError::MissingCloneSample => messages.no_clone_file.to_string(),
            StudioError::MissingConsent => messages.consent_statement.to_string(),
            StudioError::Speech(_) | StudioError::Audio(_) => {
                format!("{} {}", messages.generation_failed, self)
            }
        }
    }
}

/// An uploaded voice sample that passed type and size checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSample {
    name: String,
    mime_type: String,
    size_bytes: u64,
}

impl VoiceSample {
    /// Validate an upload. The type is checked before the size.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
    ) -> Result<Self, SampleError> {
        let mime_type = mime_type.into();
        if !ALLOWED_SAMPLE_TYPES.contains(&mime_type.as_str()) {
            return Err(SampleError::InvalidFileType(mime_type));
        }
        if size_bytes > MAX_SAMPLE_BYTES {
            return Err(SampleError::FileTooLarge(size_bytes));
        }
        Ok(Self {
            name: name.into(),
            mime_type,
            size_bytes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMode {
    /// Synthesize with a prebuilt voice.
    TextToAudio { voice: VoiceOption },
    /// Synthesize "in the uploaded voice". Needs a sample and explicit consent.
    VoiceCloning {
        sample: Option<VoiceSample>,
        consent: bool,
    },
}

impl Default for GenerationMode {
    fn default() -> Self {
        GenerationMode::TextToAudio {
            voice: default_voice(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub text: String,
    pub mode: GenerationMode,
}

impl GenerationRequest {
    pub fn text_to_audio(text: impl Into<String>, voice: VoiceOption) -> Self {
        Self {
            text: text.into(),
            mode: GenerationMode::TextToAudio { voice },
        }
    }

    pub fn voice_cloning(
        text: impl Into<String>,
        sample: Option<VoiceSample>,
        consent: bool,
    ) -> Self {
        Self {
            text: text.into(),
            mode: GenerationMode::VoiceCloning { sample, consent },
        }
    }

    /// Check the request: text first, then the sample, then consent.
    pub fn validate(&self) -> Result<(), StudioError> {
        if self.text.trim().is_empty() {
            return Err(StudioError::EmptyText);
        }
        if let GenerationMode::VoiceCloning { sample, consent } = &self.mode {
            if sample.is_none() {
                return Err(StudioError::MissingCloneSample);
            }
            if !consent {
                return Err(StudioError::MissingConsent);
            }
        }
        Ok(())
    }

    /// Voice identifier that will be sent to the engine.
    pub fn voice_id(&self) -> &'static str {
        match &self.mode {
            GenerationMode::TextToAudio { voice } => voice.id,
            GenerationMode::VoiceCloning { .. } => CLONE_STAND_IN_VOICE,
        }
    }
}

/// A finished generation, ready for playback or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAudio {
    pub wav: WavContainer,
    /// The voice actually used, which differs from the request in cloning mode.
    pub voice_id: &'static str,
}

impl GeneratedAudio {
    pub fn filename(&self) -> &'static str {
        DOWNLOAD_FILENAME
    }

    pub fn media_type(&self) -> &'static str {
        self.wav.media_type()
    }
}

pub struct Studio<E> {
    engine: E,
    current: Option<GeneratedAudio>,
}

impl<E: SpeechEngine> Studio<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            current: None,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Validate the request, synthesize it and keep the result as current.
    ///
    /// A request that fails validation leaves the current result untouched.
    /// Once validation passes the previous result is released; if the engine
    /// or encoder then fails, no result is held.
    pub fn generate(
        &mut self,
        request: &GenerationRequest,
    ) -> Result<&GeneratedAudio, StudioError> {
        request.validate()?;

        if let Some(previous) = self.current.take() {
            log::debug!("Releasing previous audio ({} bytes)", previous.wav.len());
        }

        let voice_id = request.voice_id();
        log::info!(
            "Generating speech for {} characters with voice '{}'",
            request.text.chars().count(),
            voice_id
        );

        let wav = match self.engine.generate_wav(&request.text, voice_id) {
            Ok(wav) => wav,
            Err(e) => {
                log::error!("Error generating speech: {e}");
                return Err(e);
            }
        };

        log::info!(
            "Generated {:.2}s of audio ({} bytes)",
            wav.duration_secs(),
            wav.len()
        );
        Ok(&*self.current.insert(GeneratedAudio { wav, voice_id }))
    }

    /// The most recent successful result, if any.
    pub fn current(&self) -> Option<&GeneratedAudio> {
        self.current.as_ref()
    }

    /// Release the current result.
    pub fn clear(&mut self) -> Option<GeneratedAudio> {
        self.current.take()
    }
}
