//! Gemini text-to-speech engine implementation.
//!
//! This module provides a [`crate::SpeechEngine`] that calls the Gemini
//! `generateContent` endpoint with audio output enabled. The service answers
//! with headerless PCM, which [`crate::wav`] turns into a WAV file.
//!
//! # Configuration
//!
//! | Setting | Default | Environment |
//! |---|---|---|
//! | API key | none | `GEMINI_API_KEY`, then `API_KEY` |
//! | Model | `gemini-2.5-flash-preview-tts` | |
//! | Base URL | `https://generativelanguage.googleapis.com/v1beta` | |
//! | Timeout | 60 s | |
//!
//! # Output Format
//!
//! The model emits 16-bit signed little-endian PCM, mono, at 24 kHz. This is
//! the layout [`crate::wav::WavFormat::default`] describes.
//!
//! # Voices
//!
//! Voice ids are the prebuilt voice names listed in [`crate::voices::VOICES`].
//! Each voice speaks English, Urdu and Arabic depending on the input text.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use voice_studio_rs::SpeechEngine;
//! use voice_studio_rs::engines::gemini::{GeminiEngine, GeminiParams};
//!
//! let engine = GeminiEngine::new(GeminiParams::from_env())?;
//! let wav = engine.generate_wav("السلام علیکم", "Charon")?;
//! wav.write_to(Path::new("greeting.wav"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engine;
pub mod types;

pub use engine::{GeminiEngine, GeminiParams, GeminiParamsBuilder, DEFAULT_BASE_URL, DEFAULT_MODEL};
