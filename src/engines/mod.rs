//! Speech generation engines.
//!
//! This module contains implementations of [`crate::SpeechEngine`] backed by
//! remote text-to-speech services.
//!
//! # Available Engines
//!
//! Enable engines via Cargo features:
//! - `gemini` - Google Gemini TTS over HTTPS (API key required)

#[cfg(feature = "gemini")]
pub mod gemini;
