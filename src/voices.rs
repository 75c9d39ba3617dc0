//! Prebuilt voice catalogue.
//!
//! The speech API exposes named prebuilt voices. Each of them speaks English,
//! Urdu and Arabic depending on the input text, so the catalogue is not
//! split by language.

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// A selectable prebuilt voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoiceOption {
    /// Identifier sent to the speech API.
    pub id: &'static str,
    pub name: &'static str,
    pub gender: Gender,
}

impl VoiceOption {
    /// Display label such as `"Kore (Male)"`, with the gender word localized.
    pub fn label(&self, language: Language) -> String {
        let messages = language.messages();
        let gender = match self.gender {
            Gender::Male => messages.male,
            Gender::Female => messages.female,
        };
        format!("{} ({})", self.name, gender)
    }
}

pub const VOICES: [VoiceOption; 5] = [
    VoiceOption {
        id: "Kore",
        name: "Kore",
        gender: Gender::Male,
    },
    VoiceOption {
        id: "Puck",
        name: "Puck",
        gender: Gender::Male,
    },
    VoiceOption {
        id: "Fenrir",
        name: "Fenrir",
        gender: Gender::Male,
    },
    VoiceOption {
        id: "Charon",
        name: "Charon",
        gender: Gender::Female,
    },
    VoiceOption {
        id: "Zephyr",
        name: "Zephyr",
        gender: Gender::Female,
    },
];

/// Voice used for every cloning request in place of the uploaded sample.
pub const CLONE_STAND_IN_VOICE: &str = "Zephyr";

/// The voice selected before the user picks one (Kore).
pub fn default_voice() -> VoiceOption {
    VOICES[0]
}

pub fn find_voice(id: &str) -> Option<VoiceOption> {
    VOICES.iter().copied().find(|voice| voice.id == id)
}

/// List all voice ids in sorted order.
pub fn list_voices() -> Vec<&'static str> {
    let mut ids: Vec<&str> = VOICES.iter().map(|voice| voice.id).collect();
    ids.sort_unstable();
    ids
}
