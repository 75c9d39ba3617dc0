//! User-facing strings for the three supported interface languages.

use serde::{Deserialize, Serialize};

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ur,
    Ar,
}

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Ur, Language::Ar];

    /// BCP 47 code (`"en"`, `"ur"`, `"ar"`).
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ur => "ur",
            Language::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    pub fn direction(self) -> Direction {
        match self {
            Language::En => Direction::Ltr,
            Language::Ur | Language::Ar => Direction::Rtl,
        }
    }

    pub fn app_title(self) -> &'static str {
        match self {
            Language::En => "Sarwar Voice Studio",
            Language::Ur => "سرور وائس اسٹوڈیو",
            Language::Ar => "استوديو صوت سروار",
        }
    }

    pub fn messages(self) -> &'static Messages {
        Messages::for_language(self)
    }
}

/// Error and status messages shown to the end user.
#[derive(Debug)]
pub struct Messages {
    pub no_text: &'static str,
    pub no_clone_file: &'static str,
    /// Statement the user must confirm before a cloning request is accepted.
    pub consent_statement: &'static str,
    /// Prefix placed before the underlying error text.
    pub generation_failed: &'static str,
    pub invalid_file_type: &'static str,
    pub file_too_large: &'static str,
    pub male: &'static str,
    pub female: &'static str,
}

static EN: Messages = Messages {
    no_text: "Please enter some text to generate audio.",
    no_clone_file: "Please upload a voice sample for cloning.",
    consent_statement: "I confirm this is my own voice and I consent to its cloning.",
    generation_failed: "Failed to generate audio:",
    invalid_file_type: "Invalid file type. Please upload MP3 or WAV.",
    file_too_large: "File is too large. Max size is 10MB.",
    male: "Male",
    female: "Female",
};

static UR: Messages = Messages {
    no_text: "براہ کرم آڈیو بنانے کے لیے کچھ متن درج کریں۔",
    no_clone_file: "براہ کرم کلوننگ کے لیے صوتی نمونہ اپ لوڈ کریں۔",
    consent_statement: "میں تصدیق کرتا/کرتی ہوں کہ یہ میری اپنی آواز ہے اور میں اسے کلون کرنے کی اجازت دیتا/دیتی ہوں۔",
    generation_failed: "آڈیو بنانے میں ناکام:",
    invalid_file_type: "غلط فائل کی قسم۔ براہ کرم MP3 یا WAV اپ لوڈ کریں۔",
    file_too_large: "فائل بہت بڑی ہے۔ زیادہ سے زیادہ سائز 10MB ہے۔",
    male: "مرد",
    female: "عورت",
};

static AR: Messages = Messages {
    no_text: "الرجاء إدخال بعض النصوص لإنشاء الصوت.",
    no_clone_file: "يرجى تحميل عينة صوتية للاستنساخ.",
    consent_statement: "أؤكد أن هذا هو صوتي وأوافق على استنساخه.",
    generation_failed: "فشل في إنشاء الصوت:",
    invalid_file_type: "نوع الملف غير صالح. يرجى تحميل MP3 أو WAV.",
    file_too_large: "حجم الملف كبير جدًا. الحجم الأقصى هو 10 ميجابايت.",
    male: "ذكر",
    female: "أنثى",
};

impl Messages {
    pub fn for_language(language: Language) -> &'static Messages {
        match language {
            Language::En => &EN,
            Language::Ur => &UR,
            Language::Ar => &AR,
        }
    }
}
