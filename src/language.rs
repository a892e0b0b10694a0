//! Target-language detection and speech locale selection.
//!
//! The recognizer and synthesizer need a locale. Vocabulary items carry no
//! language tag, so it is sniffed from the script of the target word.

use serde::{Deserialize, Serialize};

/// Languages the speaking exercise supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    Russian,
    English,
}

impl Language {
    /// Locale passed to the speech-synthesis collaborator.
    pub fn tts_locale(self) -> &'static str {
        match self {
            Self::Arabic => "ar-SA",
            Self::Russian => "ru-RU",
            Self::English => "en-US",
        }
    }

    /// Locale passed to the speech-recognition collaborator.
    pub fn stt_locale(self) -> &'static str {
        // Same as synthesis for every supported language today.
        self.tts_locale()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Arabic => "Arabic",
            Self::Russian => "Russian",
            Self::English => "English",
        }
    }
}

/// Guess the language of `text` from its script.
///
/// Any Arabic-block character wins, then any Russian Cyrillic letter;
/// everything else is English.
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(is_arabic) {
        Language::Arabic
    } else if text.chars().any(is_russian) {
        Language::Russian
    } else {
        Language::English
    }
}

fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

fn is_russian(c: char) -> bool {
    matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

/// A synthesis voice as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag, e.g. `en-US`.
    pub lang: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Pick the voice to speak `locale` with.
///
/// Preference order: exact tag match, same primary language subtag, the
/// platform default voice, the first voice. `None` only if `voices` is empty.
pub fn pick_best_voice<'a>(voices: &'a [Voice], locale: &str) -> Option<&'a Voice> {
    if let Some(exact) = voices.iter().find(|v| v.lang == locale) {
        return Some(exact);
    }

    let prefix = locale.split('-').next().unwrap_or(locale);
    if let Some(same_prefix) = voices.iter().find(|v| v.lang.starts_with(prefix)) {
        return Some(same_prefix);
    }

    voices.iter().find(|v| v.is_default).or_else(|| voices.first())
}
