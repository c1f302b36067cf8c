//! Playback request types.
//!
//! A [`PlaybackSpec`] is the validated form of a caller's request. Its
//! variants are `#[non_exhaustive]`, so other crates can inspect them but
//! only obtain one through [`crate::validation`]; holding one means the
//! whitelists and limits have already been applied.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// System sounds that may be played by name (case-sensitive).
pub const SYSTEM_SOUNDS: [&str; 14] = [
    "Basso",
    "Blow",
    "Bottle",
    "Frog",
    "Funk",
    "Glass",
    "Hero",
    "Morse",
    "Ping",
    "Pop",
    "Purr",
    "Sosumi",
    "Submarine",
    "Tink",
];

/// Speech voices accepted by the `tts` request type.
///
/// Anything outside this list is dropped in favour of the host's default voice.
pub const VOICES: [&str; 10] = [
    "Alex", "Daniel", "Fred", "Karen", "Moira", "Rishi", "Samantha", "Tessa", "Veena", "Victoria",
];

/// Maximum speech text length, in Unicode scalar values.
pub const MAX_SPEECH_CHARS: usize = 1000;

/// Admission-control partition key.
///
/// Simple alerts are admitted per alert kind; advanced requests per request
/// type. At most one request per category is in flight at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Info,
    Warning,
    Error,
    System,
    Tts,
    File,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::System => "system",
            Self::Tts => "tts",
            Self::File => "file",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of simple alert, each mapped to a fixed system sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Warning,
    Error,
}

impl AlertKind {
    /// Parse an alert kind from its wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// The system sound played for this alert.
    #[must_use]
    pub const fn sound_name(self) -> &'static str {
        match self {
            Self::Info => "Glass",
            Self::Warning => "Ping",
            Self::Error => "Basso",
        }
    }

    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Info => Category::Info,
            Self::Warning => Category::Warning,
            Self::Error => Category::Error,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.category().fmt(f)
    }
}

/// A validated playback request.
///
/// Outside this crate a spec can only come from validation:
///
/// ```
/// use chime_core::validation::validate_playback;
/// use chime_core::PlaybackSpec;
/// use serde_json::json;
///
/// let spec = validate_playback(&json!({"type": "system", "name": "Glass"})).unwrap();
/// assert!(matches!(spec, PlaybackSpec::System { ref sound_name, .. } if sound_name == "Glass"));
/// ```
///
/// Building a variant directly does not compile:
///
/// ```compile_fail
/// use chime_core::PlaybackSpec;
///
/// let spec = PlaybackSpec::System {
///     sound_name: "../../../../tmp/evil".to_string(),
/// };
/// ```
///
/// ```compile_fail
/// use chime_core::PlaybackSpec;
///
/// let spec = PlaybackSpec::File {
///     path: "relative.wav".into(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSpec {
    /// A named system sound from [`SYSTEM_SOUNDS`].
    #[non_exhaustive]
    System { sound_name: String },
    /// Synthesized speech, optionally with a whitelisted voice.
    #[non_exhaustive]
    Speech { text: String, voice: Option<String> },
    /// An audio file at an absolute path.
    #[non_exhaustive]
    File { path: PathBuf },
}

impl PlaybackSpec {
    pub(crate) fn system(sound_name: impl Into<String>) -> Self {
        Self::System {
            sound_name: sound_name.into(),
        }
    }

    pub(crate) fn speech(text: impl Into<String>, voice: Option<String>) -> Self {
        Self::Speech {
            text: text.into(),
            voice,
        }
    }

    pub(crate) fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Admission category for advanced requests.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::System { .. } => Category::System,
            Self::Speech { .. } => Category::Tts,
            Self::File { .. } => Category::File,
        }
    }

    /// The file path, for file requests.
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::File { path } => Some(path),
            Self::System { .. } | Self::Speech { .. } => None,
        }
    }

    /// Human-readable summary of what was played, used in success results.
    pub fn describe(&self) -> String {
        match self {
            Self::System { sound_name } => format!("Played system sound '{sound_name}'"),
            Self::Speech { text, voice } => {
                let chars = text.chars().count();
                let noun = if chars == 1 { "character" } else { "characters" };
                match voice {
                    Some(v) => format!("Spoke {chars} {noun} with voice '{v}'"),
                    None => format!("Spoke {chars} {noun}"),
                }
            }
            Self::File { path } => format!("Played {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_contains_fourteen_unique_sounds() {
        let mut sorted = SYSTEM_SOUNDS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 14);
    }

    #[test]
    fn alert_sounds_are_whitelisted() {
        for kind in [AlertKind::Info, AlertKind::Warning, AlertKind::Error] {
            assert!(SYSTEM_SOUNDS.contains(&kind.sound_name()));
        }
    }

    #[test]
    fn alert_categories_are_distinct_from_request_types() {
        assert_eq!(AlertKind::Error.category(), Category::Error);
        assert_ne!(AlertKind::Error.category(), Category::System);
        assert_eq!(AlertKind::parse("warning"), Some(AlertKind::Warning));
        assert_eq!(AlertKind::parse("Warning"), None);
    }

    #[test]
    fn spec_category_follows_variant() {
        assert_eq!(PlaybackSpec::system("Glass").category(), Category::System);
        assert_eq!(PlaybackSpec::speech("hi", None).category(), Category::Tts);
        assert_eq!(PlaybackSpec::file("/a.wav").category(), Category::File);
    }

    #[test]
    fn describe_counts_code_points() {
        let spec = PlaybackSpec::speech("héllo", Some("Alex".to_string()));
        assert_eq!(spec.describe(), "Spoke 5 characters with voice 'Alex'");
    }

    #[test]
    fn describe_uses_singular_for_one_character() {
        assert_eq!(PlaybackSpec::speech("é", None).describe(), "Spoke 1 character");
        assert_eq!(
            PlaybackSpec::speech("a", Some("Tessa".to_string())).describe(),
            "Spoke 1 character with voice 'Tessa'"
        );
        assert_eq!(PlaybackSpec::speech("ab", None).describe(), "Spoke 2 characters");
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Tts).unwrap();
        assert_eq!(json, "\"tts\"");
    }
}
