//! Host platform conventions for producing audio.
//!
//! Which executables play sounds and speak text, and where system sounds
//! live, are fixed by the host OS. [`HostAudio`] captures those conventions
//! and turns a validated [`PlaybackSpec`] into a concrete process invocation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::playback::PlaybackSpec;
use crate::ports::ProcessInvocation;

/// Executables and sound-file layout used to realise playback requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAudio {
    /// Program that plays an audio file given its path.
    pub player: PathBuf,
    /// Program that speaks text, accepting `-v <voice>`.
    pub speech: PathBuf,
    /// Directory holding the named system sounds.
    pub sound_dir: PathBuf,
    /// File extension of system sound files (without the dot).
    pub sound_extension: String,
}

impl HostAudio {
    /// macOS conventions: `afplay`, `say`, and `/System/Library/Sounds/*.aiff`.
    #[must_use]
    pub fn macos() -> Self {
        Self {
            player: PathBuf::from("afplay"),
            speech: PathBuf::from("say"),
            sound_dir: PathBuf::from("/System/Library/Sounds"),
            sound_extension: "aiff".to_string(),
        }
    }

    /// Full path of a named system sound.
    pub fn system_sound_path(&self, sound_name: &str) -> PathBuf {
        self.sound_dir
            .join(format!("{sound_name}.{}", self.sound_extension))
    }

    /// Build the process invocation for a validated request.
    ///
    /// Arguments are always discrete; speech text follows `--` so it can
    /// never be read as an option.
    pub fn invocation_for(&self, spec: &PlaybackSpec) -> ProcessInvocation {
        match spec {
            PlaybackSpec::System { sound_name } => ProcessInvocation::new(&self.player)
                .arg(self.system_sound_path(sound_name).into_os_string()),
            PlaybackSpec::Speech { text, voice } => {
                let mut invocation = ProcessInvocation::new(&self.speech);
                if let Some(voice) = voice {
                    invocation = invocation.arg("-v").arg(voice);
                }
                invocation.arg("--").arg(text)
            }
            PlaybackSpec::File { path } => {
                ProcessInvocation::new(&self.player).arg(path.as_os_str())
            }
        }
    }
}

impl Default for HostAudio {
    fn default() -> Self {
        Self::macos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn system_sound_resolves_under_sound_dir() {
        let host = HostAudio::macos();
        let inv = host.invocation_for(&PlaybackSpec::system("Glass"));
        assert_eq!(inv.program, PathBuf::from("afplay"));
        assert_eq!(
            inv.args,
            vec![OsString::from("/System/Library/Sounds/Glass.aiff")]
        );
    }

    #[test]
    fn speech_passes_text_as_single_argument() {
        let host = HostAudio::macos();
        let text = "hello; rm -rf / && echo $HOME";
        let inv = host.invocation_for(&PlaybackSpec::speech(text, Some("Alex".into())));
        assert_eq!(inv.program, PathBuf::from("say"));
        assert_eq!(
            inv.args,
            vec![
                OsString::from("-v"),
                OsString::from("Alex"),
                OsString::from("--"),
                OsString::from(text),
            ]
        );
    }

    #[test]
    fn speech_without_voice_omits_flag() {
        let inv = HostAudio::macos().invocation_for(&PlaybackSpec::speech("-o out", None));
        assert_eq!(inv.args, vec![OsString::from("--"), OsString::from("-o out")]);
    }

    #[test]
    fn file_is_played_by_player() {
        let inv = HostAudio::macos().invocation_for(&PlaybackSpec::file("/tmp/a b.wav"));
        assert_eq!(inv.args, vec![OsString::from("/tmp/a b.wav")]);
    }
}
