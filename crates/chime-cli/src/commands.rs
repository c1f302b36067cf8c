//! Subcommands and their translation into service requests.
//!
//! Every subcommand maps onto a [`ToolRequest`], so the CLI exercises the
//! same validation and admission path as any other caller.

use std::path::PathBuf;

use chime_core::{ToolRequest, operations};
use clap::Subcommand;
use serde_json::{Value, json};

use crate::error::CliError;

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play the sound for an alert kind (info, warning or error)
    Alert {
        /// Alert kind
        kind: String,
    },

    /// Play a named system sound
    Sound {
        /// Sound name, e.g. "Glass" (see `chime sounds`)
        name: String,
    },

    /// Speak text aloud
    Say {
        /// Text to speak
        text: String,
        /// Voice to speak with (see `chime voices`)
        #[arg(long)]
        voice: Option<String>,
    },

    /// Play an audio file
    Play {
        /// Absolute path to the audio file
        path: PathBuf,
    },

    /// List available system sounds
    Sounds,

    /// List available voices
    Voices,

    /// Invoke an operation directly and print the JSON result
    Call {
        /// Operation identifier, e.g. "play_audio"
        operation: String,
        /// Operation parameters as a JSON object
        params: Option<String>,
    },
}

impl Commands {
    /// Build the boundary request for this command.
    pub fn to_request(&self) -> Result<ToolRequest, CliError> {
        let request = match self {
            Self::Alert { kind } => ToolRequest::new(operations::PLAY_ALERT, json!({ "kind": kind })),
            Self::Sound { name } => ToolRequest::new(
                operations::PLAY_AUDIO,
                json!({ "type": "system", "name": name }),
            ),
            Self::Say { text, voice } => {
                let mut params = json!({ "type": "tts", "text": text });
                if let Some(voice) = voice {
                    params["voice"] = Value::from(voice.as_str());
                }
                ToolRequest::new(operations::PLAY_AUDIO, params)
            }
            Self::Play { path } => {
                let path = path
                    .to_str()
                    .ok_or_else(|| CliError::Arguments(format!("{} is not valid UTF-8", path.display())))?;
                ToolRequest::new(
                    operations::PLAY_AUDIO,
                    json!({ "type": "file", "path": path }),
                )
            }
            Self::Sounds => ToolRequest::new(operations::LIST_SOUNDS, Value::Null),
            Self::Voices => ToolRequest::new(operations::LIST_VOICES, Value::Null),
            Self::Call { operation, params } => {
                let params = match params {
                    Some(raw) => serde_json::from_str(raw)
                        .map_err(|e| CliError::Arguments(format!("params are not valid JSON: {e}")))?,
                    None => Value::Null,
                };
                ToolRequest::new(operation.as_str(), params)
            }
        };
        Ok(request)
    }

    /// Whether the result should be printed as raw JSON.
    pub const fn prints_json(&self) -> bool {
        matches!(self, Self::Call { .. })
    }
}
