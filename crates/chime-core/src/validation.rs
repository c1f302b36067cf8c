//! Request validation.
//!
//! Turns an untyped parameter bag into a [`PlaybackSpec`] or an
//! [`AlertKind`], applying the sound and voice whitelists and the speech
//! length limit. Nothing here touches the filesystem: a file request only
//! has its path checked syntactically, existence is the stat cache's job.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{AlertKind, MAX_SPEECH_CHARS, PlaybackSpec, SYSTEM_SOUNDS, VOICES};
use crate::ports::PlaybackError;

/// Validate an advanced playback request (`type` = `system` | `tts` | `file`).
///
/// An unknown `voice` on a `tts` request is dropped with a warning rather
/// than rejected, so the host's default voice is used.
///
/// # Examples
///
/// ```rust
/// use chime_core::validation::validate_playback;
/// use serde_json::json;
///
/// let spec = validate_playback(&json!({"type": "system", "name": "Glass"})).unwrap();
/// assert_eq!(spec.describe(), "Played system sound 'Glass'");
///
/// assert!(validate_playback(&json!({"type": "system", "name": "glass"})).is_err());
/// ```
pub fn validate_playback(params: &Value) -> Result<PlaybackSpec, PlaybackError> {
    let params = as_object(params)?;

    match optional_str(params, "type")? {
        Some("system") => validate_system(params),
        Some("tts") => validate_speech(params),
        Some("file") => validate_file(params),
        Some(other) => Err(PlaybackError::validation(format!(
            "unknown type '{other}' (expected system, tts or file)"
        ))),
        None => Err(PlaybackError::validation(
            "missing 'type' (expected system, tts or file)",
        )),
    }
}

/// Validate a simple alert request (`kind` = `info` | `warning` | `error`).
pub fn validate_alert(params: &Value) -> Result<AlertKind, PlaybackError> {
    let params = as_object(params)?;
    let kind = required_str(params, "kind")?;
    AlertKind::parse(kind).ok_or_else(|| {
        PlaybackError::validation(format!(
            "unknown alert kind '{kind}' (expected info, warning or error)"
        ))
    })
}

fn validate_system(params: &Map<String, Value>) -> Result<PlaybackSpec, PlaybackError> {
    let name = required_str(params, "name")?;
    if !SYSTEM_SOUNDS.contains(&name) {
        return Err(PlaybackError::validation(format!(
            "unknown system sound '{name}' (available: {})",
            SYSTEM_SOUNDS.join(", ")
        )));
    }
    Ok(PlaybackSpec::system(name))
}

fn validate_speech(params: &Map<String, Value>) -> Result<PlaybackSpec, PlaybackError> {
    let text = required_str(params, "text")?;
    if text.trim().is_empty() {
        return Err(PlaybackError::validation("'text' must not be empty"));
    }

    let chars = text.chars().count();
    if chars > MAX_SPEECH_CHARS {
        return Err(PlaybackError::validation(format!(
            "'text' is {chars} characters, limit is {MAX_SPEECH_CHARS}"
        )));
    }

    let voice = match optional_str(params, "voice")? {
        Some(v) if VOICES.contains(&v) => Some(v.to_string()),
        Some(v) => {
            warn!(voice = %v, "Unknown voice requested, falling back to default voice");
            None
        }
        None => None,
    };

    Ok(PlaybackSpec::speech(text, voice))
}

fn validate_file(params: &Map<String, Value>) -> Result<PlaybackSpec, PlaybackError> {
    let path = required_str(params, "path")?;
    if path.is_empty() {
        return Err(PlaybackError::validation("'path' must not be empty"));
    }
    if !Path::new(path).is_absolute() {
        return Err(PlaybackError::validation(format!(
            "'path' must be absolute, got '{path}'"
        )));
    }
    Ok(PlaybackSpec::file(path))
}

fn as_object(params: &Value) -> Result<&Map<String, Value>, PlaybackError> {
    params
        .as_object()
        .ok_or_else(|| PlaybackError::validation("parameters must be an object"))
}

/// A string field that may be absent or `null`, but not another type.
fn optional_str<'a>(
    params: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, PlaybackError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(PlaybackError::validation(format!(
            "'{key}' must be a string"
        ))),
    }
}

fn required_str<'a>(params: &'a Map<String, Value>, key: &str) -> Result<&'a str, PlaybackError> {
    optional_str(params, key)?
        .ok_or_else(|| PlaybackError::validation(format!("missing '{key}'")))
}
