//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (processes, filesystem, etc.).
//!
//! # Structure
//!
//! - `playback` - Validated requests (`PlaybackSpec`) and admission categories
//! - `host` - Host platform audio conventions (`HostAudio`)
//! - `tool` - Boundary request/result shapes (`ToolRequest`, `ToolResult`)

pub mod host;
pub mod playback;
pub mod tool;

pub use host::HostAudio;
pub use playback::{
    AlertKind, Category, MAX_SPEECH_CHARS, PlaybackSpec, SYSTEM_SOUNDS, VOICES,
};
pub use tool::{ToolRequest, ToolResult, operations};
