//! Core domain types, validation and playback orchestration for chime.
//!
//! This crate holds everything that decides *whether* and *how* a sound is
//! played: request validation, per-category admission control, the file
//! metadata cache and the orchestrating [`PlaybackService`]. Actually
//! running an external process is behind the [`ProcessSupervisor`] port,
//! implemented in `chime-runtime`.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod gate;
pub mod ports;
pub mod services;
pub mod settings;
pub mod stat_cache;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::{
    AlertKind, Category, HostAudio, MAX_SPEECH_CHARS, PlaybackSpec, SYSTEM_SOUNDS, ToolRequest,
    ToolResult, VOICES, operations,
};
pub use gate::{AdmissionToken, ConcurrencyGate};
pub use ports::{
    FileKind, FileMetadata, FileMetadataPort, PlaybackError, ProcessInvocation, ProcessOutcome,
    ProcessSupervisor, SystemFileMetadata,
};
pub use services::PlaybackService;
pub use settings::{PlaybackSettings, SettingsError, validate_settings};
pub use stat_cache::{CACHE_TTL, MAX_CACHE_SIZE, StatCache, StatCacheConfig, SweepStats};
