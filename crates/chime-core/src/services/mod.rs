//! Core services - the application's business logic layer.
//!
//! Services here are pure orchestrators over ports; they don't know about
//! concrete process or filesystem implementations.

mod playback_service;

pub use playback_service::PlaybackService;
