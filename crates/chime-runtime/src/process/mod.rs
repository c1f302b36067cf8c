//! External playback process supervision.
//!
//! # Structure
//!
//! - `TokioProcessSupervisor` - Implements the core `ProcessSupervisor` port
//! - `shutdown_child` - SIGTERM → SIGKILL termination for timed-out children
//! - `spawn_stream_reader` - Forwards child stderr to tracing

pub mod shutdown;
mod stream;
mod supervisor;

pub use shutdown::shutdown_child;
pub use supervisor::TokioProcessSupervisor;
