//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `tokio::process` types in any signature
//! - Process invocations are argument lists, never shell strings
//! - Filesystem access goes through `FileMetadataPort` so it can be faked

pub mod file_metadata;
pub mod process_supervisor;

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Category;

pub use file_metadata::{FileKind, FileMetadata, FileMetadataPort, SystemFileMetadata};
pub use process_supervisor::{ProcessInvocation, ProcessOutcome, ProcessSupervisor};

#[cfg(test)]
pub use process_supervisor::MockProcessSupervisor;

/// Everything that can go wrong while handling a playback request.
///
/// None of these are retried inside the core; adapters report them
/// verbatim to the caller.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Bad, missing or out-of-policy input.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Another request in the same category is still playing.
    #[error("A {category} sound is already playing")]
    AlreadyActive { category: Category },

    /// The file is missing, inaccessible or not a regular file.
    #[error("Cannot play {}: {reason}", .path.display())]
    Path { path: PathBuf, reason: String },

    /// The external program could not be started.
    #[error("Failed to launch {}: {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external program ran but reported failure.
    #[error("{} failed ({})", .program.display(), describe_exit(.code))]
    ProcessFailed { program: PathBuf, code: Option<i32> },

    /// The external program exceeded its time budget and was killed.
    #[error("{} timed out after {timeout_ms} ms", .program.display())]
    Timeout { program: PathBuf, timeout_ms: u64 },

    /// Waiting on the started program failed, so its exit status is unknown.
    #[error("Lost track of {}: {source}", .program.display())]
    Wait {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlaybackError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub fn path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Path {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Short stable name of the error kind, for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::AlreadyActive { .. } => "already_active",
            Self::Path { .. } => "path",
            Self::Launch { .. } => "launch",
            Self::ProcessFailed { .. } => "process_failed",
            Self::Timeout { .. } => "timeout",
            Self::Wait { .. } => "wait",
        }
    }
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |c| format!("exit code {c}"),
    )
}
