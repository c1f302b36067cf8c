//! Process supervisor trait definition.
//!
//! This port defines how the playback service runs an external audio
//! process to completion. Implementations own the child for the whole run
//! and must race its exit against the timeout.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use super::PlaybackError;

/// An external program plus its discrete argument list.
///
/// Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInvocation {
    /// Executable name or path.
    pub program: PathBuf,
    /// Arguments, passed verbatim.
    pub args: Vec<OsString>,
}

impl ProcessInvocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }
}

/// How a supervised run ended. Exactly one per invocation.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// Exited with status 0 within the budget.
    Success,
    /// Exited with a non-zero status, or was killed by a signal (`code` is `None`).
    Failed { code: Option<i32> },
    /// The budget elapsed first; the child was terminated.
    TimedOut,
    /// The process could not be started.
    LaunchFailed(io::Error),
    /// The process started but waiting on it failed; its exit status is unknown.
    WaitFailed(io::Error),
}

impl ProcessOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Map non-success outcomes onto the playback error taxonomy.
    pub fn into_result(
        self,
        invocation: &ProcessInvocation,
        timeout: Duration,
    ) -> Result<(), PlaybackError> {
        let program = invocation.program.clone();
        match self {
            Self::Success => Ok(()),
            Self::Failed { code } => Err(PlaybackError::ProcessFailed { program, code }),
            Self::TimedOut => Err(PlaybackError::Timeout {
                program,
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
            Self::LaunchFailed(source) => Err(PlaybackError::Launch { program, source }),
            Self::WaitFailed(source) => Err(PlaybackError::Wait { program, source }),
        }
    }
}

/// Runs one external process under a wall-clock budget.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessSupervisor: Send + Sync {
    /// Launch `invocation` and wait for it, terminating it if `timeout` elapses.
    ///
    /// Dropping the returned future must also terminate the child.
    async fn run(&self, invocation: &ProcessInvocation, timeout: Duration) -> ProcessOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_arguments_discrete() {
        let inv = ProcessInvocation::new("say").arg("-v").arg("Alex").arg("a b c");
        assert_eq!(inv.args.len(), 3);
        assert_eq!(inv.args[2], OsString::from("a b c"));
    }

    #[test]
    fn outcomes_map_to_errors() {
        let inv = ProcessInvocation::new("afplay");
        let timeout = Duration::from_millis(250);

        assert!(ProcessOutcome::Success.into_result(&inv, timeout).is_ok());

        let err = ProcessOutcome::Failed { code: Some(3) }
            .into_result(&inv, timeout)
            .unwrap_err();
        assert!(matches!(err, PlaybackError::ProcessFailed { code: Some(3), .. }));

        let err = ProcessOutcome::TimedOut
            .into_result(&inv, timeout)
            .unwrap_err();
        assert!(matches!(err, PlaybackError::Timeout { timeout_ms: 250, .. }));

        let err = ProcessOutcome::LaunchFailed(io::Error::from(io::ErrorKind::NotFound))
            .into_result(&inv, timeout)
            .unwrap_err();
        assert!(matches!(err, PlaybackError::Launch { .. }));

        let err = ProcessOutcome::WaitFailed(io::Error::other("wait interrupted"))
            .into_result(&inv, timeout)
            .unwrap_err();
        assert!(matches!(err, PlaybackError::Wait { .. }));
        assert!(!err.to_string().contains("signal"));
    }
}
