//! `ProcessSupervisor` implementation on top of `tokio::process`.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use chime_core::ports::{ProcessInvocation, ProcessOutcome, ProcessSupervisor};
use tokio::process::Command;
use tracing::{debug, warn};

use super::shutdown::shutdown_child;
use super::stream::spawn_stream_reader;

/// Runs playback processes directly (never through a shell).
///
/// The child's exit is raced against the timeout with
/// `tokio::time::timeout`; whichever completes first decides the outcome
/// and the other is dropped. The child is spawned with `kill_on_drop`, so
/// abandoning the `run` future also kills it.
#[derive(Debug, Clone)]
pub struct TokioProcessSupervisor {
    kill_grace: Duration,
}

impl TokioProcessSupervisor {
    /// Create a supervisor that waits `kill_grace` between SIGTERM and SIGKILL on timeout.
    pub const fn new(kill_grace: Duration) -> Self {
        Self { kill_grace }
    }
}

impl Default for TokioProcessSupervisor {
    fn default() -> Self {
        Self::new(Duration::from_millis(chime_core::settings::DEFAULT_KILL_GRACE_MS))
    }
}

#[async_trait]
impl ProcessSupervisor for TokioProcessSupervisor {
    async fn run(&self, invocation: &ProcessInvocation, timeout: Duration) -> ProcessOutcome {
        let program = invocation.program.display().to_string();

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(%program, error = %e, "Failed to launch playback process");
                return ProcessOutcome::LaunchFailed(e);
            }
        };
        debug!(%program, pid = ?child.id(), "Playback process started");

        // Detached: the reader ends when the child closes stderr
        let _stderr_reader = child
            .stderr
            .take()
            .map(|stderr| spawn_stream_reader(stderr, program.clone(), "stderr"));

        match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) if status.success() => {
                debug!(%program, "Playback process finished");
                ProcessOutcome::Success
            }
            Ok(Ok(status)) => {
                debug!(%program, code = ?status.code(), "Playback process failed");
                ProcessOutcome::Failed {
                    code: status.code(),
                }
            }
            Ok(Err(e)) => {
                warn!(%program, error = %e, "Failed to wait for playback process, terminating");
                if let Err(kill_err) = shutdown_child(child, self.kill_grace).await {
                    debug!(%program, error = %kill_err, "Failed to terminate unwaitable process");
                }
                ProcessOutcome::WaitFailed(e)
            }
            Err(_) => {
                warn!(
                    %program,
                    timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    "Playback process timed out, terminating"
                );
                // Best effort: the outcome is a timeout either way
                if let Err(e) = shutdown_child(child, self.kill_grace).await {
                    debug!(%program, error = %e, "Failed to terminate timed-out process");
                }
                ProcessOutcome::TimedOut
            }
        }
    }
}
