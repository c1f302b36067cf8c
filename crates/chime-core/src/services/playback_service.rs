//! Playback orchestration.
//!
//! Every request goes through the same stages:
//! validate → admit → (resolve file metadata) → supervise the process.
//! A failure at any stage ends the request. The admission token is an RAII
//! guard, so the category is released on success, on error and when the
//! request future is dropped mid-flight.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{
    AlertKind, Category, HostAudio, PlaybackSpec, SYSTEM_SOUNDS, ToolRequest, ToolResult, VOICES,
    operations,
};
use crate::gate::ConcurrencyGate;
use crate::ports::{PlaybackError, ProcessSupervisor};
use crate::stat_cache::StatCache;
use crate::validation::{validate_alert, validate_playback};

/// Validates, admits and runs playback requests.
pub struct PlaybackService {
    gate: ConcurrencyGate,
    cache: Arc<StatCache>,
    supervisor: Arc<dyn ProcessSupervisor>,
    host: HostAudio,
    timeout: Duration,
}

impl PlaybackService {
    /// Create a service over shared gate and cache state.
    pub fn new(
        gate: ConcurrencyGate,
        cache: Arc<StatCache>,
        supervisor: Arc<dyn ProcessSupervisor>,
        host: HostAudio,
        timeout: Duration,
    ) -> Self {
        Self {
            gate,
            cache,
            supervisor,
            host,
            timeout,
        }
    }

    pub const fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    pub const fn cache(&self) -> &Arc<StatCache> {
        &self.cache
    }

    /// Handle a boundary request. Never fails: errors become error results.
    pub async fn handle(&self, request: &ToolRequest) -> ToolResult {
        let operation = request.operation.as_str();
        let result = match operation {
            operations::PLAY_ALERT => match validate_alert(&request.params) {
                Ok(kind) => self.play_alert(kind).await,
                Err(e) => Err(e),
            },
            operations::PLAY_AUDIO => self.play(&request.params).await,
            operations::LIST_SOUNDS => Ok(SYSTEM_SOUNDS.join(", ")),
            operations::LIST_VOICES => Ok(VOICES.join(", ")),
            other => {
                warn!(operation = %other, "Unknown operation");
                return ToolResult::error(format!("Unknown operation '{other}'"));
            }
        };

        match result {
            Ok(message) => ToolResult::success(message),
            Err(e) => {
                warn!(operation, kind = e.kind(), error = %e, "Playback request failed");
                ToolResult::error(e.to_string())
            }
        }
    }

    /// Validate and play an advanced request (`system`, `tts` or `file`).
    pub async fn play(&self, params: &Value) -> Result<String, PlaybackError> {
        let spec = validate_playback(params)?;
        self.execute(spec.category(), &spec).await
    }

    /// Play the system sound mapped to a simple alert kind.
    pub async fn play_alert(&self, kind: AlertKind) -> Result<String, PlaybackError> {
        let spec = PlaybackSpec::system(kind.sound_name());
        self.execute(kind.category(), &spec).await?;
        Ok(format!("Played {kind} alert"))
    }

    async fn execute(
        &self,
        category: Category,
        spec: &PlaybackSpec,
    ) -> Result<String, PlaybackError> {
        let _token = self.gate.acquire(category)?;

        if let Some(path) = spec.file_path() {
            self.cache.resolve(path).await?;
        }

        let invocation = self.host.invocation_for(spec);
        info!(
            %category,
            program = %invocation.program.display(),
            timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            "Starting playback"
        );

        self.supervisor
            .run(&invocation, self.timeout)
            .await
            .into_result(&invocation, self.timeout)?;

        Ok(spec.describe())
    }
}
